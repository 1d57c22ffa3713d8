//! Pure accrual and vesting arithmetic.
//!
//! No Solana/Anchor dependencies — the on-chain programs convert `None`
//! into their typed math errors. All divisions round DOWN.

/// Fixed-point scale of the reward-per-token accumulator (18 decimals).
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Divisor applied to the unvested remainder on an OTC buyout (20% haircut).
pub const OTC_HAIRCUT_DIVISOR: u128 = 5;

/// `floor(a * b / den)` without requiring `a * b` to fit in u128.
///
/// Decomposed as `floor(a/den)*b + floor((a%den)*b/den)`, which is exact.
///
/// # Returns
/// * `None` on `den == 0` or overflow of the result
pub fn mul_div_floor(a: u128, b: u128, den: u128) -> Option<u128> {
    if den == 0 {
        return None;
    }
    let quot = a / den;
    let rem = a % den;
    quot.checked_mul(b)?
        .checked_add(rem.checked_mul(b)? / den)
}

/// Upper bound of the emission window: `min(now, period_finish)`.
pub fn last_time_reward_applicable(now: i64, period_finish: i64) -> i64 {
    now.min(period_finish)
}

/// Advance the global accumulator from `last_update` to `until`.
///
/// `stored + elapsed * rate * PRECISION / total_staked`, floor-rounded.
/// With nothing staked the accumulator holds still (no emission is owed
/// to anyone, and dividing by zero is not an option).
///
/// # Returns
/// * `None` if `until < last_update` or on overflow
pub fn reward_per_token(
    stored: u128,
    total_staked: u128,
    last_update: i64,
    until: i64,
    reward_rate: u128,
) -> Option<u128> {
    if total_staked == 0 {
        return Some(stored);
    }
    let elapsed = u128::try_from(until.checked_sub(last_update)?).ok()?;
    let emitted = elapsed.checked_mul(reward_rate)?;
    stored.checked_add(mul_div_floor(emitted, PRECISION, total_staked)?)
}

/// Entitlement of one account against the current accumulator.
///
/// `accrued + balance * (current_rpt - paid_rpt) / PRECISION`, floor-rounded.
///
/// # Returns
/// * `None` if the accumulator ran backwards (`current < paid`) or on overflow
pub fn earned(
    balance: u128,
    current_rpt: u128,
    paid_rpt: u128,
    accrued: u128,
) -> Option<u128> {
    let delta = current_rpt.checked_sub(paid_rpt)?;
    accrued.checked_add(mul_div_floor(balance, delta, PRECISION)?)
}

/// Per-second rate for a renewed reward period.
///
/// Past `period_finish` the new pot alone sets the rate; mid-period the
/// unemitted remainder `(period_finish - now) * old_rate` folds into it so
/// a top-up never cancels already-promised emission.
///
/// # Returns
/// * `None` on `duration == 0` or overflow
pub fn next_reward_rate(
    amount: u128,
    now: i64,
    period_finish: i64,
    old_rate: u128,
    duration: u64,
) -> Option<u128> {
    if duration == 0 {
        return None;
    }
    if now >= period_finish {
        Some(amount / duration as u128)
    } else {
        let left = u128::try_from(period_finish.checked_sub(now)?).ok()?;
        let remaining = left.checked_mul(old_rate)?;
        Some(amount.checked_add(remaining)? / duration as u128)
    }
}

/// Total emission a rate promises over one period. Solvency probe for the
/// rate-too-high check.
pub fn reward_for_duration(reward_rate: u128, duration: u64) -> Option<u128> {
    reward_rate.checked_mul(duration as u128)
}

/// Linearly vested portion of `total_received` at time `at`.
///
/// 0 before `start`, everything at or after `start + duration`, pro-rata
/// floor in between.
pub fn vested_amount(
    total_received: u128,
    start: i64,
    duration: u64,
    at: i64,
) -> Option<u128> {
    if at < start {
        return Some(0);
    }
    let into = u128::try_from(at.checked_sub(start)?).ok()?;
    if duration == 0 || into >= duration as u128 {
        return Some(total_received);
    }
    mul_div_floor(total_received, into, duration as u128)
}

/// Releasable portion: vested minus already released, saturating at zero.
///
/// Saturation (rather than underflow) matters after an OTC buyout: the
/// buyout shrinks the base the vested fraction is computed from, so a
/// beneficiary who released aggressively beforehand can transiently sit
/// above the new vested curve.
pub fn releasable(
    total_received: u128,
    released: u128,
    start: i64,
    duration: u64,
    at: i64,
) -> Option<u128> {
    let vested = vested_amount(total_received, start, duration, at)?;
    Some(vested.saturating_sub(released))
}

/// Treasury payout for the one-shot OTC buyout.
///
/// The remainder is anchored to `otc_unlock`: whatever would not yet be
/// vested at that fixed checkpoint, regardless of when the buyout is
/// actually invoked. A fifth of it, floor-rounded, goes to the treasury.
pub fn otc_payout(
    total_received: u128,
    start: i64,
    duration: u64,
    otc_unlock: i64,
) -> Option<u128> {
    let vested = vested_amount(total_received, start, duration, otc_unlock)?;
    let remainder = total_received.checked_sub(vested)?;
    Some(remainder / OTC_HAIRCUT_DIVISOR)
}

/// Clawback-able fraction of `held` at `now`, over the accumulation window.
///
/// Everything at or before `window_start`, nothing at or after
/// `window_end`, linear floor in between.
pub fn unaccumulated_amount(
    held: u128,
    window_start: i64,
    window_end: i64,
    now: i64,
) -> Option<u128> {
    if window_end <= window_start {
        return None;
    }
    if now <= window_start {
        return Some(held);
    }
    if now >= window_end {
        return Some(0);
    }
    let left = u128::try_from(window_end.checked_sub(now)?).ok()?;
    let span = u128::try_from(window_end.checked_sub(window_start)?).ok()?;
    mul_div_floor(held, left, span)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;
    const WEEK: u64 = 7 * 24 * 3600;

    // ── mul_div_floor ──

    #[test]
    fn mul_div_exact() {
        assert_eq!(mul_div_floor(10, 10, 4), Some(25));
    }

    #[test]
    fn mul_div_rounds_down() {
        assert_eq!(mul_div_floor(7, 3, 10), Some(2)); // 2.1
        assert_eq!(mul_div_floor(1, 999_999, 1_000_000), Some(0));
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert_eq!(mul_div_floor(1, 1, 0), None);
    }

    #[test]
    fn mul_div_survives_oversized_product() {
        // a * b overflows u128, result does not: decomposition carries it.
        let a = 60_480 * E18; // a full week of emission at 0.1e18/s
        assert!(a.checked_mul(E18).is_none());
        assert_eq!(mul_div_floor(a, E18, E18), Some(a));
    }

    #[test]
    fn mul_div_matches_naive_when_in_range() {
        let cases: [(u128, u128, u128); 4] =
            [(12345, 6789, 97), (1, 1, 3), (E18, E18, 7), (999, 1000, 1001)];
        for (a, b, d) in cases {
            assert_eq!(mul_div_floor(a, b, d), Some(a * b / d));
        }
    }

    // ── reward accrual engine ──

    #[test]
    fn rate_from_fresh_period() {
        // 60480e18 over one week => 0.1e18 per second, exact.
        let rate = next_reward_rate(60_480 * E18, 0, 0, 0, WEEK).unwrap();
        assert_eq!(rate, E18 / 10);
    }

    #[test]
    fn rate_folds_unemitted_remainder() {
        // 1000 over 100s => rate 10. Topping up 1000 at t=50 folds the
        // 500 not yet emitted: (1000 + 500) / 100 = 15.
        let rate = next_reward_rate(1000, 0, 0, 0, 100).unwrap();
        assert_eq!(rate, 10);
        let renewed = next_reward_rate(1000, 50, 100, rate, 100).unwrap();
        assert_eq!(renewed, 15);
    }

    #[test]
    fn rate_zero_duration_rejected() {
        assert_eq!(next_reward_rate(1000, 0, 0, 0, 0), None);
    }

    #[test]
    fn single_staker_accrual() {
        // One account stakes 1e18 at rate 0.1e18/s: after 100s, earned
        // is exactly 10e18.
        let rate = next_reward_rate(60_480 * E18, 0, 0, 0, WEEK).unwrap();
        let rpt = reward_per_token(0, E18, 0, 100, rate).unwrap();
        assert_eq!(earned(E18, rpt, 0, 0), Some(10 * E18));
    }

    #[test]
    fn accumulator_holds_still_with_nothing_staked() {
        let rpt = reward_per_token(42, 0, 0, 1_000_000, E18).unwrap();
        assert_eq!(rpt, 42);
    }

    #[test]
    fn accumulator_rejects_time_going_backwards() {
        assert_eq!(reward_per_token(0, E18, 100, 50, 1), None);
    }

    #[test]
    fn earned_rejects_accumulator_regression() {
        assert_eq!(earned(E18, 5, 10, 0), None);
    }

    #[test]
    fn staggered_stakers_split_proportionally() {
        // Rate 0.1e18/s. A stakes 1e18 at t=0, B stakes 1e18 at t=100,
        // C stakes 2e18 at t=200; settle at t=300.
        //   [0,100):   A alone          -> A +10e18
        //   [100,200): A,B split 1:1    -> A +5e18, B +5e18
        //   [200,300): A,B,C split 1:1:2 -> A +2.5e18, B +2.5e18, C +5e18
        let rate = E18 / 10;

        let rpt1 = reward_per_token(0, E18, 0, 100, rate).unwrap();
        // B enters: checkpoint is rpt1.
        let rpt2 = reward_per_token(rpt1, 2 * E18, 100, 200, rate).unwrap();
        // C enters: checkpoint is rpt2.
        let rpt3 = reward_per_token(rpt2, 4 * E18, 200, 300, rate).unwrap();

        let a = earned(E18, rpt3, 0, 0).unwrap();
        let b = earned(E18, rpt3, rpt1, 0).unwrap();
        let c = earned(2 * E18, rpt3, rpt2, 0).unwrap();

        assert_eq!(a, 17_500_000_000_000_000_000);
        assert_eq!(b, 7_500_000_000_000_000_000);
        assert_eq!(c, 5_000_000_000_000_000_000);
        // Conservation: exactly 300s of emission, nothing created or lost.
        assert_eq!(a + b + c, 30 * E18);
    }

    #[test]
    fn earned_monotone_between_harvests() {
        let rate = E18 / 10;
        let mut rpt = 0;
        let mut last_update = 0;
        let mut last_earned = 0;
        for t in [10, 20, 35, 35, 90] {
            rpt = reward_per_token(rpt, 3 * E18, last_update, t, rate).unwrap();
            last_update = t;
            let e = earned(E18, rpt, 0, 0).unwrap();
            assert!(e >= last_earned);
            last_earned = e;
        }
    }

    #[test]
    fn harvest_twice_pays_once() {
        // After settling to the current accumulator, a second read at the
        // same instant yields zero.
        let rpt = reward_per_token(0, E18, 0, 100, E18 / 10).unwrap();
        let first = earned(E18, rpt, 0, 0).unwrap();
        assert_eq!(first, 10 * E18);
        // checkpoint moved to rpt, accrued paid out
        assert_eq!(earned(E18, rpt, rpt, 0), Some(0));
    }

    #[test]
    fn emission_stops_at_period_finish() {
        let finish = 100;
        let until = last_time_reward_applicable(1_000, finish);
        assert_eq!(until, finish);
        let rpt = reward_per_token(0, E18, 0, until, E18 / 10).unwrap();
        assert_eq!(earned(E18, rpt, 0, 0), Some(10 * E18));
    }

    #[test]
    fn reward_for_duration_probe() {
        assert_eq!(reward_for_duration(E18 / 10, WEEK), Some(60_480 * E18));
        assert_eq!(reward_for_duration(u128::MAX, 2), None);
    }

    // ── linear vesting ──

    #[test]
    fn nothing_vested_before_start() {
        assert_eq!(vested_amount(172_800 * E18, 1_000, 172_800, 999), Some(0));
    }

    #[test]
    fn vesting_is_linear() {
        // 172800e18 over 172800s: exactly 100e18 after 100s.
        let v = vested_amount(172_800 * E18, 1_000, 172_800, 1_100).unwrap();
        assert_eq!(v, 100 * E18);
    }

    #[test]
    fn everything_vested_at_end() {
        let total = 172_800 * E18;
        assert_eq!(vested_amount(total, 1_000, 172_800, 1_000 + 172_800), Some(total));
        assert_eq!(vested_amount(total, 1_000, 172_800, i64::MAX), Some(total));
    }

    #[test]
    fn releasable_subtracts_already_released() {
        let total = 172_800 * E18;
        let r = releasable(total, 40 * E18, 1_000, 172_800, 1_100).unwrap();
        assert_eq!(r, 60 * E18);
    }

    #[test]
    fn releasable_is_noop_safe() {
        // Before start and when over-released: zero, never an error.
        assert_eq!(releasable(100, 0, 1_000, 100, 0), Some(0));
        assert_eq!(releasable(100, 90, 1_000, 100, 1_050), Some(0));
    }

    #[test]
    fn released_plus_remaining_conserves_total() {
        let total = 172_800 * E18;
        let vested = vested_amount(total, 0, 172_800, 50_000).unwrap();
        let rest = total - vested;
        assert_eq!(vested + rest, total);
    }

    // ── OTC buyout ──

    #[test]
    fn otc_full_haircut_when_unlocked_at_start() {
        // Nothing vested at the unlock checkpoint: the whole pot is the
        // remainder, the treasury takes exactly a fifth.
        let total = 172_800 * E18;
        assert_eq!(otc_payout(total, 1_000, 172_800, 1_000), Some(34_560 * E18));
    }

    #[test]
    fn otc_beneficiary_keeps_rest_through_vesting() {
        let total = 172_800 * E18;
        let paid = otc_payout(total, 1_000, 172_800, 1_000).unwrap();
        let remaining = total - paid;
        assert_eq!(remaining, 138_240 * E18);
        // The reduced pot vests in full to the beneficiary.
        assert_eq!(
            vested_amount(remaining, 1_000, 172_800, 1_000 + 172_800),
            Some(remaining)
        );
    }

    #[test]
    fn otc_anchored_to_unlock_not_invocation() {
        // Unlock mid-window: remainder is the unvested half at the
        // checkpoint, whenever the call lands afterwards.
        let total = 1_000 * E18;
        let unlock = 500; // halfway through [0, 1000)
        let expected = (total / 2) / OTC_HAIRCUT_DIVISOR;
        assert_eq!(otc_payout(total, 0, 1_000, unlock), Some(expected));
    }

    #[test]
    fn otc_rounds_down() {
        assert_eq!(otc_payout(7, 100, 100, 100), Some(1)); // 7/5
    }

    // ── revocation window ──

    #[test]
    fn revoke_before_window_claws_everything() {
        assert_eq!(unaccumulated_amount(1_000, 100, 200, 50), Some(1_000));
        assert_eq!(unaccumulated_amount(1_000, 100, 200, 100), Some(1_000));
    }

    #[test]
    fn revoke_halfway_claws_half() {
        assert_eq!(unaccumulated_amount(1_000 * E18, 0, 1_000, 500), Some(500 * E18));
    }

    #[test]
    fn revoke_after_window_claws_nothing() {
        assert_eq!(unaccumulated_amount(1_000, 100, 200, 200), Some(0));
        assert_eq!(unaccumulated_amount(1_000, 100, 200, 10_000), Some(0));
    }

    #[test]
    fn revoke_rejects_degenerate_window() {
        assert_eq!(unaccumulated_amount(1_000, 200, 200, 150), None);
        assert_eq!(unaccumulated_amount(1_000, 300, 200, 150), None);
    }
}
