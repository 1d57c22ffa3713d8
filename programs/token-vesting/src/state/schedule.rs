use anchor_lang::prelude::*;

use crate::error::VestingError;

/// One-shot latch for the discounted early-liquidity buyout.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum OtcState {
    Pending,
    Executed,
}

/// Revocation lifecycle. The accumulation window only exists on schedules
/// deployed as revocable, so a non-revocable schedule cannot carry one.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RevocationState {
    NonRevocable,
    Revocable {
        accumulation_start: i64,
        accumulation_end: i64,
    },
    Revoked,
}

/// Revocation window passed at schedule creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevocationWindow {
    pub accumulation_start: i64,
    pub accumulation_end: i64,
}

/// Single vesting schedule
/// PDA: ["schedule", beneficiary, seed]
///
/// The schedule itself never tracks inflows; whoever funds it just
/// transfers tokens into the per-asset vault. Entitlements are computed
/// from current vault balance plus everything already released.
#[account]
#[derive(InitSpace)]
pub struct VestingSchedule {
    /// Sole payee of released funds; immutable
    pub beneficiary: Pubkey,

    /// Treasury/multisig receiving buyout and revocation proceeds
    pub admin: Pubkey,

    /// Disambiguates multiple schedules per beneficiary
    pub seed: u64,

    /// Start of the linear unlock window
    pub start: i64,

    /// Length of the unlock window in seconds
    pub duration: u64,

    /// When the one-shot buyout becomes callable
    pub otc_unlock_time: i64,

    /// Buyout latch
    pub otc: OtcState,

    /// Revocation latch and window
    pub revocation: RevocationState,

    /// PDA bump seed
    pub bump: u8,
}

impl VestingSchedule {
    /// Reject malformed timing at deployment; checked once, not per call.
    pub fn validate_dates(
        start: i64,
        duration: u64,
        otc_unlock_time: i64,
        window: Option<&RevocationWindow>,
    ) -> Result<()> {
        require!(duration > 0, VestingError::InvalidScheduleDates);
        require!(otc_unlock_time >= start, VestingError::InvalidScheduleDates);
        if let Some(w) = window {
            require!(
                w.accumulation_start < w.accumulation_end && w.accumulation_end <= start,
                VestingError::InvalidScheduleDates
            );
        }
        Ok(())
    }

    /// Everything the schedule has ever held of one asset: what the vault
    /// still has plus what already went out to the beneficiary.
    pub fn total_received(&self, vault_balance: u64, released: u64) -> Result<u64> {
        vault_balance
            .checked_add(released)
            .ok_or_else(|| VestingError::MathOverflow.into())
    }

    /// Linearly vested portion of one asset at time `at`.
    pub fn vested_amount(&self, vault_balance: u64, released: u64, at: i64) -> Result<u64> {
        let total = self.total_received(vault_balance, released)?;
        let vested = reward_math::vested_amount(total as u128, self.start, self.duration, at)
            .ok_or(VestingError::MathOverflow)?;
        u64::try_from(vested).map_err(|_| VestingError::MathOverflow.into())
    }

    /// What a release call would pay out right now. Zero before start and
    /// when the vested curve sits below what was already released.
    pub fn releasable(&self, vault_balance: u64, released: u64, at: i64) -> Result<u64> {
        let total = self.total_received(vault_balance, released)?;
        let amount = reward_math::releasable(
            total as u128,
            released as u128,
            self.start,
            self.duration,
            at,
        )
        .ok_or(VestingError::MathOverflow)?;
        u64::try_from(amount).map_err(|_| VestingError::MathOverflow.into())
    }

    /// Treasury payout of the buyout, anchored to `otc_unlock_time`
    /// no matter when it is actually invoked.
    pub fn otc_quote(&self, vault_balance: u64, released: u64) -> Result<u64> {
        let total = self.total_received(vault_balance, released)?;
        let payout = reward_math::otc_payout(
            total as u128,
            self.start,
            self.duration,
            self.otc_unlock_time,
        )
        .ok_or(VestingError::MathOverflow)?;
        u64::try_from(payout).map_err(|_| VestingError::MathOverflow.into())
    }

    /// Clawback amount at `now` for a revocable schedule.
    pub fn revocable_quote(&self, vault_balance: u64, now: i64) -> Result<u64> {
        match self.revocation {
            RevocationState::Revocable {
                accumulation_start,
                accumulation_end,
            } => {
                let amount = reward_math::unaccumulated_amount(
                    vault_balance as u128,
                    accumulation_start,
                    accumulation_end,
                    now,
                )
                .ok_or(VestingError::MathOverflow)?;
                u64::try_from(amount).map_err(|_| VestingError::MathOverflow.into())
            }
            RevocationState::NonRevocable => Err(VestingError::NotRevocable.into()),
            RevocationState::Revoked => Err(VestingError::AlreadyRevoked.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E9: u64 = 1_000_000_000;

    fn schedule(start: i64, duration: u64, otc_unlock_time: i64) -> VestingSchedule {
        VestingSchedule {
            beneficiary: Pubkey::new_unique(),
            admin: Pubkey::new_unique(),
            seed: 0,
            start,
            duration,
            otc_unlock_time,
            otc: OtcState::Pending,
            revocation: RevocationState::NonRevocable,
            bump: 255,
        }
    }

    #[test]
    fn date_validation_at_deploy() {
        let w = RevocationWindow {
            accumulation_start: 100,
            accumulation_end: 1_000,
        };
        assert!(VestingSchedule::validate_dates(1_000, 172_800, 1_000, Some(&w)).is_ok());
        // zero duration
        assert!(VestingSchedule::validate_dates(1_000, 0, 1_000, None).is_err());
        // buyout before the window opens
        assert!(VestingSchedule::validate_dates(1_000, 172_800, 999, None).is_err());
        // accumulation window past start
        let late = RevocationWindow {
            accumulation_start: 500,
            accumulation_end: 1_001,
        };
        assert!(VestingSchedule::validate_dates(1_000, 172_800, 1_000, Some(&late)).is_err());
        // empty window
        let empty = RevocationWindow {
            accumulation_start: 1_000,
            accumulation_end: 1_000,
        };
        assert!(VestingSchedule::validate_dates(1_000, 172_800, 1_000, Some(&empty)).is_err());
    }

    #[test]
    fn nothing_releasable_before_start() {
        let s = schedule(1_000, 172_800, 1_000);
        assert_eq!(s.releasable(172_800 * E9, 0, 999).unwrap(), 0);
    }

    #[test]
    fn linear_release_through_the_window() {
        let s = schedule(1_000, 172_800, 1_000);
        let funded = 172_800 * E9;
        // 100 seconds in: exactly 100 units
        assert_eq!(s.releasable(funded, 0, 1_100).unwrap(), 100 * E9);
        // partial release happened; the rest keeps vesting
        let released = 100 * E9;
        assert_eq!(
            s.releasable(funded - released, released, 1_000 + 172_800).unwrap(),
            funded - released
        );
    }

    #[test]
    fn vested_counts_released_funds_too() {
        let s = schedule(1_000, 172_800, 1_000);
        // Half released already: total received is still the full pot.
        let vested = s.vested_amount(86_400 * E9, 86_400 * E9, 1_000 + 86_400).unwrap();
        assert_eq!(vested, 86_400 * E9);
    }

    #[test]
    fn otc_takes_a_fifth_of_the_unvested_remainder() {
        let s = schedule(1_000, 172_800, 1_000);
        let funded = 172_800 * E9;
        // Unlock sits at start: nothing vested there, whole pot is the
        // remainder.
        assert_eq!(s.otc_quote(funded, 0).unwrap(), 34_560 * E9);
        // After the buyout the rest vests in full to the beneficiary.
        let rest = funded - 34_560 * E9;
        assert_eq!(s.releasable(rest, 0, 1_000 + 172_800).unwrap(), 138_240 * E9);
    }

    #[test]
    fn otc_anchor_ignores_invocation_time() {
        let mid = schedule(0, 1_000, 500);
        // Quote is the same whether asked at t=501 or t=999: anchored at 500.
        assert_eq!(mid.otc_quote(1_000 * E9, 0).unwrap(), (500 * E9) / 5);
    }

    #[test]
    fn revocable_quote_walks_the_window_down() {
        let mut s = schedule(1_000, 172_800, 1_000);
        s.revocation = RevocationState::Revocable {
            accumulation_start: 0,
            accumulation_end: 1_000,
        };
        let held = 1_000 * E9;
        assert_eq!(s.revocable_quote(held, 0).unwrap(), held);
        assert_eq!(s.revocable_quote(held, 500).unwrap(), held / 2);
        assert_eq!(s.revocable_quote(held, 1_000).unwrap(), 0);
        assert_eq!(s.revocable_quote(held, 5_000).unwrap(), 0);
    }

    #[test]
    fn revocable_quote_rejects_wrong_state() {
        let mut s = schedule(1_000, 172_800, 1_000);
        assert!(s.revocable_quote(100, 0).is_err());
        s.revocation = RevocationState::Revoked;
        assert!(s.revocable_quote(100, 0).is_err());
    }
}
