use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", staking_mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Admin who can pause/unpause and update settings
    pub admin: Pubkey,

    /// Authority allowed to call notify_reward_amount
    pub rewards_distribution: Pubkey,

    /// Authority allowed to stake on behalf of other accounts
    pub router: Pubkey,

    /// Mint of the staked principal token
    pub staking_mint: Pubkey,

    /// Mint of the reward token
    pub reward_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Vault holding reward tokens to emit
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Length of one reward period in seconds
    pub rewards_duration: u64,

    /// End of the current reward period; no emission past this point
    pub period_finish: i64,

    /// Reward base-units emitted per second during the current period
    pub reward_rate: u128,

    /// Last time the global accumulator was advanced
    pub last_update_time: i64,

    /// Reward per staked unit, scaled by reward_math::PRECISION.
    /// Monotonically non-decreasing.
    pub reward_per_token_stored: u128,

    /// Total principal staked across all positions
    pub total_staked: u64,

    /// Number of open positions
    pub staker_count: u64,

    /// Lifetime rewards paid out of the pool
    pub total_rewards_paid: u64,

    /// Emergency pause flag
    pub is_paused: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // rewards_distribution
        32 + // router
        32 + // staking_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // rewards_duration
        8 +  // period_finish
        16 + // reward_rate (u128)
        8 +  // last_update_time
        16 + // reward_per_token_stored (u128)
        8 +  // total_staked
        8 +  // staker_count
        8 +  // total_rewards_paid
        1 +  // is_paused
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    /// Upper bound of the emission window at `now`.
    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        reward_math::last_time_reward_applicable(now, self.period_finish)
    }

    /// Accumulator value as of `now`, without mutating state.
    pub fn current_reward_per_token(&self, now: i64) -> Result<u128> {
        reward_math::reward_per_token(
            self.reward_per_token_stored,
            self.total_staked as u128,
            self.last_update_time,
            self.last_time_reward_applicable(now),
            self.reward_rate,
        )
        .ok_or_else(|| StakingError::MathOverflow.into())
    }

    /// Advance the global accumulator to `now`.
    ///
    /// Must be the first effect of every state-mutating instruction, before
    /// any per-position accounting or balance change.
    pub fn settle(&mut self, now: i64) -> Result<()> {
        self.reward_per_token_stored = self.current_reward_per_token(now)?;
        self.last_update_time = self.last_time_reward_applicable(now);
        Ok(())
    }

    /// Roll the reward period forward with a freshly notified `amount`.
    ///
    /// `available` is the reward balance the pool will hold once the funding
    /// transfer lands; the new rate may never promise more than that over
    /// one full period.
    pub fn renew_period(&mut self, amount: u64, now: i64, available: u64) -> Result<()> {
        let rate = reward_math::next_reward_rate(
            amount as u128,
            now,
            self.period_finish,
            self.reward_rate,
            self.rewards_duration,
        )
        .ok_or(StakingError::MathOverflow)?;

        let promised = reward_math::reward_for_duration(rate, self.rewards_duration)
            .ok_or(StakingError::MathOverflow)?;
        require!(promised <= available as u128, StakingError::RateTooHigh);

        self.reward_rate = rate;
        self.last_update_time = now;
        let duration = i64::try_from(self.rewards_duration).map_err(|_| StakingError::MathOverflow)?;
        self.period_finish = now.checked_add(duration).ok_or(StakingError::MathOverflow)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;
    const WEEK: u64 = 7 * 24 * 3600;

    fn pool_with(total_staked: u64, rate: u128, duration: u64) -> StakingPool {
        StakingPool {
            rewards_duration: duration,
            reward_rate: rate,
            period_finish: duration as i64,
            total_staked,
            ..Default::default()
        }
    }

    #[test]
    fn settle_advances_accumulator_and_clock() {
        let mut pool = pool_with(1_000_000, 500, WEEK);
        pool.settle(100).unwrap();
        assert_eq!(pool.last_update_time, 100);
        // 100s * 500/s * PRECISION / 1_000_000 staked
        assert_eq!(pool.reward_per_token_stored, 100 * 500 * E18 / 1_000_000);
    }

    #[test]
    fn settle_is_idempotent_within_one_instant() {
        let mut pool = pool_with(1_000_000, 500, WEEK);
        pool.settle(100).unwrap();
        let snapshot = pool.reward_per_token_stored;
        pool.settle(100).unwrap();
        assert_eq!(pool.reward_per_token_stored, snapshot);
    }

    #[test]
    fn settle_stops_at_period_finish() {
        let mut pool = pool_with(1_000_000, 500, 100);
        pool.settle(10_000).unwrap();
        assert_eq!(pool.last_update_time, 100);
        let stalled = pool.reward_per_token_stored;
        pool.settle(20_000).unwrap();
        assert_eq!(pool.reward_per_token_stored, stalled);
    }

    #[test]
    fn renew_rejects_rate_beyond_balance() {
        let mut pool = pool_with(0, 0, 100);
        pool.period_finish = 0;
        // 1000 over 100s needs 1000 available; 999 is not enough.
        assert!(pool.renew_period(1_000, 0, 999).is_err());
        assert!(pool.renew_period(1_000, 0, 1_000).is_ok());
        assert_eq!(pool.reward_rate, 10);
        assert_eq!(pool.period_finish, 100);
    }

    #[test]
    fn renew_mid_period_folds_remainder() {
        let mut pool = pool_with(0, 10, 100);
        pool.period_finish = 100;
        pool.renew_period(1_000, 50, 2_000).unwrap();
        // (1000 + 50*10) / 100
        assert_eq!(pool.reward_rate, 15);
        assert_eq!(pool.period_finish, 150);
        assert_eq!(pool.last_update_time, 50);
    }
}
