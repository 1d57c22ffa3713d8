use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Per-user staking position
/// PDA: ["position", staking_pool, owner]
#[account]
#[derive(Default)]
pub struct StakePosition {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position
    pub owner: Pubkey,

    /// Amount of principal staked
    pub amount: u64,

    /// Accumulator snapshot at the last settlement.
    /// earned = amount * (pool accumulator - this) / PRECISION + rewards
    pub reward_per_token_paid: u128,

    /// Entitlement accrued but not yet paid out
    pub rewards: u64,

    /// Total rewards claimed (lifetime)
    pub rewards_claimed: u64,

    /// Timestamp of last stake/withdraw action
    pub last_action_time: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakePosition {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // amount
        16 + // reward_per_token_paid (u128)
        8 +  // rewards
        8 +  // rewards_claimed
        8 +  // last_action_time
        1 +  // bump
        32;  // padding for future fields

    /// Entitlement against a settled pool accumulator.
    pub fn earned(&self, pool_reward_per_token: u128) -> Result<u64> {
        let total = reward_math::earned(
            self.amount as u128,
            pool_reward_per_token,
            self.reward_per_token_paid,
            self.rewards as u128,
        )
        .ok_or(StakingError::MathOverflow)?;
        u64::try_from(total).map_err(|_| StakingError::MathOverflow.into())
    }

    /// Fold the accrued delta into `rewards` and move the checkpoint.
    ///
    /// Must run after the pool settles and before `amount` changes; a stale
    /// checkpoint would accrue the new balance retroactively.
    pub fn settle(&mut self, pool_reward_per_token: u128) -> Result<()> {
        self.rewards = self.earned(pool_reward_per_token)?;
        self.reward_per_token_paid = pool_reward_per_token;
        Ok(())
    }

    /// Record a stake of `amount`, already settled.
    pub fn record_stake(&mut self, amount: u64, now: i64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.last_action_time = now;
        Ok(())
    }

    /// Record a withdrawal of `amount`, already settled.
    pub fn record_withdraw(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(self.amount >= amount, StakingError::InsufficientBalance);
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;
        self.last_action_time = now;
        Ok(())
    }

    /// Zero out the accrued entitlement and return it.
    pub fn take_rewards(&mut self) -> Result<u64> {
        let payout = self.rewards;
        self.rewards = 0;
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(payout)
            .ok_or(StakingError::MathOverflow)?;
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn settle_folds_delta_and_moves_checkpoint() {
        let mut pos = StakePosition {
            amount: 1_000_000,
            ..Default::default()
        };
        // Accumulator moved 2e18 per staked unit since the checkpoint.
        pos.settle(2 * E18).unwrap();
        assert_eq!(pos.rewards, 2_000_000);
        assert_eq!(pos.reward_per_token_paid, 2 * E18);
        // Settling again at the same accumulator pays nothing more.
        pos.settle(2 * E18).unwrap();
        assert_eq!(pos.rewards, 2_000_000);
    }

    #[test]
    fn take_rewards_zeroes_and_counts() {
        let mut pos = StakePosition {
            rewards: 500,
            ..Default::default()
        };
        assert_eq!(pos.take_rewards().unwrap(), 500);
        assert_eq!(pos.rewards, 0);
        assert_eq!(pos.rewards_claimed, 500);
        // Second take in the same instant pays zero.
        assert_eq!(pos.take_rewards().unwrap(), 0);
    }

    #[test]
    fn withdraw_beyond_balance_is_a_typed_error() {
        let mut pos = StakePosition {
            amount: 10,
            ..Default::default()
        };
        assert!(pos.record_withdraw(11, 0).is_err());
        assert_eq!(pos.amount, 10);
        pos.record_withdraw(10, 0).unwrap();
        assert_eq!(pos.amount, 0);
    }
}
