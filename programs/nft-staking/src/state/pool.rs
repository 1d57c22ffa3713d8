use anchor_lang::prelude::*;

use crate::constants::MAX_TIERS;
use crate::error::FarmError;

/// One rarity tier: items whose id falls into `[first_id, last_id]` carry
/// `weight` staking units each.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct RarityTier {
    pub first_id: u64,
    pub last_id: u64,
    pub weight: u64,
}

/// Global farm pool state
/// PDA: ["farm_pool", reward_mint]
#[account]
#[derive(Default)]
pub struct FarmPool {
    /// Admin who can pause/unpause and update settings
    pub admin: Pubkey,

    /// Authority allowed to call notify_reward_amount
    pub rewards_distribution: Pubkey,

    /// Mint of the reward token
    pub reward_mint: Pubkey,

    /// Vault holding reward tokens to emit
    /// PDA: ["reward_vault", farm_pool]
    pub reward_vault: Pubkey,

    /// Length of one reward period in seconds
    pub rewards_duration: u64,

    /// End of the current reward period; no emission past this point
    pub period_finish: i64,

    /// Reward base-units emitted per second during the current period
    pub reward_rate: u128,

    /// Last time the global accumulator was advanced
    pub last_update_time: i64,

    /// Reward per staked weight unit, scaled by reward_math::PRECISION.
    /// Monotonically non-decreasing.
    pub reward_per_token_stored: u128,

    /// Sum of the weights of every deposited item
    pub total_weight: u64,

    /// Number of open farmer accounts
    pub farmer_count: u64,

    /// Lifetime rewards paid out of the pool
    pub total_rewards_paid: u64,

    /// Rarity tiers in use (first `tier_count` entries)
    pub tier_count: u8,
    pub tiers: [RarityTier; MAX_TIERS],

    /// Emergency pause flag
    pub is_paused: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl FarmPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // rewards_distribution
        32 + // reward_mint
        32 + // reward_vault
        8 +  // rewards_duration
        8 +  // period_finish
        16 + // reward_rate (u128)
        8 +  // last_update_time
        16 + // reward_per_token_stored (u128)
        8 +  // total_weight
        8 +  // farmer_count
        8 +  // total_rewards_paid
        1 +  // tier_count
        24 * MAX_TIERS + // tiers
        1 +  // is_paused
        1 +  // bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    /// Check and install the tier table: ranges ascending and disjoint,
    /// weights positive and strictly increasing with rarity.
    pub fn set_tiers(&mut self, tiers: &[RarityTier]) -> Result<()> {
        require!(
            !tiers.is_empty() && tiers.len() <= MAX_TIERS,
            FarmError::InvalidTierTable
        );
        let mut prev: Option<&RarityTier> = None;
        for tier in tiers {
            require!(tier.first_id <= tier.last_id, FarmError::InvalidTierTable);
            require!(tier.weight > 0, FarmError::InvalidTierTable);
            if let Some(p) = prev {
                require!(tier.first_id > p.last_id, FarmError::InvalidTierTable);
                require!(tier.weight > p.weight, FarmError::InvalidTierTable);
            }
            prev = Some(tier);
        }
        self.tier_count = tiers.len() as u8;
        self.tiers = [RarityTier::default(); MAX_TIERS];
        self.tiers[..tiers.len()].copy_from_slice(tiers);
        Ok(())
    }

    /// Weight of an item, by which tier range its id falls into.
    pub fn weight_for(&self, item_id: u64) -> Result<u64> {
        self.tiers[..self.tier_count as usize]
            .iter()
            .find(|t| t.first_id <= item_id && item_id <= t.last_id)
            .map(|t| t.weight)
            .ok_or_else(|| FarmError::UnknownTier.into())
    }

    /// Upper bound of the emission window at `now`.
    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        reward_math::last_time_reward_applicable(now, self.period_finish)
    }

    /// Accumulator value as of `now`, without mutating state.
    pub fn current_reward_per_token(&self, now: i64) -> Result<u128> {
        reward_math::reward_per_token(
            self.reward_per_token_stored,
            self.total_weight as u128,
            self.last_update_time,
            self.last_time_reward_applicable(now),
            self.reward_rate,
        )
        .ok_or_else(|| FarmError::MathOverflow.into())
    }

    /// Advance the global accumulator to `now`.
    ///
    /// Must be the first effect of every state-mutating instruction.
    pub fn settle(&mut self, now: i64) -> Result<()> {
        self.reward_per_token_stored = self.current_reward_per_token(now)?;
        self.last_update_time = self.last_time_reward_applicable(now);
        Ok(())
    }

    /// Roll the reward period forward with a freshly notified `amount`;
    /// `available` is the post-funding reward balance backing the rate.
    pub fn renew_period(&mut self, amount: u64, now: i64, available: u64) -> Result<()> {
        let rate = reward_math::next_reward_rate(
            amount as u128,
            now,
            self.period_finish,
            self.reward_rate,
            self.rewards_duration,
        )
        .ok_or(FarmError::MathOverflow)?;

        let promised = reward_math::reward_for_duration(rate, self.rewards_duration)
            .ok_or(FarmError::MathOverflow)?;
        require!(promised <= available as u128, FarmError::RateTooHigh);

        self.reward_rate = rate;
        self.last_update_time = now;
        let duration = i64::try_from(self.rewards_duration).map_err(|_| FarmError::MathOverflow)?;
        self.period_finish = now.checked_add(duration).ok_or(FarmError::MathOverflow)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers3() -> Vec<RarityTier> {
        vec![
            RarityTier { first_id: 1, last_id: 5_000, weight: 1 },
            RarityTier { first_id: 5_001, last_id: 9_000, weight: 3 },
            RarityTier { first_id: 9_001, last_id: 10_000, weight: 10 },
        ]
    }

    #[test]
    fn tier_lookup_by_id_range() {
        let mut pool = FarmPool::default();
        pool.set_tiers(&tiers3()).unwrap();
        assert_eq!(pool.weight_for(1).unwrap(), 1);
        assert_eq!(pool.weight_for(5_000).unwrap(), 1);
        assert_eq!(pool.weight_for(5_001).unwrap(), 3);
        assert_eq!(pool.weight_for(10_000).unwrap(), 10);
        assert!(pool.weight_for(0).is_err());
        assert!(pool.weight_for(10_001).is_err());
    }

    #[test]
    fn tier_table_must_be_ascending_and_disjoint() {
        let mut pool = FarmPool::default();
        // overlapping ranges
        assert!(pool
            .set_tiers(&[
                RarityTier { first_id: 1, last_id: 100, weight: 1 },
                RarityTier { first_id: 100, last_id: 200, weight: 2 },
            ])
            .is_err());
        // weights must increase with rarity
        assert!(pool
            .set_tiers(&[
                RarityTier { first_id: 1, last_id: 100, weight: 5 },
                RarityTier { first_id: 101, last_id: 200, weight: 5 },
            ])
            .is_err());
        // zero weight
        assert!(pool
            .set_tiers(&[RarityTier { first_id: 1, last_id: 100, weight: 0 }])
            .is_err());
        assert!(pool.set_tiers(&[]).is_err());
    }

    #[test]
    fn weighted_accrual_splits_by_weight() {
        // Two farmers, weights 1 and 3: the heavier one earns 3x.
        let mut pool = FarmPool {
            rewards_duration: 1_000,
            period_finish: 1_000,
            reward_rate: 400,
            total_weight: 4,
            ..Default::default()
        };
        pool.settle(100).unwrap();
        let rpt = pool.reward_per_token_stored;
        let light = reward_math::earned(1, rpt, 0, 0).unwrap();
        let heavy = reward_math::earned(3, rpt, 0, 0).unwrap();
        assert_eq!(light, 10_000);
        assert_eq!(heavy, 30_000);
        assert_eq!(light + heavy, 400 * 100);
    }
}
