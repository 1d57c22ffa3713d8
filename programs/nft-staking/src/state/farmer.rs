use anchor_lang::prelude::*;

use crate::constants::MAX_ITEMS_PER_FARMER;
use crate::error::FarmError;

/// One deposited item: which mint sits in escrow, the numeric id its
/// weight was derived from, and that weight.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct StakedItem {
    pub mint: Pubkey,
    pub item_id: u64,
    pub weight: u64,
}

/// Per-user farming position
/// PDA: ["farmer", farm_pool, owner]
#[account]
#[derive(Default)]
pub struct Farmer {
    /// The farm pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position; sole depositor of every item below
    pub owner: Pubkey,

    /// Sum of the weights of the deposited items
    pub staked_weight: u64,

    /// Accumulator snapshot at the last settlement
    pub reward_per_token_paid: u128,

    /// Entitlement accrued but not yet paid out
    pub rewards: u64,

    /// Total rewards claimed (lifetime)
    pub rewards_claimed: u64,

    /// Items currently in escrow for this farmer
    pub items: Vec<StakedItem>,

    /// PDA bump seed
    pub bump: u8,
}

impl Farmer {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // staked_weight
        16 + // reward_per_token_paid (u128)
        8 +  // rewards
        8 +  // rewards_claimed
        4 + 48 * MAX_ITEMS_PER_FARMER + // items (vec len + entries)
        1 +  // bump
        32;  // padding for future fields

    /// Entitlement against a settled pool accumulator.
    pub fn earned(&self, pool_reward_per_token: u128) -> Result<u64> {
        let total = reward_math::earned(
            self.staked_weight as u128,
            pool_reward_per_token,
            self.reward_per_token_paid,
            self.rewards as u128,
        )
        .ok_or(FarmError::MathOverflow)?;
        u64::try_from(total).map_err(|_| FarmError::MathOverflow.into())
    }

    /// Fold the accrued delta into `rewards` and move the checkpoint.
    /// Must run after the pool settles and before the weight changes.
    pub fn settle(&mut self, pool_reward_per_token: u128) -> Result<()> {
        self.rewards = self.earned(pool_reward_per_token)?;
        self.reward_per_token_paid = pool_reward_per_token;
        Ok(())
    }

    /// Record a deposited item, already settled.
    pub fn record_deposit(&mut self, item: StakedItem) -> Result<()> {
        require!(
            self.items.len() < MAX_ITEMS_PER_FARMER,
            FarmError::TooManyItems
        );
        require!(
            !self.items.iter().any(|i| i.mint == item.mint),
            FarmError::ItemAlreadyStaked
        );
        self.items.push(item);
        self.staked_weight = self
            .staked_weight
            .checked_add(item.weight)
            .ok_or(FarmError::MathOverflow)?;
        Ok(())
    }

    /// Remove a deposited item by id; only items this farmer deposited
    /// exist here, so a miss means the caller never deposited it.
    pub fn remove_item(&mut self, item_id: u64) -> Result<StakedItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.item_id == item_id)
            .ok_or(FarmError::NotDepositor)?;
        let item = self.items.swap_remove(idx);
        self.staked_weight = self
            .staked_weight
            .checked_sub(item.weight)
            .ok_or(FarmError::MathUnderflow)?;
        Ok(item)
    }

    /// Zero out the accrued entitlement and return it.
    pub fn take_rewards(&mut self) -> Result<u64> {
        let payout = self.rewards;
        self.rewards = 0;
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(payout)
            .ok_or(FarmError::MathOverflow)?;
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, weight: u64) -> StakedItem {
        let mut mint = [0u8; 32];
        mint[..8].copy_from_slice(&id.to_le_bytes());
        StakedItem {
            mint: Pubkey::new_from_array(mint),
            item_id: id,
            weight,
        }
    }

    #[test]
    fn deposit_and_remove_track_weight() {
        let mut farmer = Farmer::default();
        farmer.record_deposit(item(1, 1)).unwrap();
        farmer.record_deposit(item(9001, 10)).unwrap();
        assert_eq!(farmer.staked_weight, 11);

        let removed = farmer.remove_item(9001).unwrap();
        assert_eq!(removed.weight, 10);
        assert_eq!(farmer.staked_weight, 1);
        assert_eq!(farmer.items.len(), 1);
    }

    #[test]
    fn removing_a_foreign_item_is_not_depositor() {
        let mut farmer = Farmer::default();
        farmer.record_deposit(item(1, 1)).unwrap();
        assert!(farmer.remove_item(2).is_err());
        assert_eq!(farmer.staked_weight, 1);
    }

    #[test]
    fn double_deposit_of_same_mint_rejected() {
        let mut farmer = Farmer::default();
        farmer.record_deposit(item(7, 3)).unwrap();
        assert!(farmer.record_deposit(item(7, 3)).is_err());
    }

    #[test]
    fn capacity_is_bounded() {
        let mut farmer = Farmer::default();
        for id in 0..MAX_ITEMS_PER_FARMER as u64 {
            farmer.record_deposit(item(id, 1)).unwrap();
        }
        assert!(farmer
            .record_deposit(item(MAX_ITEMS_PER_FARMER as u64, 1))
            .is_err());
    }
}
