use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::RarityTier;

// Program ID - will be updated after first deploy
declare_id!("pbPPQH7jyKoSLu8QYs3rSY3YkDRXEBojKbTgnUg7NDS");

#[program]
pub mod nft_staking {
    use super::*;

    /// Initialize a new farm pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `rewards_duration` - Length of one reward period in seconds
    /// * `tiers` - Rarity tier table (id ranges to weights)
    ///
    pub fn initialize(
        ctx: Context<Initialize>,
        rewards_duration: u64,
        tiers: Vec<RarityTier>,
    ) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, rewards_duration, tiers)
    }

    /// Stake a batch of non-fungible items
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts, plus one
    ///   `[mint, owner_ata, escrow_ata]` triple per item in
    ///   remaining accounts
    /// * `item_ids` - Numeric ids of the items to deposit
    ///
    pub fn stake<'info>(
        ctx: Context<'_, '_, 'info, 'info, Stake<'info>>,
        item_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::stake::handler_stake(ctx, item_ids)
    }

    /// Withdraw a batch of staked items (original depositor only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts, plus one
    ///   `[owner_ata, escrow_ata]` pair per item in remaining accounts
    /// * `item_ids` - Numeric ids of the items to withdraw
    ///
    pub fn withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
        item_ids: Vec<u64>,
    ) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, item_ids)
    }

    /// Harvest accrued rewards (no-op safe when nothing accrued)
    ///
    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        instructions::get_reward::handler_get_reward(ctx)
    }

    /// Withdraw every staked item and harvest, atomically
    ///
    pub fn exit<'info>(ctx: Context<'_, '_, 'info, 'info, Exit<'info>>) -> Result<()> {
        instructions::exit::handler_exit(ctx)
    }

    /// Add a reward tranche and roll the emission period forward
    /// (rewards distribution authority only)
    ///
    pub fn notify_reward_amount(ctx: Context<NotifyReward>, amount: u64) -> Result<()> {
        instructions::notify_reward::handler_notify_reward(ctx, amount)
    }

    /// Change the reward period length (admin only, between periods)
    ///
    pub fn set_rewards_duration(
        ctx: Context<SetRewardsDuration>,
        rewards_duration: u64,
    ) -> Result<()> {
        instructions::admin::set_rewards_duration(ctx, rewards_duration)
    }

    /// Change the rewards distribution authority (admin only)
    ///
    pub fn set_rewards_distribution(ctx: Context<SetRewardsDistribution>) -> Result<()> {
        instructions::admin::set_rewards_distribution(ctx)
    }

    /// Pause or unpause the farm pool (admin only)
    ///
    pub fn pause_pool(ctx: Context<PausePool>, paused: bool) -> Result<()> {
        instructions::admin::pause_pool(ctx, paused)
    }

    /// Transfer admin rights to a new address (admin only)
    ///
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::admin::transfer_admin(ctx)
    }
}
