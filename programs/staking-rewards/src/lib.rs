use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("613BRiXuAEn7vibs2oAYzpGW9fXgjzDNuFMM4wPzLdY");

#[program]
pub mod staking_rewards {
    use super::*;

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `rewards_duration` - Length of one reward period in seconds
    ///
    pub fn initialize(ctx: Context<Initialize>, rewards_duration: u64) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, rewards_duration)
    }

    /// Stake principal tokens
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to stake
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount)
    }

    /// Stake on behalf of another account (router only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to stake for `owner`
    ///
    pub fn stake_for(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
        instructions::stake::handler_stake_for(ctx, amount)
    }

    /// Withdraw staked principal
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to withdraw
    ///
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Harvest accrued rewards (no-op safe when nothing accrued)
    ///
    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        instructions::get_reward::handler_get_reward(ctx)
    }

    /// Withdraw the full staked balance and harvest, atomically
    ///
    pub fn exit(ctx: Context<Exit>) -> Result<()> {
        instructions::exit::handler_exit(ctx)
    }

    /// Add a reward tranche and roll the emission period forward
    /// (rewards distribution authority only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Reward tokens to add
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

    /// Change the router authority (admin only)
    ///
    pub fn set_router(ctx: Context<SetRouter>) -> Result<()> {
        instructions::admin::set_router(ctx)
    }

    /// Pause or unpause the staking pool (admin only)
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
