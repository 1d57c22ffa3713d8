use anchor_lang::prelude::*;

use crate::constants::FARM_POOL_SEED;
use crate::error::FarmError;
use crate::events::RewardsDurationUpdated;
use crate::state::FarmPool;

// =============================================================================
// Set Rewards Duration
// =============================================================================

#[derive(Accounts)]
pub struct SetRewardsDuration<'info> {
    #[account(
        constraint = admin.key() == farm_pool.admin @ FarmError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump
    )]
    pub farm_pool: Account<'info, FarmPool>,
}

pub fn set_rewards_duration(ctx: Context<SetRewardsDuration>, rewards_duration: u64) -> Result<()> {
    require!(rewards_duration > 0, FarmError::ZeroDuration);

    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;

    // Only allowed between periods
    require!(now > farm_pool.period_finish, FarmError::RewardPeriodActive);

    farm_pool.rewards_duration = rewards_duration;

    emit!(RewardsDurationUpdated {
        pool: farm_pool.key(),
        duration: rewards_duration,
    });

    msg!("Rewards duration set to {}s", rewards_duration);

    Ok(())
}

// =============================================================================
// Set Rewards Distribution
// =============================================================================

#[derive(Accounts)]
pub struct SetRewardsDistribution<'info> {
    #[account(
        constraint = admin.key() == farm_pool.admin @ FarmError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// CHECK: New rewards distribution authority
    #[account(
        constraint = new_rewards_distribution.key() != Pubkey::default() @ FarmError::InvalidAuthority
    )]
    pub new_rewards_distribution: UncheckedAccount<'info>,
}

pub fn set_rewards_distribution(ctx: Context<SetRewardsDistribution>) -> Result<()> {
    let old = ctx.accounts.farm_pool.rewards_distribution;
    ctx.accounts.farm_pool.rewards_distribution = ctx.accounts.new_rewards_distribution.key();

    msg!(
        "Rewards distribution changed from {} to {}",
        old,
        ctx.accounts.farm_pool.rewards_distribution
    );

    Ok(())
}

// =============================================================================
// Pause Pool
// =============================================================================

#[derive(Accounts)]
pub struct PausePool<'info> {
    #[account(
        constraint = admin.key() == farm_pool.admin @ FarmError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump
    )]
    pub farm_pool: Account<'info, FarmPool>,
}

pub fn pause_pool(ctx: Context<PausePool>, paused: bool) -> Result<()> {
    ctx.accounts.farm_pool.is_paused = paused;

    msg!(
        "Farm pool {} {}",
        ctx.accounts.farm_pool.key(),
        if paused { "PAUSED" } else { "RESUMED" }
    );

    Ok(())
}

// =============================================================================
// Transfer Admin
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = admin.key() == farm_pool.admin @ FarmError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// CHECK: New admin address, validated to not be default
    #[account(
        constraint = new_admin.key() != Pubkey::default() @ FarmError::InvalidAuthority,
        constraint = new_admin.key() != admin.key() @ FarmError::InvalidAuthority
    )]
    pub new_admin: UncheckedAccount<'info>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let old_admin = ctx.accounts.farm_pool.admin;
    ctx.accounts.farm_pool.admin = ctx.accounts.new_admin.key();

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        ctx.accounts.new_admin.key()
    );

    Ok(())
}
