use anchor_lang::prelude::*;

use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::events::RewardsDurationUpdated;
use crate::state::StakingPool;

// =============================================================================
// Set Rewards Duration
// =============================================================================

#[derive(Accounts)]
pub struct SetRewardsDuration<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn set_rewards_duration(ctx: Context<SetRewardsDuration>, rewards_duration: u64) -> Result<()> {
    require!(rewards_duration > 0, StakingError::ZeroDuration);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;

    // Changing the period length mid-emission would re-price promises
    // already made; only allowed between periods.
    require!(now > staking_pool.period_finish, StakingError::RewardPeriodActive);

    staking_pool.rewards_duration = rewards_duration;

    emit!(RewardsDurationUpdated {
        pool: staking_pool.key(),
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
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: New rewards distribution authority
    #[account(
        constraint = new_rewards_distribution.key() != Pubkey::default() @ StakingError::InvalidAuthority
    )]
    pub new_rewards_distribution: UncheckedAccount<'info>,
}

pub fn set_rewards_distribution(ctx: Context<SetRewardsDistribution>) -> Result<()> {
    let old = ctx.accounts.staking_pool.rewards_distribution;
    ctx.accounts.staking_pool.rewards_distribution = ctx.accounts.new_rewards_distribution.key();

    msg!(
        "Rewards distribution changed from {} to {}",
        old,
        ctx.accounts.staking_pool.rewards_distribution
    );

    Ok(())
}

// =============================================================================
// Set Router
// =============================================================================

#[derive(Accounts)]
pub struct SetRouter<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: New router authority
    #[account(
        constraint = new_router.key() != Pubkey::default() @ StakingError::InvalidAuthority
    )]
    pub new_router: UncheckedAccount<'info>,
}

pub fn set_router(ctx: Context<SetRouter>) -> Result<()> {
    let old = ctx.accounts.staking_pool.router;
    ctx.accounts.staking_pool.router = ctx.accounts.new_router.key();

    msg!(
        "Router changed from {} to {}",
        old,
        ctx.accounts.staking_pool.router
    );

    Ok(())
}

// =============================================================================
// Pause Pool
// =============================================================================

#[derive(Accounts)]
pub struct PausePool<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn pause_pool(ctx: Context<PausePool>, paused: bool) -> Result<()> {
    ctx.accounts.staking_pool.is_paused = paused;

    msg!(
        "Staking pool {} {}",
        ctx.accounts.staking_pool.key(),
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
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: New admin address, validated to not be default
    #[account(
        constraint = new_admin.key() != Pubkey::default() @ StakingError::InvalidAuthority,
        constraint = new_admin.key() != admin.key() @ StakingError::InvalidAuthority
    )]
    pub new_admin: UncheckedAccount<'info>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let old_admin = ctx.accounts.staking_pool.admin;
    ctx.accounts.staking_pool.admin = ctx.accounts.new_admin.key();

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        ctx.accounts.new_admin.key()
    );

    Ok(())
}
