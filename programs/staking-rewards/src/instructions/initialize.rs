use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `rewards_duration` - Length of one reward period in seconds
///
/// # Accounts
/// * `admin` - The admin who will control this pool (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `staking_mint` - Mint of the staked principal token
/// * `reward_mint` - Mint of the reward token
/// * `stake_vault` - Vault to hold staked principal
/// * `reward_vault` - Vault to hold reward tokens
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this staking pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = admin,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Mint of the staked principal token
    pub staking_mint: Account<'info, Mint>,

    /// Mint of the reward token
    pub reward_mint: Account<'info, Mint>,

    /// Vault to hold staked principal
    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold reward tokens
    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>, rewards_duration: u64) -> Result<()> {
    require!(rewards_duration > 0, StakingError::ZeroDuration);

    let staking_pool = &mut ctx.accounts.staking_pool;

    // Roles: the admin starts out holding all of them
    staking_pool.admin = ctx.accounts.admin.key();
    staking_pool.rewards_distribution = ctx.accounts.admin.key();
    staking_pool.router = ctx.accounts.admin.key();

    staking_pool.staking_mint = ctx.accounts.staking_mint.key();
    staking_pool.reward_mint = ctx.accounts.reward_mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    staking_pool.rewards_duration = rewards_duration;
    staking_pool.period_finish = 0;
    staking_pool.reward_rate = 0;
    staking_pool.last_update_time = Clock::get()?.unix_timestamp;
    staking_pool.reward_per_token_stored = 0;
    staking_pool.total_staked = 0;
    staking_pool.staker_count = 0;
    staking_pool.total_rewards_paid = 0;

    staking_pool.is_paused = false;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: staking_mint={}, reward_mint={}, rewards_duration={}s",
        staking_pool.staking_mint,
        staking_pool.reward_mint,
        rewards_duration
    );

    Ok(())
}
