use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{FARM_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::FarmError;
use crate::state::{FarmPool, RarityTier};

/// Initialize a new farm pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `rewards_duration` - Length of one reward period in seconds
/// * `tiers` - Rarity tier table: ascending disjoint id ranges with
///   strictly increasing weights
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this farm pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Farm pool PDA
    #[account(
        init,
        payer = admin,
        space = FarmPool::SIZE,
        seeds = [FARM_POOL_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// Mint of the reward token
    pub reward_mint: Account<'info, Mint>,

    /// Vault to hold reward tokens
    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, farm_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = farm_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(
    ctx: Context<Initialize>,
    rewards_duration: u64,
    tiers: Vec<RarityTier>,
) -> Result<()> {
    require!(rewards_duration > 0, FarmError::ZeroDuration);

    let farm_pool = &mut ctx.accounts.farm_pool;

    farm_pool.admin = ctx.accounts.admin.key();
    farm_pool.rewards_distribution = ctx.accounts.admin.key();
    farm_pool.reward_mint = ctx.accounts.reward_mint.key();
    farm_pool.reward_vault = ctx.accounts.reward_vault.key();

    farm_pool.rewards_duration = rewards_duration;
    farm_pool.period_finish = 0;
    farm_pool.reward_rate = 0;
    farm_pool.last_update_time = Clock::get()?.unix_timestamp;
    farm_pool.reward_per_token_stored = 0;
    farm_pool.total_weight = 0;
    farm_pool.farmer_count = 0;
    farm_pool.total_rewards_paid = 0;

    farm_pool.set_tiers(&tiers)?;

    farm_pool.is_paused = false;

    farm_pool.bump = ctx.bumps.farm_pool;
    farm_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Farm pool initialized: reward_mint={}, rewards_duration={}s, tiers={}",
        farm_pool.reward_mint,
        rewards_duration,
        farm_pool.tier_count
    );

    Ok(())
}
