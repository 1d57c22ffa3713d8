use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{FARM_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::FarmError;
use crate::events::RewardAdded;
use crate::state::FarmPool;

/// Notify the farm of a new reward tranche
///
/// Settles the accumulator with the old rate, derives the new per-second
/// rate (folding any unemitted remainder of the current period), funds the
/// reward vault and rolls the period end forward.
///
#[derive(Accounts)]
pub struct NotifyReward<'info> {
    /// Rewards distribution authority
    #[account(
        mut,
        constraint = distributor.key() == farm_pool.rewards_distribution @ FarmError::NotRewardsDistribution
    )]
    pub distributor: Signer<'info>,

    /// Farm pool
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump,
        constraint = !farm_pool.is_paused @ FarmError::PoolPaused
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// Mint of the reward token
    #[account(
        constraint = reward_mint.key() == farm_pool.reward_mint @ FarmError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Distributor's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = distributor
    )]
    pub distributor_reward_account: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, farm_pool.key().as_ref()],
        bump = farm_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = farm_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_notify_reward(ctx: Context<NotifyReward>, amount: u64) -> Result<()> {
    require!(amount > 0, FarmError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;

    // Close out the old rate before the new one takes over
    farm_pool.settle(now)?;

    let available = ctx
        .accounts
        .reward_vault
        .amount
        .checked_add(amount)
        .ok_or(FarmError::MathOverflow)?;
    farm_pool.renew_period(amount, now, available)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.distributor_reward_account.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.distributor.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(RewardAdded {
        pool: farm_pool.key(),
        amount,
        reward_rate: farm_pool.reward_rate,
        period_finish: farm_pool.period_finish,
    });

    msg!(
        "Reward added: {} over {}s, rate={}, period_finish={}",
        amount,
        farm_pool.rewards_duration,
        farm_pool.reward_rate,
        farm_pool.period_finish
    );

    Ok(())
}
