use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::RewardAdded;
use crate::state::StakingPool;

/// Notify the pool of a new reward tranche
///
/// Settles the accumulator with the old rate, derives the new per-second
/// rate (folding any unemitted remainder of the current period), funds the
/// reward vault and rolls the period end forward.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Reward tokens to add
///
#[derive(Accounts)]
pub struct NotifyReward<'info> {
    /// Rewards distribution authority
    #[account(
        mut,
        constraint = distributor.key() == staking_pool.rewards_distribution @ StakingError::NotRewardsDistribution
    )]
    pub distributor: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = !staking_pool.is_paused @ StakingError::PoolPaused
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Mint of the reward token
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
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
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_notify_reward(ctx: Context<NotifyReward>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;

    // Close out the old rate before the new one takes over
    staking_pool.settle(now)?;

    // The vault balance after funding backs the promised emission; this
    // includes rewards from prior periods not yet claimed.
    let available = ctx
        .accounts
        .reward_vault
        .amount
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;
    staking_pool.renew_period(amount, now, available)?;

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
        pool: staking_pool.key(),
        amount,
        reward_rate: staking_pool.reward_rate,
        period_finish: staking_pool.period_finish,
    });

    msg!(
        "Reward added: {} over {}s, rate={}, period_finish={}",
        amount,
        staking_pool.rewards_duration,
        staking_pool.reward_rate,
        staking_pool.period_finish
    );

    Ok(())
}
