use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::RewardPaid;
use crate::state::{StakePosition, StakingPool};

/// Harvest accrued rewards
///
/// Settles the position against the current accumulator, pays out the
/// accrued entitlement and zeroes it. Calling with nothing accrued is a
/// safe no-op.
///
#[derive(Accounts)]
pub struct GetReward<'info> {
    /// User harvesting their rewards
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's position account
    #[account(
        mut,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub position: Account<'info, StakePosition>,

    /// Mint of the reward token
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

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

pub fn handler_get_reward(ctx: Context<GetReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    staking_pool.settle(now)?;
    position.settle(staking_pool.reward_per_token_stored)?;

    let payout = position.take_rewards()?;
    if payout == 0 {
        msg!("No rewards accrued");
        return Ok(());
    }

    staking_pool.total_rewards_paid = staking_pool
        .total_rewards_paid
        .checked_add(payout)
        .ok_or(StakingError::MathOverflow)?;

    let staking_mint_key = staking_pool.staking_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        staking_mint_key.as_ref(),
        &[staking_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.user_reward_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;

    emit!(RewardPaid {
        pool: staking_pool.key(),
        owner: position.owner,
        amount: payout,
    });

    msg!(
        "Paid {} rewards. Total claimed: {}",
        payout,
        position.rewards_claimed
    );

    Ok(())
}
