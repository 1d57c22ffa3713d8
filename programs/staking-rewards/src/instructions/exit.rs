use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::{RewardPaid, Withdrawn};
use crate::state::{StakePosition, StakingPool};

/// Withdraw the full staked balance and harvest rewards, atomically
///
#[derive(Accounts)]
pub struct Exit<'info> {
    /// User exiting the pool
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

    /// User's principal token account
    #[account(
        mut,
        constraint = user_staking_account.mint == staking_pool.staking_mint @ StakingError::InvalidStakingMint,
        token::authority = user
    )]
    pub user_staking_account: Account<'info, TokenAccount>,

    /// User's reward token account
    #[account(
        mut,
        constraint = user_reward_account.mint == staking_pool.reward_mint @ StakingError::InvalidRewardMint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_exit(ctx: Context<Exit>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    staking_pool.settle(now)?;
    position.settle(staking_pool.reward_per_token_stored)?;

    let staked = position.amount;
    let payout = position.take_rewards()?;

    if staked > 0 {
        position.record_withdraw(staked, now)?;
        staking_pool.total_staked = staking_pool
            .total_staked
            .checked_sub(staked)
            .ok_or(StakingError::MathUnderflow)?;
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_sub(1)
            .ok_or(StakingError::MathUnderflow)?;
    }
    if payout > 0 {
        staking_pool.total_rewards_paid = staking_pool
            .total_rewards_paid
            .checked_add(payout)
            .ok_or(StakingError::MathOverflow)?;
    }

    let staking_mint_key = staking_pool.staking_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        staking_mint_key.as_ref(),
        &[staking_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    if staked > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.stake_vault.to_account_info(),
                    to: ctx.accounts.user_staking_account.to_account_info(),
                    authority: staking_pool.to_account_info(),
                },
                signer_seeds,
            ),
            staked,
        )?;

        emit!(Withdrawn {
            pool: staking_pool.key(),
            owner: position.owner,
            amount: staked,
            total_staked: staking_pool.total_staked,
        });
    }

    if payout > 0 {
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
    }

    msg!("Exited pool: withdrew {}, harvested {}", staked, payout);

    Ok(())
}
