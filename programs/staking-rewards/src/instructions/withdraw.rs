use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::state::{StakePosition, StakingPool};

/// Withdraw staked principal
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to withdraw
///
/// # Flow
/// 1. Settle the pool accumulator, then the caller's position
/// 2. Decrease position amount and pool total (explicit balance guard)
/// 3. Transfer principal from stake vault back to user
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User withdrawing their tokens
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

    /// Mint of the staked principal token
    #[account(
        constraint = staking_mint.key() == staking_pool.staking_mint @ StakingError::InvalidStakingMint
    )]
    pub staking_mint: Account<'info, Mint>,

    /// User's principal token account
    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user
    )]
    pub user_staking_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = staking_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);
    require!(
        ctx.accounts.position.amount >= amount,
        StakingError::InsufficientBalance
    );

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    staking_pool.settle(now)?;
    position.settle(staking_pool.reward_per_token_stored)?;

    position.record_withdraw(amount, now)?;
    staking_pool.total_staked = staking_pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::MathUnderflow)?;

    if position.amount == 0 {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_sub(1)
            .ok_or(StakingError::MathUnderflow)?;
    }

    // Principal back to the user, pool PDA signs
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
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.user_staking_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(Withdrawn {
        pool: staking_pool.key(),
        owner: position.owner,
        amount,
        total_staked: staking_pool.total_staked,
    });

    msg!(
        "Withdrew {}. User remaining: {}, Pool total: {}",
        amount,
        position.amount,
        staking_pool.total_staked
    );

    Ok(())
}
