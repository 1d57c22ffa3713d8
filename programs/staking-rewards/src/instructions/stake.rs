use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{StakePosition, StakingPool};

/// Stake principal tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to stake
///
/// # Flow
/// 1. Settle the pool accumulator, then the caller's position
/// 2. Transfer principal from user to stake vault
/// 3. Increase position amount and pool total
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User staking their tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = !staking_pool.is_paused @ StakingError::PoolPaused
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's position account (created if first time)
    #[account(
        init_if_needed,
        payer = user,
        space = StakePosition::SIZE,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    if position.pool == Pubkey::default() {
        position.pool = staking_pool.key();
        position.owner = ctx.accounts.user.key();
        position.bump = ctx.bumps.position;
    }

    // Counts active stakers; a returning staker re-enters here
    if position.amount == 0 {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    // Settle before any balance moves
    staking_pool.settle(now)?;
    position.settle(staking_pool.reward_per_token_stored)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_staking_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    position.record_stake(amount, now)?;
    staking_pool.total_staked = staking_pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;

    emit!(Staked {
        pool: staking_pool.key(),
        owner: position.owner,
        amount,
        total_staked: staking_pool.total_staked,
    });

    msg!(
        "Staked {}. User total: {}, Pool total: {}",
        amount,
        position.amount,
        staking_pool.total_staked
    );

    Ok(())
}

/// Stake on behalf of another account (router entry point)
///
/// The router signs and provides the tokens; the position is credited to
/// `owner`. Withdrawal stays owner-only, so the router can never move a
/// user's principal back out.
///
#[derive(Accounts)]
pub struct StakeFor<'info> {
    /// Authorized router (signer, payer, token source)
    #[account(
        mut,
        constraint = router.key() == staking_pool.router @ StakingError::NotRouter
    )]
    pub router: Signer<'info>,

    /// CHECK: The account the position is credited to; any address the
    /// router stakes for. Never read or written directly.
    pub owner: UncheckedAccount<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.staking_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = !staking_pool.is_paused @ StakingError::PoolPaused
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Owner's position account (created if first time, rent paid by router)
    #[account(
        init_if_needed,
        payer = router,
        space = StakePosition::SIZE,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, StakePosition>,

    /// Mint of the staked principal token
    #[account(
        constraint = staking_mint.key() == staking_pool.staking_mint @ StakingError::InvalidStakingMint
    )]
    pub staking_mint: Account<'info, Mint>,

    /// Router's principal token account
    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = router
    )]
    pub router_staking_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = staking_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake_for(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    if position.pool == Pubkey::default() {
        position.pool = staking_pool.key();
        position.owner = ctx.accounts.owner.key();
        position.bump = ctx.bumps.position;
    }

    if position.amount == 0 {
        staking_pool.staker_count = staking_pool
            .staker_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
    }

    staking_pool.settle(now)?;
    position.settle(staking_pool.reward_per_token_stored)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.router_staking_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.router.to_account_info(),
            },
        ),
        amount,
    )?;

    position.record_stake(amount, now)?;
    staking_pool.total_staked = staking_pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;

    emit!(Staked {
        pool: staking_pool.key(),
        owner: position.owner,
        amount,
        total_staked: staking_pool.total_staked,
    });

    msg!(
        "Router staked {} for {}. Pool total: {}",
        amount,
        position.owner,
        staking_pool.total_staked
    );

    Ok(())
}
