use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{FARMER_SEED, FARM_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::FarmError;
use crate::events::RewardPaid;
use crate::state::{FarmPool, Farmer};

/// Harvest accrued rewards
///
/// Settles the farmer against the current accumulator, pays out the
/// accrued entitlement and zeroes it. Calling with nothing accrued is a
/// safe no-op.
///
#[derive(Accounts)]
pub struct GetReward<'info> {
    /// User harvesting their rewards
    #[account(mut)]
    pub user: Signer<'info>,

    /// Farm pool
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// User's farmer account
    #[account(
        mut,
        seeds = [FARMER_SEED, farm_pool.key().as_ref(), user.key().as_ref()],
        bump = farmer.bump,
        constraint = farmer.owner == user.key() @ FarmError::InvalidAuthority
    )]
    pub farmer: Account<'info, Farmer>,

    /// Mint of the reward token
    #[account(
        constraint = reward_mint.key() == farm_pool.reward_mint @ FarmError::InvalidRewardMint
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
        seeds = [REWARD_VAULT_SEED, farm_pool.key().as_ref()],
        bump = farm_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = farm_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_get_reward(ctx: Context<GetReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;
    let farmer = &mut ctx.accounts.farmer;

    farm_pool.settle(now)?;
    farmer.settle(farm_pool.reward_per_token_stored)?;

    let payout = farmer.take_rewards()?;
    if payout == 0 {
        msg!("No rewards accrued");
        return Ok(());
    }

    farm_pool.total_rewards_paid = farm_pool
        .total_rewards_paid
        .checked_add(payout)
        .ok_or(FarmError::MathOverflow)?;

    let reward_mint_key = farm_pool.reward_mint;
    let seeds = &[FARM_POOL_SEED, reward_mint_key.as_ref(), &[farm_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.user_reward_account.to_account_info(),
                authority: farm_pool.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;

    emit!(RewardPaid {
        pool: farm_pool.key(),
        owner: farmer.owner,
        amount: payout,
    });

    msg!(
        "Paid {} rewards. Total claimed: {}",
        payout,
        farmer.rewards_claimed
    );

    Ok(())
}
