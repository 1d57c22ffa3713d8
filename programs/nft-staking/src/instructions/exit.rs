use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{FARMER_SEED, FARM_POOL_SEED, REWARD_VAULT_SEED};
use crate::error::FarmError;
use crate::events::{RewardPaid, Withdrawn};
use crate::state::{FarmPool, Farmer};

/// Withdraw every staked item and harvest rewards, atomically
///
/// # Remaining accounts
/// One `[owner_token_account, escrow_token_account]` pair per currently
/// staked item, in the order the farmer account lists them.
///
#[derive(Accounts)]
pub struct Exit<'info> {
    /// User exiting the farm
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

    /// User's reward token account
    #[account(
        mut,
        constraint = user_reward_account.mint == farm_pool.reward_mint @ FarmError::InvalidRewardMint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, farm_pool.key().as_ref()],
        bump = farm_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_exit<'info>(ctx: Context<'_, '_, 'info, 'info, Exit<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;
    let farmer = &mut ctx.accounts.farmer;
    let pool_key = farm_pool.key();
    let user_key = ctx.accounts.user.key();

    farm_pool.settle(now)?;
    farmer.settle(farm_pool.reward_per_token_stored)?;

    let items = farmer.items.clone();
    require!(
        ctx.remaining_accounts.len() == items.len() * 2,
        FarmError::RemainingAccountsMismatch
    );

    let reward_mint_key = farm_pool.reward_mint;
    let seeds = &[FARM_POOL_SEED, reward_mint_key.as_ref(), &[farm_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    let exited_weight = farmer.staked_weight;
    for (i, item) in items.iter().enumerate() {
        let dest_info = &ctx.remaining_accounts[2 * i];
        let escrow_info = &ctx.remaining_accounts[2 * i + 1];

        let dest: Account<TokenAccount> =
            Account::try_from(dest_info).map_err(|_| FarmError::InvalidItemTokenAccount)?;
        require_keys_eq!(dest.mint, item.mint, FarmError::InvalidItemTokenAccount);
        require_keys_eq!(dest.owner, user_key, FarmError::InvalidItemTokenAccount);

        let escrow: Account<TokenAccount> =
            Account::try_from(escrow_info).map_err(|_| FarmError::InvalidEscrow)?;
        let expected = get_associated_token_address(&pool_key, &item.mint);
        require_keys_eq!(escrow.key(), expected, FarmError::InvalidEscrow);

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: escrow_info.clone(),
                    to: dest_info.clone(),
                    authority: farm_pool.to_account_info(),
                },
                signer_seeds,
            ),
            1,
        )?;
    }

    if !items.is_empty() {
        farmer.items.clear();
        farmer.staked_weight = 0;

        farm_pool.total_weight = farm_pool
            .total_weight
            .checked_sub(exited_weight)
            .ok_or(FarmError::MathUnderflow)?;
        farm_pool.farmer_count = farm_pool
            .farmer_count
            .checked_sub(1)
            .ok_or(FarmError::MathUnderflow)?;

        emit!(Withdrawn {
            pool: pool_key,
            owner: farmer.owner,
            items: items.len() as u64,
            weight: exited_weight,
            total_weight: farm_pool.total_weight,
        });
    }

    let payout = farmer.take_rewards()?;
    if payout > 0 {
        farm_pool.total_rewards_paid = farm_pool
            .total_rewards_paid
            .checked_add(payout)
            .ok_or(FarmError::MathOverflow)?;

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
            pool: pool_key,
            owner: farmer.owner,
            amount: payout,
        });
    }

    msg!(
        "Exited farm: {} items ({} weight) withdrawn, harvested {}",
        items.len(),
        exited_weight,
        payout
    );

    Ok(())
}
