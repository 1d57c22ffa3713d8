use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{FARMER_SEED, FARM_POOL_SEED, MAX_BATCH_ITEMS};
use crate::error::FarmError;
use crate::events::Withdrawn;
use crate::state::{FarmPool, Farmer};

/// Withdraw a batch of staked items
///
/// Only the original depositor holds the item records, so a foreign or
/// unknown id fails with `NotDepositor`.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `item_ids` - Ids of the items to pull out of escrow
///
/// # Remaining accounts
/// One `[owner_token_account, escrow_token_account]` pair per item, in
/// `item_ids` order.
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User withdrawing their items
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

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
    item_ids: Vec<u64>,
) -> Result<()> {
    require!(!item_ids.is_empty(), FarmError::EmptyBatch);
    require!(item_ids.len() <= MAX_BATCH_ITEMS, FarmError::BatchTooLarge);
    require!(
        ctx.remaining_accounts.len() == item_ids.len() * 2,
        FarmError::RemainingAccountsMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;
    let farmer = &mut ctx.accounts.farmer;
    let pool_key = farm_pool.key();
    let user_key = ctx.accounts.user.key();

    // Settle before any weight moves
    farm_pool.settle(now)?;
    farmer.settle(farm_pool.reward_per_token_stored)?;

    let reward_mint_key = farm_pool.reward_mint;
    let seeds = &[FARM_POOL_SEED, reward_mint_key.as_ref(), &[farm_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    let mut batch_weight: u64 = 0;
    for (i, &item_id) in item_ids.iter().enumerate() {
        let dest_info = &ctx.remaining_accounts[2 * i];
        let escrow_info = &ctx.remaining_accounts[2 * i + 1];

        let item = farmer.remove_item(item_id)?;

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

        batch_weight = batch_weight
            .checked_add(item.weight)
            .ok_or(FarmError::MathOverflow)?;
    }

    farm_pool.total_weight = farm_pool
        .total_weight
        .checked_sub(batch_weight)
        .ok_or(FarmError::MathUnderflow)?;

    if farmer.items.is_empty() {
        farm_pool.farmer_count = farm_pool
            .farmer_count
            .checked_sub(1)
            .ok_or(FarmError::MathUnderflow)?;
    }

    emit!(Withdrawn {
        pool: pool_key,
        owner: farmer.owner,
        items: item_ids.len() as u64,
        weight: batch_weight,
        total_weight: farm_pool.total_weight,
    });

    msg!(
        "Withdrew {} items ({} weight). Farmer weight: {}, Pool weight: {}",
        item_ids.len(),
        batch_weight,
        farmer.staked_weight,
        farm_pool.total_weight
    );

    Ok(())
}
