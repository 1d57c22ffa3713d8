use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{FARMER_SEED, FARM_POOL_SEED, MAX_BATCH_ITEMS};
use crate::error::FarmError;
use crate::events::Staked;
use crate::state::{FarmPool, Farmer, StakedItem};

/// Stake a batch of non-fungible items
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `item_ids` - Numeric ids of the items; each maps to a rarity tier
///
/// # Remaining accounts
/// One `[item_mint, owner_token_account, escrow_token_account]` triple per
/// item, in `item_ids` order. The escrow must be the pool's associated
/// token account for the item mint (create it in the same transaction).
///
/// # Flow
/// 1. Settle the pool accumulator, then the caller's farmer account
/// 2. For each item: validate mint/accounts, look up the tier weight,
///    move the item into escrow, record the deposit
/// 3. Increase the pool's total weight
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User staking their items
    #[account(mut)]
    pub user: Signer<'info>,

    /// Farm pool
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm_pool.reward_mint.as_ref()],
        bump = farm_pool.bump,
        constraint = !farm_pool.is_paused @ FarmError::PoolPaused
    )]
    pub farm_pool: Account<'info, FarmPool>,

    /// User's farmer account (created if first time)
    #[account(
        init_if_needed,
        payer = user,
        space = Farmer::SIZE,
        seeds = [FARMER_SEED, farm_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub farmer: Account<'info, Farmer>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake<'info>(
    ctx: Context<'_, '_, 'info, 'info, Stake<'info>>,
    item_ids: Vec<u64>,
) -> Result<()> {
    require!(!item_ids.is_empty(), FarmError::EmptyBatch);
    require!(item_ids.len() <= MAX_BATCH_ITEMS, FarmError::BatchTooLarge);
    require!(
        ctx.remaining_accounts.len() == item_ids.len() * 3,
        FarmError::RemainingAccountsMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    let farm_pool = &mut ctx.accounts.farm_pool;
    let farmer = &mut ctx.accounts.farmer;
    let pool_key = farm_pool.key();
    let user_key = ctx.accounts.user.key();

    if farmer.pool == Pubkey::default() {
        farmer.pool = pool_key;
        farmer.owner = user_key;
        farmer.bump = ctx.bumps.farmer;
    }

    // Counts active farmers; a returning farmer re-enters here
    if farmer.items.is_empty() {
        farm_pool.farmer_count = farm_pool
            .farmer_count
            .checked_add(1)
            .ok_or(FarmError::MathOverflow)?;
    }

    // Settle before any weight moves
    farm_pool.settle(now)?;
    farmer.settle(farm_pool.reward_per_token_stored)?;

    let mut batch_weight: u64 = 0;
    for (i, &item_id) in item_ids.iter().enumerate() {
        let mint_info = &ctx.remaining_accounts[3 * i];
        let source_info = &ctx.remaining_accounts[3 * i + 1];
        let escrow_info = &ctx.remaining_accounts[3 * i + 2];

        let mint: Account<Mint> =
            Account::try_from(mint_info).map_err(|_| FarmError::InvalidItemMint)?;
        require!(mint.supply == 1 && mint.decimals == 0, FarmError::NotAnNft);

        let source: Account<TokenAccount> =
            Account::try_from(source_info).map_err(|_| FarmError::InvalidItemTokenAccount)?;
        require_keys_eq!(source.mint, mint.key(), FarmError::InvalidItemTokenAccount);
        require_keys_eq!(source.owner, user_key, FarmError::InvalidItemTokenAccount);

        let escrow: Account<TokenAccount> =
            Account::try_from(escrow_info).map_err(|_| FarmError::InvalidEscrow)?;
        let expected = get_associated_token_address(&pool_key, &mint.key());
        require_keys_eq!(escrow.key(), expected, FarmError::InvalidEscrow);
        require_keys_eq!(escrow.owner, pool_key, FarmError::InvalidEscrow);

        let weight = farm_pool.weight_for(item_id)?;

        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: source_info.clone(),
                    to: escrow_info.clone(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            1,
        )?;

        farmer.record_deposit(StakedItem {
            mint: mint.key(),
            item_id,
            weight,
        })?;
        batch_weight = batch_weight
            .checked_add(weight)
            .ok_or(FarmError::MathOverflow)?;
    }

    farm_pool.total_weight = farm_pool
        .total_weight
        .checked_add(batch_weight)
        .ok_or(FarmError::MathOverflow)?;

    emit!(Staked {
        pool: pool_key,
        owner: farmer.owner,
        items: item_ids.len() as u64,
        weight: batch_weight,
        total_weight: farm_pool.total_weight,
    });

    msg!(
        "Staked {} items ({} weight). Farmer weight: {}, Pool weight: {}",
        item_ids.len(),
        batch_weight,
        farmer.staked_weight,
        farm_pool.total_weight
    );

    Ok(())
}
