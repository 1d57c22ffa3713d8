use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ASSET_VAULT_SEED, SCHEDULE_SEED, VESTED_ASSET_SEED};
use crate::error::VestingError;
use crate::state::{VestedAsset, VestingSchedule};

/// Release the vested portion of one asset to the beneficiary
///
/// Callable by anyone; funds always go to the fixed beneficiary. Nothing
/// vested (including before start) is a safe no-op.
///
#[derive(Accounts)]
pub struct Release<'info> {
    /// Anyone; pays the transaction fee, receives nothing
    pub caller: Signer<'info>,

    /// Schedule the asset vests under
    #[account(
        seeds = [SCHEDULE_SEED, schedule.beneficiary.as_ref(), &schedule.seed.to_le_bytes()],
        bump = schedule.bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    /// Per-mint vesting record
    #[account(
        mut,
        seeds = [VESTED_ASSET_SEED, schedule.key().as_ref(), vested_asset.mint.as_ref()],
        bump = vested_asset.bump
    )]
    pub vested_asset: Account<'info, VestedAsset>,

    /// Vault holding the unreleased balance
    #[account(
        mut,
        seeds = [ASSET_VAULT_SEED, vested_asset.key().as_ref()],
        bump = vested_asset.vault_bump,
        constraint = vault.mint == vested_asset.mint @ VestingError::InvalidTokenMint
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Beneficiary's token account for this asset
    #[account(
        mut,
        constraint = beneficiary_token_account.owner == schedule.beneficiary @ VestingError::InvalidBeneficiaryAccount,
        constraint = beneficiary_token_account.mint == vested_asset.mint @ VestingError::InvalidTokenMint
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_release(ctx: Context<Release>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = &ctx.accounts.schedule;
    let vested_asset = &mut ctx.accounts.vested_asset;

    let amount = schedule.releasable(ctx.accounts.vault.amount, vested_asset.released, now)?;
    if amount == 0 {
        msg!("Nothing vested to release");
        return Ok(());
    }

    vested_asset.released = vested_asset
        .released
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;

    let beneficiary_key = schedule.beneficiary;
    let seed_bytes = schedule.seed.to_le_bytes();
    let seeds = &[
        SCHEDULE_SEED,
        beneficiary_key.as_ref(),
        seed_bytes.as_ref(),
        &[schedule.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: schedule.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(TokensReleased {
        schedule: schedule.key(),
        mint: vested_asset.mint,
        amount,
        released_total: vested_asset.released,
    });

    msg!(
        "Released {} of {}. Total released: {}",
        amount,
        vested_asset.mint,
        vested_asset.released
    );

    Ok(())
}

#[event]
pub struct TokensReleased {
    pub schedule: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub released_total: u64,
}
