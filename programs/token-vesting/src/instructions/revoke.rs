use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ASSET_VAULT_SEED, SCHEDULE_SEED, VESTED_ASSET_SEED};
use crate::error::VestingError;
use crate::state::{RevocationState, VestedAsset, VestingSchedule};

/// Revoke the unaccumulated fraction of a revocable schedule
///
/// The clawback shrinks linearly over the accumulation window: the whole
/// vault before the window opens, nothing once it closes (the call still
/// latches then). One-shot per schedule; composes with the buyout, since
/// both simply drain the vault the release math reads.
///
#[derive(Accounts)]
pub struct Revoke<'info> {
    /// The schedule admin (multisig)
    #[account(
        constraint = admin.key() == schedule.admin @ VestingError::UnauthorizedAdmin
    )]
    pub admin: Signer<'info>,

    /// Schedule the asset vests under
    #[account(
        mut,
        seeds = [SCHEDULE_SEED, schedule.beneficiary.as_ref(), &schedule.seed.to_le_bytes()],
        bump = schedule.bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    /// Per-mint vesting record
    #[account(
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

    /// Treasury token account of the schedule admin
    #[account(
        mut,
        constraint = treasury_token_account.owner == schedule.admin @ VestingError::InvalidTreasuryAccount,
        constraint = treasury_token_account.mint == vested_asset.mint @ VestingError::InvalidTokenMint
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_revoke(ctx: Context<Revoke>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = &mut ctx.accounts.schedule;
    let vested_asset = &ctx.accounts.vested_asset;

    // Errors with NotRevocable/AlreadyRevoked for the wrong state
    let payout = schedule.revocable_quote(ctx.accounts.vault.amount, now)?;

    // Latch before the transfer
    schedule.revocation = RevocationState::Revoked;

    if payout > 0 {
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
                    to: ctx.accounts.treasury_token_account.to_account_info(),
                    authority: schedule.to_account_info(),
                },
                signer_seeds,
            ),
            payout,
        )?;
    }

    emit!(Revoked {
        schedule: schedule.key(),
        mint: vested_asset.mint,
        amount: payout,
    });

    msg!("Revoked: {} of {} to treasury", payout, vested_asset.mint);

    Ok(())
}

#[event]
pub struct Revoked {
    pub schedule: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}
