use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{ASSET_VAULT_SEED, VESTED_ASSET_SEED};
use crate::state::{VestedAsset, VestingSchedule};

/// Register a token mint with a schedule
///
/// Creates the per-mint record and its vault. Permissionless: the payer
/// only spends rent, and value can only ever leave the vault toward the
/// beneficiary or the treasury. Funding is a plain token transfer into
/// the vault afterwards.
///
#[derive(Accounts)]
pub struct RegisterAsset<'info> {
    /// Rent payer
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Schedule the asset vests under
    pub schedule: Account<'info, VestingSchedule>,

    /// Token mint of the asset
    pub mint: Account<'info, Mint>,

    /// Per-mint vesting record
    #[account(
        init,
        payer = payer,
        space = 8 + VestedAsset::INIT_SPACE,
        seeds = [VESTED_ASSET_SEED, schedule.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub vested_asset: Account<'info, VestedAsset>,

    /// Vault holding the unreleased balance
    #[account(
        init,
        payer = payer,
        seeds = [ASSET_VAULT_SEED, vested_asset.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = schedule
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_register_asset(ctx: Context<RegisterAsset>) -> Result<()> {
    let vested_asset = &mut ctx.accounts.vested_asset;
    vested_asset.schedule = ctx.accounts.schedule.key();
    vested_asset.mint = ctx.accounts.mint.key();
    vested_asset.vault = ctx.accounts.vault.key();
    vested_asset.released = 0;
    vested_asset.bump = ctx.bumps.vested_asset;
    vested_asset.vault_bump = ctx.bumps.vault;

    msg!(
        "Asset {} registered with schedule {}",
        vested_asset.mint,
        vested_asset.schedule
    );

    Ok(())
}
