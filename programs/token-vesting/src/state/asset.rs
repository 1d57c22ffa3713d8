use anchor_lang::prelude::*;

/// Per-mint vesting record for one schedule
/// PDA: ["vested_asset", schedule, mint]
#[account]
#[derive(InitSpace)]
pub struct VestedAsset {
    /// The schedule this asset belongs to
    pub schedule: Pubkey,

    /// Token mint of the asset
    pub mint: Pubkey,

    /// Vault holding the unreleased balance
    /// PDA: ["asset_vault", vested_asset], authority = schedule
    pub vault: Pubkey,

    /// Cumulative amount paid to the beneficiary; never decreases
    pub released: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Vault bump seed
    pub vault_bump: u8,
}
