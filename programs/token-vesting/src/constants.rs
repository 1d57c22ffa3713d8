// PDA Seeds
pub const SCHEDULE_SEED: &[u8] = b"schedule";
pub const VESTED_ASSET_SEED: &[u8] = b"vested_asset";
pub const ASSET_VAULT_SEED: &[u8] = b"asset_vault";
