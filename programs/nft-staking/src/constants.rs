// PDA Seeds
pub const FARM_POOL_SEED: &[u8] = b"farm_pool";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const FARMER_SEED: &[u8] = b"farmer";

/// Rarity tiers a pool can configure
pub const MAX_TIERS: usize = 8;

/// Items one farmer can have deposited at a time
pub const MAX_ITEMS_PER_FARMER: usize = 16;

/// Items accepted per stake/withdraw call
pub const MAX_BATCH_ITEMS: usize = 8;
