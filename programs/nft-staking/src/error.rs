use anchor_lang::prelude::*;

#[error_code]
pub enum FarmError {
    // Pool State Errors
    #[msg("Farm pool is paused")]
    PoolPaused,

    #[msg("Reward period still active")]
    RewardPeriodActive,

    // Batch Errors
    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Remaining accounts do not match the batch")]
    RemainingAccountsMismatch,

    // Item Errors
    #[msg("Item id does not fall into any configured tier")]
    UnknownTier,

    #[msg("Invalid tier table")]
    InvalidTierTable,

    #[msg("Mint is not a non-fungible item")]
    NotAnNft,

    #[msg("Item already staked by this farmer")]
    ItemAlreadyStaked,

    #[msg("Too many items deposited")]
    TooManyItems,

    #[msg("Caller is not the depositor of this item")]
    NotDepositor,

    // Amount Errors
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Provided reward would exceed the pool's reward balance")]
    RateTooHigh,

    #[msg("Rewards duration must be greater than zero")]
    ZeroDuration,

    // Authorization Errors
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Unauthorized: rewards distribution only")]
    NotRewardsDistribution,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors
    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid item mint account")]
    InvalidItemMint,

    #[msg("Invalid item token account")]
    InvalidItemTokenAccount,

    #[msg("Invalid escrow account")]
    InvalidEscrow,
}
