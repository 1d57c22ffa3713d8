use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Pool State Errors
    #[msg("Staking pool is paused")]
    PoolPaused,

    #[msg("Reward period still active")]
    RewardPeriodActive,

    // Amount Errors
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Insufficient staked balance")]
    InsufficientBalance,

    #[msg("Provided reward would exceed the pool's reward balance")]
    RateTooHigh,

    #[msg("Rewards duration must be greater than zero")]
    ZeroDuration,

    // Authorization Errors
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Unauthorized: rewards distribution only")]
    NotRewardsDistribution,

    #[msg("Unauthorized: router only")]
    NotRouter,

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
    #[msg("Invalid staking mint")]
    InvalidStakingMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}
