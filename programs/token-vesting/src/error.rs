use anchor_lang::prelude::*;

#[error_code]
pub enum VestingError {
    // Timing Errors
    #[msg("Buyout window not open yet")]
    NotReady,

    // One-Shot Latch Errors
    #[msg("Buyout already executed")]
    AlreadyExecuted,

    #[msg("Schedule is not revocable")]
    NotRevocable,

    #[msg("Schedule already revoked")]
    AlreadyRevoked,

    // Construction Errors
    #[msg("Invalid schedule dates")]
    InvalidScheduleDates,

    #[msg("Invalid beneficiary")]
    InvalidBeneficiary,

    // Authorization Errors
    #[msg("Unauthorized: beneficiary signature required")]
    UnauthorizedBeneficiary,

    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    // Account Validation Errors
    #[msg("Invalid beneficiary token account")]
    InvalidBeneficiaryAccount,

    #[msg("Invalid treasury token account")]
    InvalidTreasuryAccount,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,
}
