use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Escrow amount must be greater than zero")]
    InvalidAmount,
    #[msg("Conditions exceed the maximum length of 500 characters")]
    ConditionsTooLong,
    #[msg("Escrow is not in a valid state for this operation")]
    InvalidState,
    #[msg("Only the buyer can fund this escrow")]
    UnauthorizedDepositor,
    #[msg("Caller is not allowed to release this escrow")]
    UnauthorizedRelease,
    #[msg("Caller is not allowed to cancel this escrow")]
    UnauthorizedCancel,
    #[msg("Only the buyer can set the arbiter")]
    UnauthorizedArbiter,
    #[msg("Only the buyer can update the conditions")]
    UnauthorizedUpdate,
    #[msg("Only the buyer can close this escrow")]
    UnauthorizedClose,
    #[msg("Arbiter has already been set for this escrow")]
    ArbiterAlreadySet,
    #[msg("Timeout duration must be positive")]
    InvalidTimeout,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Token account does not match the escrow mint or owner")]
    InvalidTokenAccount,
    #[msg("Vault balance does not match the escrow state")]
    VaultBalanceMismatch,
}
