use anchor_lang::prelude::*;

#[event]
pub struct EscrowCreated {
    pub escrow: Pubkey,
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub timeout_at: Option<i64>,
    pub timestamp: i64,
}

#[event]
pub struct EscrowFunded {
    pub escrow: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct EscrowReleased {
    pub escrow: Pubkey,
    pub released_by: Pubkey,
    pub seller: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct EscrowCancelled {
    pub escrow: Pubkey,
    pub cancelled_by: Pubkey,
    /// Tokens returned to the buyer, zero if the escrow was never funded.
    pub refunded: u64,
    pub timestamp: i64,
}

#[event]
pub struct ArbiterSet {
    pub escrow: Pubkey,
    pub arbiter: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ConditionsUpdated {
    pub escrow: Pubkey,
    pub conditions: String,
    pub timestamp: i64,
}

#[event]
pub struct EscrowClosed {
    pub escrow: Pubkey,
    pub closed_by: Pubkey,
    pub timestamp: i64,
}
