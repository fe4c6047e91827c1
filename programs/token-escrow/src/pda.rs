//! Deterministic addresses for escrow records and their vaults.
//!
//! Both are program-derived addresses over `[namespace, owner, seed_le]`, so
//! any client holding the buyer key and seed can locate them without asking
//! the program. Distinct `(owner, seed)` pairs map to distinct addresses up to
//! SHA-256 collision resistance; nothing stronger is claimed.

use anchor_lang::prelude::*;

use crate::constants::{ESCROW_SEED, VAULT_SEED};

pub fn derive(program_id: &Pubkey, namespace: &[u8], owner: &Pubkey, seed: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[namespace, owner.as_ref(), &seed.to_le_bytes()], program_id)
}

pub fn escrow_address(buyer: &Pubkey, seed: u64) -> (Pubkey, u8) {
    derive(&crate::ID, ESCROW_SEED, buyer, seed)
}

pub fn vault_address(buyer: &Pubkey, seed: u64) -> (Pubkey, u8) {
    derive(&crate::ID, VAULT_SEED, buyer, seed)
}
