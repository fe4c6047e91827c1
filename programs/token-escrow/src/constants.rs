use anchor_lang::prelude::*;

#[constant]
pub const ESCROW_SEED: &[u8] = b"escrow";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

// Upper bound on the conditions text, in characters
pub const MAX_CONDITIONS_LEN: usize = 500;
