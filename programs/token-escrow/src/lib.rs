use anchor_lang::prelude::*;

pub mod authority;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod vault;


pub use constants::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("Ea8AXe5a8RgPmoH1vpKhaQWTtyoP3rh5RhQio5h32ht7");

#[program]
pub mod token_escrow {
    use super::*;

    /// Opens an escrow owned by the signing buyer. The vault starts empty.
    pub fn initialize(
        ctx: Context<InitializeEscrow>,
        amount: u64,
        seed: u64,
        conditions: String,
        timeout_duration: Option<i64>,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, amount, seed, conditions, timeout_duration)
    }

    /// Buyer moves `amount` tokens into the vault.
    pub fn deposit(ctx: Context<Deposit>) -> Result<()> {
        instructions::deposit::handler(ctx)
    }

    pub fn set_arbiter(ctx: Context<SetArbiter>, arbiter: Pubkey) -> Result<()> {
        instructions::set_arbiter::handler(ctx, arbiter)
    }

    pub fn update_conditions(ctx: Context<UpdateConditions>, conditions: String) -> Result<()> {
        instructions::update_conditions::handler(ctx, conditions)
    }

    /// Pays the vault out to the seller.
    pub fn release(ctx: Context<Release>) -> Result<()> {
        instructions::release::handler(ctx)
    }

    /// Returns any locked tokens to the buyer.
    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        instructions::cancel::handler(ctx)
    }

    /// Reclaims the escrow and vault accounts once the escrow is settled.
    pub fn close(ctx: Context<CloseEscrow>) -> Result<()> {
        instructions::close::handler(ctx)
    }
}
