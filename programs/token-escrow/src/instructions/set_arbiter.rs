use anchor_lang::prelude::*;

use crate::{constants::*, events::ArbiterSet, state::Escrow};

#[derive(Accounts)]
pub struct SetArbiter<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
    )]
    pub escrow: Account<'info, Escrow>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetArbiter>, arbiter: Pubkey) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let authority = &ctx.accounts.authority;
    let clock = Clock::get()?;

    escrow.set_arbiter(&authority.key(), arbiter, clock.unix_timestamp)?;

    emit!(ArbiterSet {
        escrow: escrow.key(),
        arbiter,
        timestamp: clock.unix_timestamp,
    });

    msg!("Arbiter set: {}", arbiter);

    Ok(())
}
