use anchor_lang::prelude::*;

use crate::{constants::*, events::ConditionsUpdated, state::Escrow};

#[derive(Accounts)]
pub struct UpdateConditions<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
    )]
    pub escrow: Account<'info, Escrow>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateConditions>, conditions: String) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let authority = &ctx.accounts.authority;
    let clock = Clock::get()?;

    escrow.update_conditions(&authority.key(), conditions, clock.unix_timestamp)?;

    emit!(ConditionsUpdated {
        escrow: escrow.key(),
        conditions: escrow.conditions.clone(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Conditions updated ({} bytes)", escrow.conditions.len());

    Ok(())
}
