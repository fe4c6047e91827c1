use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::EscrowError,
    events::EscrowCancelled,
    state::Escrow,
    vault::VaultCustody,
};

#[derive(Accounts)]
pub struct Cancel<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = mint,
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Buyer or arbiter
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = buyer_token.mint == escrow.mint @ EscrowError::InvalidTokenAccount,
        constraint = buyer_token.owner == escrow.buyer @ EscrowError::InvalidTokenAccount,
    )]
    pub buyer_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Cancel>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let authority = &ctx.accounts.authority;
    let clock = Clock::get()?;

    let previous = escrow.state;
    let transfer = escrow.cancel(&authority.key(), clock.unix_timestamp)?;

    let mut custody = VaultCustody {
        escrow,
        vault: &mut ctx.accounts.vault,
        mint: &ctx.accounts.mint,
        token_program: &ctx.accounts.token_program,
    };
    let refunded = custody.payout(&ctx.accounts.buyer_token, transfer.amount())?;
    custody.settle()?;

    emit!(EscrowCancelled {
        escrow: escrow.key(),
        cancelled_by: authority.key(),
        refunded,
        timestamp: clock.unix_timestamp,
    });

    msg!("Escrow cancelled from {} by {}", previous, authority.key());
    msg!("{} tokens returned to buyer {}", refunded, escrow.buyer);

    Ok(())
}
