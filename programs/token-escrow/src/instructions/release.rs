use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::EscrowError,
    events::EscrowReleased,
    state::Escrow,
    vault::VaultCustody,
};

#[derive(Accounts)]
pub struct Release<'info> {
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

    /// Buyer, arbiter, or anyone once the timeout has passed
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = seller_token.mint == escrow.mint @ EscrowError::InvalidTokenAccount,
        constraint = seller_token.owner == escrow.seller @ EscrowError::InvalidTokenAccount,
    )]
    pub seller_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Release>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let authority = &ctx.accounts.authority;
    let clock = Clock::get()?;

    let timed_out = escrow.is_timed_out(clock.unix_timestamp);
    let transfer = escrow.release(&authority.key(), clock.unix_timestamp)?;

    let mut custody = VaultCustody {
        escrow,
        vault: &mut ctx.accounts.vault,
        mint: &ctx.accounts.mint,
        token_program: &ctx.accounts.token_program,
    };
    let paid = custody.payout(&ctx.accounts.seller_token, transfer.amount())?;
    custody.settle()?;

    emit!(EscrowReleased {
        escrow: escrow.key(),
        released_by: authority.key(),
        seller: escrow.seller,
        amount: paid,
        timestamp: clock.unix_timestamp,
    });

    msg!("Funds released: {} tokens to {}", paid, escrow.seller);
    msg!("Released by {} (timed out: {})", authority.key(), timed_out);

    Ok(())
}
