use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::EscrowError,
    events::EscrowClosed,
    state::Escrow,
    vault::VaultCustody,
};

#[derive(Accounts)]
pub struct CloseEscrow<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.bump,
        has_one = buyer,
        has_one = mint,
        close = buyer,
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.buyer.as_ref(), escrow.seed.to_le_bytes().as_ref()],
        bump = escrow.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    /// Receives the rent of both the escrow and the vault
    #[account(mut)]
    pub buyer: SystemAccount<'info>,

    #[account(
        mut,
        constraint = buyer_token.mint == escrow.mint @ EscrowError::InvalidTokenAccount,
        constraint = buyer_token.owner == escrow.buyer @ EscrowError::InvalidTokenAccount,
    )]
    pub buyer_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<CloseEscrow>) -> Result<()> {
    let escrow = &ctx.accounts.escrow;
    let authority = &ctx.accounts.authority;
    let clock = Clock::get()?;

    escrow.authorize_close(&authority.key(), clock.unix_timestamp)?;

    let mut custody = VaultCustody {
        escrow,
        vault: &mut ctx.accounts.vault,
        mint: &ctx.accounts.mint,
        token_program: &ctx.accounts.token_program,
    };
    // Tokens sent straight to the vault after settlement go back to the buyer.
    let swept = custody.payout(&ctx.accounts.buyer_token, 0)?;
    custody.close(ctx.accounts.buyer.to_account_info())?;

    emit!(EscrowClosed {
        escrow: escrow.key(),
        closed_by: authority.key(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Escrow closed in state {}, rent returned to {}", escrow.state, escrow.buyer);
    if swept > 0 {
        msg!("Swept {} stray tokens from the vault", swept);
    }

    Ok(())
}
