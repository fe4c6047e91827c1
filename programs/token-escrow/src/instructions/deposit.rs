use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::EscrowError,
    events::EscrowFunded,
    state::Escrow,
    vault::{VaultCustody, VaultTransfer},
};

#[derive(Accounts)]
pub struct Deposit<'info> {
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

    pub depositor: Signer<'info>,

    #[account(
        mut,
        constraint = depositor_token.mint == escrow.mint @ EscrowError::InvalidTokenAccount,
        constraint = depositor_token.owner == depositor.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub depositor_token: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Deposit>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let depositor = &ctx.accounts.depositor;
    let clock = Clock::get()?;

    let transfer = escrow.deposit(&depositor.key(), clock.unix_timestamp)?;

    let mut custody = VaultCustody {
        escrow,
        vault: &mut ctx.accounts.vault,
        mint: &ctx.accounts.mint,
        token_program: &ctx.accounts.token_program,
    };
    if let VaultTransfer::Lock { amount, .. } = transfer {
        custody.deposit(&ctx.accounts.depositor_token, depositor, amount)?;
    }
    custody.settle()?;

    emit!(EscrowFunded {
        escrow: escrow.key(),
        buyer: depositor.key(),
        amount: transfer.amount(),
        timestamp: clock.unix_timestamp,
    });

    msg!("Escrow funded: {} tokens locked by {}", transfer.amount(), depositor.key());

    Ok(())
}
