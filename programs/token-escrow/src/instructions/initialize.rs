use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    events::EscrowCreated,
    state::{Escrow, NewEscrow},
};

#[derive(Accounts)]
#[instruction(amount: u64, seed: u64)]
pub struct InitializeEscrow<'info> {
    #[account(
        init,
        payer = buyer,
        space = 8 + Escrow::INIT_SPACE,
        seeds = [ESCROW_SEED, buyer.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump
    )]
    pub escrow: Account<'info, Escrow>,

    #[account(
        init,
        payer = buyer,
        token::mint = mint,
        token::authority = escrow,
        seeds = [VAULT_SEED, buyer.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    /// CHECK: Seller doesn't need to sign, only receives funds on release
    pub seller: UncheckedAccount<'info>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeEscrow>,
    amount: u64,
    seed: u64,
    conditions: String,
    timeout_duration: Option<i64>,
) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let buyer = &ctx.accounts.buyer;
    let seller = &ctx.accounts.seller;
    let mint = &ctx.accounts.mint;
    let clock = Clock::get()?;

    escrow.open(
        NewEscrow {
            buyer: buyer.key(),
            seller: seller.key(),
            mint: mint.key(),
            amount,
            seed,
            conditions,
            timeout_duration,
            bump: ctx.bumps.escrow,
            vault_bump: ctx.bumps.vault,
        },
        clock.unix_timestamp,
    )?;

    emit!(EscrowCreated {
        escrow: escrow.key(),
        buyer: buyer.key(),
        seller: seller.key(),
        mint: mint.key(),
        amount,
        timeout_at: escrow.timeout_at,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Escrow created: {} tokens of {} from {} to {}",
        amount,
        mint.key(),
        buyer.key(),
        seller.key()
    );
    if let Some(timeout_at) = escrow.timeout_at {
        msg!("Release opens to anyone at {}", timeout_at);
    }

    Ok(())
}
