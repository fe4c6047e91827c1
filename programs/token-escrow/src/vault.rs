use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Mint, Token, TokenAccount, TransferChecked};

use crate::{constants::ESCROW_SEED, errors::EscrowError, state::Escrow};

/// Token movement a transition asks the vault to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultTransfer {
    None,
    /// Pull `amount` from the owner's token account into the vault.
    Lock { from: Pubkey, amount: u64 },
    /// Pay `amount` out of the vault to the owner's token account.
    Payout { to: Pubkey, amount: u64 },
}

impl VaultTransfer {
    pub fn amount(&self) -> u64 {
        match self {
            VaultTransfer::None => 0,
            VaultTransfer::Lock { amount, .. } | VaultTransfer::Payout { amount, .. } => *amount,
        }
    }
}

/// The token account holding one escrow's funds. Its authority is the escrow
/// PDA, so only this program can sign transfers out of it.
pub struct VaultCustody<'a, 'info> {
    pub escrow: &'a Account<'info, Escrow>,
    pub vault: &'a mut Account<'info, TokenAccount>,
    pub mint: &'a Account<'info, Mint>,
    pub token_program: &'a Program<'info, Token>,
}

impl<'a, 'info> VaultCustody<'a, 'info> {
    pub fn deposit(
        &self,
        from: &Account<'info, TokenAccount>,
        owner: &Signer<'info>,
        amount: u64,
    ) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: from.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: owner.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token::transfer_checked(cpi_ctx, amount, self.mint.decimals)
    }

    /// Pays the whole vault out to `to`. The vault must hold at least
    /// `amount`; anything above it was sent to the vault directly and goes
    /// along with the payout. Returns the number of tokens moved.
    pub fn payout(&mut self, to: &Account<'info, TokenAccount>, amount: u64) -> Result<u64> {
        let held = self.balance()?;
        require_gte!(held, amount, EscrowError::VaultBalanceMismatch);
        if held == 0 {
            return Ok(0);
        }

        let seed = self.escrow.seed.to_le_bytes();
        let bump = [self.escrow.bump];
        let seeds: &[&[u8]] = &[ESCROW_SEED, self.escrow.buyer.as_ref(), &seed, &bump];
        let signer_seeds = &[seeds];

        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.mint.to_account_info(),
            to: to.to_account_info(),
            authority: self.escrow.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token::transfer_checked(cpi_ctx, held, self.mint.decimals)?;

        Ok(held)
    }

    pub fn balance(&mut self) -> Result<u64> {
        self.vault.reload()?;
        Ok(self.vault.amount)
    }

    /// Confirms the vault holds what the escrow record says it should: at
    /// least `amount` while funded, nothing otherwise.
    pub fn settle(&mut self) -> Result<()> {
        let balance = self.balance()?;
        let expected = self.escrow.expected_vault_balance();
        if expected == 0 {
            require_eq!(balance, 0, EscrowError::VaultBalanceMismatch);
        } else {
            require_gte!(balance, expected, EscrowError::VaultBalanceMismatch);
        }
        Ok(())
    }

    /// Closes the empty vault, sending its rent to `destination`.
    pub fn close(&mut self, destination: AccountInfo<'info>) -> Result<()> {
        require_eq!(self.balance()?, 0, EscrowError::VaultBalanceMismatch);

        let seed = self.escrow.seed.to_le_bytes();
        let bump = [self.escrow.bump];
        let seeds: &[&[u8]] = &[ESCROW_SEED, self.escrow.buyer.as_ref(), &seed, &bump];
        let signer_seeds = &[seeds];

        let cpi_accounts = CloseAccount {
            account: self.vault.to_account_info(),
            destination,
            authority: self.escrow.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token::close_account(cpi_ctx)
    }
}
