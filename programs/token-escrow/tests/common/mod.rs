//! In-memory ledger that plays the host's part for the escrow engine: one
//! record store, one vault per record, token balances per owner, and an event
//! log. Every operation works on copies and commits only on success, the way
//! a transaction would. Payouts and close sweep the whole vault, so tokens
//! sent to a vault directly end up with the payee.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use token_escrow::{
    authority::Operation,
    errors::EscrowError,
    pda,
    state::{Escrow, NewEscrow},
    vault::VaultTransfer,
};

pub struct Ledger {
    pub mint: Pubkey,
    pub now: i64,
    records: HashMap<Pubkey, Escrow>,
    vaults: HashMap<Pubkey, u64>,
    balances: HashMap<Pubkey, u64>,
    pub events: Vec<(Pubkey, &'static str)>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            mint: Pubkey::new_unique(),
            now: 1_700_000_000,
            records: HashMap::new(),
            vaults: HashMap::new(),
            balances: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn fund(&mut self, owner: Pubkey, amount: u64) {
        *self.balances.entry(owner).or_default() += amount;
    }

    pub fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }

    pub fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub fn record(&self, escrow: &Pubkey) -> Option<&Escrow> {
        self.records.get(escrow)
    }

    pub fn vault_balance(&self, escrow: &Pubkey) -> Option<u64> {
        let record = self.records.get(escrow)?;
        let (vault, _) = pda::vault_address(&record.buyer, record.seed);
        self.vaults.get(&vault).copied()
    }

    /// A plain token transfer into the vault, outside the escrow program.
    pub fn send_to_vault(&mut self, escrow: &Pubkey, from: Pubkey, amount: u64) -> Result<()> {
        let record = self.records.get(escrow).ok_or(ErrorCode::AccountNotInitialized)?;
        let (vault, _) = pda::vault_address(&record.buyer, record.seed);

        let held = self.balances.entry(from).or_default();
        *held = held
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        *self.vaults.entry(vault).or_default() += amount;
        Ok(())
    }

    pub fn initialize(
        &mut self,
        buyer: Pubkey,
        seller: Pubkey,
        amount: u64,
        seed: u64,
        conditions: &str,
        timeout_duration: Option<i64>,
    ) -> Result<Pubkey> {
        let (address, bump) = pda::escrow_address(&buyer, seed);
        let (vault, vault_bump) = pda::vault_address(&buyer, seed);
        if self.records.contains_key(&address) {
            return Err(ErrorCode::AccountDiscriminatorAlreadySet.into());
        }

        let mut escrow = Escrow::default();
        escrow.open(
            NewEscrow {
                buyer,
                seller,
                mint: self.mint,
                amount,
                seed,
                conditions: conditions.to_string(),
                timeout_duration,
                bump,
                vault_bump,
            },
            self.now,
        )?;

        self.records.insert(address, escrow);
        self.vaults.insert(vault, 0);
        self.events.push((address, "initialize"));
        Ok(address)
    }

    pub fn deposit(&mut self, escrow: &Pubkey, caller: Pubkey) -> Result<()> {
        let now = self.now;
        self.transact(escrow, Operation::Deposit, None, |record| record.deposit(&caller, now))
    }

    pub fn set_arbiter(&mut self, escrow: &Pubkey, caller: Pubkey, arbiter: Pubkey) -> Result<()> {
        let now = self.now;
        self.transact(escrow, Operation::SetArbiter, None, |record| {
            record.set_arbiter(&caller, arbiter, now)?;
            Ok(VaultTransfer::None)
        })
    }

    pub fn update_conditions(&mut self, escrow: &Pubkey, caller: Pubkey, text: &str) -> Result<()> {
        let now = self.now;
        self.transact(escrow, Operation::UpdateConditions, None, |record| {
            record.update_conditions(&caller, text.to_string(), now)?;
            Ok(VaultTransfer::None)
        })
    }

    pub fn release(&mut self, escrow: &Pubkey, caller: Pubkey) -> Result<()> {
        let now = self.now;
        let seller = self.records.get(escrow).map(|record| record.seller);
        self.transact(escrow, Operation::Release, seller, |record| record.release(&caller, now))
    }

    pub fn cancel(&mut self, escrow: &Pubkey, caller: Pubkey) -> Result<()> {
        let now = self.now;
        let buyer = self.records.get(escrow).map(|record| record.buyer);
        self.transact(escrow, Operation::Cancel, buyer, |record| record.cancel(&caller, now))
    }

    pub fn close(&mut self, escrow: &Pubkey, caller: Pubkey) -> Result<()> {
        let record = self.records.get(escrow).ok_or(ErrorCode::AccountNotInitialized)?;
        record.authorize_close(&caller, self.now)?;

        let buyer = record.buyer;
        let (vault, _) = pda::vault_address(&record.buyer, record.seed);
        let leftover = self.vaults.remove(&vault).unwrap_or_default();
        *self.balances.entry(buyer).or_default() += leftover;

        self.records.remove(escrow);
        self.events.push((*escrow, "close"));
        Ok(())
    }

    fn transact(
        &mut self,
        escrow: &Pubkey,
        operation: Operation,
        payee: Option<Pubkey>,
        apply: impl FnOnce(&mut Escrow) -> Result<VaultTransfer>,
    ) -> Result<()> {
        let mut record = self
            .records
            .get(escrow)
            .cloned()
            .ok_or(ErrorCode::AccountNotInitialized)?;
        let (vault, _) = pda::vault_address(&record.buyer, record.seed);
        let mut vaults = self.vaults.clone();
        let mut balances = self.balances.clone();

        let transfer = apply(&mut record)?;
        if let VaultTransfer::Lock { from, amount } = transfer {
            let held = balances.entry(from).or_default();
            *held = held
                .checked_sub(amount)
                .ok_or(ProgramError::InsufficientFunds)?;
            *vaults.entry(vault).or_default() += amount;
        }

        // Release and cancel empty the vault into the payee whatever the plan.
        if let Some(payee) = payee {
            let held = vaults.insert(vault, 0).unwrap_or_default();
            require_gte!(held, transfer.amount(), EscrowError::VaultBalanceMismatch);
            *balances.entry(payee).or_default() += held;
        }

        let held = vaults.get(&vault).copied().unwrap_or_default();
        let expected = record.expected_vault_balance();
        if expected == 0 {
            require_eq!(held, 0, EscrowError::VaultBalanceMismatch);
        } else {
            require_gte!(held, expected, EscrowError::VaultBalanceMismatch);
        }

        self.records.insert(*escrow, record);
        self.vaults = vaults;
        self.balances = balances;
        self.events.push((*escrow, operation.name()));
        Ok(())
    }
}

pub struct Parties {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub arbiter: Pubkey,
    pub stranger: Pubkey,
}

impl Parties {
    pub fn new() -> Self {
        Parties {
            buyer: Pubkey::new_unique(),
            seller: Pubkey::new_unique(),
            arbiter: Pubkey::new_unique(),
            stranger: Pubkey::new_unique(),
        }
    }
}

pub fn error_code<T: std::fmt::Debug>(result: Result<T>) -> u32 {
    match result.expect_err("operation should have failed") {
        anchor_lang::error::Error::AnchorError(err) => err.error_code_number,
        other => panic!("unexpected program error {:?}", other),
    }
}

pub fn assert_escrow_error<T: std::fmt::Debug>(result: Result<T>, expected: EscrowError) {
    assert_eq!(error_code(result), u32::from(expected), "expected {:?}", expected);
}
