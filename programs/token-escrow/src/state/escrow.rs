use anchor_lang::prelude::*;

use crate::{
    authority::{authorize, Operation},
    constants::MAX_CONDITIONS_LEN,
    errors::EscrowError,
    vault::VaultTransfer,
};

#[account]
#[derive(InitSpace, Debug, PartialEq, Default)]
pub struct Escrow {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub seed: u64,
    // MAX_CONDITIONS_LEN chars of up to 4 bytes each
    #[max_len(2000)]
    pub conditions: String,
    pub state: EscrowState,
    pub created_at: i64,
    pub funded_at: Option<i64>,
    pub timeout_at: Option<i64>,
    pub released_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub released_by: Option<Pubkey>,
    pub cancelled_by: Option<Pubkey>,
    pub arbiter: Option<Pubkey>,
    pub bump: u8,
    pub vault_bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum EscrowState {
    /// Created, vault empty.
    #[default]
    Initialized,
    /// Vault holds the full amount.
    Funded,
    /// Vault paid out to the seller.
    Released,
    /// Vault returned to the buyer, or never funded.
    Cancelled,
}

impl std::fmt::Display for EscrowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscrowState::Initialized => write!(f, "Initialized"),
            EscrowState::Funded => write!(f, "Funded"),
            EscrowState::Released => write!(f, "Released"),
            EscrowState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Terms supplied by the buyer when opening an escrow.
#[derive(Clone, Debug)]
pub struct NewEscrow {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub seed: u64,
    pub conditions: String,
    /// Seconds from creation after which anyone may release.
    pub timeout_duration: Option<i64>,
    pub bump: u8,
    pub vault_bump: u8,
}

pub fn validate_conditions(conditions: &str) -> Result<()> {
    require!(
        conditions.chars().count() <= MAX_CONDITIONS_LEN,
        EscrowError::ConditionsTooLong
    );
    Ok(())
}

// Every transition below finishes all of its checks before writing a field,
// so a returned error leaves the record untouched.
impl Escrow {
    pub fn open(&mut self, terms: NewEscrow, now: i64) -> Result<()> {
        require!(terms.amount > 0, EscrowError::InvalidAmount);
        validate_conditions(&terms.conditions)?;

        let timeout_at = match terms.timeout_duration {
            Some(duration) => {
                require!(duration > 0, EscrowError::InvalidTimeout);
                Some(now.checked_add(duration).ok_or(EscrowError::Overflow)?)
            }
            None => None,
        };

        *self = Escrow {
            buyer: terms.buyer,
            seller: terms.seller,
            mint: terms.mint,
            amount: terms.amount,
            seed: terms.seed,
            conditions: terms.conditions,
            state: EscrowState::Initialized,
            created_at: now,
            funded_at: None,
            timeout_at,
            released_at: None,
            cancelled_at: None,
            released_by: None,
            cancelled_by: None,
            arbiter: None,
            bump: terms.bump,
            vault_bump: terms.vault_bump,
        };

        Ok(())
    }

    pub fn deposit(&mut self, caller: &Pubkey, now: i64) -> Result<VaultTransfer> {
        authorize(self, caller, Operation::Deposit, now)?;

        self.state = EscrowState::Funded;
        self.funded_at = Some(now);

        Ok(VaultTransfer::Lock {
            from: self.buyer,
            amount: self.amount,
        })
    }

    pub fn set_arbiter(&mut self, caller: &Pubkey, arbiter: Pubkey, now: i64) -> Result<()> {
        authorize(self, caller, Operation::SetArbiter, now)?;
        require!(self.arbiter.is_none(), EscrowError::ArbiterAlreadySet);

        self.arbiter = Some(arbiter);
        Ok(())
    }

    pub fn update_conditions(&mut self, caller: &Pubkey, conditions: String, now: i64) -> Result<()> {
        authorize(self, caller, Operation::UpdateConditions, now)?;
        validate_conditions(&conditions)?;

        self.conditions = conditions;
        Ok(())
    }

    pub fn release(&mut self, caller: &Pubkey, now: i64) -> Result<VaultTransfer> {
        authorize(self, caller, Operation::Release, now)?;

        self.state = EscrowState::Released;
        self.released_at = Some(now);
        self.released_by = Some(*caller);

        Ok(VaultTransfer::Payout {
            to: self.seller,
            amount: self.amount,
        })
    }

    pub fn cancel(&mut self, caller: &Pubkey, now: i64) -> Result<VaultTransfer> {
        authorize(self, caller, Operation::Cancel, now)?;

        let transfer = match self.state {
            EscrowState::Funded => VaultTransfer::Payout {
                to: self.buyer,
                amount: self.amount,
            },
            _ => VaultTransfer::None,
        };

        self.state = EscrowState::Cancelled;
        self.cancelled_at = Some(now);
        self.cancelled_by = Some(*caller);

        Ok(transfer)
    }

    /// Checks that `caller` may close the record. Reclaiming the account is
    /// left to the host.
    pub fn authorize_close(&self, caller: &Pubkey, now: i64) -> Result<()> {
        authorize(self, caller, Operation::Close, now)
    }

    pub fn is_timed_out(&self, now: i64) -> bool {
        matches!(self.timeout_at, Some(deadline) if now >= deadline)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, EscrowState::Released | EscrowState::Cancelled)
    }

    /// Vault balance the record implies between operations.
    pub fn expected_vault_balance(&self) -> u64 {
        match self.state {
            EscrowState::Funded => self.amount,
            _ => 0,
        }
    }
}
