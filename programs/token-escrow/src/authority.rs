use anchor_lang::prelude::*;

use crate::{
    errors::EscrowError,
    state::{Escrow, EscrowState},
};

/// Operations that act on an existing escrow record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    SetArbiter,
    UpdateConditions,
    Release,
    Cancel,
    Close,
}

/// Relationship a caller can have to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Actor {
    Buyer,
    Arbiter,
    /// Any caller, once the record's deadline has passed.
    AnyoneAfterTimeout,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Deposit,
        Operation::SetArbiter,
        Operation::UpdateConditions,
        Operation::Release,
        Operation::Cancel,
        Operation::Close,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Deposit => "deposit",
            Operation::SetArbiter => "set_arbiter",
            Operation::UpdateConditions => "update_conditions",
            Operation::Release => "release",
            Operation::Cancel => "cancel",
            Operation::Close => "close",
        }
    }

    pub fn allowed_states(self) -> &'static [EscrowState] {
        match self {
            Operation::Deposit | Operation::UpdateConditions => &[EscrowState::Initialized],
            Operation::SetArbiter | Operation::Cancel => {
                &[EscrowState::Initialized, EscrowState::Funded]
            }
            Operation::Release => &[EscrowState::Funded],
            Operation::Close => &[EscrowState::Released, EscrowState::Cancelled],
        }
    }

    fn actors(self) -> &'static [Actor] {
        match self {
            Operation::Deposit
            | Operation::SetArbiter
            | Operation::UpdateConditions
            | Operation::Close => &[Actor::Buyer],
            Operation::Release => &[Actor::Buyer, Actor::Arbiter, Actor::AnyoneAfterTimeout],
            Operation::Cancel => &[Actor::Buyer, Actor::Arbiter],
        }
    }

    fn denial(self) -> EscrowError {
        match self {
            Operation::Deposit => EscrowError::UnauthorizedDepositor,
            Operation::SetArbiter => EscrowError::UnauthorizedArbiter,
            Operation::UpdateConditions => EscrowError::UnauthorizedUpdate,
            Operation::Release => EscrowError::UnauthorizedRelease,
            Operation::Cancel => EscrowError::UnauthorizedCancel,
            Operation::Close => EscrowError::UnauthorizedClose,
        }
    }
}

impl Actor {
    fn matches(self, escrow: &Escrow, caller: &Pubkey, now: i64) -> bool {
        match self {
            Actor::Buyer => escrow.buyer == *caller,
            Actor::Arbiter => escrow.arbiter.as_ref() == Some(caller),
            Actor::AnyoneAfterTimeout => escrow.is_timed_out(now),
        }
    }
}

/// Decides whether `caller` may run `operation` against `escrow` at `now`.
///
/// The state check always runs first: an operation whose precondition does
/// not hold fails with `InvalidState` whoever the caller is. Otherwise the
/// caller must match one of the operation's actors, or the
/// operation-specific `Unauthorized*` error is returned.
pub fn authorize(escrow: &Escrow, caller: &Pubkey, operation: Operation, now: i64) -> Result<()> {
    if !operation.allowed_states().contains(&escrow.state) {
        return err!(EscrowError::InvalidState);
    }

    let allowed = operation
        .actors()
        .iter()
        .any(|actor| actor.matches(escrow, caller, now));

    if allowed {
        Ok(())
    } else {
        Err(operation.denial().into())
    }
}

/// Every operation `caller` could successfully run right now.
pub fn allowed_operations(escrow: &Escrow, caller: &Pubkey, now: i64) -> Vec<Operation> {
    Operation::ALL
        .into_iter()
        .filter(|operation| authorize(escrow, caller, *operation, now).is_ok())
        .collect()
}
