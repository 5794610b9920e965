use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::command::{AccountAction, AccountCommand, opening_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    Received,
}

/// Entry of the account history.
///
/// Records are the only way the balance changes: applying a record moves the
/// balance and appends the record in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
    Transfer { amount: Decimal, to: String },
    Received { amount: Decimal, from: String },
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Deposit { .. } => TransactionType::Deposit,
            Self::Withdrawal { .. } => TransactionType::Withdrawal,
            Self::Transfer { .. } => TransactionType::Transfer,
            Self::Received { .. } => TransactionType::Received,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit { amount }
            | Self::Withdrawal { amount }
            | Self::Transfer { amount, .. }
            | Self::Received { amount, .. } => *amount,
        }
    }

    /// Name of the other side of a transfer.
    pub fn counterparty(&self) -> Option<&str> {
        match self {
            Self::Transfer { to, .. } => Some(to),
            Self::Received { from, .. } => Some(from),
            Self::Deposit { .. } | Self::Withdrawal { .. } => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid {action:?} amount: {amount}")]
    InvalidAmount {
        action: AccountAction,
        amount: Decimal,
    },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Invalid recipient account: {reason}")]
    InvalidRecipient { reason: String },
    #[error("Balance overflow: {balance} + {amount} exceeds the largest representable amount")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    balance: Decimal,
    history: Vec<Transaction>,
}

impl Account {
    /// Empty account, not tracked by any bank.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// Account with an opening balance. The opening balance is not a
    /// transaction, so the history starts empty.
    pub fn open(name: impl Into<String>, opening_balance: Decimal) -> Result<Self, AccountError> {
        Ok(Self {
            balance: opening_amount(opening_balance)?,
            ..Self::new(name)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// Validates the command against the current balance and returns the
    /// record that would be appended. Nothing is mutated.
    pub fn handle(&self, command: &AccountCommand) -> Result<Transaction, AccountError> {
        match command {
            AccountCommand::Deposit { amount } => {
                self.ensure_room(*amount)?;
                Ok(Transaction::Deposit { amount: *amount })
            }
            AccountCommand::Withdraw { amount } => {
                self.ensure_funds(*amount)?;
                Ok(Transaction::Withdrawal { amount: *amount })
            }
            AccountCommand::Transfer { amount, to } => {
                self.ensure_funds(*amount)?;
                Ok(Transaction::Transfer {
                    amount: *amount,
                    to: to.clone(),
                })
            }
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let transaction = AccountCommand::deposit(amount)
            .and_then(|command| self.handle(&command))
            .inspect_err(|err| self.log_rejected(AccountAction::Deposit, err))?;
        self.apply(transaction);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let transaction = AccountCommand::withdraw(amount)
            .and_then(|command| self.handle(&command))
            .inspect_err(|err| self.log_rejected(AccountAction::Withdraw, err))?;
        self.apply(transaction);
        Ok(())
    }

    /// Moves `amount` to `recipient`. Validated once, up front: either both
    /// sides get their record or neither account changes.
    pub fn transfer(
        &mut self,
        amount: Decimal,
        recipient: &mut Account,
    ) -> Result<(), AccountError> {
        let sent = AccountCommand::transfer(amount, recipient.name.as_str())
            .and_then(|command| self.handle(&command))
            .inspect_err(|err| self.log_rejected(AccountAction::Transfer, err))?;
        recipient
            .ensure_room(sent.amount())
            .inspect_err(|err| self.log_rejected(AccountAction::Transfer, err))?;
        let received = Transaction::Received {
            amount: sent.amount(),
            from: self.name.clone(),
        };
        self.apply(sent);
        recipient.apply(received);
        Ok(())
    }

    /// Transfer where sender and recipient are the same account. The balance
    /// ends where it started, but both records are appended.
    pub fn transfer_to_self(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let sent = AccountCommand::transfer(amount, self.name.as_str())
            .and_then(|command| self.handle(&command))
            .inspect_err(|err| self.log_rejected(AccountAction::Transfer, err))?;
        let received = Transaction::Received {
            amount: sent.amount(),
            from: self.name.clone(),
        };
        self.apply(sent);
        self.apply(received);
        Ok(())
    }

    fn ensure_funds(&self, requested: Decimal) -> Result<(), AccountError> {
        if requested > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested,
                available: self.balance,
            });
        }
        Ok(())
    }

    fn ensure_room(&self, amount: Decimal) -> Result<(), AccountError> {
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            });
        }
        Ok(())
    }

    /// Callers validate through `handle` and `ensure_room` first, so neither
    /// side of the arithmetic can overflow here.
    fn apply(&mut self, transaction: Transaction) {
        match &transaction {
            Transaction::Deposit { amount } | Transaction::Received { amount, .. } => {
                self.balance += *amount;
            }
            Transaction::Withdrawal { amount } | Transaction::Transfer { amount, .. } => {
                self.balance -= *amount;
            }
        }
        debug!(account = %self.name, ?transaction, balance = %self.balance, "applied");
        self.history.push(transaction);
    }

    fn log_rejected(&self, action: AccountAction, err: &AccountError) {
        debug!(account = %self.name, ?action, %err, "operation rejected");
    }
}
