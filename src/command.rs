use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountError;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Open,
    Deposit,
    Withdrawal,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

/// Validated request against a single account.
///
/// Amounts are already known to be strictly positive, the account itself
/// only checks what depends on its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Deposit { amount: Decimal },
    Withdraw { amount: Decimal },
    Transfer { amount: Decimal, to: String },
}

/// Script row parsed into a bank operation, accounts still referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    Open { name: String, initial: Decimal },
    Deposit { account: String, amount: Decimal },
    Withdraw { account: String, amount: Decimal },
    Transfer {
        account: String,
        amount: Decimal,
        to: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount is required for {action:?}")]
    AmountRequired { action: AccountAction },
    #[error("Recipient is required for {action:?}")]
    RecipientRequired { action: AccountAction },
}

impl AccountCommand {
    pub fn deposit(amount: Decimal) -> Result<Self, AccountError> {
        Ok(Self::Deposit {
            amount: positive_amount(AccountAction::Deposit, amount)?,
        })
    }

    pub fn withdraw(amount: Decimal) -> Result<Self, AccountError> {
        Ok(Self::Withdraw {
            amount: positive_amount(AccountAction::Withdraw, amount)?,
        })
    }

    pub fn transfer(amount: Decimal, to: impl Into<String>) -> Result<Self, AccountError> {
        Ok(Self::Transfer {
            amount: positive_amount(AccountAction::Transfer, amount)?,
            to: to.into(),
        })
    }
}

impl BankCommand {
    /// Only checks that required fields are present. Amount values are checked
    /// by the bank, so a bad amount surfaces as the same [`AccountError`] a
    /// direct call would return.
    pub fn parse_command(
        kind: TransactionKind,
        account: String,
        amount: Option<Decimal>,
        to: Option<String>,
    ) -> Result<Self, CommandError> {
        let action = match kind {
            TransactionKind::Open => AccountAction::Open,
            TransactionKind::Deposit => AccountAction::Deposit,
            TransactionKind::Withdrawal => AccountAction::Withdraw,
            TransactionKind::Transfer => AccountAction::Transfer,
        };
        let amount = amount.ok_or(CommandError::AmountRequired { action })?;
        match kind {
            TransactionKind::Open => Ok(Self::Open {
                name: account,
                initial: amount,
            }),
            TransactionKind::Deposit => Ok(Self::Deposit { account, amount }),
            TransactionKind::Withdrawal => Ok(Self::Withdraw { account, amount }),
            TransactionKind::Transfer => {
                let Some(to) = to.filter(|to| !to.is_empty()) else {
                    return Err(CommandError::RecipientRequired { action });
                };
                Ok(Self::Transfer {
                    account,
                    amount,
                    to,
                })
            }
        }
    }
}

/// Deposits, withdrawals and transfers must move a strictly positive amount.
pub fn positive_amount(action: AccountAction, amount: Decimal) -> Result<Decimal, AccountError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(AccountError::InvalidAmount { action, amount })
    }
}

/// Opening balances may be zero, but never negative.
pub fn opening_amount(amount: Decimal) -> Result<Decimal, AccountError> {
    if amount >= Decimal::ZERO {
        Ok(amount)
    } else {
        Err(AccountError::InvalidAmount {
            action: AccountAction::Open,
            amount,
        })
    }
}
