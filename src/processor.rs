use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountError},
    bank::{Bank, BankError},
    command::{BankCommand, CommandError, TransactionKind},
};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    BankErr(#[from] BankError),
    #[error("No account named `{0}`")]
    UnknownAccount(String),
}

/// Runs script operations, where accounts are referenced by name.
///
/// Bank is the only implementation, the trait marks the boundary between
/// row parsing and the ledger itself.
pub trait CommandProcessor {
    fn process_command(
        &mut self,
        kind: TransactionKind,
        account: String,
        amount: Option<Decimal>,
        to: Option<String>,
    ) -> Result<(), ProcessError>;
}

impl CommandProcessor for Bank {
    fn process_command(
        &mut self,
        kind: TransactionKind,
        account: String,
        amount: Option<Decimal>,
        to: Option<String>,
    ) -> Result<(), ProcessError> {
        match BankCommand::parse_command(kind, account, amount, to)? {
            BankCommand::Open { name, initial } => {
                self.create_account(name, initial).map_err(BankError::from)?;
            }
            BankCommand::Deposit { account, amount } => {
                account_named(self, account)?
                    .deposit(amount)
                    .map_err(BankError::from)?;
            }
            BankCommand::Withdraw { account, amount } => {
                account_named(self, account)?
                    .withdraw(amount)
                    .map_err(BankError::from)?;
            }
            BankCommand::Transfer {
                account,
                amount,
                to,
            } => {
                let from = self.find(&account).ok_or(ProcessError::UnknownAccount(account))?;
                let Some(to_id) = self.find(&to) else {
                    return Err(BankError::from(AccountError::InvalidRecipient {
                        reason: format!("no account named `{to}`"),
                    })
                    .into());
                };
                self.transfer(from, to_id, amount)?;
            }
        }
        Ok(())
    }
}

fn account_named(bank: &mut Bank, name: String) -> Result<&mut Account, ProcessError> {
    bank.find(&name)
        .and_then(|id| bank.account_mut(id))
        .ok_or(ProcessError::UnknownAccount(name))
}
