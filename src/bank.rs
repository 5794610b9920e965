use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::account::{Account, AccountError};

/// Position of an account in its bank. Accounts are never removed, so an id
/// stays valid for the lifetime of the bank that issued it.
///
/// Ids carry no reference to their bank: an id is only meaningful for the
/// bank that created it, and passed to another bank it addresses whatever
/// account sits at the same position there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(usize);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Account {0} does not exist")]
    UnknownAccount(AccountId),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

#[derive(Debug, Default)]
pub struct Bank {
    name: String,
    accounts: Vec<Account>,
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens an account and keeps track of it. Names are not required to be
    /// unique.
    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        initial_deposit: Decimal,
    ) -> Result<AccountId, AccountError> {
        let name = name.into();
        let account = Account::open(name.as_str(), initial_deposit).inspect_err(|err| {
            debug!(bank = %self.name, account = %name, %err, "account creation rejected");
        })?;
        let id = AccountId(self.accounts.len());
        self.accounts.push(account);
        debug!(bank = %self.name, account = %name, %id, %initial_deposit, "account created");
        Ok(id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id.0)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id.0)
    }

    /// First account opened under `name`.
    pub fn find(&self, name: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .position(|acc| acc.name() == name)
            .map(AccountId)
    }

    /// Accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = (AccountId, &Account)> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(idx, acc)| (AccountId(idx), acc))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, `None` when it does not fit in a [`Decimal`].
    pub fn total_balance(&self) -> Option<Decimal> {
        self.accounts
            .iter()
            .try_fold(Decimal::ZERO, |total, acc| total.checked_add(acc.balance()))
    }

    /// Transfer between two accounts of this bank, addressed by id. Sending to
    /// the same account leaves the balance as is and logs both records on it.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), BankError> {
        if from == to {
            let account = self
                .account_mut(from)
                .ok_or(BankError::UnknownAccount(from))?;
            account.transfer_to_self(amount)?;
            return Ok(());
        }
        let (sender, recipient) = self.pair_mut(from, to)?;
        sender.transfer(amount, recipient)?;
        Ok(())
    }

    fn pair_mut(
        &mut self,
        from: AccountId,
        to: AccountId,
    ) -> Result<(&mut Account, &mut Account), BankError> {
        if from.0 >= self.accounts.len() {
            return Err(BankError::UnknownAccount(from));
        }
        if to.0 >= self.accounts.len() {
            let err = AccountError::InvalidRecipient {
                reason: format!("account {to} does not exist"),
            };
            debug!(bank = %self.name, %from, %to, %err, "transfer rejected");
            return Err(err.into());
        }

        if from < to {
            let (head, tail) = self.accounts.split_at_mut(to.0);
            Ok((&mut head[from.0], &mut tail[0]))
        } else {
            let (head, tail) = self.accounts.split_at_mut(from.0);
            Ok((&mut tail[0], &mut head[to.0]))
        }
    }
}
