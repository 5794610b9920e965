/// Account balance and transaction history management.
/// Commands are validated into transaction records, which are then applied.
pub mod account;

/// Bank owning every account it opened, addressed by [`bank::AccountId`].
pub mod bank;

/// Account and bank commands, plus amount validation shared by both.
pub mod command;

/// Runs named-account commands against a [`bank::Bank`].
pub mod processor;

/// CSV script runner. Used by the binary and by integration tests,
/// so it lives in the library.
pub mod bin_utils;
