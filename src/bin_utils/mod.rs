//! This module could be a separate crate on its own, to drive [`cute_bank`] from a
//! script, but for simplicity purposes, I include it directly in the library.

use std::io::{Read, Write};

use crate::{
    bank::Bank,
    processor::{CommandProcessor, ProcessError},
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{Balance, HistoryEntry, print_balances, print_history};
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

/// John and Jane open accounts, John deposits, withdraws and sends money to Jane.
pub const DEMO_SCRIPT: &str = include_str!("demo.csv");

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Rejected(#[from] ProcessError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, RowError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    /// Runs every row against a fresh bank, then prints balances followed by
    /// a blank line and the history of every account.
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = Bank::default();

        for (line, row) in parser {
            let result = row.map_err(RowError::from).and_then(|op| {
                bank.process_command(op.kind, op.account, op.amount, op.to)
                    .map_err(RowError::from)
            });
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_balances(
            self.output,
            bank.accounts().map(|(_, acc)| Balance {
                account: acc.name(),
                balance: acc.balance(),
            }),
        )?;
        writeln!(self.output)?;
        print_history(
            self.output,
            bank.accounts().flat_map(|(_, acc)| {
                acc.history().iter().map(move |tx| HistoryEntry {
                    account: acc.name(),
                    kind: tx.transaction_type(),
                    amount: tx.amount(),
                    counterparty: tx.counterparty(),
                })
            }),
        )
    }
}
