use std::io::Write;

use crate::account::TransactionType;
use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Balance<'a> {
    pub account: &'a str,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry<'a> {
    pub account: &'a str,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub counterparty: Option<&'a str>,
}

pub fn print_balances<'a, W>(
    output: &mut W,
    balances: impl Iterator<Item = Balance<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, balances)
}

pub fn print_history<'a, W>(
    output: &mut W,
    entries: impl Iterator<Item = HistoryEntry<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    print_rows(output, entries)
}

fn print_rows<W, T>(output: &mut W, rows: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        writer.serialize(row).context("Failed to write to CSV")?;
    }
    writer.flush().context("Failed to flush CSV writer")
}
