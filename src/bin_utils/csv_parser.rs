use std::io::Read;

use crate::command::TransactionKind;
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub account: String,
    pub amount: Option<Decimal>,
    pub to: Option<String>,
}

/// Parses a bank operation script in CSV format.
///
/// Yields every row together with the line it was read from. Rows that fail
/// to deserialize are yielded as errors, so that a caller may skip them.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows() {
        let script = "type,account,amount,to\n\
                      open, John Doe ,1000\n\
                      transfer,John Doe,300,Jane Doe\n\
                      bogus,John Doe,1\n\
                      deposit,John Doe,\n";
        let rows: Vec<_> = CsvOperationParser::new(script.as_bytes()).collect();
        assert_eq!(rows.len(), 4);

        let open = rows[0].1.as_ref().unwrap();
        assert_eq!(open.kind, TransactionKind::Open);
        assert_eq!(open.account, "John Doe");
        assert_eq!(open.amount, Some(dec!(1000)));
        assert_eq!(open.to, None);

        let transfer = rows[1].1.as_ref().unwrap();
        assert_eq!(transfer.to.as_deref(), Some("Jane Doe"));

        assert!(rows[2].1.is_err());
        assert_eq!(rows[3].1.as_ref().unwrap().amount, None);
    }
}
