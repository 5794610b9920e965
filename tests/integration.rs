use std::str::from_utf8;

use cute_bank::{
    account::{AccountError, Transaction},
    bank::Bank,
    bin_utils::{DEMO_SCRIPT, RowError, Service},
    command::AccountAction,
};
use rust_decimal_macros::dec;

fn run_script(script: &str) -> String {
    let mut output = Vec::new();
    let service = Service {
        input: script.as_bytes(),
        output: &mut output,
        error_printer: Box::new(|line, err| eprintln!("Error at line {line}: {err}")),
    };
    service.run().unwrap();
    from_utf8(&output).unwrap().to_owned()
}

#[test]
fn demo_script_report() {
    let output = run_script(DEMO_SCRIPT);
    assert_eq!(
        output,
        "account,balance\n\
         John Doe,1000\n\
         Jane Doe,800\n\
         \n\
         account,type,amount,counterparty\n\
         John Doe,Deposit,500,\n\
         John Doe,Withdrawal,200,\n\
         John Doe,Transfer,300,Jane Doe\n\
         Jane Doe,Received,300,John Doe\n"
    );
}

#[test]
fn rejected_rows_are_reported_and_skipped() {
    let script = "type,account,amount,to\n\
                  open,John Doe,100\n\
                  open,Jane Doe,-1\n\
                  withdrawal,John Doe,150\n\
                  transfer,John Doe,10,Jane Doe\n\
                  refund,John Doe,10\n\
                  deposit,John Doe,0.5\n";
    let mut output = Vec::new();
    let (tx, rx) = std::sync::mpsc::channel();
    let service = Service {
        input: script.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |_, err| tx.send(err).unwrap()),
    };
    service.run().unwrap();
    let rejected: Vec<_> = rx.try_iter().collect();

    assert_eq!(rejected.len(), 4);
    assert!(matches!(rejected[3], RowError::Malformed(_)));
    let messages: Vec<_> = rejected[..3].iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        [
            "Invalid Open amount: -1",
            "Insufficient funds: requested 150, available 100",
            "Invalid recipient account: no account named `Jane Doe`",
        ]
    );
    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,balance\n\
         John Doe,100.5\n\
         \n\
         account,type,amount,counterparty\n\
         John Doe,Deposit,0.5,\n"
    );
}

#[test]
fn bank_operations_scenario() {
    let mut bank = Bank::new("Cute Bank");
    let john = bank.create_account("John Doe", dec!(1000)).unwrap();
    let jane = bank.create_account("Jane Doe", dec!(500)).unwrap();

    let john_acc = bank.account_mut(john).unwrap();
    john_acc.deposit(dec!(500)).unwrap();
    assert_eq!(john_acc.balance(), dec!(1500));
    john_acc.withdraw(dec!(200)).unwrap();
    assert_eq!(john_acc.balance(), dec!(1300));

    bank.transfer(john, jane, dec!(300)).unwrap();

    let john_acc = bank.account(john).unwrap();
    let jane_acc = bank.account(jane).unwrap();
    assert_eq!(john_acc.balance(), dec!(1000));
    assert_eq!(jane_acc.balance(), dec!(800));
    assert_eq!(
        john_acc.history(),
        [
            Transaction::Deposit { amount: dec!(500) },
            Transaction::Withdrawal { amount: dec!(200) },
            Transaction::Transfer {
                amount: dec!(300),
                to: "Jane Doe".to_string()
            },
        ]
    );
    assert_eq!(
        jane_acc.history(),
        [Transaction::Received {
            amount: dec!(300),
            from: "John Doe".to_string()
        }]
    );

    let err = bank.create_account("Nobody", dec!(-100)).unwrap_err();
    assert_eq!(
        err,
        AccountError::InvalidAmount {
            action: AccountAction::Open,
            amount: dec!(-100)
        }
    );
    assert_eq!(bank.len(), 2);
}

#[test]
fn oversized_deposit_row_is_rejected() {
    let script = "type,account,amount,to\n\
                  open,John Doe,100\n\
                  open,Jane Doe,79228162514264337593543950335\n\
                  deposit,John Doe,79228162514264337593543950335\n\
                  transfer,John Doe,1,Jane Doe\n\
                  transfer,John Doe,1,John Doe\n";
    let mut output = Vec::new();
    let (tx, rx) = std::sync::mpsc::channel();
    let service = Service {
        input: script.as_bytes(),
        output: &mut output,
        error_printer: Box::new(move |line, err| tx.send((line, err.to_string())).unwrap()),
    };
    service.run().unwrap();
    let rejected: Vec<_> = rx.try_iter().map(|(_, msg)| msg).collect();

    assert_eq!(rejected.len(), 2);
    assert!(rejected.iter().all(|msg| msg.starts_with("Balance overflow")));
    assert_eq!(
        from_utf8(&output).unwrap(),
        "account,balance\n\
         John Doe,100\n\
         Jane Doe,79228162514264337593543950335\n\
         \n\
         account,type,amount,counterparty\n\
         John Doe,Transfer,1,John Doe\n\
         John Doe,Received,1,John Doe\n"
    );
}
