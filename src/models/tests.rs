use super::{Account, Admission, Rejection, Transaction};

use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;

use crate::normalizer::{RawAmount, RawRecord, TransactionNormalizer};
use crate::types::Monetary;

fn create_transaction(date: &str, amount: &str, company: &str, ledger: &str) -> Result<Transaction> {
    let record = RawRecord {
        date: Some(date.to_string()),
        amount: Some(RawAmount::Text(amount.to_string())),
        company: Some(company.to_string()),
        ledger: Some(ledger.to_string())
    };

    Ok(TransactionNormalizer::parse(&record)?)
}

fn date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::from_str(value)?)
}

#[test]
fn test_accepted_transaction_updates_balance() -> Result<()> {
    let mut account = Account::new("Wonder wash");
    let transaction = create_transaction("2013-12-22", "-50.00", "Wonder Wash", "Car Wash")?;

    assert_eq!(account.add_transaction(transaction), Admission::Accepted);
    assert_eq!(account.balance, Monetary::from_str("-50.00")?);
    assert_eq!(account.accepted().len(), 1);
    assert!(account.rejected().is_empty());

    Ok(())
}

#[test]
fn test_duplicate_transaction_is_rejected_without_balance_effect() -> Result<()> {
    let mut account = Account::new("Diner");
    let transaction = create_transaction("2013-12-22", "-12.00", "Diner", "Meals")?;

    account.add_transaction(transaction.clone());
    let admission = account.add_transaction(transaction);

    assert_eq!(admission, Admission::Rejected(Rejection::Duplicate));
    assert_eq!(account.balance, Monetary::from_str("-12.00")?);
    assert_eq!(account.accepted().len(), 1);
    assert_eq!(account.rejected().len(), 1);
    assert_eq!(account.transactions_by_keyword("meals").len(), 1);

    Ok(())
}

#[test]
fn test_near_duplicates_are_accepted() -> Result<()> {
    let mut account = Account::new("Diner");

    account.add_transaction(create_transaction("2013-12-22", "-12.00", "Diner", "Meals")?);

    assert_eq!(account.add_transaction(create_transaction("2013-12-23", "-12.00", "Diner", "Meals")?), Admission::Accepted);
    assert_eq!(account.add_transaction(create_transaction("2013-12-22", "-12.01", "Diner", "Meals")?), Admission::Accepted);
    assert_eq!(account.add_transaction(create_transaction("2013-12-22", "-12.00", "Diner", "Meals!")?), Admission::Accepted);
    assert_eq!(account.add_transaction(create_transaction("2013-12-22", "-12.00", "Diner #1242", "Meals")?), Admission::Accepted);

    assert_eq!(account.accepted().len(), 5);
    assert_eq!(account.balance, Monetary::from_str("-60.01")?);

    Ok(())
}

#[test]
fn test_invalid_transaction_is_rejected_without_balance_effect() -> Result<()> {
    let mut account = Account::new("Foo");
    let transaction = create_transaction("2013-12-22", "20.00", "Foo 10.00 usd", "Misc")?;

    assert_eq!(account.add_transaction(transaction), Admission::Rejected(Rejection::Invalid));
    assert_eq!(account.balance, Monetary::new());
    assert!(account.accepted().is_empty());
    assert!(account.transactions_by_keyword("misc").is_empty());

    Ok(())
}

#[test]
fn test_overflowing_transaction_is_rejected_without_balance_effect() -> Result<()> {
    let mut account = Account::new("Treasury");
    let largest = "79228162514264337593543950335";

    assert_eq!(account.add_transaction(create_transaction("2013-12-01", largest, "Treasury", "Reserve")?), Admission::Accepted);

    let admission = account.add_transaction(create_transaction("2013-12-02", "1.00", "Treasury", "Interest")?);

    assert_eq!(admission, Admission::Rejected(Rejection::Overflow));
    assert_eq!(account.balance, Monetary::from_str(largest)?);
    assert_eq!(account.accepted().len(), 1);
    assert_eq!(account.rejected().len(), 1);
    assert!(account.transactions_by_keyword("interest").is_empty());

    Ok(())
}

#[test]
fn test_rejections_accumulate() -> Result<()> {
    let mut account = Account::new("Foo");
    let valid = create_transaction("2013-12-22", "5.00", "Foo", "Misc")?;

    account.add_transaction(create_transaction("2013-12-20", "20.00", "Foo 10.00 usd", "Misc")?);
    account.add_transaction(valid.clone());
    account.add_transaction(valid);
    account.add_transaction(create_transaction("2013-12-21", "30.00", "Foo 10.00 usd", "Misc")?);

    let rejected_amounts: Vec<String> = account.rejected().iter().map(|tx| tx.amount().to_string()).collect();

    assert_eq!(rejected_amounts, ["20.00", "5.00", "30.00"]);

    Ok(())
}

#[test]
fn test_balance_as_of_excludes_transactions_on_or_after_date() -> Result<()> {
    let mut account = Account::new("Shop");
    account.add_transaction(create_transaction("2013-12-10", "10.00", "Shop", "")?);
    account.add_transaction(create_transaction("2013-12-15", "-3.50", "Shop", "")?);
    account.add_transaction(create_transaction("2013-12-20", "100.00", "Shop", "")?);

    assert_eq!(account.balance_as_of(date("2013-01-01")?), Monetary::new());
    assert_eq!(account.balance_as_of(date("2013-12-10")?), Monetary::new());
    assert_eq!(account.balance_as_of(date("2013-12-11")?), Monetary::from_str("10.00")?);
    assert_eq!(account.balance_as_of(date("2013-12-15")?), Monetary::from_str("10.00")?);
    assert_eq!(account.balance_as_of(date("2013-12-20")?), Monetary::from_str("6.50")?);
    assert_eq!(account.balance_as_of(date("2014-01-01")?), account.balance);

    Ok(())
}

#[test]
fn test_balance_as_of_is_monotonic_for_non_negative_amounts() -> Result<()> {
    let mut account = Account::new("Payroll");

    for (day, amount) in [(3, "1.00"), (9, "2.00"), (1, "4.00"), (27, "8.00"), (14, "0.00")] {
        account.add_transaction(create_transaction(&format!("2013-12-{day:02}"), amount, "Payroll", "")?);
    }

    let mut previous = Monetary::new();
    let mut day = date("2013-11-28")?;

    while day <= date("2014-01-02")? {
        let balance = account.balance_as_of(day);
        assert!(balance >= previous, "balance dropped on {day}");
        previous = balance;
        day = day.succ_opt().ok_or_else(|| anyhow::anyhow!("date overflow"))?;
    }

    assert_eq!(previous, Monetary::from_str("15.00")?);

    Ok(())
}

#[test]
fn test_keyword_lookup_is_case_insensitive() -> Result<()> {
    let mut account = Account::new("Diner");
    account.add_transaction(create_transaction("2013-12-22", "-9.00", "Diner", "Grocery, Meals!!")?);

    let lower = account.transactions_by_keyword("meals");
    let upper = account.transactions_by_keyword("MEALS");

    assert_eq!(lower.len(), 1);
    assert_eq!(lower, upper);
    assert_eq!(account.transactions_by_keyword("grocery").len(), 1);
    assert!(account.transactions_by_keyword("travel").is_empty());

    Ok(())
}

#[test]
fn test_repeated_token_registers_transaction_once() -> Result<()> {
    let mut account = Account::new("Diner");
    account.add_transaction(create_transaction("2013-12-22", "-9.00", "Diner", "Meals & Meals")?);
    account.add_transaction(create_transaction("2013-12-23", "-4.00", "Diner", "Meals")?);

    let meals = account.transactions_by_keyword("meals");

    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0].amount().to_string(), "-9.00");
    assert_eq!(meals[1].amount().to_string(), "-4.00");

    Ok(())
}

#[test]
fn test_categories_map_every_keyword_in_insertion_order() -> Result<()> {
    let mut account = Account::new("Office");
    account.add_transaction(create_transaction("2013-12-01", "-1.00", "Office", "Office Supplies")?);
    account.add_transaction(create_transaction("2013-12-02", "-2.00", "Office", "Postage")?);
    account.add_transaction(create_transaction("2013-12-03", "-3.00", "Office", "Supplies")?);

    let categories = account.categories();
    let keywords: Vec<&str> = categories.keys().copied().collect();

    assert_eq!(keywords, ["office", "postage", "supplies"]);

    let supplies: Vec<String> = categories["supplies"].iter().map(|tx| tx.amount().to_string()).collect();

    assert_eq!(supplies, ["-1.00", "-3.00"]);

    Ok(())
}
