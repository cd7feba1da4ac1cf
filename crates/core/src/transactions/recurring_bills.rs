//! Recurring bills derived from transactions flagged `recurring`.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use super::transactions_model::{
    BillStatus, BillTotals, RecurringBill, RecurringBillsSummary, Transaction, TransactionSort,
};
use super::transactions_query::matches_search;
use crate::constants::DUE_SOON_WINDOW_DAYS;

fn classify(last_paid: DateTime<Utc>, reference: DateTime<Utc>) -> BillStatus {
    let paid_this_month = last_paid.year() == reference.year()
        && last_paid.month() == reference.month()
        && last_paid <= reference;
    if paid_this_month {
        return BillStatus::Paid;
    }
    let due_day = last_paid.day();
    let today = reference.day();
    if due_day > today && due_day <= today + DUE_SOON_WINDOW_DAYS {
        BillStatus::DueSoon
    } else {
        BillStatus::Upcoming
    }
}

/// Builds the recurring bills summary as of `reference`.
///
/// Each payee contributes one bill, taken from its most recent recurring
/// transaction. A bill is paid when that transaction falls in the reference
/// month; otherwise it is upcoming, and due soon when its day of month lands
/// within the next few days. `paid`/`upcoming`/`due_soon` totals cover every
/// bill; `search` and `sort` only shape the `bills` list. `due_soon` is a
/// subset of `upcoming`.
pub fn summarize_recurring_bills(
    transactions: &[Transaction],
    reference: DateTime<Utc>,
    search: Option<&str>,
    sort: TransactionSort,
) -> RecurringBillsSummary {
    let mut latest: HashMap<String, &Transaction> = HashMap::new();
    for t in transactions.iter().filter(|t| t.recurring) {
        latest
            .entry(t.name.to_lowercase())
            .and_modify(|current| {
                if t.date > current.date {
                    *current = t;
                }
            })
            .or_insert(t);
    }

    let mut bills: Vec<RecurringBill> = latest
        .into_values()
        .map(|t| RecurringBill {
            name: t.name.clone(),
            avatar: t.avatar.clone(),
            category: t.category.clone(),
            amount: t.amount.abs(),
            due_day: t.date.day(),
            last_paid: t.date,
            status: classify(t.date, reference),
        })
        .collect();

    let mut total = Decimal::ZERO;
    let mut paid = BillTotals::default();
    let mut upcoming = BillTotals::default();
    let mut due_soon = BillTotals::default();
    for bill in &bills {
        total = total.saturating_add(bill.amount);
        let bucket = match bill.status {
            BillStatus::Paid => &mut paid,
            BillStatus::DueSoon | BillStatus::Upcoming => &mut upcoming,
        };
        bucket.count += 1;
        bucket.amount = bucket.amount.saturating_add(bill.amount);
        if bill.status == BillStatus::DueSoon {
            due_soon.count += 1;
            due_soon.amount = due_soon.amount.saturating_add(bill.amount);
        }
    }

    bills.retain(|b| matches_search(&b.name, search));
    // HashMap iteration order is arbitrary; settle ties by name.
    bills.sort_by(|a, b| a.name.cmp(&b.name));
    bills.sort_by(|a, b| match sort {
        TransactionSort::Latest => b.last_paid.cmp(&a.last_paid),
        TransactionSort::Oldest => a.last_paid.cmp(&b.last_paid),
        TransactionSort::AToZ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TransactionSort::ZToA => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        TransactionSort::Highest => b.amount.cmp(&a.amount),
        TransactionSort::Lowest => a.amount.cmp(&b.amount),
    });

    RecurringBillsSummary {
        bills,
        total,
        paid,
        upcoming,
        due_soon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn bill(name: &str, month: u32, day: u32, amount: Decimal) -> Transaction {
        Transaction {
            id: format!("{name}-{month}-{day}"),
            avatar: String::new(),
            name: name.to_string(),
            category: "Bills".to_string(),
            date: Utc.with_ymd_and_hms(2024, month, day, 9, 0, 0).unwrap(),
            amount,
            recurring: true,
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_classification_and_totals() {
        let transactions = vec![
            bill("Spark Electric", 8, 2, dec!(-100.00)),
            bill("Spark Electric", 7, 2, dec!(-100.00)),
            bill("Serenity Spa", 7, 22, dec!(-30.00)),
            bill("Pixel Playground", 7, 11, dec!(-10.00)),
        ];

        let summary =
            summarize_recurring_bills(&transactions, reference(), None, TransactionSort::Latest);

        assert_eq!(summary.bills.len(), 3);
        assert_eq!(summary.total, dec!(140.00));
        assert_eq!(summary.paid.count, 1);
        assert_eq!(summary.paid.amount, dec!(100.00));
        assert_eq!(summary.upcoming.count, 2);
        assert_eq!(summary.upcoming.amount, dec!(40.00));
        assert_eq!(summary.due_soon.count, 1);
        assert_eq!(summary.due_soon.amount, dec!(30.00));

        let spa = summary.bills.iter().find(|b| b.name == "Serenity Spa").unwrap();
        assert_eq!(spa.status, BillStatus::DueSoon);
        assert_eq!(spa.due_day, 22);
    }

    #[test]
    fn test_non_recurring_transactions_are_ignored() {
        let mut one_off = bill("Coffee", 8, 1, dec!(-4.50));
        one_off.recurring = false;

        let summary =
            summarize_recurring_bills(&[one_off], reference(), None, TransactionSort::Latest);
        assert!(summary.bills.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_search_filters_list_but_not_totals() {
        let transactions = vec![
            bill("Spark Electric", 8, 2, dec!(-100.00)),
            bill("Serenity Spa", 7, 22, dec!(-30.00)),
        ];
        let summary = summarize_recurring_bills(
            &transactions,
            reference(),
            Some("spa"),
            TransactionSort::Highest,
        );
        assert_eq!(summary.bills.len(), 1);
        assert_eq!(summary.total, dec!(130.00));
    }

    #[test]
    fn test_sort_by_amount() {
        let transactions = vec![
            bill("A", 7, 5, dec!(-5.00)),
            bill("B", 7, 6, dec!(-50.00)),
            bill("C", 7, 7, dec!(-25.00)),
        ];
        let summary =
            summarize_recurring_bills(&transactions, reference(), None, TransactionSort::Highest);
        let names: Vec<_> = summary.bills.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
