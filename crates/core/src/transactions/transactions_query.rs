//! In-memory search, sort and pagination over a user's transactions.

use std::cmp::Ordering;

use super::transactions_model::{Transaction, TransactionPage, TransactionQuery, TransactionSort};
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Category values the front end sends to mean "no category filter".
fn is_all_categories(category: &str) -> bool {
    let category = category.trim();
    category.is_empty()
        || category.eq_ignore_ascii_case("all")
        || category.eq_ignore_ascii_case("all transactions")
}

fn compare(a: &Transaction, b: &Transaction, sort: TransactionSort) -> Ordering {
    match sort {
        TransactionSort::Latest => b.date.cmp(&a.date),
        TransactionSort::Oldest => a.date.cmp(&b.date),
        TransactionSort::AToZ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        TransactionSort::ZToA => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        TransactionSort::Highest => b.amount.cmp(&a.amount),
        TransactionSort::Lowest => a.amount.cmp(&b.amount),
    }
}

/// Returns `true` when `name` contains `search`, ignoring case. An empty
/// search matches everything.
pub(crate) fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Applies `query` to `transactions` and returns the requested page.
///
/// Pages are 1-based; a page past the end yields an empty list while still
/// reporting the real totals. The sort is stable, so equal keys keep input order.
pub fn query_transactions(transactions: &[Transaction], query: &TransactionQuery) -> TransactionPage {
    let category = query
        .category
        .as_deref()
        .filter(|c| !is_all_categories(c))
        .map(str::trim);

    let mut matched: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| matches_search(&t.name, query.search.as_deref()))
        .filter(|t| category.map_or(true, |c| t.category.eq_ignore_ascii_case(c)))
        .collect();

    let sort = query.sort.unwrap_or_default();
    matched.sort_by(|a, b| compare(a, b, sort));

    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let transactions = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    TransactionPage {
        transactions,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
