use super::budgets_model::{Budget, BudgetAggregation};
use crate::utils::money_utils::saturating_total;

fn normalized_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
}

/// Totals budgets for chart display.
///
/// `filter` keeps only budgets whose category equals it, ignoring case; an
/// empty filter keeps everything. Spending counts the absolute value of every
/// transaction attached to the kept budgets. Absent or empty input yields zeros.
/// Totals are clamped at the representable range.
pub fn aggregate_budgets(budgets: Option<&[Budget]>, filter: Option<&str>) -> BudgetAggregation {
    let filter = normalized_filter(filter);
    let filtered_budgets: Vec<Budget> = budgets
        .unwrap_or_default()
        .iter()
        .filter(|b| {
            filter
                .as_deref()
                .map_or(true, |f| b.category.to_lowercase() == f)
        })
        .cloned()
        .collect();

    let total_budget = saturating_total(filtered_budgets.iter().map(Budget::maximum_decimal));
    let total_spent = saturating_total(
        filtered_budgets
            .iter()
            .flat_map(|b| b.transactions.iter())
            .map(|t| t.amount.abs()),
    );

    BudgetAggregation {
        filtered_budgets,
        total_budget,
        total_spent,
        remaining_budget: total_budget.saturating_sub(total_spent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use crate::transactions::Transaction;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn tx(amount: Decimal) -> Transaction {
        Transaction {
            id: String::new(),
            avatar: String::new(),
            name: "Payee".to_string(),
            category: String::new(),
            date: Utc::now(),
            amount,
            recurring: false,
        }
    }

    fn budget(category: &str, maximum: &str, amounts: &[Decimal]) -> Budget {
        Budget {
            id: category.to_lowercase(),
            category: category.to_string(),
            maximum: maximum.to_string(),
            theme: "#277C78".to_string(),
            transactions: amounts.iter().copied().map(tx).collect(),
        }
    }

    #[test]
    fn test_totals_without_filter() {
        let budgets = vec![budget("Bills", "100", &[dec!(-20), dec!(-5)])];

        let result = aggregate_budgets(Some(&budgets), None);

        assert_eq!(result.total_budget, dec!(100));
        assert_eq!(result.total_spent, dec!(25));
        assert_eq!(result.remaining_budget, dec!(75));
        assert_eq!(result.filtered_budgets.len(), 1);
    }

    #[test]
    fn test_filter_is_case_insensitive_exact_match() {
        let budgets = vec![
            budget("Entertainment", "50.00", &[dec!(-10)]),
            budget("Bills", "750.00", &[dec!(-100), dec!(-50.25)]),
            budget("Bills & Utilities", "30.00", &[dec!(-1)]),
            budget("Dining Out", "75.00", &[]),
        ];

        let result = aggregate_budgets(Some(&budgets), Some("bills"));

        assert_eq!(result.filtered_budgets.len(), 1);
        assert_eq!(result.filtered_budgets[0].category, "Bills");
        assert_eq!(result.total_budget, dec!(750.00));
        assert_eq!(result.total_spent, dec!(150.25));
        assert_eq!(result.remaining_budget, dec!(599.75));
    }

    #[test]
    fn test_positive_amounts_count_as_spent() {
        let budgets = vec![budget("Personal Care", "40", &[dec!(-10), dec!(5)])];
        let result = aggregate_budgets(Some(&budgets), Some(""));
        assert_eq!(result.total_spent, dec!(15));
    }

    #[test]
    fn test_preserves_input_order() {
        let budgets = vec![
            budget("Dining Out", "75", &[]),
            budget("Bills", "750", &[]),
            budget("Entertainment", "50", &[]),
        ];
        let categories: Vec<_> = aggregate_budgets(Some(&budgets), None)
            .filtered_budgets
            .into_iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(categories, vec!["Dining Out", "Bills", "Entertainment"]);
    }

    #[test]
    fn test_unparseable_maximum_counts_as_zero() {
        let budgets = vec![budget("Bills", "n/a", &[dec!(-5)])];
        let result = aggregate_budgets(Some(&budgets), None);
        assert_eq!(result.total_budget, Decimal::ZERO);
        assert_eq!(result.remaining_budget, dec!(-5));
    }

    #[test]
    fn test_empty_and_missing_input() {
        for input in [None, Some(&[][..])] {
            let result = aggregate_budgets(input, Some("bills"));
            assert!(result.filtered_budgets.is_empty());
            assert_eq!(result.total_budget, Decimal::ZERO);
            assert_eq!(result.total_spent, Decimal::ZERO);
            assert_eq!(result.remaining_budget, Decimal::ZERO);
        }
    }

    #[test]
    fn test_huge_maximums_are_clamped() {
        let max = Decimal::MAX.to_string();
        let budgets = vec![
            budget("Bills", &max, &[Decimal::MIN]),
            budget("Dining Out", &max, &[Decimal::MIN]),
        ];
        let result = aggregate_budgets(Some(&budgets), None);
        assert_eq!(result.total_budget, Decimal::MAX);
        assert_eq!(result.total_spent, Decimal::MAX);
        assert_eq!(result.remaining_budget, Decimal::ZERO);
    }
}
