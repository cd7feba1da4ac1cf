use super::pots_model::{Pot, PotAggregation};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::utils::money_utils::{percentage, saturating_total};

/// Totals pots for chart display.
///
/// `filter` keeps pots whose name contains it, ignoring case. Progress is
/// `saved / target * 100` rounded for display, and zero when the target is zero.
/// Totals that leave the representable range are clamped rather than failing.
pub fn aggregate_pots(pots: Option<&[Pot]>, filter: Option<&str>) -> PotAggregation {
    let filter = filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let filtered_pots: Vec<Pot> = pots
        .unwrap_or_default()
        .iter()
        .filter(|p| {
            filter
                .as_deref()
                .map_or(true, |f| p.name.to_lowercase().contains(f))
        })
        .cloned()
        .collect();

    let total_target = saturating_total(filtered_pots.iter().map(|p| p.target));
    let total_saved = saturating_total(filtered_pots.iter().map(|p| p.total));
    let progress_percentage = percentage(total_saved, total_target, DISPLAY_DECIMAL_PRECISION);

    PotAggregation {
        filtered_pots,
        total_target,
        total_saved,
        progress_percentage,
        remaining_to_save: total_target.saturating_sub(total_saved),
    }
}
