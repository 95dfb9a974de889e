//! Summation and ordering of fetched intake events.

use crate::domain::IntakeEvent;

/// Timestamp ordering for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Most recent first.
    Descending,
}

/// Total plus the events it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSummary {
    pub total_amount: f64,
    pub intakes: Vec<IntakeEvent>,
}

/// Sum of event amounts; `0.0` for an empty slice.
pub fn total_amount(intakes: &[IntakeEvent]) -> f64 {
    intakes.iter().map(|intake| intake.amount().value()).sum()
}

/// Stable sort by timestamp in `order`.
pub fn sort_intakes(mut intakes: Vec<IntakeEvent>, order: SortOrder) -> Vec<IntakeEvent> {
    intakes.sort_by(|left, right| {
        let ordering = left.timestamp().cmp(&right.timestamp());
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    intakes
}

/// Order `intakes` and total their amounts.
///
/// # Examples
/// ```
/// use hydration_backend::domain::{SortOrder, summarize};
///
/// let summary = summarize(Vec::new(), SortOrder::Descending);
/// assert_eq!(summary.total_amount, 0.0);
/// assert!(summary.intakes.is_empty());
/// ```
pub fn summarize(intakes: Vec<IntakeEvent>, order: SortOrder) -> IntakeSummary {
    let intakes = sort_intakes(intakes, order);
    IntakeSummary {
        total_amount: total_amount(&intakes),
        intakes,
    }
}

/// Events ordered oldest first, as charted by stats views.
pub fn sorted_series(intakes: Vec<IntakeEvent>) -> Vec<IntakeEvent> {
    sort_intakes(intakes, SortOrder::Ascending)
}
