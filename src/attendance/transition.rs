//! The cyclic advance operation over mark states.

use crate::models::MarkState;

use super::input::ExtendedInput;

/// Advances a mark state to the next state in the cycle.
///
/// The cycle order is `Empty` → `Worked` → `Absent` →
/// `CustomWorkedOrAbsent` → `CustomHours` → `Empty`. Entering either custom
/// state requires extended input: the collaborator is invoked synchronously,
/// seeded with a worked flag of `true`, the mark's current extra amount, and
/// (for hours) the global default shift hours.
///
/// Returns the state to enter, or `None` when the collaborator cancelled —
/// in that case the transition does not occur and the caller must leave the
/// mark exactly as it was.
///
/// Values received from the collaborator are trusted as-is; validation
/// happens on the collaborator's side before they are handed over.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use timesheet_engine::attendance::{advance, ExtendedInput};
/// use timesheet_engine::models::MarkState;
///
/// struct AlwaysConfirm;
///
/// impl ExtendedInput for AlwaysConfirm {
///     fn collect_worked_and_extra(
///         &mut self,
///         worked: bool,
///         extra: Decimal,
///     ) -> Option<(bool, Decimal)> {
///         Some((worked, extra))
///     }
///
///     fn collect_worked_hours_and_extra(
///         &mut self,
///         worked: bool,
///         hours: f64,
///         extra: Decimal,
///     ) -> Option<(bool, f64, Decimal)> {
///         Some((worked, hours, extra))
///     }
/// }
///
/// let next = advance(&MarkState::Empty, 8.0, &mut AlwaysConfirm);
/// assert_eq!(next, Some(MarkState::Worked));
/// ```
pub fn advance(
    current: &MarkState,
    default_hours: f64,
    input: &mut dyn ExtendedInput,
) -> Option<MarkState> {
    match current {
        MarkState::Empty => Some(MarkState::Worked),
        MarkState::Worked => Some(MarkState::Absent),
        MarkState::Absent => input
            .collect_worked_and_extra(true, current.extra())
            .map(|(worked, extra)| MarkState::CustomWorkedOrAbsent { worked, extra }),
        MarkState::CustomWorkedOrAbsent { .. } => input
            .collect_worked_hours_and_extra(true, default_hours, current.extra())
            .map(|(worked, hours, extra)| MarkState::CustomHours {
                worked,
                hours,
                extra,
            }),
        MarkState::CustomHours { .. } => Some(MarkState::Empty),
    }
}
