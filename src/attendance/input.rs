//! Extended-input collaborator contract and its validation helpers.
//!
//! The two custom mark states cannot be entered from internal state alone:
//! the transition suspends on a blocking call to an [`ExtendedInput`]
//! collaborator, which either confirms with collected values or cancels.
//! Numeric text is validated on the collaborator's side with the helpers in
//! this module, so invalid input never reaches the state machine.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// The collaborator that collects extended input for custom mark states.
///
/// Implementations block until the user confirms or cancels; there is no
/// timeout. `None` means the request was abandoned and the transition must
/// not occur. The initial values are suggestions to pre-fill the prompt.
pub trait ExtendedInput {
    /// Collects a worked flag and an extra amount for a
    /// [`MarkState::CustomWorkedOrAbsent`](crate::models::MarkState) entry.
    fn collect_worked_and_extra(
        &mut self,
        initial_worked: bool,
        initial_extra: Decimal,
    ) -> Option<(bool, Decimal)>;

    /// Collects a worked flag, an hour count, and an extra amount for a
    /// [`MarkState::CustomHours`](crate::models::MarkState) entry.
    fn collect_worked_hours_and_extra(
        &mut self,
        initial_worked: bool,
        initial_hours: f64,
        initial_extra: Decimal,
    ) -> Option<(bool, f64, Decimal)>;
}

/// Parses user text as a fixed-point bonus or deduction amount.
///
/// Any sign and magnitude is accepted; the text just has to be a well-formed
/// decimal number.
///
/// # Errors
///
/// Returns [`EngineError::InvalidExtraAmount`] when the text does not parse.
///
/// # Example
///
/// ```
/// use timesheet_engine::attendance::parse_extra_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_extra_amount("-150.25").unwrap(), Decimal::new(-15025, 2));
/// assert!(parse_extra_amount("abc").is_err());
/// ```
pub fn parse_extra_amount(input: &str) -> EngineResult<Decimal> {
    Decimal::from_str(input.trim()).map_err(|_| EngineError::InvalidExtraAmount {
        input: input.to_string(),
    })
}

/// Parses user text as a non-negative hour count.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHours`] when the text does not parse as a
/// finite number or the value is negative.
pub fn parse_worked_hours(input: &str) -> EngineResult<f64> {
    let hours: f64 = input
        .trim()
        .parse()
        .map_err(|_| EngineError::InvalidHours {
            input: input.to_string(),
        })?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(EngineError::InvalidHours {
            input: input.to_string(),
        });
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extra_accepts_any_sign() {
        assert_eq!(parse_extra_amount("500").unwrap(), Decimal::new(500, 0));
        assert_eq!(
            parse_extra_amount("-12.75").unwrap(),
            Decimal::new(-1275, 2)
        );
        assert_eq!(parse_extra_amount("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_extra_trims_whitespace() {
        assert_eq!(parse_extra_amount("  42.5 ").unwrap(), Decimal::new(425, 1));
    }

    #[test]
    fn test_parse_extra_rejects_malformed_text() {
        for input in ["", "abc", "12,50", "1.2.3"] {
            let result = parse_extra_amount(input);
            assert!(
                matches!(result, Err(EngineError::InvalidExtraAmount { .. })),
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_hours_accepts_zero_and_fractions() {
        assert_eq!(parse_worked_hours("0").unwrap(), 0.0);
        assert_eq!(parse_worked_hours("7.5").unwrap(), 7.5);
        assert_eq!(parse_worked_hours(" 12 ").unwrap(), 12.0);
    }

    #[test]
    fn test_parse_hours_rejects_negative() {
        assert!(matches!(
            parse_worked_hours("-1"),
            Err(EngineError::InvalidHours { .. })
        ));
    }

    #[test]
    fn test_parse_hours_rejects_malformed_and_non_finite() {
        for input in ["", "abc", "NaN", "inf"] {
            let result = parse_worked_hours(input);
            assert!(
                matches!(result, Err(EngineError::InvalidHours { .. })),
                "expected rejection for {input:?}"
            );
        }
    }
}
