//! The attendance mark state machine.
//!
//! This module defines the cyclic transition rule over mark states, the
//! extended-input collaborator contract the two custom states suspend on,
//! and the numeric validation helpers collaborator implementations use.

mod input;
mod transition;

pub use input::{ExtendedInput, parse_extra_amount, parse_worked_hours};
pub use transition::advance;
