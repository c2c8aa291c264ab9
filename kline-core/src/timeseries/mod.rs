//! Series utilities shared by the session facade and callers.
//!
//! Modules include:
//! - `normalize`: turn raw provider payloads into validated tables
//! - `range`: inclusive date-range filtering
//! - `align`: outer join of several series on their date axis
/// Outer join of several series on the date axis.
pub mod align;
/// Raw payload validation and canonicalization.
pub mod normalize;
/// Date-range filtering.
pub mod range;

pub use align::align;
pub use normalize::{normalize, normalize_calendar, normalize_cross_section};
pub use range::filter_by_range;
