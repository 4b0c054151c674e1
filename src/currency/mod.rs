//! Currency table and rule value conversion.
//!
//! - [`table`] - minor-unit offsets per currency and the monetary field set
//! - [`convert`] - rewriting rule filter values to and from USD

pub mod convert;
pub mod table;

pub use convert::{convert_rule, from_usd, round_trip_tolerance, to_usd, Direction};
pub use table::{is_monetary_field, minor_unit_offset, CurrencyDescriptor, MONETARY_FIELDS};
