//! heartrisk-core
//!
//! Pure domain types for the heart disease risk calculator: the feature
//! schema, the input collector, the single-row patient record handed to the
//! classifier, and the threshold-based risk classification.
//! No I/O and no model dependency.

pub mod error;
pub mod inputs;
pub mod record;
pub mod risk;
pub mod schema;
