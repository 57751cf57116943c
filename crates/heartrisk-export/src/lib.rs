//! heartrisk-export
//!
//! Presentation of the calculator page: a serializable view of the form,
//! the patient summary and the assessment result, rendered to HTML with Tera.

pub mod error;
pub mod render;
pub mod view;
