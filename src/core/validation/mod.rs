//! Validation and filtering system
//!
//! DTOs declare their rules with `validator` derive attributes. The
//! [`ValidatedJson`] extractor runs them at the HTTP boundary and reports
//! failures per field; filters normalize the accepted values.

pub mod extractor;
pub mod filters;
pub mod messages;
pub mod validators;

pub use extractor::{ValidatedJson, validate};
