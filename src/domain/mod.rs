//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the six QA checks (`CheckKind`) and their static form registry (`FormSpec`)
//! - field descriptions (`FieldSpec`, `FieldKind`) and result mappings (`ResultField`)
//! - application settings (`AppSettings`) and the localized pass/fail labels

pub mod types;

pub use types::*;
