//! Input/output helpers.
//!
//! - result exports (pretty-printed JSON per check) (`export`)
//! - the durable preference store backing the theme toggle (`prefs`)

pub mod export;
pub mod prefs;

pub use export::*;
pub use prefs::*;
