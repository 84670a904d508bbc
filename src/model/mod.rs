//! Tabular model for extracted invoice data.
//!
//! This module defines the flat row structures the extractor produces and the
//! result containers that carry them. Rows hold a fixed set of string fields:
//! attributes absent from the source document appear as empty strings, never
//! as missing keys, so downstream serialization always sees the same column
//! set.

mod result;
mod row;

pub use result::*;
pub use row::*;
