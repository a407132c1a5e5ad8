//! openengine-records - Data contract for OpenEngine search records
//!
//! Two record shapes travel between the search backend and the front end:
//! - `SearchResult`: one displayable result entry
//! - `UrlFaviconPair`: a URL with the locator of its favicon
//!
//! Records use camelCase keys on the wire. The legacy `favicon_location`
//! spelling is accepted on input and can be requested on output.

pub mod commands;
pub mod core;

pub use crate::core::error::{ContractError, Result};
pub use crate::core::model::{Record, RecordSet, SearchResult, UrlFaviconPair};
pub use crate::core::schema::{FieldType, RecordKind};
pub use crate::core::validate::{decode, validate, ValidateOptions, Violation, ViolationCode};
