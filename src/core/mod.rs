//! Core module - The record contract and the plumbing around it
//!
//! This module provides:
//! - Record types (SearchResult, UrlFaviconPair)
//! - Field tables and kind detection
//! - Structural validation with per-field violations
//! - Key naming at the output boundary
//! - Document reading (JSON, JSON Lines)
//! - Rendering functions for different output formats

pub mod error;
pub mod input;
pub mod model;
pub mod naming;
pub mod render;
pub mod schema;
pub mod validate;
