//! Command handlers

pub mod check;
pub mod favicons;
pub mod normalize;
pub mod schema;
