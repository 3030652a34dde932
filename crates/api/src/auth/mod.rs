//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 token issuance and validation.

pub mod jwt;
