//! Domain core for the timeføring backend.
//!
//! Pure types and rules with no I/O: the time-entry validator, contact field
//! normalisation, project listing rules, and report summarisation.

pub mod contact;
pub mod error;
pub mod project;
pub mod report;
pub mod roles;
pub mod time_entry;
pub mod types;
