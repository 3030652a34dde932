//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods take any [`sqlx::PgExecutor`] so they run equally against the pool
//! or inside an open transaction (`&mut *tx`).

pub mod project_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
