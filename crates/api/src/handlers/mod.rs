pub mod mock_auth;
pub mod project;
pub mod report;
pub mod time_entry;
pub mod user;
