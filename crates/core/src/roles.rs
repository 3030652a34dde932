//! Well-known role names carried in the `roles` JWT claim.

pub const ROLE_USER: &str = "timeforingapp::USER";
pub const ROLE_ADMIN: &str = "timeforingapp::ADMIN";
