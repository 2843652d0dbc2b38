// --- File: crates/sharemeal_api/src/lib.rs ---
pub mod doc;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod handlers_test;

pub use handlers::{session_user, ApiState, SESSION_HEADER};
pub use routes::{admin_routes, routes};
