// --- File: crates/sharemeal_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // Axum response glue
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{HttpStatusCode, ShareMealError};

pub use http::{map_json_error, IntoHttpResponse};

pub use logging::{init_with_config, log_result};
