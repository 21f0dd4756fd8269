// src/api/http/mod.rs

pub mod handlers;
pub mod rate_limit;
pub mod router;

pub use router::{api_router, create_router};
