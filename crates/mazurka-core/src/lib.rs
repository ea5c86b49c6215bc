// src/lib.rs
pub mod error;
pub mod extract;
pub mod http;
pub mod params;
pub mod router;
pub mod trie;

// Re-exports for users
pub use error::{RouterError, RouterResult};
pub use extract::PathParams;
pub use http::Method;
pub use params::{Params, parse_params};
pub use router::{CompiledMatch, RouteMatch, Router};
