//! Version registry adapters.

mod fixed;
mod http;

pub use fixed::StaticRegistry;
pub use http::{HttpRegistry, NPM_REGISTRY, parse_latest_version};
