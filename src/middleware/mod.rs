pub mod canonical_host;
pub mod rate_limit;

pub use canonical_host::canonical_host_middleware;
pub use rate_limit::{RateLimit, rate_limit_middleware};
