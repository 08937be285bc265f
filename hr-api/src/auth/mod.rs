//! Authentication: credential hashing, sessions and the session gate

pub mod cookie;
pub mod hasher;
pub mod middleware;
pub mod rate_limit;
pub mod session;

pub use session::SessionIdentity;
