//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration problem, 4 store unreachable,
//! 5 fatal error.

pub mod hash_password;
pub mod init;
pub mod serve;
pub mod validate;
