//! Authentication primitives: password hashing and session tokens

pub mod password;
pub mod token;

pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
pub use token::{Claims, TokenService};
