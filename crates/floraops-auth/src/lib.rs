//! # floraops-auth
//!
//! Authentication for FloraOps: Argon2id password hashing, opaque bearer
//! token generation, and the session lifecycle (register, login, validate,
//! logout). Tokens are random 256-bit strings; only their SHA-256 digests
//! are ever persisted.

pub mod password;
pub mod session;
pub mod token;

pub use password::PasswordHasher;
pub use session::{AuthSession, LoginResult, SessionManager};
