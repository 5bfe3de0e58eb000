//! Authentication and session configuration.

use serde::{Deserialize, Serialize};

/// Authentication and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in days from issuance. Sessions are not renewed
    /// on use; a new login issues a fresh token.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: i64,
    /// Interval between expired-session purge sweeps, in hours.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2id lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_days: default_session_ttl(),
            purge_interval_hours: default_purge_interval(),
            password_min_length: default_password_min(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

fn default_session_ttl() -> i64 {
    30
}

fn default_purge_interval() -> u64 {
    12
}

fn default_password_min() -> usize {
    8
}

fn default_argon2_memory() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
