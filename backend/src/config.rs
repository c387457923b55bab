//! Server configuration from the environment.
//!
//! `.env` is loaded by the binary before this is read.
//!
//! | Variable             | Default | Meaning                        |
//! |----------------------|---------|--------------------------------|
//! | `PORT`               | 5000    | Listening port                 |
//! | `RASAR_MAX_UPLOAD_MB`| 50      | Request body limit, megabytes  |

use std::env;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

/// Settings of the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Read `PORT` and `RASAR_MAX_UPLOAD_MB`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let max_upload_bytes = match lookup("RASAR_MAX_UPLOAD_MB") {
            Some(raw) => {
                let mb = parse_or("RASAR_MAX_UPLOAD_MB", Some(raw), DEFAULT_MAX_UPLOAD_MB);
                mb.checked_mul(1024 * 1024).unwrap_or_else(|| {
                    log::warn!("Ignoring oversized RASAR_MAX_UPLOAD_MB='{}', using {}", mb, DEFAULT_MAX_UPLOAD_MB);
                    defaults.max_upload_bytes
                })
            }
            None => defaults.max_upload_bytes,
        };

        Self {
            port,
            max_upload_bytes,
        }
    }

    /// Same settings on another port.
    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}='{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
