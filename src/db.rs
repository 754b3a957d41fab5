use std::time::Duration;

use sqlx::{postgres::PgConnectOptions, Connection, PgConnection};
use tracing::warn;

use crate::config::DbConfig;

/// Maximum connection attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 15;
/// Fixed delay between failed attempts (linear, not exponential).
pub const RETRY_DELAY: Duration = Duration::from_secs(2);
/// Bound on how long a single attempt may block.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Raised once all attempts are exhausted; callers must not retry further.
#[derive(Debug, thiserror::Error)]
#[error("database unreachable after {attempts} attempts: {last}")]
pub struct ConnectFailure {
    pub attempts: u32,
    #[source]
    pub last: sqlx::Error,
}

/// Hands out dedicated store connections under a bounded retry policy.
///
/// Each `acquire` opens a fresh connection owned by the caller for one
/// logical operation; dropping it closes it on every exit path. The store
/// container may still be starting when this process comes up, so failed
/// attempts wait a fixed delay instead of failing fast.
#[derive(Clone)]
pub struct Db {
    opts: PgConnectOptions,
    host: String,
}

impl Db {
    pub fn new(cfg: &DbConfig) -> Self {
        let opts = PgConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .password(&cfg.password)
            .database(&cfg.name);
        Self {
            opts,
            host: cfg.host.clone(),
        }
    }

    /// Host this manager connects to, for health reporting.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn acquire(&self) -> Result<PgConnection, ConnectFailure> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match tokio::time::timeout(
                CONNECT_TIMEOUT,
                PgConnection::connect_with(&self.opts),
            )
            .await
            {
                Ok(Ok(conn)) => return Ok(conn),
                Ok(Err(e)) => e,
                Err(_elapsed) => sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "connection attempt timed out",
                )),
            };
            if attempt >= MAX_ATTEMPTS {
                return Err(ConnectFailure {
                    attempts: attempt,
                    last: err,
                });
            }
            warn!(
                attempt,
                max_attempts = MAX_ATTEMPTS,
                delay_secs = RETRY_DELAY.as_secs(),
                error = %err,
                "db connection attempt failed; retrying"
            );
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy_is_bounded() {
        // Total sleep is (MAX_ATTEMPTS - 1) * RETRY_DELAY; keep the window
        // under a minute so a dead store cannot hang a request forever.
        let total = RETRY_DELAY * (MAX_ATTEMPTS - 1);
        assert_eq!(total, Duration::from_secs(28));
        assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(3));
    }

    #[test]
    fn connect_failure_reports_attempts_and_source() {
        let err = ConnectFailure {
            attempts: MAX_ATTEMPTS,
            last: sqlx::Error::PoolClosed,
        };
        let msg = err.to_string();
        assert!(msg.contains("15 attempts"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
