use std::time::Duration;

use async_trait::async_trait;
use kc_core::ports::ReachabilityPort;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Treats the device as online when a TCP connection to `host` opens in time.
///
/// An empty host disables the probe and always reports connected.
pub struct TcpReachability {
    host: String,
    timeout: Duration,
}

impl TcpReachability {
    /// `timeout_ms == 0` selects the default of two seconds.
    pub fn new(host: impl Into<String>, timeout_ms: u64) -> Self {
        let timeout = if timeout_ms == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_millis(timeout_ms)
        };
        Self {
            host: host.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ReachabilityPort for TcpReachability {
    async fn is_connected(&self) -> bool {
        if self.host.is_empty() {
            return true;
        }

        match timeout(self.timeout, TcpStream::connect(self.host.as_str())).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(err)) => {
                debug!(host = %self.host, error = %err, "Reachability probe failed");
                false
            }
            Err(_) => {
                debug!(host = %self.host, timeout_ms = self.timeout.as_millis() as u64, "Reachability probe timed out");
                false
            }
        }
    }
}
