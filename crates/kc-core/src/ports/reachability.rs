use async_trait::async_trait;

/// Answers whether the device can currently reach the network.
#[async_trait]
pub trait ReachabilityPort: Send + Sync {
    async fn is_connected(&self) -> bool;
}
