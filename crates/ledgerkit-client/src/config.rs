//! Client configuration.

use ledgerkit_rpc::{RpcConfig, DEFAULT_POLL_INTERVAL};
use std::time::Duration;

/// Default maximum number of items per JSON-RPC batch.
pub const DEFAULT_BATCH_ITEM_LIMIT: i64 = 100;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc: RpcConfig,
    /// Items per lookup batch; values below 1 mean one item per batch.
    pub batch_item_limit: i64,
    /// Delay between confirmation polls.
    pub poll_interval: Duration,
    /// Partition type the node must report; `None` skips the check.
    pub partition_type: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            batch_item_limit: DEFAULT_BATCH_ITEM_LIMIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            partition_type: None,
        }
    }
}

impl ClientConfig {
    pub fn new(url: &str) -> Self {
        Self {
            rpc: RpcConfig::new(url),
            ..Default::default()
        }
    }

    pub fn set_rpc(mut self, rpc: RpcConfig) -> Self {
        self.rpc = rpc;
        self
    }

    pub fn set_batch_item_limit(mut self, limit: i64) -> Self {
        self.batch_item_limit = limit;
        self
    }

    pub fn set_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn set_partition_type(mut self, partition_type: u32) -> Self {
        self.partition_type = Some(partition_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.batch_item_limit, 100);
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert!(config.partition_type.is_none());
    }

    #[test]
    fn test_setters() {
        let config = ClientConfig::new("http://node:1/")
            .set_batch_item_limit(0)
            .set_poll_interval(Duration::from_millis(5))
            .set_partition_type(2);
        assert_eq!(config.rpc.url, "http://node:1");
        assert_eq!(config.batch_item_limit, 0);
        assert_eq!(config.partition_type, Some(2));
    }
}
