//! Mock wallet session

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::Address;

/// The connected user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub address: Address,
    pub name: String,
}

/// Holds at most one connected identity
#[derive(Debug)]
pub struct Session {
    mock: Identity,
    connect_delay: Duration,
    current: RwLock<Option<Identity>>,
}

impl Session {
    pub fn new(mock: Identity, connect_delay: Duration) -> Self {
        Self {
            mock,
            connect_delay,
            current: RwLock::new(None),
        }
    }

    /// Simulates a wallet connect and returns the mock identity
    pub async fn connect(&self) -> Identity {
        tokio::time::sleep(self.connect_delay).await;
        let identity = self.mock.clone();
        *self.current.write().await = Some(identity.clone());
        info!(address = %identity.address, "Wallet connected");
        identity
    }

    pub async fn disconnect(&self) {
        if self.current.write().await.take().is_some() {
            info!("Wallet disconnected");
        }
    }

    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }
}
