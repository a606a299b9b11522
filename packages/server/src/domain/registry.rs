//! ConnectionRegistry trait 定義
//!
//! リレーの接続レジストリに対するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! レジストリ内部のコレクションは公開せず、`register` / `unregister` /
//! `broadcast_except` だけを操作として提供します。
//! 登録時に返される `EvictionNotice` により、接続側はレジストリからの削除を知ることができます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::{ConnectionId, DeliveryFailure, RelayError};

/// A frame queued for delivery. Shared between all recipients of one broadcast.
pub type OutboundFrame = Arc<str>;

/// Bounded outbound queue of one connection.
pub type PeerChannel = mpsc::Sender<OutboundFrame>;

/// Resolves with the cause when the registry evicts the connection.
///
/// Resolves with an error instead when the connection is unregistered normally.
pub type EvictionNotice = oneshot::Receiver<DeliveryFailure>;

/// Outcome of one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the frame was queued for.
    pub delivered: Vec<ConnectionId>,
    /// Connections that could not take the frame and were evicted.
    pub dropped: Vec<(ConnectionId, DeliveryFailure)>,
}

impl BroadcastReport {
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Registry of open relay connections.
///
/// Implementations must sequence registration, removal and broadcast
/// iteration so that a broadcast never observes a connection mid-teardown.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Add an open connection. Fails if the id is already registered.
    async fn register(
        &self,
        id: ConnectionId,
        channel: PeerChannel,
    ) -> Result<EvictionNotice, RelayError>;

    /// Remove a connection. Returns `false` if it was not registered.
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// Queue `frame` for every registered connection except `sender`.
    ///
    /// Never blocks on a slow peer: a peer whose queue is full or closed is
    /// evicted, notified and reported in `dropped`. Fails only when `sender`
    /// itself is not registered (it was evicted or has disconnected).
    async fn broadcast_except(
        &self,
        sender: &ConnectionId,
        frame: OutboundFrame,
    ) -> Result<BroadcastReport, RelayError>;

    /// Number of open connections.
    async fn connection_count(&self) -> usize;
}
