//! インメモリの ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中のクライアントの送信キュー（bounded `mpsc::Sender`）を管理
//! - 送信者以外の全接続へのブロードキャスト
//! - 削除したピアへの通知（`EvictionNotice`）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された送信キューを受け取り、フレームの投入にのみ使用します。
//!
//! 登録・削除・ブロードキャストはすべて同じ Mutex を取得するため、
//! ブロードキャストが切断処理の途中の接続を観測することはありません。
//! キューへの投入は `try_send` で行い、遅いピアを待つことはありません。
//! キューが満杯または閉じているピアは、同じクリティカルセクション内でレジストリから削除され、
//! 削除理由が通知されます（disconnect-on-overflow）。
//! 登録されていない送信者からのブロードキャストも同じロックの中で拒否されるため、
//! 削除済みのピアがフレームを配送することはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError, oneshot};

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionRegistry, DeliveryFailure, EvictionNotice,
    OutboundFrame, PeerChannel, RelayError,
};

/// 登録済みの接続
struct Peer {
    channel: PeerChannel,
    evicted: oneshot::Sender<DeliveryFailure>,
}

/// インメモリの接続レジストリ
///
/// ## フィールド
///
/// - `connections`: 接続 ID と送信キューのマップ（外部には公開しない）
///
/// ## 使用例
///
/// ```ignore
/// let registry = InMemoryConnectionRegistry::new();
/// let evicted = registry.register(connection_id.clone(), tx).await?;
/// let report = registry.broadcast_except(&connection_id, frame).await?;
/// ```
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, Peer>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `sender` 以外の全接続に対して `f` を呼ぶ
    ///
    /// `f` が `Err` を返した接続はレジストリから削除され、`EvictionNotice` に理由が届きます。
    /// `sender` が登録されていない場合は何もせず `SenderNotRegistered` を返します。
    /// ロックを保持したまま呼ばれるため、`f` はブロックしてはいけません。
    pub async fn for_each_except<F>(
        &self,
        sender: &ConnectionId,
        mut f: F,
    ) -> Result<Vec<(ConnectionId, DeliveryFailure)>, RelayError>
    where
        F: FnMut(&ConnectionId, &PeerChannel) -> Result<(), DeliveryFailure>,
    {
        let mut connections = self.connections.lock().await;
        if !connections.contains_key(sender) {
            return Err(RelayError::SenderNotRegistered(sender.clone()));
        }

        let failed: Vec<(ConnectionId, DeliveryFailure)> = connections
            .iter()
            .filter(|(id, _)| *id != sender)
            .filter_map(|(id, peer)| {
                f(id, &peer.channel)
                    .err()
                    .map(|cause| (id.clone(), cause))
            })
            .collect();

        for (id, cause) in &failed {
            if let Some(peer) = connections.remove(id) {
                // 受信側が既に無い場合は、接続の後始末が進行中
                let _ = peer.evicted.send(*cause);
            }
        }

        Ok(failed)
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(
        &self,
        id: ConnectionId,
        channel: PeerChannel,
    ) -> Result<EvictionNotice, RelayError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&id) {
            return Err(RelayError::ConnectionRegistrationFailure(id));
        }
        let (evicted, notice) = oneshot::channel();
        tracing::debug!("Connection '{}' registered", id);
        connections.insert(id, Peer { channel, evicted });
        Ok(notice)
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered", id);
        }
        removed
    }

    async fn broadcast_except(
        &self,
        sender: &ConnectionId,
        frame: OutboundFrame,
    ) -> Result<BroadcastReport, RelayError> {
        let mut delivered = Vec::new();

        let dropped = self
            .for_each_except(sender, |id, channel| {
                match channel.try_send(frame.clone()) {
                    Ok(()) => {
                        delivered.push(id.clone());
                        Ok(())
                    }
                    Err(TrySendError::Full(_)) => Err(DeliveryFailure::QueueFull),
                    Err(TrySendError::Closed(_)) => Err(DeliveryFailure::ChannelClosed),
                }
            })
            .await?;

        // ブロードキャストでは一部の送信失敗を許容
        for (id, cause) in &dropped {
            let error = RelayError::DeliveryFailure {
                connection_id: id.clone(),
                cause: *cause,
            };
            tracing::warn!("{}; connection evicted", error);
        }

        Ok(BroadcastReport { delivered, dropped })
    }

    async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}
