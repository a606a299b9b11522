//! UseCase: ピア接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPeerUseCase::execute() メソッド
//! - 接続の登録と状態遷移（Connecting → Open）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：同じ接続 ID の二重登録

use std::sync::Arc;

use campus_shared::time::get_timestamp;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, EvictionNotice, PeerChannel, Timestamp,
};

use super::error::ConnectError;

/// ピア接続のユースケース
pub struct ConnectPeerUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectPeerUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を登録し、`Open` 状態の Connection を返す
    ///
    /// # Arguments
    ///
    /// * `id` - サーバーが採番した接続 ID
    /// * `channel` - この接続の送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok((Connection, EvictionNotice))` - 登録済み（`Open`）の接続と、レジストリから
    ///   削除されたときに発火する通知
    /// * `Err(ConnectError)` - 登録失敗。この接続だけを閉じればよい
    pub async fn execute(
        &self,
        id: ConnectionId,
        channel: PeerChannel,
    ) -> Result<(Connection, EvictionNotice), ConnectError> {
        let mut connection = Connection::new(id.clone(), Timestamp::new(get_timestamp()));

        let evicted = self.registry.register(id, channel).await?;
        connection.open();

        tracing::info!(
            "Connection '{}' opened ({} connected)",
            connection.id,
            self.registry.connection_count().await
        );
        Ok((connection, evicted))
    }
}
