//! UseCase: ピア切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//! - レジストリからの削除と状態遷移（→ Closed）
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中のピアの切断
//! - エッジケース：二重切断（冪等）、レジストリから既に削除されたピアの切断

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// ピア切断のユースケース
pub struct DisconnectPeerUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectPeerUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を閉じてレジストリから削除する
    ///
    /// 冪等で、エラーにはなりません。
    ///
    /// # Returns
    ///
    /// レジストリから実際に削除された場合は `true`
    pub async fn execute(&self, connection: &mut Connection) -> bool {
        connection.close();
        let removed = self.registry.unregister(&connection.id).await;
        if removed {
            tracing::info!(
                "Connection '{}' closed ({} connected)",
                connection.id,
                self.registry.connection_count().await
            );
        }
        removed
    }
}
