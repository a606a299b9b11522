//! UseCase: チャットメッセージのリレー
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 送信者以外の全接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にエコーしないこと、1つのピアの失敗が他に影響しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ピアへの配送
//! - エッジケース：他のピアが存在しない場合、一部のピアへの配送失敗
//! - 異常系：削除済みの送信元からのリレー

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, ChatMessage, ConnectionId, ConnectionRegistry, OutboundFrame, RelayError,
};

/// メッセージリレーのユースケース
pub struct RelayMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayMessageUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 検証済みメッセージを送信者以外の全接続へ配送
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続 ID（配送対象から除外される）
    /// * `message` - 検証済みのメッセージ（Domain Model）
    /// * `frame` - 配送するフレーム（DTO 層で再エンコードしたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 配送結果。配送に失敗したピアは既にレジストリから削除されています
    /// * `Err(RelayError::SenderNotRegistered)` - 送信元が既に削除されている。何も配送されません
    pub async fn execute(
        &self,
        from: &ConnectionId,
        message: &ChatMessage,
        frame: OutboundFrame,
    ) -> Result<BroadcastReport, RelayError> {
        let report = self.registry.broadcast_except(from, frame).await?;

        tracing::debug!(
            "Relayed message from '{}' (sender label '{}', {} chars): delivered={}, dropped={}",
            from,
            message.sender.as_str(),
            message.text.as_str().chars().count(),
            report.delivered_count(),
            report.dropped_count()
        );
        Ok(report)
    }
}
