//! UseCase: 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - レジストリへの登録と、システムメッセージ・参加者リストの送信指示
//!
//! ### どのような状況を想定しているか
//! - 正常系：名前付きの参加
//! - エッジケース：名前無しの参加（"Guest"）、同じ接続での再参加（上書き）

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ConnectionId, Dispatch, DisplayName, OutboundEvent, SessionRepository,
};

use super::presence::presence_update;

/// 参加のユースケース
pub struct JoinChatUseCase {
    /// Repository（セッションレジストリの抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 参加を実行
    ///
    /// 未参加・参加済みのどちらの接続からも受け付ける。参加済みの場合は
    /// 表示名を置き換え、もう一度「参加しました」を送る。
    ///
    /// # Returns
    ///
    /// 全員宛ての送信指示（システムメッセージ → 参加者リストの順）
    pub async fn execute(
        &self,
        sender: ConnectionId,
        requested_name: Option<String>,
    ) -> Vec<Dispatch> {
        let display_name = DisplayName::or_guest(requested_name);

        // 1. Repository にセッションを登録（既存なら上書き）
        self.repository
            .put(sender.clone(), display_name.clone())
            .await;
        tracing::info!("Connection '{}' joined as '{}'", sender, display_name);

        // 2. システムメッセージ、3. 最新の参加者リスト
        vec![
            Dispatch::to_all(OutboundEvent::ReceiveMessage(ChatMessage::joined(
                &display_name,
            ))),
            presence_update(self.repository.as_ref()).await,
        ]
    }
}
