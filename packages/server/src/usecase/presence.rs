//! 参加者リスト（プレゼンス）の構築
//!
//! 参加者リストは差分更新せず、送信のたびにレジストリから作り直す。

use crate::domain::{Dispatch, OutboundEvent, SessionRepository};

/// 現在の全セッションから `update_user_list` を全員宛てに作成
pub async fn presence_update(repository: &dyn SessionRepository) -> Dispatch {
    let sessions = repository.snapshot().await;
    Dispatch::to_all(OutboundEvent::UpdateUserList(sessions))
}
