//! UseCase: 通話シグナリングの中継
//!
//! WebRTC のオファー・アンサー・ICE 候補を中身を見ずに送信者以外へ転送する。
//! 送信者に戻すと二者間のネゴシエーションが混乱するため、必ず除外する。

use crate::domain::{ConnectionId, Dispatch, OutboundEvent, Signal};

/// シグナリング中継のユースケース
#[derive(Debug, Default)]
pub struct RelaySignalUseCase;

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// シグナリングの中継を実行
    pub fn execute(&self, sender: &ConnectionId, signal: Signal) -> Vec<Dispatch> {
        tracing::debug!("Relaying '{}' from '{}'", signal.name(), sender);
        vec![Dispatch::to_all_except(
            sender.clone(),
            OutboundEvent::from(signal),
        )]
    }
}
