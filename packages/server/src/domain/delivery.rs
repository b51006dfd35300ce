//! 送信指示
//!
//! 各ハンドラは自分では送信せず、[`Dispatch`] を返す。
//! 宛先の解決と送信は Event Router が行う。

use super::{event::OutboundEvent, value_object::ConnectionId};

/// 送信イベントの宛先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// 送信者を含む全ての接続
    BroadcastAll,
    /// 指定した接続以外の全ての接続
    BroadcastExcept(ConnectionId),
    /// 指定した一つの接続のみ
    DirectTo(ConnectionId),
}

impl Delivery {
    /// 現在接続中のチャンネルから宛先を解決する
    ///
    /// `connected` の順序を保つ。接続していない相手への個別送信は宛先なしになる。
    pub fn recipients(&self, connected: &[ConnectionId]) -> Vec<ConnectionId> {
        match self {
            Delivery::BroadcastAll => connected.to_vec(),
            Delivery::BroadcastExcept(excluded) => connected
                .iter()
                .filter(|id| *id != excluded)
                .cloned()
                .collect(),
            Delivery::DirectTo(target) => connected
                .iter()
                .filter(|id| *id == target)
                .cloned()
                .collect(),
        }
    }
}

/// 送信イベントと宛先の組
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub delivery: Delivery,
    pub event: OutboundEvent,
}

impl Dispatch {
    pub fn to_all(event: OutboundEvent) -> Self {
        Self {
            delivery: Delivery::BroadcastAll,
            event,
        }
    }

    pub fn to_all_except(sender: ConnectionId, event: OutboundEvent) -> Self {
        Self {
            delivery: Delivery::BroadcastExcept(sender),
            event,
        }
    }

    pub fn to_one(target: ConnectionId, event: OutboundEvent) -> Self {
        Self {
            delivery: Delivery::DirectTo(target),
            event,
        }
    }
}
