//! Session Protocol
//!
//! 受信イベントを対応するユースケースに振り分け、得られた送信指示を
//! Event Router に渡す。
//!
//! ## 並行性
//!
//! レジストリの変更と、それに続く参加者リストの作成・送信は一つの
//! 遷移ロック（`transition_lock`）の中で行う。これにより、別の接続の
//! イベントが間に割り込んで古い参加者リストが後から届くことはない。
//! ロック内で待つのはレジストリと送信キューへの書き込みのみで、
//! 受信者のソケット書き込みは待たない。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Dispatch, InboundEvent, MessagePusher, PusherChannel, Session,
    SessionRepository,
};

use super::{
    ConnectClientUseCase, DisconnectClientUseCase, EventRouter, JoinChatUseCase,
    RelaySignalUseCase, SendMessageUseCase, TypingUseCase, error::ConnectError,
};

/// 接続ごとのイベントを処理するプロトコル本体
pub struct SessionProtocol {
    repository: Arc<dyn SessionRepository>,
    connect_client_usecase: ConnectClientUseCase,
    join_chat_usecase: JoinChatUseCase,
    disconnect_client_usecase: DisconnectClientUseCase,
    send_message_usecase: SendMessageUseCase,
    typing_usecase: TypingUseCase,
    relay_signal_usecase: RelaySignalUseCase,
    event_router: EventRouter,
    /// 変更 → スナップショット → 送信 を一つの単位にする
    transition_lock: Mutex<()>,
}

impl SessionProtocol {
    /// 新しい SessionProtocol を作成
    ///
    /// # Arguments
    ///
    /// * `repository` - セッションレジストリ（このプロトコルだけが書き込む）
    /// * `message_pusher` - 接続への送信手段
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connect_client_usecase: ConnectClientUseCase::new(message_pusher.clone()),
            join_chat_usecase: JoinChatUseCase::new(repository.clone()),
            disconnect_client_usecase: DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(),
            typing_usecase: TypingUseCase::new(repository.clone()),
            relay_signal_usecase: RelaySignalUseCase::new(),
            event_router: EventRouter::new(message_pusher),
            repository,
            transition_lock: Mutex::new(()),
        }
    }

    /// トランスポートの接続。接続は未参加状態で始まる。
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), ConnectError> {
        let _guard = self.transition_lock.lock().await;
        self.connect_client_usecase
            .execute(connection_id, sender)
            .await
    }

    /// 受信イベントを処理し、配送した送信指示を返す
    pub async fn handle(&self, sender: &ConnectionId, event: InboundEvent) -> Vec<Dispatch> {
        tracing::debug!("Received '{}' from '{}'", event.name(), sender);

        let _guard = self.transition_lock.lock().await;
        let dispatches = match event {
            InboundEvent::Join { username } => {
                self.join_chat_usecase
                    .execute(sender.clone(), username)
                    .await
            }
            InboundEvent::SendMessage(payload) => {
                self.send_message_usecase.execute(sender, payload)
            }
            InboundEvent::Typing => self.typing_usecase.start(sender).await,
            InboundEvent::StopTyping => self.typing_usecase.stop(sender),
            InboundEvent::Signal(signal) => self.relay_signal_usecase.execute(sender, signal),
        };
        self.event_router.dispatch(&dispatches).await;

        dispatches
    }

    /// トランスポートの切断（正常終了・異常終了どちらも）
    ///
    /// 未参加の接続の場合は何も送信しない。
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Vec<Dispatch> {
        let _guard = self.transition_lock.lock().await;
        let dispatches = self
            .disconnect_client_usecase
            .execute(connection_id)
            .await;
        self.event_router.dispatch(&dispatches).await;

        dispatches
    }

    /// 現在の参加者リスト
    pub async fn presence(&self) -> Vec<Session> {
        self.repository.snapshot().await
    }
}
