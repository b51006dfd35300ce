//! WebSocket 接続ハンドラ
//!
//! トランスポートのアダプタ。接続 ID の割り当て、受信フレームのイベントへの変換、
//! 接続ごとの送信キューからソケットへの書き込みを行う。
//!
//! ## 終了処理
//!
//! 受信タスクは中断（abort）しない。書き込みタスクが終了した場合は停止通知を送り、
//! 受信タスクはフレームの間でそれを確認して終了する。処理中のイベントは
//! レジストリの変更から送信まで必ず完了する。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::{decode_inbound, handshake_frame},
    ui::state::AppState,
    usecase::SessionProtocol,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let max_payload_bytes = state.config.max_payload_bytes;
    ws.max_message_size(max_payload_bytes)
        .max_frame_size(max_payload_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// 送信キューのフレームを WebSocket に書き込むタスクを起動する
///
/// キューが閉じるか、ソケットへの書き込みに失敗すると終了する。
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // この接続宛てのフレームを受け取るキュー
    let (tx, rx) = mpsc::unbounded_channel();
    if let Err(e) = state.protocol.connect(connection_id.clone(), tx).await {
        tracing::warn!("Rejecting connection: {}", e);
        return;
    }

    let (mut sender, receiver) = socket.split();

    // 他のフレームより先に、自身の接続 ID を通知する
    match handshake_frame(&connection_id) {
        Ok(text) => {
            if let Err(e) = sender.send(Message::Text(text.into())).await {
                tracing::warn!("Failed to send handshake to '{}': {}", connection_id, e);
                state.protocol.disconnect(&connection_id).await;
                return;
            }
        }
        Err(e) => tracing::error!("Failed to encode handshake: {}", e),
    }

    let (stop_tx, stop_rx) = oneshot::channel();
    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // 受信タスク
    let mut recv_task = tokio::spawn(async move {
        receive_loop(
            receiver,
            &state_clone.protocol,
            &connection_id_clone,
            stop_rx,
        )
        .await;
    });

    // 書き込みタスク
    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            // 処理中のイベントを完了させてから終了する
            let _ = stop_tx.send(());
            if let Err(e) = recv_task.await {
                tracing::error!("Receive task for '{}' failed: {}", connection_id, e);
            }
        }
    };

    state.protocol.disconnect(&connection_id).await;
    tracing::info!("User {} disconnected", connection_id);
}

/// 受信フレームを解釈し、セッションプロトコルに渡す
///
/// 停止通知はフレームを待っている間だけ確認するため、`handle` の途中で終了することはない。
async fn receive_loop<S>(
    mut receiver: S,
    protocol: &SessionProtocol,
    connection_id: &ConnectionId,
    mut stop: oneshot::Receiver<()>,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut stop => {
                tracing::debug!("Writer for '{}' stopped, closing receive loop", connection_id);
                break;
            }
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                // 上限を超えるサイズのメッセージもここでエラーになる
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => match decode_inbound(text.as_str()) {
                Ok(event) => {
                    protocol.handle(connection_id, event).await;
                }
                Err(e) => {
                    tracing::warn!("Dropping frame from '{}': {}", connection_id, e);
                }
            },
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", connection_id);
            }
            Message::Close(_) => {
                tracing::debug!("Connection '{}' requested close", connection_id);
                break;
            }
            // Ping/Pong は WebSocket 層が自動で処理する
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}
