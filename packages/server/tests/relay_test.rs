//! Integration tests: the relay served in-process on an ephemeral port and
//! driven by real WebSocket and HTTP clients.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use parlor_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    ui::Server,
    usecase::SessionProtocol,
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const FRAME_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);
const TEST_MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Start a relay on 127.0.0.1 with an OS-assigned port
async fn start_server(static_dir: PathBuf) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let config = ServerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        max_payload_bytes: TEST_MAX_PAYLOAD_BYTES,
        static_dir,
    };
    let protocol = Arc::new(SessionProtocol::new(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(WebSocketMessagePusher::new()),
    ));
    let server = Server::new(config, protocol);
    tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });

    addr
}

/// Temporary directory with the given files, unique per test
fn static_dir(test_name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "parlor-static-{}-{}",
        std::process::id(),
        test_name
    ));
    std::fs::create_dir_all(&dir).expect("Failed to create static dir");
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).expect("Failed to write static file");
    }
    dir
}

fn remove_dir(dir: &Path) {
    let _ = std::fs::remove_dir_all(dir);
}

/// Helper struct wrapping one WebSocket client connection
struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    sid: String,
}

impl TestClient {
    /// Connect and consume the handshake frame
    async fn connect(addr: SocketAddr) -> Self {
        let (ws, _response) = connect_async(format!("ws://{}/ws", addr))
            .await
            .expect("Failed to connect");
        let mut client = TestClient {
            ws,
            sid: String::new(),
        };

        let handshake = client.next_frame().await;
        assert_eq!(handshake["event"], "connect");
        client.sid = handshake["data"]["sid"]
            .as_str()
            .expect("Handshake without sid")
            .to_string();
        client
    }

    async fn emit(&mut self, event: &str, data: Value) {
        self.emit_raw(json!({"event": event, "data": data}))
            .await
            .expect("Failed to send frame");
    }

    /// Send a frame, tolerating a connection the server already dropped
    async fn emit_raw(&mut self, frame: Value) -> Result<(), tokio_tungstenite::tungstenite::Error> {
        self.ws.send(Message::Text(frame.to_string().into())).await
    }

    async fn join(&mut self, name: &str) {
        self.emit("join_chat", json!({"username": name})).await;
    }

    /// Next text frame as received
    async fn next_text(&mut self) -> String {
        loop {
            let message = timeout(FRAME_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = message {
                return text.as_str().to_string();
            }
        }
    }

    /// Next text frame parsed as JSON
    async fn next_frame(&mut self) -> Value {
        let text = self.next_text().await;
        serde_json::from_str(&text).expect("Frame is not JSON")
    }

    /// Assert that nothing arrives for a short while
    async fn expect_silence(&mut self) {
        let result = timeout(SILENCE_WINDOW, self.ws.next()).await;
        assert!(result.is_err(), "Unexpected frame: {:?}", result);
    }

    async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}

fn system(content: &str) -> Value {
    json!({"event": "receive_message", "data": {"type": "system", "content": content}})
}

fn user_list(users: &[(&str, &str)]) -> Value {
    let users: Vec<Value> = users
        .iter()
        .map(|(sid, name)| json!({"sid": sid, "name": name}))
        .collect();
    let count = users.len();
    json!({"event": "update_user_list", "data": {"users": users, "count": count}})
}

#[tokio::test]
async fn test_join_typing_and_leave_scenario() {
    // テスト項目: 参加、入力中表示、切断までの通知が正しい順序と宛先で届く
    // given (前提条件):
    let dir = static_dir("scenario", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    let (a, b) = (alice.sid.clone(), bob.sid.clone());

    // when (操作): A が Alice として参加
    alice.join("Alice").await;

    // then (期待する結果): 両者に参加メッセージ、続いて参加者リストが届く
    for client in [&mut alice, &mut bob] {
        assert_eq!(client.next_frame().await, system("Alice has joined."));
        assert_eq!(client.next_frame().await, user_list(&[(a.as_str(), "Alice")]));
    }

    // when (操作): B が Bob として参加
    bob.join("Bob").await;

    // then (期待する結果): 参加者リストは参加順
    for client in [&mut alice, &mut bob] {
        assert_eq!(client.next_frame().await, system("Bob has joined."));
        assert_eq!(
            client.next_frame().await,
            user_list(&[(a.as_str(), "Alice"), (b.as_str(), "Bob")])
        );
    }

    // when (操作): B が入力中を通知
    bob.emit("typing", json!({})).await;

    // then (期待する結果): A にだけ表示通知が届く
    assert_eq!(
        alice.next_frame().await,
        json!({"event": "display_typing", "data": {"username": "Bob", "sid": b}})
    );

    // when (操作): B が入力を止める
    bob.emit("stop_typing", json!({})).await;

    // then (期待する結果): A に非表示通知が届き、B には何も届かない
    assert_eq!(
        alice.next_frame().await,
        json!({"event": "hide_typing", "data": {"sid": b}})
    );
    bob.expect_silence().await;

    // when (操作): A が切断
    alice.close().await;

    // then (期待する結果): B に退出メッセージと更新後の参加者リストが届く
    assert_eq!(bob.next_frame().await, system("Alice has left."));
    assert_eq!(bob.next_frame().await, user_list(&[(b.as_str(), "Bob")]));

    bob.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_chat_message_reaches_everyone_including_sender() {
    // テスト項目: チャットメッセージは送信者を含む全接続にそのまま中継される
    // given (前提条件):
    let dir = static_dir("chat", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    let payload = json!({
        "type": "text",
        "content": "こんにちは",
        "sender": "Alice",
        "meta": {"reply_to": null, "tags": [1, "two", false]}
    });

    // when (操作):
    alice.emit("send_message", payload.clone()).await;

    // then (期待する結果): 参加前の接続にも同じペイロードが届く
    let expected = json!({"event": "receive_message", "data": payload});
    assert_eq!(alice.next_frame().await, expected);
    assert_eq!(bob.next_frame().await, expected);

    alice.close().await;
    bob.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_signaling_is_relayed_to_everyone_but_sender() {
    // テスト項目: シグナリングは送信者以外に、ペイロードを変えずに中継される
    // given (前提条件):
    let dir = static_dir("signaling", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    let mut carol = TestClient::connect(addr).await;
    let offer = json!({"offer": {"type": "offer", "sdp": "v=0\r\no=- 46117317 2 IN IP4 127.0.0.1\r\n"}, "to": "anyone"});
    let candidate = json!({"candidate": "candidate:1 1 UDP 2122252543 192.0.2.1 54400 typ host", "sdpMLineIndex": 0});

    // when (操作): A が発信し、B が応答し、A が候補を送り、B が終了する
    alice.emit("call_user", offer.clone()).await;
    let call_made = json!({"event": "call_made", "data": offer});
    assert_eq!(bob.next_frame().await, call_made);
    assert_eq!(carol.next_frame().await, call_made);

    bob.emit("make_answer", json!({"answer": {"type": "answer"}})).await;
    let answer_made = json!({"event": "answer_made", "data": {"answer": {"type": "answer"}}});
    assert_eq!(alice.next_frame().await, answer_made);
    assert_eq!(carol.next_frame().await, answer_made);

    alice.emit("ice_candidate", candidate.clone()).await;
    let ice = json!({"event": "ice_candidate", "data": candidate});
    assert_eq!(bob.next_frame().await, ice);
    assert_eq!(carol.next_frame().await, ice);

    bob.emit("end_call", Value::Null).await;

    // then (期待する結果): 終了通知は空オブジェクトで届き、各送信者には何も返らない
    let ended = json!({"event": "call_ended", "data": {}});
    assert_eq!(alice.next_frame().await, ended);
    assert_eq!(carol.next_frame().await, ended);
    alice.expect_silence().await;
    bob.expect_silence().await;

    alice.close().await;
    bob.close().await;
    carol.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_relayed_payload_text_is_unchanged() {
    // テスト項目: 64 bit を超える整数や指数表記を含むペイロードも、受信したテキストのまま中継される
    // given (前提条件):
    let dir = static_dir("verbatim", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    let payload = r#"{"n":12345678901234567890123,"e":1e2,"price":1.50,"z":"last","a":"first"}"#;

    // when (操作):
    alice
        .ws
        .send(Message::Text(
            format!(r#"{{"event":"call_user","data":{}}}"#, payload).into(),
        ))
        .await
        .expect("Failed to send frame");
    alice
        .ws
        .send(Message::Text(
            format!(r#"{{"event":"send_message","data":{}}}"#, payload).into(),
        ))
        .await
        .expect("Failed to send frame");

    // then (期待する結果):
    assert_eq!(
        bob.next_text().await,
        format!(r#"{{"event":"call_made","data":{}}}"#, payload)
    );
    assert_eq!(
        bob.next_text().await,
        format!(r#"{{"event":"receive_message","data":{}}}"#, payload)
    );

    alice.close().await;
    bob.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_join_twice_keeps_single_entry() {
    // テスト項目: 同じ接続が二度参加すると名前が更新され、参加者は増えない
    // given (前提条件):
    let dir = static_dir("rejoin", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let a = alice.sid.clone();
    alice.join("Alice").await;
    alice.next_frame().await;
    alice.next_frame().await;

    // when (操作):
    alice.join("Alicia").await;

    // then (期待する結果):
    assert_eq!(alice.next_frame().await, system("Alicia has joined."));
    assert_eq!(alice.next_frame().await, user_list(&[(a.as_str(), "Alicia")]));

    alice.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_join_without_username_uses_guest() {
    // テスト項目: ユーザー名が無い参加は Guest として扱われる
    // given (前提条件):
    let dir = static_dir("guest", &[]);
    let addr = start_server(dir.clone()).await;
    let mut client = TestClient::connect(addr).await;
    let sid = client.sid.clone();

    // when (操作):
    client.emit("join_chat", json!({"username": 42})).await;

    // then (期待する結果):
    assert_eq!(client.next_frame().await, system("Guest has joined."));
    assert_eq!(client.next_frame().await, user_list(&[(sid.as_str(), "Guest")]));

    client.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_disconnect_without_join_is_silent() {
    // テスト項目: 参加していない接続の切断は誰にも通知されない
    // given (前提条件):
    let dir = static_dir("silent", &[]);
    let addr = start_server(dir.clone()).await;
    let mut observer = TestClient::connect(addr).await;
    let lurker = TestClient::connect(addr).await;

    // when (操作):
    lurker.close().await;

    // then (期待する結果):
    observer.expect_silence().await;

    observer.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_malformed_frames_are_dropped_and_connection_survives() {
    // テスト項目: 不正なフレームや未知のイベントは無視され、接続は維持される
    // given (前提条件):
    let dir = static_dir("malformed", &[]);
    let addr = start_server(dir.clone()).await;
    let mut client = TestClient::connect(addr).await;

    // when (操作):
    client
        .ws
        .send(Message::Text("not json".into()))
        .await
        .expect("Failed to send frame");
    client.emit("rename", json!({"to": "x"})).await;
    client.emit("send_message", json!({"content": "still here"})).await;

    // then (期待する結果):
    assert_eq!(
        client.next_frame().await,
        json!({"event": "receive_message", "data": {"content": "still here"}})
    );

    client.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_oversized_message_closes_sender() {
    // テスト項目: 上限を超えるメッセージを送った接続は切断され、退出が通知される
    // given (前提条件):
    let dir = static_dir("oversized", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let mut bob = TestClient::connect(addr).await;
    alice.join("Alice").await;
    bob.next_frame().await;
    bob.next_frame().await;

    // when (操作):
    let huge = "x".repeat(TEST_MAX_PAYLOAD_BYTES * 2);
    let _ = alice.emit_raw(json!({"event": "send_message", "data": {"content": huge}})).await;

    // then (期待する結果): B には巨大なメッセージは届かず、A の退出が届く
    assert_eq!(bob.next_frame().await, system("Alice has left."));
    assert_eq!(bob.next_frame().await, user_list(&[]));

    bob.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_health_and_presence_endpoints() {
    // テスト項目: ヘルスチェックと参加者一覧の HTTP エンドポイント
    // given (前提条件):
    let dir = static_dir("http_api", &[]);
    let addr = start_server(dir.clone()).await;
    let mut alice = TestClient::connect(addr).await;
    let a = alice.sid.clone();
    alice.join("Alice").await;
    alice.next_frame().await;
    alice.next_frame().await;
    let http = reqwest::Client::new();

    // when (操作):
    let health = http
        .get(format!("http://{}/api/health", addr))
        .send()
        .await
        .expect("Health request failed");
    let presence = http
        .get(format!("http://{}/api/presence", addr))
        .send()
        .await
        .expect("Presence request failed");

    // then (期待する結果):
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    assert_eq!(
        health.json::<Value>().await.expect("Health body is not JSON"),
        json!({"status": "ok"})
    );
    assert_eq!(presence.status(), reqwest::StatusCode::OK);
    assert_eq!(
        presence.json::<Value>().await.expect("Presence body is not JSON"),
        json!({"users": [{"sid": a, "name": "Alice"}], "count": 1})
    );

    alice.close().await;
    remove_dir(&dir);
}

#[tokio::test]
async fn test_static_assets_are_served_from_static_dir() {
    // テスト項目: index.html と PWA アセットが静的ディレクトリから配信される
    // given (前提条件):
    let dir = static_dir(
        "static_assets",
        &[
            ("index.html", "<!doctype html><title>parlor</title>"),
            ("manifest.json", r#"{"name":"parlor"}"#),
        ],
    );
    let addr = start_server(dir.clone()).await;
    let http = reqwest::Client::new();

    // when (操作):
    let index = http
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("Index request failed");
    let manifest = http
        .get(format!("http://{}/manifest.json", addr))
        .send()
        .await
        .expect("Manifest request failed");
    let missing = http
        .get(format!("http://{}/sw.js", addr))
        .send()
        .await
        .expect("Service worker request failed");

    // then (期待する結果):
    assert_eq!(index.status(), reqwest::StatusCode::OK);
    assert_eq!(
        index.text().await.expect("Index body"),
        "<!doctype html><title>parlor</title>"
    );
    assert_eq!(manifest.status(), reqwest::StatusCode::OK);
    assert_eq!(
        manifest.text().await.expect("Manifest body"),
        r#"{"name":"parlor"}"#
    );
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    remove_dir(&dir);
}

#[tokio::test]
async fn test_index_missing_returns_not_found() {
    // テスト項目: index.html が無い場合は 404 とエラーメッセージを返す
    // given (前提条件):
    let dir = static_dir("no_index", &[]);
    let addr = start_server(dir.clone()).await;

    // when (操作):
    let response = reqwest::get(format!("http://{}/", addr))
        .await
        .expect("Index request failed");

    // then (期待する結果):
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(
        response.text().await.expect("Index body"),
        "index.html not found"
    );

    remove_dir(&dir);
}
