//! WebSocket メッセージの DTO
//!
//! 全てのフレームは JSON オブジェクト `{"event": <名前>, "data": <ペイロード>}`。

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// クライアントから届くフレーム
///
/// `data` は解釈せずに受信したテキストのまま保持する（無い場合・`null` の場合は `None`）。
#[derive(Debug, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

/// 送信フレーム（ブロードキャストごとに一度だけエンコードする）
#[derive(Debug, Serialize)]
pub struct OutboundFrame<'a, T: Serialize> {
    pub event: &'a str,
    pub data: T,
}

/// サーバーが生成するメッセージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    System,
}

/// `receive_message` のペイロード（入退室通知）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub r#type: MessageType,
    pub content: String,
}

/// 参加者リストの一要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sid: String,
    pub name: String,
}

/// `update_user_list` のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListMessage {
    pub users: Vec<UserInfo>,
    pub count: usize,
}

/// `display_typing` のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayTypingMessage {
    pub username: String,
    pub sid: String,
}

/// `hide_typing` のペイロード（接続直後のハンドシェイクでも使う）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidMessage {
    pub sid: String,
}

/// `call_ended` のペイロード（常に空オブジェクト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyMessage {}
