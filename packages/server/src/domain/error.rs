//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの作成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Connection ID must not be empty")]
    EmptyConnectionId,

    #[error("Connection ID is too long: {actual} characters (max {max})")]
    ConnectionIdTooLong { max: usize, actual: usize },
}

/// 特定の接続へのイベント送信時のエラー
///
/// ブロードキャストではこのエラーを返さず、閉じた接続はスキップする。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
