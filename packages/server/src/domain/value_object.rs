//! 値オブジェクト

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 接続中のトランスポートチャンネルを識別する ID
///
/// 接続時にトランスポートが割り当て、再利用しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        let actual = value.chars().count();
        if actual > Self::MAX_LENGTH {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: Self::MAX_LENGTH,
                actual,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続 ID の生成
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// ランダムな接続 ID（UUID v4）を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().simple().to_string())
    }
}

/// 参加時に接続が名乗った表示名
///
/// 空文字列を含め、どんな文字列でも受け付ける。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// 参加時に名前が指定されなかった場合
    pub const GUEST: &'static str = "Guest";
    /// 参加前に入力中になった場合
    pub const UNKNOWN_TYPIST: &'static str = "Someone";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 指定された名前を解決（無ければ [`DisplayName::GUEST`]）
    pub fn or_guest(requested: Option<String>) -> Self {
        Self(requested.unwrap_or_else(|| Self::GUEST.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
