//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `DiscoveryError`は探索プローブの失敗を種別付きで表す。
//! プローブ境界で捕捉され、レジストリの`last_error`として保持されるため、
//! 呼び出し元へ伝播することはない。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 探索エラー
///
/// シリアライズ時は`{"kind": "...", "message": "..."}`形式になる。
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum DiscoveryError {
    /// Request timed out
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// Unexpected response shape during listing or parsing
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Any other discovery failure
    #[error("Discovery failed: {0}")]
    Failed(String),
}

impl DiscoveryError {
    /// エラー種別を文字列で返す
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Connection(_) => "connection",
            Self::Protocol(_) => "protocol",
            Self::Failed(_) => "failed",
        }
    }

    /// 種別プレフィックスを含まないメッセージ本文
    pub fn message(&self) -> &str {
        match self {
            Self::Timeout(msg) | Self::Connection(msg) | Self::Protocol(msg) | Self::Failed(msg) => {
                msg
            }
        }
    }

    /// 汎用の失敗を作成
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl From<reqwest::Error> for DiscoveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Protocol(err.to_string())
        } else {
            Self::Failed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(format!("invalid JSON response: {}", err))
    }
}

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL could not be parsed or uses an unsupported scheme
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl {
        /// 対象のURL
        url: String,
        /// 不正な理由
        reason: String,
    },

    /// Invalid value for a setting
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// 設定名
        name: &'static str,
        /// 不正な理由
        reason: String,
    },
}
