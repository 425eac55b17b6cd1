//! 共通ユーティリティ
//!
//! エラー型とURLヘルパー

/// エラー型定義
pub mod error;

/// ベースURLユーティリティ
pub mod url;

pub use error::{ConfigError, DiscoveryError};
