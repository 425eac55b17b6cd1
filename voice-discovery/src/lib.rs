//! Speech provider discovery
//!
//! 設定されたTTS/STTエンドポイントを探索し、対応モデル・ボイスを
//! メモリ内レジストリとして提供する。

#![warn(missing_docs)]

/// 共通ユーティリティ（エラー型・URL操作）
pub mod common;

/// 型定義
pub mod types;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// プロバイダー種別の判別
pub mod detection;

/// モデル一覧の取得
pub mod sync;

/// ボイス一覧の取得
pub mod voices;

/// ローカルSTTの稼働確認
pub mod health;

/// 単一エンドポイントの探索
pub mod discovery;

/// プロバイダー登録管理
pub mod registry;

/// ロギング初期化ユーティリティ
pub mod logging;

/// CLIインターフェース
pub mod cli;

pub use common::error::{ConfigError, DiscoveryError};
pub use config::DiscoveryConfig;
pub use discovery::EndpointProber;
pub use registry::{EndpointSnapshot, ProviderRegistry, RegistrySnapshot};
pub use types::endpoint::{EndpointInfo, ProviderType, ServiceType};
