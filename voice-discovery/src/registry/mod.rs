//! プロバイダー登録管理
//!
//! 設定されたTTS/STTエンドポイントの探索結果をメモリ内で保持し、
//! ボイス・モデルによる検索とスナップショットを提供する。

pub mod endpoints;
pub mod snapshot;

pub use endpoints::ProviderRegistry;
pub use snapshot::{EndpointSnapshot, RegistrySnapshot};
