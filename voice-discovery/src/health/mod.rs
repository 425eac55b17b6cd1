//! 稼働確認
//!
//! モデル一覧を取得できなかったローカルSTTエンドポイントに対する
//! フォールバックの稼働確認を提供する。

pub mod liveness;

pub use liveness::check_liveness;
