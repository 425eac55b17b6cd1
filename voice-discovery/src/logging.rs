//! ロギング初期化ユーティリティ
//!
//! ログは標準エラーへ出力し、標準出力はJSON等のコマンド出力専用にする。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// ログレベルの環境変数
pub const LOG_LEVEL_ENV: &str = "VOICE_DISCOVERY_LOG_LEVEL";

/// 既定のログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// フィルタを構築
///
/// `level_override`が指定されればそれを優先し、なければ`VOICE_DISCOVERY_LOG_LEVEL`、
/// 次に`RUST_LOG`を読む。解釈できない値は既定レベルになる。
pub fn build_filter(level_override: Option<&str>) -> EnvFilter {
    let directives = match level_override {
        Some(level) => level.to_string(),
        None => std::env::var(LOG_LEVEL_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
    };

    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルサブスクライバーを初期化
pub fn init(level_override: Option<&str>) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(level_override))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
