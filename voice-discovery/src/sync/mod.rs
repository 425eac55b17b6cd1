//! モデル一覧取得モジュール
//!
//! エンドポイントの標準モデル一覧API（`GET {base_url}/models`）を呼び出す

pub mod parser;

pub use parser::{parse_models_response, ResponseFormat};

use crate::common::error::DiscoveryError;
use crate::common::url::join_path;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// モデル一覧の取得結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListing {
    /// 取得したモデルID（レスポンス順）
    pub models: Vec<String>,
    /// 検出されたレスポンス形式
    pub format: ResponseFormat,
}

/// エンドポイントからモデル一覧を取得
///
/// # 処理フロー
/// 1. `GET {base_url}/models` を`Authorization: Bearer`付きで送信
/// 2. 2xx以外は`Failed`
/// 3. OpenAI/Ollama形式をパース（どちらでもなければ`Protocol`）
pub async fn list_models(
    client: &Client,
    base_url: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<ModelListing, DiscoveryError> {
    let url = join_path(base_url, "models");

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(DiscoveryError::failed(format!(
            "HTTP {}: {}",
            status.as_u16(),
            truncate(&body, 200)
        )));
    }

    let json: serde_json::Value = response.json().await?;
    let (models, format) = parse_models_response(&json);

    if format == ResponseFormat::Unknown {
        return Err(DiscoveryError::Protocol(format!(
            "unrecognized model list response from {}",
            url
        )));
    }

    debug!(
        url = %url,
        format = format.as_str(),
        model_count = models.len(),
        "Listed models"
    );

    Ok(ModelListing { models, format })
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
