//! ボイス探索モジュール
//!
//! TTSエンドポイントのボイス一覧を、慣習的な2つのパスから順に取得する。
//! どちらも失敗した場合はOpenAIなら既知のボイス、それ以外は空リストを返す。
//! 空リストはエラーではなく「設定済みの既定ボイスを使う」ことを意味する。

pub mod parser;

pub use parser::{parse_voices_response, VoiceEntry, VoicesResponse};

use crate::common::error::DiscoveryError;
use crate::common::url::{unversioned_root, VERSION_PREFIX};
use crate::detection::is_openai_url;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// ボイス一覧を試すパス（`{root}/v1` からの相対、この順で試行）
pub const VOICE_LIST_PATHS: [&str; 2] = ["/audio/voices", "/voices"];

/// OpenAIの既知ボイス（OpenAIはボイス一覧APIを公開していない）
pub const OPENAI_VOICES: [&str; 6] = ["alloy", "echo", "fable", "nova", "onyx", "shimmer"];

/// ボイス一覧の候補URLを試行順に返す
pub fn voice_list_urls(base_url: &str) -> Vec<String> {
    let root = unversioned_root(base_url);
    VOICE_LIST_PATHS
        .iter()
        .map(|path| format!("{}{}{}", root, VERSION_PREFIX, path))
        .collect()
}

/// TTSエンドポイントのボイスを探索
///
/// 失敗しない。取得できなかった場合は既知ボイスか空リストを返す。
pub async fn discover_voices(client: &Client, base_url: &str, timeout: Duration) -> Vec<String> {
    for url in voice_list_urls(base_url) {
        debug!(url = %url, "Trying to fetch voices");
        match fetch_voices(client, &url, timeout).await {
            Ok(voices) => {
                info!(url = %url, voice_count = voices.len(), "Discovered voices");
                return voices;
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Could not fetch voices");
            }
        }
    }

    if is_openai_url(base_url) {
        debug!(base_url = %base_url, "Using known OpenAI voices");
        return OPENAI_VOICES.iter().map(|v| v.to_string()).collect();
    }

    debug!(
        base_url = %base_url,
        "No voices discovered, configured defaults will be used"
    );
    Vec::new()
}

async fn fetch_voices(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<String>, DiscoveryError> {
    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(DiscoveryError::failed(format!("HTTP {}", status.as_u16())));
    }

    let body = response.text().await?;
    parse_voices_response(&body)
}
