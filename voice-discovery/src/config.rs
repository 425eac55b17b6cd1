//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the discovery
//! configuration built on top of them.

use reqwest::Url;
use std::time::Duration;

use crate::common::error::ConfigError;
use crate::types::endpoint::ServiceType;

/// APIキー未設定時に使うプレースホルダー（認証不要なローカルサービス向け）
pub const API_KEY_PLACEHOLDER: &str = "dummy-key-for-local";

/// モデル一覧取得のタイムアウト（秒）
pub const DEFAULT_MODEL_LIST_TIMEOUT_SECS: u64 = 10;

/// 稼働確認・ボイス一覧取得のタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// 既定のTTSベースURL（優先順）
pub const DEFAULT_TTS_BASE_URLS: [&str; 2] = ["http://127.0.0.1:8880/v1", "https://api.openai.com/v1"];

/// 既定のSTTベースURL（優先順）
pub const DEFAULT_STT_BASE_URLS: [&str; 2] = ["http://127.0.0.1:2022/v1", "https://api.openai.com/v1"];

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use voice_discovery::config::get_env_with_fallback;
///
/// let urls = get_env_with_fallback("VOICEMODE_TTS_BASE_URLS", "TTS_BASE_URLS");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        if new_name != old_name {
            tracing::warn!(
                "Environment variable '{}' is deprecated, use '{}' instead",
                old_name,
                new_name
            );
        }
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// カンマ区切りのURLリストをパース
///
/// 前後の空白と末尾の`/`を取り除き、空要素を捨て、重複は最初の出現のみ残す。
/// 順序は優先順位としてそのまま保持する。
///
/// ```
/// use voice_discovery::config::parse_url_list;
///
/// let urls = parse_url_list(" http://127.0.0.1:8880/v1/ ,, https://api.openai.com/v1,http://127.0.0.1:8880/v1");
/// assert_eq!(urls, vec!["http://127.0.0.1:8880/v1", "https://api.openai.com/v1"]);
/// ```
pub fn parse_url_list(value: &str) -> Vec<String> {
    dedup_urls(value.split(','))
}

fn dedup_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for url in urls {
        let url = url.as_ref().trim().trim_end_matches('/');
        if url.is_empty() || result.iter().any(|existing| existing == url) {
            continue;
        }
        result.push(url.to_string());
    }
    result
}

/// 探索設定
///
/// URLリストの順序がそのまま優先順位になる。
#[derive(Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// TTSベースURL（優先順）
    pub tts_base_urls: Vec<String>,
    /// STTベースURL（優先順）
    pub stt_base_urls: Vec<String>,
    /// モデル一覧取得に使うAPIキー
    pub api_key: Option<String>,
    /// モデル一覧取得のタイムアウト
    pub model_list_timeout: Duration,
    /// 稼働確認・ボイス一覧取得のタイムアウト
    pub probe_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            tts_base_urls: dedup_urls(DEFAULT_TTS_BASE_URLS),
            stt_base_urls: dedup_urls(DEFAULT_STT_BASE_URLS),
            api_key: None,
            model_list_timeout: Duration::from_secs(DEFAULT_MODEL_LIST_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field("tts_base_urls", &self.tts_base_urls)
            .field("stt_base_urls", &self.stt_base_urls)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_list_timeout", &self.model_list_timeout)
            .field("probe_timeout", &self.probe_timeout)
            .finish()
    }
}

impl DiscoveryConfig {
    /// Load discovery configuration from environment variables.
    ///
    /// - `VOICEMODE_TTS_BASE_URLS`（旧: `TTS_BASE_URLS`）
    /// - `VOICEMODE_STT_BASE_URLS`（旧: `STT_BASE_URLS`）
    /// - `OPENAI_API_KEY`
    /// - `VOICEMODE_DISCOVERY_TIMEOUT_SECS`（旧: `DISCOVERY_TIMEOUT_SECS`）
    /// - `VOICEMODE_PROBE_TIMEOUT_SECS`（旧: `PROBE_TIMEOUT_SECS`）
    ///
    /// 未設定または空のURLリストは既定値になる。
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let tts_base_urls = get_env_with_fallback("VOICEMODE_TTS_BASE_URLS", "TTS_BASE_URLS")
            .map(|value| parse_url_list(&value))
            .filter(|urls| !urls.is_empty())
            .unwrap_or(defaults.tts_base_urls);
        let stt_base_urls = get_env_with_fallback("VOICEMODE_STT_BASE_URLS", "STT_BASE_URLS")
            .map(|value| parse_url_list(&value))
            .filter(|urls| !urls.is_empty())
            .unwrap_or(defaults.stt_base_urls);

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let model_list_timeout_secs = get_env_with_fallback_parse(
            "VOICEMODE_DISCOVERY_TIMEOUT_SECS",
            "DISCOVERY_TIMEOUT_SECS",
            DEFAULT_MODEL_LIST_TIMEOUT_SECS,
        );
        let probe_timeout_secs = get_env_with_fallback_parse(
            "VOICEMODE_PROBE_TIMEOUT_SECS",
            "PROBE_TIMEOUT_SECS",
            DEFAULT_PROBE_TIMEOUT_SECS,
        );

        Self {
            tts_base_urls,
            stt_base_urls,
            api_key,
            model_list_timeout: Duration::from_secs(model_list_timeout_secs),
            probe_timeout: Duration::from_secs(probe_timeout_secs),
        }
    }

    /// TTSベースURLを置き換える
    pub fn with_tts_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tts_base_urls = dedup_urls(urls);
        self
    }

    /// STTベースURLを置き換える
    pub fn with_stt_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stt_base_urls = dedup_urls(urls);
        self
    }

    /// APIキーを設定
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// タイムアウトを設定
    pub fn with_timeouts(mut self, model_list_timeout: Duration, probe_timeout: Duration) -> Self {
        self.model_list_timeout = model_list_timeout;
        self.probe_timeout = probe_timeout;
        self
    }

    /// サービス種別ごとのベースURL（優先順）
    pub fn base_urls(&self, service_type: ServiceType) -> &[String] {
        match service_type {
            ServiceType::Tts => &self.tts_base_urls,
            ServiceType::Stt => &self.stt_base_urls,
        }
    }

    /// APIキー、未設定ならプレースホルダー
    pub fn api_key_or_placeholder(&self) -> &str {
        self.api_key.as_deref().unwrap_or(API_KEY_PLACEHOLDER)
    }

    /// 設定値を検証
    ///
    /// すべてのURLがhttp/httpsとしてパースでき、タイムアウトが0でないこと。
    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in self.tts_base_urls.iter().chain(&self.stt_base_urls) {
            let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    url: url.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        if self.model_list_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "model_list_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "probe_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
