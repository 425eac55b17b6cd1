//! Provider Type Detection Module
//!
//! ベースURLから診断用のプロバイダー種別を推定する。
//! ネットワークアクセスは行わない。
//!
//! Detection priority: OpenAI > well-known local port > loopback > OpenAI-compatible

use reqwest::Url;

use crate::common::url::{is_loopback_host, is_loopback_url};
use crate::types::endpoint::ProviderType;

/// OpenAIクラウドのドメイン
pub const OPENAI_DOMAIN: &str = "openai.com";

/// Kokoro TTS の既定ポート
pub const KOKORO_PORT: u16 = 8880;

/// Whisper STT の既定ポート
pub const WHISPER_PORT: u16 = 2022;

/// Detect provider type from base URL
///
/// Evaluation order (first match wins):
/// 1. URL contains `openai.com` → `openai`
/// 2. Port 8880 → `kokoro`, port 2022 → `whisper`
/// 3. Loopback host or `localhost` → `local`
/// 4. Otherwise → `openai-compatible`
///
/// An empty URL yields `unknown`. URLs that do not parse are matched by substring.
pub fn detect_provider_type(base_url: &str) -> ProviderType {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return ProviderType::Unknown;
    }

    if is_openai_url(base_url) {
        return ProviderType::Openai;
    }

    // "localhost:8880" のようなスキームなしの文字列はホストを持たない
    let parsed = Url::parse(base_url).ok().filter(|url| url.has_host());

    let port = match &parsed {
        Some(url) => url.port(),
        None => port_from_substring(base_url),
    };
    match port {
        Some(KOKORO_PORT) => return ProviderType::Kokoro,
        Some(WHISPER_PORT) => return ProviderType::Whisper,
        _ => {}
    }

    let loopback = match &parsed {
        Some(url) => url.host_str().is_some_and(is_loopback_host),
        None => is_loopback_url(base_url),
    };
    if loopback {
        ProviderType::Local
    } else {
        ProviderType::OpenaiCompatible
    }
}

/// Check if a provider URL is for a local service
///
/// Well-known local ports count as local even on a non-loopback host.
pub fn is_local_provider(base_url: &str) -> bool {
    if base_url.trim().is_empty() {
        return false;
    }
    detect_provider_type(base_url).is_local() || is_loopback_url(base_url)
}

/// OpenAIクラウドのURLか
pub fn is_openai_url(base_url: &str) -> bool {
    base_url.to_ascii_lowercase().contains(OPENAI_DOMAIN)
}

fn port_from_substring(base_url: &str) -> Option<u16> {
    [KOKORO_PORT, WHISPER_PORT]
        .into_iter()
        .find(|port| base_url.contains(&format!(":{}", port)))
}
