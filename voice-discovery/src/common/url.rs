//! ベースURLユーティリティ
//!
//! バージョン付きプレフィックス（`/v1`）の除去とループバック判定

use reqwest::Url;
use std::net::IpAddr;

/// バージョン付きプレフィックス
pub const VERSION_PREFIX: &str = "/v1";

/// ベースURLからバージョン付きプレフィックスを取り除いたルートを返す
///
/// 末尾の`/`を落としたうえで、末尾が`/v1`なら取り除く。
/// `/v1`以外のパスはそのまま残す。
///
/// ```
/// use voice_discovery::common::url::unversioned_root;
///
/// assert_eq!(unversioned_root("http://127.0.0.1:8880/v1"), "http://127.0.0.1:8880");
/// assert_eq!(unversioned_root("http://127.0.0.1:8880/v1/"), "http://127.0.0.1:8880");
/// assert_eq!(unversioned_root("https://tts.example.com"), "https://tts.example.com");
/// ```
pub fn unversioned_root(base_url: &str) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix(VERSION_PREFIX).unwrap_or(trimmed)
}

/// ベースURLに相対パスを連結する
pub fn join_path(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// ホスト名がループバックを指すか
///
/// `localhost`、`127.0.0.0/8`、`::1`、IPv4-mapped IPv6のループバックを対象とする。
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.is_loopback(),
            None => v6.is_loopback(),
        },
        Ok(ip) => ip.is_loopback(),
        Err(_) => false,
    }
}

/// URLのホストがループバックを指すか
///
/// パースできないURLは文字列の包含で判定する。
pub fn is_loopback_url(base_url: &str) -> bool {
    match Url::parse(base_url) {
        Ok(url) if url.has_host() => url.host_str().is_some_and(is_loopback_host),
        _ => base_url.contains("127.0.0.1") || base_url.contains("localhost"),
    }
}
