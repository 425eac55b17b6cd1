//! Property-based tests using proptest

use proptest::prelude::*;
use serde_json::json;

use voice_discovery::common::url::unversioned_root;
use voice_discovery::config::parse_url_list;
use voice_discovery::detection::detect_provider_type;
use voice_discovery::voices::{parse_voices_response, voice_list_urls};
use voice_discovery::ProviderType;

fn url_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["http", "https"]),
        "[a-z][a-z0-9-]{0,12}(\\.[a-z]{2,6}){0,2}",
        prop::option::of(1u16..65535),
        prop::sample::select(vec!["", "/", "/v1", "/v1/", "/api/v1"]),
    )
        .prop_map(|(scheme, host, port, path)| match port {
            Some(port) => format!("{}://{}:{}{}", scheme, host, port, path),
            None => format!("{}://{}{}", scheme, host, path),
        })
}

// ---------------------------------------------------------------------------
// detect_provider_type
// ---------------------------------------------------------------------------

proptest! {
    /// 任意の文字列で判別が完了し、空でなければunknownにならない
    #[test]
    fn detection_is_total(input in ".*") {
        let provider = detect_provider_type(&input);
        if input.trim().is_empty() {
            prop_assert_eq!(provider, ProviderType::Unknown);
        } else {
            prop_assert_ne!(provider, ProviderType::Unknown);
        }
    }

    /// openai.com を含むURLは常にopenai
    #[test]
    fn openai_domain_always_wins(prefix in "[a-z0-9.:/]{0,20}", suffix in "[a-z0-9.:/]{0,20}") {
        let url = format!("{}openai.com{}", prefix, suffix);
        prop_assert_eq!(detect_provider_type(&url), ProviderType::Openai);
    }

    /// ループバックで既知ポート以外はlocal
    #[test]
    fn loopback_without_known_port_is_local(port in 1u16..65535, path in "(/v1)?") {
        prop_assume!(port != 8880 && port != 2022);
        let url = format!("http://127.0.0.1:{}{}", port, path);
        prop_assert_eq!(detect_provider_type(&url), ProviderType::Local);
    }
}

// ---------------------------------------------------------------------------
// parse_url_list
// ---------------------------------------------------------------------------

proptest! {
    /// 結果は空要素・末尾スラッシュ・重複を含まない
    #[test]
    fn url_list_is_normalized(urls in prop::collection::vec(url_strategy(), 0..8)) {
        let parsed = parse_url_list(&urls.join(" , "));
        for (i, url) in parsed.iter().enumerate() {
            prop_assert!(!url.is_empty());
            prop_assert!(!url.ends_with('/'));
            prop_assert!(!parsed[..i].contains(url), "duplicate: {}", url);
        }
    }

    /// 正規化済みリストを再度パースしても変わらない
    #[test]
    fn url_list_parsing_is_idempotent(urls in prop::collection::vec(url_strategy(), 0..8)) {
        let once = parse_url_list(&urls.join(","));
        let twice = parse_url_list(&once.join(","));
        prop_assert_eq!(once, twice);
    }

    /// 最初に現れた順序を保つ
    #[test]
    fn url_list_keeps_first_occurrence_order(urls in prop::collection::vec(url_strategy(), 1..8)) {
        let mut doubled = urls.clone();
        doubled.extend(urls.iter().rev().cloned());
        let parsed = parse_url_list(&doubled.join(","));
        let expected = parse_url_list(&urls.join(","));
        prop_assert_eq!(parsed, expected);
    }
}

// ---------------------------------------------------------------------------
// voice discovery helpers
// ---------------------------------------------------------------------------

proptest! {
    /// ボイス一覧の候補URLは常に root + /v1 + 既知パス
    #[test]
    fn voice_urls_share_unversioned_root(url in url_strategy()) {
        let root = unversioned_root(&url);
        let candidates = voice_list_urls(&url);
        prop_assert_eq!(candidates.len(), 2);
        prop_assert_eq!(&candidates[0], &format!("{}/v1/audio/voices", root));
        prop_assert_eq!(&candidates[1], &format!("{}/v1/voices", root));
    }

    /// 3つの形式は同じボイス一覧に正規化される
    #[test]
    fn voice_shapes_are_equivalent(names in prop::collection::vec("[a-z_]{1,12}", 0..10)) {
        let objects: Vec<_> = names.iter().map(|n| json!({ "id": n })).collect();
        let wrapped = json!({ "voices": names }).to_string();
        let bare = json!(names).to_string();
        let bare_objects = json!(objects).to_string();

        prop_assert_eq!(parse_voices_response(&wrapped).unwrap(), names.clone());
        prop_assert_eq!(parse_voices_response(&bare).unwrap(), names.clone());
        prop_assert_eq!(parse_voices_response(&bare_objects).unwrap(), names);
    }
}
