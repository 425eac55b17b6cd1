//! Unit Test: プロバイダー種別の判別
//!
//! 判定順: openai.com > 既知ポート > ループバック > OpenAI互換

use voice_discovery::detection::{detect_provider_type, is_local_provider};
use voice_discovery::ProviderType;

#[test]
fn test_known_endpoints() {
    let cases = [
        ("https://api.openai.com/v1", ProviderType::Openai),
        ("http://127.0.0.1:8880/v1", ProviderType::Kokoro),
        ("http://127.0.0.1:2022/v1", ProviderType::Whisper),
        ("http://127.0.0.1:9999/v1", ProviderType::Local),
        ("http://localhost:9999/v1", ProviderType::Local),
        ("http://[::1]:9999/v1", ProviderType::Local),
        ("https://my-custom.example.com/v1", ProviderType::OpenaiCompatible),
    ];
    for (url, expected) in cases {
        assert_eq!(detect_provider_type(url), expected, "url: {}", url);
    }
}

#[test]
fn test_openai_domain_is_case_insensitive() {
    assert_eq!(
        detect_provider_type("https://API.OpenAI.com/v1"),
        ProviderType::Openai
    );
}

#[test]
fn test_empty_url_is_unknown() {
    assert_eq!(detect_provider_type(""), ProviderType::Unknown);
    assert_eq!(detect_provider_type("   "), ProviderType::Unknown);
}

#[test]
fn test_unparseable_url_uses_substring_rules() {
    assert_eq!(detect_provider_type("127.0.0.1:8880/v1"), ProviderType::Kokoro);
    assert_eq!(detect_provider_type("localhost/v1"), ProviderType::Local);
    assert_eq!(
        detect_provider_type("not a url"),
        ProviderType::OpenaiCompatible
    );
}

#[test]
fn test_provider_type_strings() {
    assert_eq!(ProviderType::Openai.to_string(), "openai");
    assert_eq!(ProviderType::OpenaiCompatible.to_string(), "openai-compatible");
    assert_eq!(
        serde_json::to_string(&ProviderType::OpenaiCompatible).unwrap(),
        "\"openai-compatible\""
    );
    assert_eq!(ProviderType::Unknown.as_str(), "unknown");
}

#[test]
fn test_is_local_provider() {
    assert!(is_local_provider("http://127.0.0.1:2022/v1"));
    assert!(is_local_provider("http://localhost:9000/v1"));
    assert!(is_local_provider("http://whisper.lan:2022/v1"));
    assert!(!is_local_provider("https://api.openai.com/v1"));
    assert!(!is_local_provider("https://stt.example.com/v1"));
    assert!(!is_local_provider(""));
}
