//! Integration Test: TTSエンドポイント探索とレジストリ検索
//!
//! 設定順に探索結果が並び、ボイス・モデル検索が最初に一致したエンドポイントを返すこと。

use serde_json::json;
use voice_discovery::{ProviderType, ServiceType};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::support::http::{aliased_url, local_url, registry_with, resolving_client, test_config};
use crate::support::providers::{mount_models, mount_voices, spawn_mock_kokoro};

/// OpenAIとカスタムエンドポイントを設定順に登録する
#[tokio::test]
async fn test_openai_and_custom_tts_in_configured_order() {
    let openai = MockServer::start().await;
    let custom = MockServer::start().await;
    mount_models(&custom, &["tts-1", "my-model"]).await;
    mount_voices(&custom, json!({ "voices": ["v1", "v2"] })).await;

    let client = resolving_client(&[("api.openai.com", &openai), ("tts.example.com", &custom)]);
    let openai_url = aliased_url("api.openai.com", &openai);
    let custom_url = aliased_url("tts.example.com", &custom);
    let registry = registry_with(
        test_config().with_tts_urls([&openai_url, &custom_url]),
        client,
    );

    registry.initialize().await;
    assert!(registry.is_initialized());

    let endpoints = registry.get_endpoints(ServiceType::Tts);
    assert_eq!(endpoints.len(), 2);

    // OpenAIはモデル一覧・ボイス一覧とも失敗するため既定値になる
    assert_eq!(endpoints[0].base_url, openai_url);
    assert_eq!(endpoints[0].provider_type, ProviderType::Openai);
    assert_eq!(endpoints[0].models, vec!["tts-1", "tts-1-hd", "gpt-4o-mini-tts"]);
    assert_eq!(
        endpoints[0].voices,
        vec!["alloy", "echo", "fable", "nova", "onyx", "shimmer"]
    );
    assert!(endpoints[0].last_error.is_none());

    assert_eq!(endpoints[1].base_url, custom_url);
    assert_eq!(endpoints[1].provider_type, ProviderType::OpenaiCompatible);
    assert_eq!(endpoints[1].models, vec!["tts-1", "my-model"]);
    assert_eq!(endpoints[1].voices, vec!["v1", "v2"]);

    let v2 = registry.find_endpoint_with_voice("v2").unwrap();
    assert_eq!(v2.base_url, custom_url);
    let alloy = registry.find_endpoint_with_voice("alloy").unwrap();
    assert_eq!(alloy.base_url, openai_url);
    assert!(registry.find_endpoint_with_voice("nonexistent").is_none());

    // tts-1 は両方が持つため先に設定されたOpenAIが選ばれる
    let tts1 = registry
        .find_endpoint_with_model(ServiceType::Tts, "tts-1")
        .unwrap();
    assert_eq!(tts1.base_url, openai_url);
    let custom_model = registry
        .find_endpoint_with_model(ServiceType::Tts, "my-model")
        .unwrap();
    assert_eq!(custom_model.base_url, custom_url);
}

/// ボイス一覧APIがない非OpenAIエンドポイントは空ボイスで登録される
#[tokio::test]
async fn test_tts_without_voice_listing_has_empty_voices() {
    let server = MockServer::start().await;
    mount_models(&server, &["tts-1"]).await;

    let client = resolving_client(&[("speech.example.com", &server)]);
    let url = aliased_url("speech.example.com", &server);
    let registry = registry_with(test_config().with_tts_urls([&url]), client);
    registry.initialize().await;

    let info = registry.get(ServiceType::Tts, &url).unwrap();
    assert!(info.voices.is_empty());
    assert_eq!(info.models, vec!["tts-1"]);
    assert!(info.last_error.is_none());
    assert!(registry.find_endpoint_with_voice("alloy").is_none());
}

/// ボイス一覧の2番目のパスのみを持つエンドポイント
#[tokio::test]
async fn test_voice_listing_second_path() {
    let server = MockServer::start().await;
    mount_models(&server, &["tts-1"]).await;
    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "bf_emma", "name": "Emma"},
            {"id": "am_adam", "name": "Adam"}
        ])))
        .mount(&server)
        .await;

    let url = local_url(&server);
    let registry = registry_with(
        test_config().with_tts_urls([&url]),
        reqwest::Client::new(),
    );
    registry.initialize().await;

    let found = registry.find_endpoint_with_voice("am_adam").unwrap();
    assert_eq!(found.voices, vec!["bf_emma", "am_adam"]);
    assert_eq!(found.provider_type, ProviderType::Local);
}

/// 設定されたすべてのURLが成功・失敗にかかわらず1件ずつ登録される
#[tokio::test]
async fn test_every_configured_url_has_one_entry() {
    let kokoro = spawn_mock_kokoro(&["af_sky"]).await;
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&broken)
        .await;

    let tts_urls = vec![
        local_url(&kokoro),
        local_url(&broken),
        "http://127.0.0.1:1/v1".to_string(),
    ];
    let stt_urls = vec!["http://127.0.0.1:1/v1".to_string()];
    let registry = registry_with(
        test_config()
            .with_tts_urls(&tts_urls)
            .with_stt_urls(&stt_urls),
        reqwest::Client::new(),
    );
    registry.initialize().await;

    let tts = registry.get_endpoints(ServiceType::Tts);
    let tts_order: Vec<_> = tts.iter().map(|e| e.base_url.clone()).collect();
    assert_eq!(tts_order, tts_urls);
    for info in &tts {
        // TTSはモデル一覧が失敗しても既定モデルで成功扱い
        assert!(!info.models.is_empty(), "{} has no models", info.base_url);
        assert!(info.last_error.is_none());
        assert!(info.last_check.is_some());
    }
    assert_eq!(tts[0].voices, vec!["af_sky"]);
    assert_eq!(tts[1].models, vec!["tts-1"]);

    let stt = registry.get_endpoints(ServiceType::Stt);
    assert_eq!(stt.len(), 1);
    assert!(stt[0].models.is_empty());
    assert_eq!(stt[0].last_error.as_ref().unwrap().kind(), "connection");
}

/// APIキーが設定されていればBearerとして送信される
#[tokio::test]
async fn test_api_key_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer sk-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "whisper-1"}, {"id": "whisper-large-v3"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = local_url(&server);
    let registry = registry_with(
        test_config().with_stt_urls([&url]).with_api_key("sk-test-key"),
        reqwest::Client::new(),
    );
    registry.initialize().await;

    let info = registry
        .find_endpoint_with_model(ServiceType::Stt, "whisper-large-v3")
        .unwrap();
    assert_eq!(info.base_url, url);
    assert!(info.voices.is_empty());
}

/// Ollama形式のモデル一覧も受け付ける
#[tokio::test]
async fn test_ollama_model_listing_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "orpheus:3b"}]
        })))
        .mount(&server)
        .await;

    let url = local_url(&server);
    let registry = registry_with(test_config().with_tts_urls([&url]), reqwest::Client::new());
    registry.initialize().await;

    let info = registry.get(ServiceType::Tts, &url).unwrap();
    assert_eq!(info.models, vec!["orpheus:3b"]);
}
