//! エンドポイント探索
//!
//! 1つのベースURLに対してモデル一覧を取得し、サービス種別ごとのフォールバックを適用し、
//! TTSならボイスも探索して`EndpointInfo`を生成する。
//!
//! 探索は失敗しない。すべての失敗は`last_error`付きの`EndpointInfo`として表現される。

use crate::common::error::DiscoveryError;
use crate::config::DiscoveryConfig;
use crate::detection::{is_local_provider, is_openai_url};
use crate::health::check_liveness;
use crate::sync::list_models;
use crate::types::endpoint::{EndpointInfo, ServiceType};
use crate::voices::discover_voices;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// OpenAI TTS の既定モデル（モデル一覧が取得できない場合）
pub const OPENAI_TTS_MODELS: [&str; 3] = ["tts-1", "tts-1-hd", "gpt-4o-mini-tts"];

/// エンドポイント探索器
///
/// 共有HTTPクライアントと認証情報・タイムアウトを保持する。
#[derive(Clone)]
pub struct EndpointProber {
    /// HTTPクライアント
    client: Client,
    /// モデル一覧取得に使うAPIキー（未設定ならプレースホルダー）
    api_key: String,
    /// モデル一覧取得のタイムアウト
    model_list_timeout: Duration,
    /// 稼働確認・ボイス一覧取得のタイムアウト
    probe_timeout: Duration,
}

impl EndpointProber {
    /// 設定から探索器を作成
    pub fn new(client: Client, config: &DiscoveryConfig) -> Self {
        Self {
            client,
            api_key: config.api_key_or_placeholder().to_string(),
            model_list_timeout: config.model_list_timeout,
            probe_timeout: config.probe_timeout,
        }
    }

    /// 単一エンドポイントを探索
    ///
    /// 失敗時は`models`/`voices`が空で`last_error`を持つ情報を返す。
    pub async fn discover_endpoint(&self, service_type: ServiceType, base_url: &str) -> EndpointInfo {
        let start = Instant::now();
        debug!(service = %service_type, base_url = %base_url, "Discovering endpoint");

        match self.try_discover(service_type, base_url).await {
            Ok((models, voices)) => {
                info!(
                    service = %service_type,
                    base_url = %base_url,
                    model_count = models.len(),
                    voice_count = voices.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Successfully discovered endpoint"
                );
                EndpointInfo::discovered(base_url, models, voices)
            }
            Err(e) => {
                warn!(
                    service = %service_type,
                    base_url = %base_url,
                    error_kind = e.kind(),
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Endpoint discovery failed"
                );
                EndpointInfo::failed(base_url, e)
            }
        }
    }

    async fn try_discover(
        &self,
        service_type: ServiceType,
        base_url: &str,
    ) -> Result<(Vec<String>, Vec<String>), DiscoveryError> {
        let mut models = match list_models(
            &self.client,
            base_url,
            &self.api_key,
            self.model_list_timeout,
        )
        .await
        {
            Ok(listing) => {
                debug!(base_url = %base_url, models = ?listing.models, "Found models");
                listing.models
            }
            Err(e) => {
                // モデル一覧APIを持たないエンドポイントも多い
                debug!(base_url = %base_url, error = %e, "Could not list models");
                self.fallback_models(service_type, base_url).await?
            }
        };

        if models.is_empty() {
            let default_model = service_type.default_model();
            debug!(
                base_url = %base_url,
                model = default_model,
                "No models discovered, using default"
            );
            models.push(default_model.to_string());
        }

        let voices = match service_type {
            ServiceType::Tts => discover_voices(&self.client, base_url, self.probe_timeout).await,
            ServiceType::Stt => Vec::new(),
        };

        Ok((models, voices))
    }

    /// モデル一覧を取得できなかった場合の既定モデル
    ///
    /// ローカルSTTは稼働確認に失敗するとエラーになる。
    /// 非ローカルSTTは認証エラーの可能性があるため、稼働確認なしで既定モデルを登録する。
    async fn fallback_models(
        &self,
        service_type: ServiceType,
        base_url: &str,
    ) -> Result<Vec<String>, DiscoveryError> {
        match service_type {
            ServiceType::Stt if is_local_provider(base_url) => {
                check_liveness(&self.client, base_url, self.probe_timeout)
                    .await
                    .inspect_err(|e| {
                        debug!(base_url = %base_url, error = %e, "STT liveness check failed");
                    })?;
                debug!(base_url = %base_url, "Local STT endpoint is responding");
                Ok(vec![ServiceType::Stt.default_model().to_string()])
            }
            ServiceType::Stt => {
                debug!(base_url = %base_url, "Using default STT model");
                Ok(vec![ServiceType::Stt.default_model().to_string()])
            }
            ServiceType::Tts => {
                let models = default_tts_models(base_url);
                debug!(base_url = %base_url, models = ?models, "Using default TTS models");
                Ok(models)
            }
        }
    }
}

/// モデル一覧を取得できないTTSエンドポイントの既定モデル
pub fn default_tts_models(base_url: &str) -> Vec<String> {
    if is_openai_url(base_url) {
        OPENAI_TTS_MODELS.iter().map(|m| m.to_string()).collect()
    } else {
        vec![ServiceType::Tts.default_model().to_string()]
    }
}
