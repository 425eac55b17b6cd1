//! プロバイダーレジストリ
//!
//! TTS/STTエンドポイントの探索結果をメモリ内で管理する。
//! 順序は設定されたURLリストのみが決め、マップを順序に使うことはない。

use crate::common::error::DiscoveryError;
use crate::config::DiscoveryConfig;
use crate::discovery::EndpointProber;
use crate::registry::snapshot::RegistrySnapshot;
use crate::types::endpoint::{EndpointInfo, ServiceType};
use futures::future::join_all;
use parking_lot::RwLock;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// HTTPクライアントのUser-Agent
const USER_AGENT: &str = concat!("voice-discovery/", env!("CARGO_PKG_VERSION"));

/// サービス種別ごとのエントリ
#[derive(Debug, Default)]
struct RegistryEntries {
    tts: HashMap<String, EndpointInfo>,
    stt: HashMap<String, EndpointInfo>,
}

impl RegistryEntries {
    fn map(&self, service_type: ServiceType) -> &HashMap<String, EndpointInfo> {
        match service_type {
            ServiceType::Tts => &self.tts,
            ServiceType::Stt => &self.stt,
        }
    }

    fn map_mut(&mut self, service_type: ServiceType) -> &mut HashMap<String, EndpointInfo> {
        match service_type {
            ServiceType::Tts => &mut self.tts,
            ServiceType::Stt => &mut self.stt,
        }
    }
}

/// プロバイダーレジストリ
///
/// 設定されたベースURLごとに1つの`EndpointInfo`を保持する。
/// クローンは同じ状態を共有する。
#[derive(Clone)]
pub struct ProviderRegistry {
    /// 探索設定
    config: Arc<DiscoveryConfig>,
    /// エンドポイント探索器
    prober: EndpointProber,
    /// 探索結果のインメモリキャッシュ（`.await`をまたいで保持しない）
    entries: Arc<RwLock<RegistryEntries>>,
    /// 初期化の排他制御
    discovery_lock: Arc<Mutex<()>>,
    /// 初期化済みフラグ
    initialized: Arc<AtomicBool>,
}

impl ProviderRegistry {
    /// 設定からレジストリを作成（既定のHTTPクライアントを使用）
    pub fn new(config: DiscoveryConfig) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                Client::new()
            });
        Self::with_client(config, client)
    }

    /// HTTPクライアントを指定してレジストリを作成
    pub fn with_client(config: DiscoveryConfig, client: Client) -> Self {
        let prober = EndpointProber::new(client, &config);
        Self {
            config: Arc::new(config),
            prober,
            entries: Arc::new(RwLock::new(RegistryEntries::default())),
            discovery_lock: Arc::new(Mutex::new(())),
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 設定されたベースURL（優先順）
    pub fn base_urls(&self, service_type: ServiceType) -> &[String] {
        self.config.base_urls(service_type)
    }

    /// 初期化済みか
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// すべての設定済みエンドポイントを探索してレジストリを初期化
    ///
    /// 冪等。並行して呼ばれても探索は1回だけ行われ、
    /// 戻った時点ですべての呼び出し元が同じレジストリを観測する。
    pub async fn initialize(&self) {
        if self.is_initialized() {
            return;
        }

        let _guard = self.discovery_lock.lock().await;
        if self.is_initialized() {
            return;
        }

        let start = Instant::now();
        info!(
            tts_endpoints = self.config.tts_base_urls.len(),
            stt_endpoints = self.config.stt_base_urls.len(),
            "Initializing provider registry"
        );

        for service_type in ServiceType::ALL {
            self.discover_service(service_type).await;
        }

        self.initialized.store(true, Ordering::Release);

        let (tts_count, stt_count) = {
            let entries = self.entries.read();
            (entries.tts.len(), entries.stt.len())
        };
        info!(
            tts_endpoints = tts_count,
            stt_endpoints = stt_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Provider registry initialized"
        );
    }

    /// 1つのサービス種別の未登録エンドポイントを並行に探索
    async fn discover_service(&self, service_type: ServiceType) {
        let pending: Vec<&String> = {
            let entries = self.entries.read();
            let map = entries.map(service_type);
            self.base_urls(service_type)
                .iter()
                .filter(|url| !map.contains_key(url.as_str()))
                .collect()
        };

        if pending.is_empty() {
            debug!(service = %service_type, "No endpoints to discover");
            return;
        }

        join_all(
            pending
                .into_iter()
                .map(|url| self.discover_and_store(service_type, url)),
        )
        .await;
    }

    async fn discover_and_store(&self, service_type: ServiceType, base_url: &str) {
        let info = self.prober.discover_endpoint(service_type, base_url).await;
        self.entries
            .write()
            .map_mut(service_type)
            .insert(base_url.to_string(), info);
    }

    /// 設定済みURLを再探索してエントリを置き換える
    ///
    /// 設定にないURLの場合は何もせず`false`を返す。
    pub async fn rediscover(&self, service_type: ServiceType, base_url: &str) -> bool {
        let Some(configured) = self.configured_url(service_type, base_url) else {
            debug!(
                service = %service_type,
                base_url = %base_url,
                "Ignoring rediscovery of unconfigured endpoint"
            );
            return false;
        };

        self.discover_and_store(service_type, &configured).await;
        true
    }

    /// 設定順のエンドポイント一覧（未登録のURLは含まない）
    pub fn get_endpoints(&self, service_type: ServiceType) -> Vec<EndpointInfo> {
        let entries = self.entries.read();
        let map = entries.map(service_type);
        self.base_urls(service_type)
            .iter()
            .filter_map(|url| map.get(url).cloned())
            .collect()
    }

    /// `get_endpoints`の旧名
    #[deprecated(note = "use get_endpoints; endpoints are no longer filtered by health")]
    pub fn get_healthy_endpoints(&self, service_type: ServiceType) -> Vec<EndpointInfo> {
        self.get_endpoints(service_type)
    }

    /// 指定ボイスに対応する最初のTTSエンドポイント
    pub fn find_endpoint_with_voice(&self, voice: &str) -> Option<EndpointInfo> {
        self.find_first(ServiceType::Tts, |info| info.supports_voice(voice))
    }

    /// 指定モデルに対応する最初のエンドポイント
    pub fn find_endpoint_with_model(
        &self,
        service_type: ServiceType,
        model: &str,
    ) -> Option<EndpointInfo> {
        self.find_first(service_type, |info| info.supports_model(model))
    }

    fn find_first<F>(&self, service_type: ServiceType, predicate: F) -> Option<EndpointInfo>
    where
        F: Fn(&EndpointInfo) -> bool,
    {
        let entries = self.entries.read();
        let map = entries.map(service_type);
        self.base_urls(service_type)
            .iter()
            .filter_map(|url| map.get(url))
            .find(|info| predicate(info))
            .cloned()
    }

    /// エンドポイント情報を取得
    pub fn get(&self, service_type: ServiceType, base_url: &str) -> Option<EndpointInfo> {
        let key = normalize_url(base_url);
        self.entries.read().map(service_type).get(key).cloned()
    }

    /// 実際の利用で失敗したエンドポイントを記録する
    ///
    /// `last_error`/`last_check`のみ更新する。未登録のURLでは何もしない。
    pub fn mark_failed(&self, service_type: ServiceType, base_url: &str, error: DiscoveryError) {
        let key = normalize_url(base_url);
        let mut entries = self.entries.write();
        match entries.map_mut(service_type).get_mut(key) {
            Some(entry) => {
                info!(
                    service = %service_type,
                    base_url = %key,
                    error_kind = error.kind(),
                    error = %error,
                    "Marked endpoint as failed"
                );
                entry.record_failure(error);
            }
            None => {
                debug!(
                    service = %service_type,
                    base_url = %key,
                    "Ignoring failure for unknown endpoint"
                );
            }
        }
    }

    /// LLM向けのレジストリスナップショット
    pub fn get_registry_for_llm(&self) -> RegistrySnapshot {
        RegistrySnapshot::from_endpoints(
            &self.get_endpoints(ServiceType::Tts),
            &self.get_endpoints(ServiceType::Stt),
        )
    }

    fn configured_url(&self, service_type: ServiceType, base_url: &str) -> Option<String> {
        let key = normalize_url(base_url);
        self.base_urls(service_type)
            .iter()
            .find(|url| url.as_str() == key)
            .cloned()
    }
}

/// 設定値と同じ正規化（前後の空白と末尾の`/`を除去）
fn normalize_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}
