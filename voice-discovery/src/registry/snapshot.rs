//! LLM向けレジストリスナップショット
//!
//! 文字列・配列・マップのみで構成されたシリアライズ可能な表現。

use crate::types::endpoint::{EndpointInfo, ServiceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// レジストリ全体のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// TTSエンドポイント（URL → 情報）
    pub tts: BTreeMap<String, EndpointSnapshot>,
    /// STTエンドポイント（URL → 情報）
    pub stt: BTreeMap<String, EndpointSnapshot>,
}

/// 1エンドポイントのスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnapshot {
    /// 対応モデル
    pub models: Vec<String>,
    /// 対応ボイス（TTSのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voices: Option<Vec<String>>,
    /// プロバイダー種別
    pub provider_type: String,
    /// 最終確認日時（RFC 3339）
    pub last_check: Option<String>,
    /// 最後のエラーメッセージ
    pub last_error: Option<String>,
    /// 最後のエラー種別
    pub last_error_kind: Option<String>,
}

impl EndpointSnapshot {
    /// エンドポイント情報から作成
    pub fn from_info(service_type: ServiceType, info: &EndpointInfo) -> Self {
        Self {
            models: info.models.clone(),
            voices: match service_type {
                ServiceType::Tts => Some(info.voices.clone()),
                ServiceType::Stt => None,
            },
            provider_type: info.provider_type.as_str().to_string(),
            last_check: info.last_check.map(|t| t.to_rfc3339()),
            last_error: info.last_error.as_ref().map(|e| e.message().to_string()),
            last_error_kind: info.last_error.as_ref().map(|e| e.kind().to_string()),
        }
    }
}

impl RegistrySnapshot {
    /// サービス種別ごとのエンドポイント一覧から作成
    pub fn from_endpoints(tts: &[EndpointInfo], stt: &[EndpointInfo]) -> Self {
        Self {
            tts: collect(ServiceType::Tts, tts),
            stt: collect(ServiceType::Stt, stt),
        }
    }

    /// 指定サービス種別のマップ
    pub fn service(&self, service_type: ServiceType) -> &BTreeMap<String, EndpointSnapshot> {
        match service_type {
            ServiceType::Tts => &self.tts,
            ServiceType::Stt => &self.stt,
        }
    }
}

fn collect(
    service_type: ServiceType,
    endpoints: &[EndpointInfo],
) -> BTreeMap<String, EndpointSnapshot> {
    endpoints
        .iter()
        .map(|info| {
            (
                info.base_url.clone(),
                EndpointSnapshot::from_info(service_type, info),
            )
        })
        .collect()
}
