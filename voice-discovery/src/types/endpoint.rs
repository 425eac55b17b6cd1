//! エンドポイント型定義
//!
//! 設定されたベースURLごとに検出した機能（モデル・ボイス）のスナップショット

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::error::DiscoveryError;
use crate::detection::detect_provider_type;

/// サービス種別
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// 音声合成（Text-to-Speech）
    Tts,
    /// 音声認識（Speech-to-Text）
    Stt,
}

impl ServiceType {
    /// 探索順に並べた全サービス種別
    pub const ALL: [ServiceType; 2] = [Self::Tts, Self::Stt];

    /// ServiceTypeを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tts => "tts",
            Self::Stt => "stt",
        }
    }

    /// モデルを1つも得られなかった場合に注入する既定モデル
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Tts => "tts-1",
            Self::Stt => "whisper-1",
        }
    }
}

/// ServiceType のパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseServiceTypeError(pub String);

impl std::fmt::Display for ParseServiceTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown service type: '{}' (expected tts or stt)", self.0)
    }
}

impl std::error::Error for ParseServiceTypeError {}

impl FromStr for ServiceType {
    type Err = ParseServiceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tts" => Ok(Self::Tts),
            "stt" => Ok(Self::Stt),
            _ => Err(ParseServiceTypeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// プロバイダー種別（診断用ラベル）
///
/// ベースURLから推定するだけのヒューリスティックであり、
/// エンドポイントを利用するかどうかの判断には使わない。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderType {
    /// OpenAIクラウド
    Openai,
    /// ローカルのKokoro TTS（既定ポート8880）
    Kokoro,
    /// ローカルのWhisper STT（既定ポート2022）
    Whisper,
    /// その他のローカルサービス
    Local,
    /// その他のOpenAI互換API
    OpenaiCompatible,
    /// URLが空で判別不能
    Unknown,
}

impl ProviderType {
    /// ProviderTypeを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::Kokoro => "kokoro",
            Self::Whisper => "whisper",
            Self::Local => "local",
            Self::OpenaiCompatible => "openai-compatible",
            Self::Unknown => "unknown",
        }
    }

    /// ローカルで動作するサービスの種別か
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Kokoro | Self::Whisper | Self::Local)
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 検出済みエンドポイント情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointInfo {
    /// ベースURL（サービス種別内で一意）
    pub base_url: String,
    /// 対応モデル（探索成功後は空にならない）
    pub models: Vec<String>,
    /// 対応ボイス（TTSのみ。空は「設定済みの既定ボイスを使う」の意）
    pub voices: Vec<String>,
    /// 診断用プロバイダー種別
    pub provider_type: ProviderType,
    /// 最後に探索または失敗を記録した日時
    pub last_check: Option<DateTime<Utc>>,
    /// 最後のエラー（直近の探索が成功していればNone）
    pub last_error: Option<DiscoveryError>,
}

impl EndpointInfo {
    /// 未探索のエンドポイント情報を作成
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let provider_type = detect_provider_type(&base_url);
        Self {
            base_url,
            models: Vec::new(),
            voices: Vec::new(),
            provider_type,
            last_check: None,
            last_error: None,
        }
    }

    /// 探索に成功したエンドポイント情報を作成
    pub fn discovered(base_url: impl Into<String>, models: Vec<String>, voices: Vec<String>) -> Self {
        Self {
            models,
            voices,
            last_check: Some(Utc::now()),
            ..Self::new(base_url)
        }
    }

    /// 探索に失敗したエンドポイント情報を作成
    ///
    /// モデル・ボイスは空になるため、検索系クエリで選ばれることはない。
    pub fn failed(base_url: impl Into<String>, error: DiscoveryError) -> Self {
        Self {
            last_check: Some(Utc::now()),
            last_error: Some(error),
            ..Self::new(base_url)
        }
    }

    /// 指定ボイスに対応しているか
    pub fn supports_voice(&self, voice: &str) -> bool {
        self.voices.iter().any(|v| v == voice)
    }

    /// 指定モデルに対応しているか
    pub fn supports_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// 直近でエラーが記録されているか
    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    /// 失敗を記録する（モデル・ボイスは変更しない）
    pub fn record_failure(&mut self, error: DiscoveryError) {
        self.last_error = Some(error);
        self.last_check = Some(Utc::now());
    }
}
