//! ボイス一覧レスポンスパーサー
//!
//! 受け付ける形は2つだけ:
//! - `{"voices": [...]}`
//! - `[...]`
//!
//! 各要素は文字列か、`"id"`を持つオブジェクト。それ以外は`Protocol`エラーとして拒否する。

use serde::Deserialize;

use crate::common::error::DiscoveryError;

/// ボイス一覧レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VoicesResponse {
    /// `{"voices": [...]}`
    Wrapped {
        /// ボイスのリスト
        voices: Vec<VoiceEntry>,
    },
    /// `[...]`
    Bare(Vec<VoiceEntry>),
}

/// ボイス一覧の個別要素
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VoiceEntry {
    /// `"af_sky"`
    Name(String),
    /// `{"id": "af_sky", ...}`
    Object {
        /// ボイスID
        id: String,
    },
}

impl VoiceEntry {
    /// ボイスIDを取り出す
    pub fn into_id(self) -> String {
        match self {
            Self::Name(id) | Self::Object { id } => id,
        }
    }
}

impl VoicesResponse {
    /// プレーンなボイスIDのリストに正規化する
    pub fn into_voice_ids(self) -> Vec<String> {
        let entries = match self {
            Self::Wrapped { voices } => voices,
            Self::Bare(voices) => voices,
        };
        entries.into_iter().map(VoiceEntry::into_id).collect()
    }
}

/// レスポンスボディをパースしてボイスIDのリストを返す
///
/// ```
/// use voice_discovery::voices::parser::parse_voices_response;
///
/// let expected = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(parse_voices_response(r#"{"voices":["a","b"]}"#).unwrap(), expected);
/// assert_eq!(parse_voices_response(r#"["a","b"]"#).unwrap(), expected);
/// assert_eq!(parse_voices_response(r#"[{"id":"a"},{"id":"b"}]"#).unwrap(), expected);
/// ```
pub fn parse_voices_response(body: &str) -> Result<Vec<String>, DiscoveryError> {
    let response: VoicesResponse = serde_json::from_str(body)?;
    Ok(response.into_voice_ids())
}
