//! モデル一覧レスポンスパーサー
//!
//! OpenAI形式を基本とし、Ollama形式も受け付ける

/// レスポンスの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// OpenAI形式: `{"data": [{"id": ...}]}`
    OpenAi,
    /// Ollama形式: `{"models": [{"name": ...}]}`
    Ollama,
    /// 不明な形式
    Unknown,
}

impl ResponseFormat {
    /// ResponseFormatを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Unknown => "unknown",
        }
    }
}

/// JSONレスポンスからモデルIDを抽出
///
/// # Examples
///
/// ```
/// use voice_discovery::sync::parser::{parse_models_response, ResponseFormat};
///
/// let value = serde_json::json!({"data": [{"id": "tts-1"}, {"id": "kokoro"}]});
/// let (models, format) = parse_models_response(&value);
/// assert_eq!(models, vec!["tts-1", "kokoro"]);
/// assert_eq!(format, ResponseFormat::OpenAi);
/// ```
pub fn parse_models_response(json: &serde_json::Value) -> (Vec<String>, ResponseFormat) {
    let format = detect_format(json);

    let models = match format {
        ResponseFormat::OpenAi => collect_ids(json, "data", &["id"]),
        // nameを優先、なければmodelを使用
        ResponseFormat::Ollama => collect_ids(json, "models", &["name", "model"]),
        ResponseFormat::Unknown => Vec::new(),
    };

    (models, format)
}

/// レスポンス形式を検出
pub fn detect_format(json: &serde_json::Value) -> ResponseFormat {
    if json.get("data").and_then(|d| d.as_array()).is_some() {
        ResponseFormat::OpenAi
    } else if json.get("models").and_then(|m| m.as_array()).is_some() {
        ResponseFormat::Ollama
    } else {
        ResponseFormat::Unknown
    }
}

fn collect_ids(json: &serde_json::Value, list_key: &str, id_keys: &[&str]) -> Vec<String> {
    let Some(items) = json.get(list_key).and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            id_keys
                .iter()
                .find_map(|key| item.get(*key).and_then(|v| v.as_str()))
                .filter(|id| !id.is_empty())
        })
        .map(str::to_string)
        .collect()
}
