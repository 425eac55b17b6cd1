//! ローカルSTTの稼働確認
//!
//! モデル一覧APIを持たないローカルSTT（whisper.cpp server など）向けの軽量チェック。
//! バージョン付きプレフィックスを除いたルートへGETし、HTTP 200のみを成功とみなす。

use crate::common::error::DiscoveryError;
use crate::common::url::unversioned_root;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::debug;

/// ルートURLへGETして稼働を確認
///
/// 200以外のステータスは`Failed`、接続失敗やタイムアウトはそれぞれの種別で返す。
pub async fn check_liveness(
    client: &Client,
    base_url: &str,
    timeout: Duration,
) -> Result<(), DiscoveryError> {
    let url = unversioned_root(base_url);
    let start = Instant::now();

    let response = client.get(url).timeout(timeout).send().await?;
    let status = response.status();

    debug!(
        url = %url,
        status = status.as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Liveness probe responded"
    );

    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(DiscoveryError::failed(format!(
            "STT endpoint returned status {}",
            status.as_u16()
        )))
    }
}
