//! Discord 웹훅 리포트 전송.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use radar_core::DiscordConfig;

use crate::types::{NotificationError, NotificationResult, ReportDispatcher, StressReport, DISCLAIMER};

/// Discord 메시지 최대 길이.
const MAX_CONTENT_LEN: usize = 2000;

/// Discord 웹훅 전송기.
pub struct DiscordDispatcher {
    webhook_url: String,
    subject_prefix: String,
    client: reqwest::Client,
}

impl DiscordDispatcher {
    /// 새 Discord 전송기를 생성합니다.
    pub fn new(webhook_url: impl Into<String>, subject_prefix: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            subject_prefix: subject_prefix.into(),
            client: reqwest::Client::new(),
        }
    }

    /// 설정에서 전송기를 생성합니다.
    pub fn from_config(config: &DiscordConfig, subject_prefix: &str) -> NotificationResult<Self> {
        if config.webhook_url.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "discord requires webhook_url".to_string(),
            ));
        }
        Ok(Self::new(config.webhook_url.clone(), subject_prefix))
    }

    /// 리포트를 Discord 마크다운 메시지로 포맷합니다.
    pub fn format_message(&self, report: &StressReport) -> String {
        let mut lines = vec![
            format!(
                "{} **{}**",
                report.status.icon(),
                report.subject(&self.subject_prefix)
            ),
            report.headline(),
        ];

        for class in &report.classes {
            lines.push(format!(
                "- {}: {} ({})",
                class.class,
                class.score.truncated(),
                class.status
            ));
        }

        for note in &report.notes {
            lines.push(format!("> {}", note));
        }

        lines.push(format!("-# {}", DISCLAIMER));

        let mut content = lines.join("\n");
        if content.chars().count() > MAX_CONTENT_LEN {
            content = content.chars().take(MAX_CONTENT_LEN).collect();
        }
        content
    }
}

#[async_trait]
impl ReportDispatcher for DiscordDispatcher {
    async fn dispatch(&self, report: &StressReport) -> NotificationResult<()> {
        let payload = serde_json::json!({ "content": self.format_message(report) });

        debug!(run_id = %report.run_id, "Posting Discord webhook");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Discord report sent");
            return Ok(());
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok())
                .map(|secs| secs.ceil() as u64)
                .unwrap_or(60);
            warn!(retry_after, "Discord rate limited");
            return Err(NotificationError::RateLimited(retry_after));
        }

        let body = response.text().await.unwrap_or_default();
        error!(%status, %body, "Failed to post Discord webhook");
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status, body
        )))
    }

    fn name(&self) -> &str {
        "discord"
    }
}
