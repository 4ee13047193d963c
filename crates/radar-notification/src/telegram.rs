//! 텔레그램 리포트 전송.
//!
//! Telegram Bot API `sendMessage`로 HTML 형식의 요약 메시지를 전송합니다.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use radar_core::TelegramConfig;

use crate::types::{
    escape_html, NotificationError, NotificationResult, ReportDispatcher, StressReport, DISCLAIMER,
};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 텔레그램 리포트 전송기.
pub struct TelegramDispatcher {
    bot_token: String,
    chat_id: String,
    subject_prefix: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramDispatcher {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        subject_prefix: impl Into<String>,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            subject_prefix: subject_prefix.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// 설정에서 전송기를 생성합니다.
    pub fn from_config(config: &TelegramConfig, subject_prefix: &str) -> NotificationResult<Self> {
        if config.bot_token.is_empty() || config.chat_id.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "telegram requires bot_token and chat_id".to_string(),
            ));
        }
        Ok(Self::new(
            config.bot_token.clone(),
            config.chat_id.clone(),
            subject_prefix,
        ))
    }

    /// API 기본 URL을 변경합니다 (테스트용 목 서버 등).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// 리포트를 텔레그램 HTML 메시지로 포맷합니다.
    pub fn format_message(&self, report: &StressReport) -> String {
        let mut lines = vec![
            format!(
                "{} <b>{}</b>",
                report.status.icon(),
                escape_html(&report.subject(&self.subject_prefix))
            ),
            String::new(),
            format!(
                "종합: <b>{}</b> — {}",
                report.overall.truncated(),
                report.status
            ),
        ];

        for class in &report.classes {
            lines.push(format!(
                "• {}: {} ({})",
                class.class,
                class.score.truncated(),
                class.status
            ));
        }

        if !report.notes.is_empty() {
            lines.push(String::new());
            for note in &report.notes {
                lines.push(format!("<i>{}</i>", escape_html(note)));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "<code>{}</code>",
            report.generated.format("%Y-%m-%d %H:%M")
        ));
        lines.push(DISCLAIMER.to_string());

        lines.join("\n")
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        debug!(chat_id = %self.chat_id, "Sending Telegram message");

        let response = self.client.post(&url).json(&params).send().await?;

        if response.status().is_success() {
            info!("Telegram report sent");
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // 요청 한도 제한 확인
        if status.as_u16() == 429 {
            warn!("Telegram rate limited");
            return Err(NotificationError::RateLimited(retry_after_secs(&body)));
        }

        error!(%status, %body, "Failed to send Telegram message");
        Err(NotificationError::SendFailed(format!(
            "HTTP {}: {}",
            status, body
        )))
    }
}

/// 429 응답 본문의 `parameters.retry_after` (없으면 60초).
fn retry_after_secs(body: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["parameters"]["retry_after"].as_u64())
        .unwrap_or(60)
}

#[async_trait]
impl ReportDispatcher for TelegramDispatcher {
    async fn dispatch(&self, report: &StressReport) -> NotificationResult<()> {
        let message = self.format_message(report);
        self.send_message(&message).await
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
