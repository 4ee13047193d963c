//! SMTP 이메일 리포트 전송.
//!
//! 텍스트/HTML 대체 본문을 만들고, HTML 본문과 게이지 이미지를 `multipart/related`로
//! 묶어 STARTTLS SMTP 서버로 보냅니다. 게이지는 `cid:`로 본문에서 참조됩니다.

use std::path::Path;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use radar_core::{EmailConfig, MarketClass};

use crate::types::{
    escape_html, NotificationError, NotificationResult, ReportDispatcher, StressReport, DISCLAIMER,
};

/// SMTP 연결/명령 타임아웃.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// 본문에 인라인으로 첨부되는 게이지.
#[derive(Debug, Clone)]
struct InlineGauge {
    class: MarketClass,
    content_id: String,
    body: Vec<u8>,
}

/// SMTP 이메일 전송기.
pub struct SmtpDispatcher {
    host: String,
    port: u16,
    sender: String,
    password: String,
    recipients: Vec<String>,
    subject_prefix: String,
}

impl SmtpDispatcher {
    /// 새 SMTP 전송기를 생성합니다.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        sender: impl Into<String>,
        password: impl Into<String>,
        recipients: Vec<String>,
        subject_prefix: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            sender: sender.into(),
            password: password.into(),
            recipients,
            subject_prefix: subject_prefix.into(),
        }
    }

    /// 설정에서 전송기를 생성합니다.
    pub fn from_config(config: &EmailConfig, subject_prefix: &str) -> NotificationResult<Self> {
        if config.host.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "smtp requires a host".to_string(),
            ));
        }
        if config.sender.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "smtp requires a sender address".to_string(),
            ));
        }
        Ok(Self::new(
            config.host.clone(),
            config.port,
            config.sender.clone(),
            config.password.clone(),
            config.recipients.clone(),
            subject_prefix,
        ))
    }

    /// 리포트의 게이지 중 클래스 파일명과 일치하고 읽을 수 있는 것만 모읍니다.
    fn inline_gauges(report: &StressReport) -> Vec<InlineGauge> {
        report
            .classes
            .iter()
            .filter_map(|class| {
                let filename = class.class.gauge_filename();
                let path = report.gauges.iter().find(|p| has_filename(p, filename))?;

                match std::fs::read(path) {
                    Ok(body) => Some(InlineGauge {
                        class: class.class,
                        content_id: format!("{}@radar", filename),
                        body,
                    }),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Gauge not attached");
                        None
                    }
                }
            })
            .collect()
    }

    /// HTML 본문. 첨부된 게이지만 `cid:`로 참조합니다.
    fn build_html(report: &StressReport, gauges: &[InlineGauge]) -> String {
        let mut html = String::from("<html><body>\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&report.headline())));

        for class in &report.classes {
            html.push_str(&format!(
                "<h3>{}: {} — {}</h3>\n",
                class.class,
                class.score.truncated(),
                class.status
            ));
            if let Some(gauge) = gauges.iter().find(|g| g.class == class.class) {
                html.push_str(&format!(
                    "<img src=\"cid:{}\" alt=\"{}\"><br>\n",
                    gauge.content_id,
                    class.class.gauge_title()
                ));
            }
        }

        if !report.notes.is_empty() {
            html.push_str("<ul>\n");
            for note in &report.notes {
                html.push_str(&format!("<li>{}</li>\n", escape_html(note)));
            }
            html.push_str("</ul>\n");
        }

        html.push_str(&format!(
            "<p style=\"font-size:12px;color:#666;\">{}</p>\n",
            DISCLAIMER
        ));
        html.push_str("</body></html>\n");
        html
    }

    /// HTML을 읽지 못하는 클라이언트용 텍스트 본문.
    fn build_text(report: &StressReport) -> String {
        let mut text = report.headline();
        text.push('\n');
        for class in &report.classes {
            text.push_str(&format!(
                "{}: {} — {}\n",
                class.class,
                class.score.truncated(),
                class.status
            ));
        }
        for note in &report.notes {
            text.push_str(&format!("- {}\n", note));
        }
        text.push_str(DISCLAIMER);
        text
    }

    /// 전송할 메시지를 생성합니다.
    pub fn build_message(&self, report: &StressReport) -> NotificationResult<Message> {
        let from: Mailbox = self.sender.parse().map_err(|e| {
            NotificationError::InvalidConfig(format!("invalid sender {}: {}", self.sender, e))
        })?;

        let mut builder = Message::builder()
            .from(from)
            .subject(report.subject(&self.subject_prefix))
            .date(SystemTime::from(report.generated));

        for recipient in &self.recipients {
            let to: Mailbox = recipient.parse().map_err(|e| {
                NotificationError::InvalidConfig(format!("invalid recipient {}: {}", recipient, e))
            })?;
            builder = builder.to(to);
        }

        let gauges = Self::inline_gauges(report);
        let svg = ContentType::parse("image/svg+xml")
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let related = gauges.iter().fold(
            MultiPart::related().singlepart(SinglePart::html(Self::build_html(report, &gauges))),
            |related, gauge| {
                related.singlepart(
                    Attachment::new_inline(gauge.content_id.clone())
                        .body(gauge.body.clone(), svg.clone()),
                )
            },
        );

        let body = MultiPart::alternative()
            .singlepart(SinglePart::plain(Self::build_text(report)))
            .multipart(related);

        builder
            .multipart(body)
            .map_err(|e| NotificationError::SendFailed(format!("failed to build message: {}", e)))
    }

    fn transport(&self) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| {
                NotificationError::InvalidConfig(format!("SMTP relay {}: {}", self.host, e))
            })?
            .port(self.port)
            .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();
        Ok(transport)
    }
}

fn has_filename(path: &Path, filename: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == filename)
}

#[async_trait]
impl ReportDispatcher for SmtpDispatcher {
    async fn dispatch(&self, report: &StressReport) -> NotificationResult<()> {
        if self.recipients.is_empty() {
            debug!("No email recipients configured, skipping");
            return Ok(());
        }

        let message = self.build_message(report)?;
        self.transport()?.send(message).await?;

        info!(
            host = %self.host,
            recipients = self.recipients.len(),
            "Report mailed"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
