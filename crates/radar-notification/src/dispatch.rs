//! 설정 기반 전송기 구성.

use tracing::{error, info};

use radar_core::{DispatchMode, NotificationConfig};

use crate::discord::DiscordDispatcher;
use crate::smtp::SmtpDispatcher;
use crate::telegram::TelegramDispatcher;
use crate::types::{NotificationResult, ReportDispatcher, StressReport};

/// 설정된 모드의 전송기를 생성합니다. `none` 모드는 `None`을 반환합니다.
pub fn build_dispatcher(
    config: &NotificationConfig,
) -> NotificationResult<Option<Box<dyn ReportDispatcher>>> {
    let prefix = config.subject_prefix.as_str();

    let dispatcher: Box<dyn ReportDispatcher> = match config.mode {
        DispatchMode::None => return Ok(None),
        DispatchMode::Telegram => Box::new(TelegramDispatcher::from_config(&config.telegram, prefix)?),
        DispatchMode::Discord => Box::new(DiscordDispatcher::from_config(&config.discord, prefix)?),
        DispatchMode::Smtp => Box::new(SmtpDispatcher::from_config(&config.email, prefix)?),
    };

    info!(dispatcher = dispatcher.name(), "Report dispatcher configured");
    Ok(Some(dispatcher))
}

/// 리포트를 전송하고 실패는 로그로만 남깁니다.
///
/// 스냅샷이 이미 기록된 뒤이므로 전송 실패가 실행 결과를 바꾸지 않습니다.
/// 전송 성공 여부를 반환합니다.
pub async fn dispatch_report(dispatcher: &dyn ReportDispatcher, report: &StressReport) -> bool {
    match dispatcher.dispatch(report).await {
        Ok(()) => true,
        Err(e) => {
            error!(dispatcher = dispatcher.name(), error = %e, "Failed to dispatch report");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::{DiscordConfig, EmailConfig};

    #[test]
    fn test_none_mode_builds_nothing() {
        let dispatcher = build_dispatcher(&NotificationConfig::default()).unwrap();
        assert!(dispatcher.is_none());
    }

    #[test]
    fn test_builds_configured_mode() {
        let config = NotificationConfig {
            mode: DispatchMode::Discord,
            discord: DiscordConfig {
                webhook_url: "http://localhost/webhook".to_string(),
            },
            ..Default::default()
        };
        let dispatcher = build_dispatcher(&config).unwrap().unwrap();
        assert_eq!(dispatcher.name(), "discord");

        let config = NotificationConfig {
            mode: DispatchMode::Smtp,
            email: EmailConfig {
                sender: "radar@example.com".to_string(),
                password: "app-password".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(build_dispatcher(&config).unwrap().unwrap().name(), "smtp");
    }

    #[test]
    fn test_incomplete_config_is_rejected() {
        let config = NotificationConfig {
            mode: DispatchMode::Telegram,
            ..Default::default()
        };
        assert!(build_dispatcher(&config).is_err());
    }
}
