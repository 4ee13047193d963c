//! 리포트 타입 및 trait 정의.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use radar_core::{MarketClass, Score, Snapshot, StatusLabel};

/// 리포트 하단 고지 문구.
pub const DISCLAIMER: &str = "Context only, not financial advice.";

/// 시장 클래스별 리포트 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub class: MarketClass,
    pub score: Score,
    pub status: StatusLabel,
}

/// 1회 실행의 전송용 리포트.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressReport {
    /// 실행 고유 ID
    pub run_id: String,
    /// 종합 점수
    pub overall: Score,
    /// 종합 상태
    pub status: StatusLabel,
    /// 활성화된 클래스별 점수
    pub classes: Vec<ClassReport>,
    /// 스냅샷 노트
    pub notes: Vec<String>,
    /// 렌더링된 게이지 파일
    pub gauges: Vec<PathBuf>,
    /// 생성 시각
    pub generated: DateTime<Local>,
}

impl StressReport {
    /// 스냅샷에서 리포트를 생성합니다.
    ///
    /// `classes`는 활성화된 시장 클래스이며, 실패한 클래스도 0점으로 포함됩니다.
    pub fn new(snapshot: &Snapshot, classes: &[MarketClass]) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            overall: snapshot.overall(),
            status: snapshot.status(),
            classes: classes
                .iter()
                .map(|&class| {
                    let score = snapshot.class_score(class);
                    ClassReport {
                        class,
                        score,
                        status: score.status(),
                    }
                })
                .collect(),
            notes: snapshot.notes().to_vec(),
            gauges: Vec::new(),
            generated: snapshot.generated(),
        }
    }

    /// 게이지 파일 목록을 설정합니다.
    pub fn with_gauges(mut self, gauges: Vec<PathBuf>) -> Self {
        self.gauges = gauges;
        self
    }

    /// 메일/메시지 제목: `"<prefix> — <LABEL> (<overall>)"`.
    pub fn subject(&self, prefix: &str) -> String {
        format!("{} — {} ({})", prefix, self.status, self.overall.truncated())
    }

    /// 한 줄 요약: `"Overall Market Stress: <n> — <LABEL>"`.
    pub fn headline(&self) -> String {
        format!(
            "Overall Market Stress: {} — {}",
            self.overall.truncated(),
            self.status
        )
    }
}

/// 전송 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 전송 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("리포트 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("SMTP 에러: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 리포트 전송기 trait.
#[async_trait]
pub trait ReportDispatcher: Send + Sync {
    /// 리포트를 전송합니다.
    async fn dispatch(&self, report: &StressReport) -> NotificationResult<()>;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// HTML 특수 문자 이스케이프.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
