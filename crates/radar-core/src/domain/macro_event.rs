//! 매크로 이벤트 및 스캔 결과.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Score;

/// 예정된 매크로 경제 이벤트 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroEventKind {
    /// 소비자물가지수 발표
    Cpi,
    /// 비농업 고용 보고서
    Nfp,
    /// FOMC 정책 결정
    Fomc,
}

impl MacroEventKind {
    /// 노트에 사용하는 짧은 레이블.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpi => "CPI",
            Self::Nfp => "NFP",
            Self::Fomc => "FOMC",
        }
    }
}

impl fmt::Display for MacroEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 날짜가 정해진 매크로 이벤트.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroEvent {
    /// 발표일
    pub date: NaiveDate,
    /// 이벤트 유형
    pub kind: MacroEventKind,
}

impl MacroEvent {
    /// 새 이벤트를 생성합니다.
    pub fn new(date: NaiveDate, kind: MacroEventKind) -> Self {
        Self { date, kind }
    }
}

impl fmt::Display for MacroEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.date)
    }
}

/// 매크로 스캔 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroReading {
    /// 매크로 서브 점수
    pub score: Score,
    /// 사람이 읽을 수 있는 코멘트
    pub note: String,
    /// 가장 가까운 예정 이벤트 (없으면 None)
    pub event: Option<MacroEvent>,
    /// 이벤트까지 남은 일수
    pub lead_days: Option<i64>,
}
