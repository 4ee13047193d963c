//! Snapshot - 한 번의 실행 결과.
//!
//! 종합 점수, 상태 밴드, 클래스별 점수, 노트, 생성 시각을 담는 불변 레코드입니다.
//! 리포트와 후속 자동화가 소비하는 요약 레코드(`SnapshotRecord`)로 변환됩니다.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::StatusLabel;
use crate::types::{MarketClass, Score};

/// 한 번의 실행에서 산출된 스트레스 스냅샷.
///
/// 생성 후에는 변경할 수 없습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    overall: Score,
    status: StatusLabel,
    equities: Score,
    crypto: Score,
    notes: Vec<String>,
    generated: DateTime<Local>,
}

/// 스냅샷의 외부 계약 레코드.
///
/// ```text
/// {overall: int, status: string, equities: int, crypto: int, notes: [string], generated: timestamp}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub overall: u8,
    pub status: StatusLabel,
    pub equities: u8,
    pub crypto: u8,
    pub notes: Vec<String>,
    pub generated: DateTime<Local>,
}

impl Snapshot {
    /// 스냅샷을 생성합니다. 상태 밴드는 절사 전 종합 점수로 결정됩니다.
    pub fn new(
        overall: Score,
        equities: Score,
        crypto: Score,
        notes: Vec<String>,
        generated: DateTime<Local>,
    ) -> Self {
        Self {
            overall,
            status: overall.status(),
            equities,
            crypto,
            notes,
            generated,
        }
    }

    /// 종합 점수.
    pub fn overall(&self) -> Score {
        self.overall
    }

    /// 종합 상태 밴드.
    pub fn status(&self) -> StatusLabel {
        self.status
    }

    /// 클래스 점수 (비활성/실패 클래스는 0).
    pub fn class_score(&self, class: MarketClass) -> Score {
        match class {
            MarketClass::Equities => self.equities,
            MarketClass::Crypto => self.crypto,
        }
    }

    /// 주식 점수.
    pub fn equities(&self) -> Score {
        self.equities
    }

    /// 암호화폐 점수.
    pub fn crypto(&self) -> Score {
        self.crypto
    }

    /// 노트 목록.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// 생성 시각.
    pub fn generated(&self) -> DateTime<Local> {
        self.generated
    }

    /// 외부 계약 레코드로 변환합니다 (점수는 소수점 이하 절사).
    pub fn record(&self) -> SnapshotRecord {
        SnapshotRecord {
            overall: self.overall.truncated(),
            status: self.status,
            equities: self.equities.truncated(),
            crypto: self.crypto.truncated(),
            notes: self.notes.clone(),
            generated: self.generated,
        }
    }

    /// 보기 좋게 들여쓴 JSON 요약.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.record())
    }

    /// 콘솔 요약 한 줄.
    pub fn headline(&self) -> String {
        format!(
            "Overall Market Stress: {} — {}",
            self.overall.truncated(),
            self.status
        )
    }
}
