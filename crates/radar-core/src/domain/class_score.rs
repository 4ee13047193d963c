//! 시장 클래스 점수.

use serde::{Deserialize, Serialize};

use crate::domain::StatusLabel;
use crate::types::{MarketClass, Score};

/// 단일 시장 클래스의 종합 스트레스 점수.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// 시장 클래스
    pub class: MarketClass,
    /// 클래스 점수 (0~100)
    pub score: Score,
    /// 부가 코멘트 (주식은 매크로 노트)
    pub note: Option<String>,
}

impl ClassScore {
    /// 새 클래스 점수를 생성합니다.
    pub fn new(class: MarketClass, score: Score) -> Self {
        Self {
            class,
            score,
            note: None,
        }
    }

    /// 노트를 설정합니다.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// 상태 밴드.
    pub fn status(&self) -> StatusLabel {
        self.score.status()
    }
}
