//! 0~100 범위로 고정된 점수 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::StatusLabel;

/// 0~100 범위로 클램프된 스트레스 점수.
///
/// 서브 점수, 클래스 점수, 종합 점수 모두 이 타입으로 컴포넌트 경계를 넘습니다.
/// 생성 시점에 범위가 보장되므로 소비하는 쪽에서 다시 검증할 필요가 없습니다.
///
/// # 비정상 입력
///
/// - `+∞` → 100, `-∞` → 0
/// - `NaN` → 100 (알 수 없는 값은 스트레스 쪽으로 처리)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// 최저 점수 (0).
    pub const MIN: Score = Score(0.0);
    /// 최고 점수 (100).
    pub const MAX: Score = Score(100.0);

    /// 임의의 실수를 [0, 100]으로 클램프하여 점수를 생성합니다.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MAX;
        }
        Self(raw.clamp(0.0, 100.0))
    }

    /// 원시 값.
    pub fn value(self) -> f64 {
        self.0
    }

    /// 소수점 이하를 버린 정수 점수 (요약 레코드용).
    pub fn truncated(self) -> u8 {
        self.0.trunc() as u8
    }

    /// 점수에 해당하는 상태 밴드.
    pub fn status(self) -> StatusLabel {
        StatusLabel::from_score(self)
    }
}

impl From<f64> for Score {
    fn from(raw: f64) -> Self {
        Self::clamped(raw)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
