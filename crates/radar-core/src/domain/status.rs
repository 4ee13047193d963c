//! StatusLabel - 스트레스 상태 밴드.
//!
//! 점수를 4단계 고정 밴드로 분류합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Score;

/// 스트레스 점수의 상태 밴드.
///
/// # 밴드 경계
///
/// 경계값은 아래쪽 밴드에 속합니다 (25는 CALM).
///
/// - **Calm**: `score <= 25`
/// - **Elevated**: `25 < score <= 45`
/// - **Stressed**: `45 < score <= 65`
/// - **Crisis**: `score > 65`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLabel {
    /// 평온
    Calm,
    /// 경계
    Elevated,
    /// 스트레스
    Stressed,
    /// 위기
    Crisis,
}

impl StatusLabel {
    /// 모든 밴드 (낮은 순).
    pub const ALL: [StatusLabel; 4] = [
        StatusLabel::Calm,
        StatusLabel::Elevated,
        StatusLabel::Stressed,
        StatusLabel::Crisis,
    ];

    /// 점수를 밴드로 분류합니다.
    pub fn from_score(score: Score) -> Self {
        let s = score.value();
        if s <= 25.0 {
            Self::Calm
        } else if s <= 45.0 {
            Self::Elevated
        } else if s <= 65.0 {
            Self::Stressed
        } else {
            Self::Crisis
        }
    }

    /// 밴드의 점수 구간 (하한, 상한).
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Calm => (0.0, 25.0),
            Self::Elevated => (25.0, 45.0),
            Self::Stressed => (45.0, 65.0),
            Self::Crisis => (65.0, 100.0),
        }
    }

    /// 컬러 코드 (게이지용).
    pub fn color_code(self) -> &'static str {
        match self {
            Self::Calm => "#2ecc71",     // 녹색
            Self::Elevated => "#f1c40f", // 노란색
            Self::Stressed => "#e67e22", // 주황색
            Self::Crisis => "#e74c3c",   // 빨간색
        }
    }

    /// 아이콘 (알림용).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Calm => "🟢",
            Self::Elevated => "🟡",
            Self::Stressed => "🟠",
            Self::Crisis => "🔴",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Calm => "CALM",
            Self::Elevated => "ELEVATED",
            Self::Stressed => "STRESSED",
            Self::Crisis => "CRISIS",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(v: f64) -> StatusLabel {
        StatusLabel::from_score(Score::clamped(v))
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(status(0.0), StatusLabel::Calm);
        assert_eq!(status(25.0), StatusLabel::Calm);
        assert_eq!(status(26.0), StatusLabel::Elevated);
        assert_eq!(status(45.0), StatusLabel::Elevated);
        assert_eq!(status(46.0), StatusLabel::Stressed);
        assert_eq!(status(65.0), StatusLabel::Stressed);
        assert_eq!(status(66.0), StatusLabel::Crisis);
        assert_eq!(status(100.0), StatusLabel::Crisis);
    }

    #[test]
    fn test_fractional_just_above_boundary() {
        assert_eq!(status(25.01), StatusLabel::Elevated);
        assert_eq!(status(30.05), StatusLabel::Elevated);
        assert_eq!(status(65.000_1), StatusLabel::Crisis);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(StatusLabel::Calm.to_string(), "CALM");
        assert_eq!(StatusLabel::Crisis.to_string(), "CRISIS");
        assert_eq!(
            serde_json::to_string(&StatusLabel::Elevated).unwrap(),
            "\"ELEVATED\""
        );
    }

    #[test]
    fn test_severity_order() {
        for pair in StatusLabel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    proptest! {
        #[test]
        fn prop_score_falls_in_its_band(v in 0.0f64..=100.0) {
            let label = status(v);
            let (lo, hi) = label.range();
            prop_assert!(v <= hi);
            if label != StatusLabel::Calm {
                prop_assert!(v > lo);
            }
        }

        #[test]
        fn prop_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(status(lo) <= status(hi));
        }
    }
}
