//! 매크로 이벤트 스캐너.
//!
//! 이번 달 예정된 매크로 이벤트 중 가장 가까운 것을 찾아 남은 일수에 따라
//! 매크로 서브 점수를 계산합니다.
//!
//! 이벤트 날짜는 [`MacroCalendar`] 전략이 생성합니다. 기본 구현인
//! [`FixedRuleCalendar`]는 실제 경제 캘린더가 아닌 고정 규칙 기반 근사치입니다:
//!
//! | 이벤트 | 규칙 |
//! |--------|------|
//! | CPI | 매월 14일 |
//! | NFP | 매월 첫 번째 금요일 |
//! | FOMC | 1·3·5·6·7·9·11·12월 15일 |
//!
//! 실제 캘린더 피드로 바꿀 때는 `MacroCalendar`만 새로 구현하면 되고
//! 점수 공식은 그대로 유지됩니다.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use radar_core::{MacroEvent, MacroEventKind, MacroReading, Score};

/// 남은 이벤트가 없을 때의 기본 점수.
pub const BASELINE_SCORE: f64 = 15.0;

/// 남은 이벤트가 없을 때의 노트.
pub const BASELINE_NOTE: &str = "No immediate macro risk.";

/// 월별 매크로 이벤트 생성 전략.
pub trait MacroCalendar: Send + Sync {
    /// 해당 월의 이벤트 후보를 생성 순서대로 반환합니다.
    ///
    /// 같은 날짜에 여러 이벤트가 있으면 먼저 생성된 이벤트가 선택됩니다.
    fn events_in_month(&self, year: i32, month: u32) -> Vec<MacroEvent>;
}

/// 고정 규칙 기반 매크로 캘린더.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRuleCalendar {
    /// CPI 발표일
    pub cpi_day: u32,
    /// FOMC 결정일
    pub fomc_day: u32,
    /// FOMC가 열리는 월
    pub fomc_months: [u32; 8],
}

impl Default for FixedRuleCalendar {
    fn default() -> Self {
        Self {
            cpi_day: 14,
            fomc_day: 15,
            fomc_months: [1, 3, 5, 6, 7, 9, 11, 12],
        }
    }
}

impl FixedRuleCalendar {
    /// 해당 월에 FOMC가 열리는지 여부.
    pub fn has_fomc(&self, month: u32) -> bool {
        self.fomc_months.contains(&month)
    }
}

impl MacroCalendar for FixedRuleCalendar {
    fn events_in_month(&self, year: i32, month: u32) -> Vec<MacroEvent> {
        let mut events = Vec::with_capacity(3);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, self.cpi_day) {
            events.push(MacroEvent::new(date, MacroEventKind::Cpi));
        }

        if let Some(date) = NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, 1) {
            events.push(MacroEvent::new(date, MacroEventKind::Nfp));
        }

        if self.has_fomc(month) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, self.fomc_day) {
                events.push(MacroEvent::new(date, MacroEventKind::Fomc));
            }
        }

        events
    }
}

/// 이벤트까지 남은 일수에 따른 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadBucket {
    /// 당일 (0일 이하)
    Today,
    /// 1일 이내
    Imminent,
    /// 3일 이내
    Approaching,
    /// 7일 이내
    ThisWeek,
    /// 7일 초과
    Distant,
}

impl LeadBucket {
    /// 남은 일수에서 구간을 결정합니다.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => Self::Today,
            1 => Self::Imminent,
            2..=3 => Self::Approaching,
            4..=7 => Self::ThisWeek,
            _ => Self::Distant,
        }
    }

    /// 구간별 매크로 점수.
    pub fn score(self) -> f64 {
        match self {
            Self::Today => 90.0,
            Self::Imminent => 80.0,
            Self::Approaching => 65.0,
            Self::ThisWeek => 40.0,
            Self::Distant => 20.0,
        }
    }

    /// 이벤트 레이블을 포함한 노트.
    pub fn note(self, kind: MacroEventKind) -> String {
        match self {
            Self::Today => format!("{} today.", kind),
            Self::Imminent => format!("{} imminent.", kind),
            Self::Approaching => format!("{} approaching.", kind),
            Self::ThisWeek => format!("{} this week.", kind),
            Self::Distant => "No major macro risk soon.".to_string(),
        }
    }
}

/// 매크로 이벤트 스캐너.
pub struct MacroScanner {
    calendar: Box<dyn MacroCalendar>,
}

impl Default for MacroScanner {
    fn default() -> Self {
        Self::new(FixedRuleCalendar::default())
    }
}

impl std::fmt::Debug for MacroScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroScanner").finish_non_exhaustive()
    }
}

impl MacroScanner {
    /// 주어진 캘린더로 스캐너를 생성합니다.
    pub fn new(calendar: impl MacroCalendar + 'static) -> Self {
        Self {
            calendar: Box::new(calendar),
        }
    }

    /// `today` 기준 가장 가까운 이벤트로 매크로 점수를 계산합니다.
    ///
    /// 이번 달 안에서만 찾으므로 월말에는 남은 이벤트가 없을 수 있고,
    /// 그 경우 기본 점수(15)를 반환합니다.
    pub fn scan(&self, today: NaiveDate) -> MacroReading {
        let upcoming = self
            .calendar
            .events_in_month(today.year(), today.month())
            .into_iter()
            .filter(|event| event.date >= today);

        // min_by_key는 동률일 때 먼저 나온 요소를 유지함
        let Some(nearest) = upcoming.min_by_key(|event| event.date) else {
            debug!(%today, "No remaining macro events this month");
            return MacroReading {
                score: Score::clamped(BASELINE_SCORE),
                note: BASELINE_NOTE.to_string(),
                event: None,
                lead_days: None,
            };
        };

        let days = (nearest.date - today).num_days();
        let bucket = LeadBucket::from_days(days);

        debug!(%today, event = %nearest, days, ?bucket, "Nearest macro event");

        MacroReading {
            score: Score::clamped(bucket.score()),
            note: bucket.note(nearest.kind),
            event: Some(nearest),
            lead_days: Some(days),
        }
    }
}
