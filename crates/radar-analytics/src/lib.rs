//! 스트레스 점수 엔진.
//!
//! 원시 종가 시계열과 매크로 캘린더를 정규화된 서브 점수, 클래스 점수,
//! 종합 점수 및 상태 밴드로 변환합니다. 엔진을 제외한 모든 계산은
//! 입력만으로 결정되는 순수 함수입니다.
//!
//! # 구성 요소
//!
//! - [`normalizer`]: 선형 변환 + 0~100 클램프
//! - [`indicators`]: 이동평균, 실현 변동성
//! - [`macro_calendar`]: 가장 가까운 매크로 이벤트 스캔
//! - [`market_scorer`]: 주식/암호화폐 클래스 점수
//! - [`aggregator`]: 가중 종합 점수 및 스냅샷 생성
//! - [`engine`]: 데이터 조회부터 스냅샷까지의 1회 실행

pub mod aggregator;
pub mod engine;
pub mod indicators;
pub mod macro_calendar;
pub mod market_scorer;
pub mod normalizer;

pub use aggregator::aggregate;
pub use engine::{ClassFailure, RunOutcome, StressEngine};
pub use macro_calendar::{FixedRuleCalendar, MacroCalendar, MacroScanner};
pub use market_scorer::{
    CryptoBreakdown, CryptoCalibration, EquitiesBreakdown, EquitiesCalibration, EquitiesInputs,
    IndicatorCalibration, MarketScorer, TrendCalibration,
};
pub use normalizer::normalize;
