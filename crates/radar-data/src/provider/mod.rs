//! 종가 시계열 제공자.
//!
//! 코어는 제공자에게 다음 계약만 요구합니다:
//! 티커와 조회 기간(일)이 주어지면, 결측치가 제거된 날짜 오름차순 종가 시계열을
//! 반환하거나, 사용할 수 있는 데이터가 없으면 해당 티커를 담은 에러를 반환합니다.

pub mod memory;
pub mod yahoo;

use async_trait::async_trait;
use radar_core::PriceSeries;

use crate::error::Result;

pub use memory::InMemoryPriceProvider;
pub use yahoo::YahooChartProvider;

/// 종가 시계열 제공자 trait.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 최근 `lookback_days`일의 종가 시계열을 조회합니다.
    async fn fetch_closes(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries>;

    /// 제공자 이름 (로그용).
    fn name(&self) -> &str;
}
