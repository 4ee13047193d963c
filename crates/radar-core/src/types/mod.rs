//! 공통 값 타입.

pub mod market_class;
pub mod price_series;
pub mod score;

pub use market_class::*;
pub use price_series::*;
pub use score::*;
