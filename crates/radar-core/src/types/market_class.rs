//! 시장 클래스 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 점수를 산출하는 시장 클래스.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketClass {
    /// 주식 (변동성, 추세, 금리, 달러, 매크로)
    Equities,
    /// 암호화폐 (실현 변동성, 추세)
    Crypto,
}

impl MarketClass {
    /// 모든 클래스 (보고 순서).
    pub const ALL: [MarketClass; 2] = [MarketClass::Equities, MarketClass::Crypto];

    /// 게이지 제목.
    pub fn gauge_title(self) -> &'static str {
        match self {
            Self::Equities => "Equities Stress",
            Self::Crypto => "Crypto Stress",
        }
    }

    /// 게이지 출력 파일명.
    pub fn gauge_filename(self) -> &'static str {
        match self {
            Self::Equities => "equities_gauge.svg",
            Self::Crypto => "crypto_gauge.svg",
        }
    }
}

impl fmt::Display for MarketClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Equities => "Equities",
            Self::Crypto => "Crypto",
        };
        write!(f, "{}", s)
    }
}
