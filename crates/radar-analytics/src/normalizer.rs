//! 지표 정규화.
//!
//! 단일 원시 지표 값을 고정 선형 변환으로 0~100 서브 점수에 매핑합니다.
//! 변환 자체에는 도메인 지식이 없고, 지표별 (offset, scale) 보정 상수는
//! 호출하는 쪽의 보정 테이블에 있습니다.

use radar_core::Score;

/// `clamp((raw - offset) * scale, 0, 100)`.
///
/// 실패하지 않습니다. NaN/무한대 입력도 클램프로 흡수되어 0 또는 100이 됩니다
/// (NaN은 100). 지저분한 데이터에서도 점수를 내는 쪽을 택합니다.
pub fn normalize(raw: f64, offset: f64, scale: f64) -> Score {
    Score::clamped((raw - offset) * scale)
}
