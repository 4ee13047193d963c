//! 종합 점수 집계.

use chrono::{DateTime, Local};
use tracing::info;

use radar_core::{RadarError, RadarResult, Score, Snapshot, WeightsConfig};

/// 클래스 점수를 가중 합산하여 스냅샷을 생성합니다.
///
/// 비활성화되었거나 실패한 클래스는 `None`으로 전달되며 0점으로 기록됩니다.
/// 두 클래스 모두 `None`이면 0점 스냅샷 대신 `NoClassScores`를 반환합니다.
pub fn aggregate(
    equities: Option<Score>,
    crypto: Option<Score>,
    weights: &WeightsConfig,
    notes: Vec<String>,
    generated: DateTime<Local>,
) -> RadarResult<Snapshot> {
    if equities.is_none() && crypto.is_none() {
        return Err(RadarError::NoClassScores);
    }

    let equities = equities.unwrap_or(Score::MIN);
    let crypto = crypto.unwrap_or(Score::MIN);

    let overall =
        Score::clamped(equities.value() * weights.equities + crypto.value() * weights.crypto);

    info!(
        %overall,
        status = %overall.status(),
        %equities,
        %crypto,
        "Composite stress aggregated"
    );

    Ok(Snapshot::new(overall, equities, crypto, notes, generated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_core::StatusLabel;

    fn weights() -> WeightsConfig {
        WeightsConfig {
            equities: 0.6,
            crypto: 0.4,
        }
    }

    #[test]
    fn test_weighted_composite() {
        let snapshot = aggregate(
            Some(Score::clamped(30.0)),
            Some(Score::clamped(70.0)),
            &weights(),
            vec![],
            Local::now(),
        )
        .unwrap();

        assert!((snapshot.overall().value() - 46.0).abs() < 1e-9);
        assert_eq!(snapshot.status(), StatusLabel::Stressed);
    }

    #[test]
    fn test_missing_class_reports_zero() {
        let snapshot = aggregate(
            Some(Score::clamped(50.0)),
            None,
            &weights(),
            vec!["CPI today.".to_string()],
            Local::now(),
        )
        .unwrap();

        assert_eq!(snapshot.crypto(), Score::MIN);
        assert_eq!(snapshot.equities().value(), 50.0);
        assert!((snapshot.overall().value() - 30.0).abs() < 1e-9);
        assert_eq!(snapshot.status(), StatusLabel::Elevated);
        assert_eq!(snapshot.notes().to_vec(), vec!["CPI today.".to_string()]);
    }

    #[test]
    fn test_no_scores_is_an_error() {
        let err = aggregate(None, None, &weights(), vec![], Local::now()).unwrap_err();
        assert!(matches!(err, RadarError::NoClassScores));
    }

    #[test]
    fn test_overall_clamped_with_heavy_weights() {
        let heavy = WeightsConfig {
            equities: 1.0,
            crypto: 1.0,
        };
        let snapshot = aggregate(
            Some(Score::MAX),
            Some(Score::MAX),
            &heavy,
            vec![],
            Local::now(),
        )
        .unwrap();

        assert_eq!(snapshot.overall(), Score::MAX);
        assert_eq!(snapshot.status(), StatusLabel::Crisis);
    }
}
