//! 반원형 스트레스 게이지 렌더링.
//!
//! 4개 상태 밴드를 색상 호로 그리고, 점수 위치에 바늘을 표시합니다.
//! 바늘 각도는 `180° - score × 1.8°` (0점 = 왼쪽, 100점 = 오른쪽).

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use radar_core::{MarketClass, RadarResult, Score, Snapshot, StatusLabel};

use crate::types::escape_html;

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 220.0;
const CX: f64 = 150.0;
const CY: f64 = 160.0;
const OUTER_R: f64 = 120.0;
const INNER_R: f64 = 90.0;
const NEEDLE_R: f64 = 110.0;

/// 게이지 렌더러 trait.
pub trait GaugeRenderer: Send + Sync {
    /// 게이지를 렌더링하고 저장한 파일 경로를 반환합니다.
    fn render(
        &self,
        score: Score,
        label: StatusLabel,
        title: &str,
        filename: &str,
    ) -> RadarResult<PathBuf>;
}

/// SVG 게이지 렌더러.
#[derive(Debug, Clone)]
pub struct SvgGaugeRenderer {
    output_dir: PathBuf,
}

impl SvgGaugeRenderer {
    /// 출력 디렉토리를 지정하여 렌더러를 생성합니다.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 출력 디렉토리.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// SVG 문서를 생성합니다.
    pub fn to_svg(score: Score, label: StatusLabel, title: &str) -> String {
        let mut svg = String::with_capacity(2048);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = WIDTH,
            h = HEIGHT
        );
        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);

        for band in StatusLabel::ALL {
            let (lo, hi) = band.range();
            let _ = writeln!(
                svg,
                r#"  <path d="{}" fill="{}"/>"#,
                band_path(lo, hi),
                band.color_code()
            );
        }

        let (nx, ny) = polar(NEEDLE_R, needle_angle(score));
        let _ = writeln!(
            svg,
            r##"  <line x1="{CX:.2}" y1="{CY:.2}" x2="{nx:.2}" y2="{ny:.2}" stroke="#2c3e50" stroke-width="4" stroke-linecap="round"/>"##
        );
        let _ = writeln!(
            svg,
            r##"  <circle cx="{CX:.2}" cy="{CY:.2}" r="5" fill="#2c3e50"/>"##
        );

        let _ = writeln!(
            svg,
            r#"  <text x="{CX:.2}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16" font-weight="bold">{}</text>"#,
            escape_html(title)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{CX:.2}" y="200" text-anchor="middle" font-family="sans-serif" font-size="20" font-weight="bold">{} — {}</text>"#,
            score.truncated(),
            label
        );
        svg.push_str("</svg>\n");

        svg
    }
}

impl GaugeRenderer for SvgGaugeRenderer {
    fn render(
        &self,
        score: Score,
        label: StatusLabel,
        title: &str,
        filename: &str,
    ) -> RadarResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(filename);
        fs::write(&path, Self::to_svg(score, label, title))?;

        debug!(path = %path.display(), %score, %label, "Gauge rendered");
        Ok(path)
    }
}

/// 활성화된 클래스마다 게이지를 렌더링합니다.
pub fn render_class_gauges(
    renderer: &dyn GaugeRenderer,
    snapshot: &Snapshot,
    classes: &[MarketClass],
) -> RadarResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(classes.len());

    for &class in classes {
        let score = snapshot.class_score(class);
        paths.push(renderer.render(
            score,
            score.status(),
            class.gauge_title(),
            class.gauge_filename(),
        )?);
    }

    info!(count = paths.len(), "Gauges rendered");
    Ok(paths)
}

/// 점수에 해당하는 각도 (도, 수학 좌표계).
fn needle_angle(score: Score) -> f64 {
    180.0 - score.value() * 1.8
}

/// 극좌표를 SVG 좌표로 변환합니다 (y축 아래 방향).
fn polar(radius: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (CX + radius * rad.cos(), CY - radius * rad.sin())
}

/// 점수 구간 [lo, hi]의 도넛 조각 경로.
fn band_path(lo: f64, hi: f64) -> String {
    let start = 180.0 - lo * 1.8;
    let end = 180.0 - hi * 1.8;

    let (ox1, oy1) = polar(OUTER_R, start);
    let (ox2, oy2) = polar(OUTER_R, end);
    let (ix2, iy2) = polar(INNER_R, end);
    let (ix1, iy1) = polar(INNER_R, start);

    format!(
        "M {ox1:.2} {oy1:.2} A {OUTER_R} {OUTER_R} 0 0 1 {ox2:.2} {oy2:.2} \
         L {ix2:.2} {iy2:.2} A {INNER_R} {INNER_R} 0 0 0 {ix1:.2} {iy1:.2} Z"
    )
}
