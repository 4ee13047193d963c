//! 매크로 스캔 확인 명령.

use chrono::NaiveDate;

use radar_analytics::MacroScanner;
use radar_core::MacroReading;

/// 주어진 날짜의 매크로 스캔 결과.
pub fn scan_macro(date: NaiveDate) -> MacroReading {
    MacroScanner::default().scan(date)
}

/// 스캔 결과를 사람이 읽을 수 있는 여러 줄 문자열로 포맷합니다.
pub fn format_reading(date: NaiveDate, reading: &MacroReading) -> String {
    let mut lines = vec![format!("Macro scan for {}", date)];
    lines.push(format!("  score: {}", reading.score));
    lines.push(format!("  note:  {}", reading.note));

    if let (Some(event), Some(days)) = (&reading.event, reading.lead_days) {
        lines.push(format!("  next:  {} ({} days)", event, days));
    }

    lines.join("\n")
}
