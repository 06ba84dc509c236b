use serde::Serialize;
use thiserror::Error;

use super::action::TaggedAction;
use super::labels;
use super::session::MatchSession;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Flush(String),
    #[error("csv output is not utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// 导出文件中的一行。字段名即表头。
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "VideoTime_sec")]
    video_time: String,
    #[serde(rename = "Player")]
    player: &'a str,
    #[serde(rename = "Result")]
    result: &'static str,
    #[serde(rename = "Stroke")]
    stroke: &'static str,
    #[serde(rename = "Direction")]
    direction: &'static str,
    #[serde(rename = "Score")]
    score: &'a str,
}

impl<'a> ExportRow<'a> {
    fn new(session: &'a MatchSession, action: &'a TaggedAction) -> Self {
        Self {
            timestamp: &action.timestamp,
            video_time: format!("{:.2}", action.video_time),
            player: session.player_name(action.player),
            result: labels::outcome_label(action.outcome),
            stroke: labels::stroke_label(action.stroke),
            direction: labels::direction_label(action.direction),
            score: &action.score_snapshot,
        }
    }
}

/// 按显示顺序（最近的在前）导出 CSV，所有字段加引号。历史为空时返回空串。
pub fn export_csv(session: &MatchSession) -> Result<String, ExportError> {
    if session.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for action in session.recent() {
        writer.serialize(ExportRow::new(session, action))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Flush(error.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn export_file_name(session: &MatchSession, timestamp_millis: u64) -> String {
    format!(
        "{}_{}_vs_{}_{}",
        session.config.export_prefix,
        session.config.player_name_a,
        session.config.player_name_b,
        timestamp_millis
    )
}

/// 历史表格中的视频时间：m:ss。
pub fn format_video_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Player, PointOutcome};
    use crate::tagging::action::{ActionInput, Direction, StrokeType};

    #[test]
    fn empty_session_exports_nothing() {
        let session = MatchSession::default();
        assert_eq!(export_csv(&session).expect("export"), "");
    }

    #[test]
    fn rows_are_quoted_and_newest_first() {
        let mut session = MatchSession::default();
        session.set_player_names("Ostapenko", "Suárez Navarro");
        session
            .register_action(
                &ActionInput::new(
                    Player::A,
                    PointOutcome::PositiveImbalance,
                    StrokeType::Forehand,
                    Direction::Cross,
                ),
                "18:01:02",
                3.0,
            )
            .expect("registration should succeed");
        session
            .register_action(
                &ActionInput::new(
                    Player::B,
                    PointOutcome::UnforcedError,
                    StrokeType::InsideOutBackhand,
                    Direction::Parallel,
                ),
                "18:01:40",
                41.257,
            )
            .expect("registration should succeed");

        let csv = export_csv(&session).expect("export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            r#""Timestamp","VideoTime_sec","Player","Result","Stroke","Direction","Score""#
        );
        assert_eq!(
            lines[1],
            r#""18:01:40","41.26","Suárez Navarro","Error no forzado","Reves invertido","Paralelo","0-0 (0-0)""#
        );
        assert_eq!(
            lines[2],
            r#""18:01:02","3.00","Ostapenko","Desequilibrio positivo","Derecha","Cruzado","0-0 (0-0)""#
        );
    }

    #[test]
    fn file_name_includes_players_and_time() {
        let mut session = MatchSession::default();
        session.set_player_names("Alcaraz", "Sinner");
        assert_eq!(
            export_file_name(&session, 1_700_000_000_000),
            "tennis_analysis_Alcaraz_vs_Sinner_1700000000000"
        );
    }

    #[test]
    fn video_time_formats_as_minutes_and_seconds() {
        assert_eq!(format_video_time(0.0), "0:00");
        assert_eq!(format_video_time(9.9), "0:09");
        assert_eq!(format_video_time(125.4), "2:05");
        assert_eq!(format_video_time(-4.0), "0:00");
    }
}
