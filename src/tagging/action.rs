use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::labels;
use crate::scoring::{Player, PointOutcome, Score, ScoreIntegrityError};

/// 历史记录内唯一的动作标识。
pub type ActionId = u64;

/// 击球类型。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrokeType {
    Serve,
    Forehand,
    Backhand,
    InsideOutForehand,
    InsideOutBackhand,
    VolleyForehand,
    VolleyBackhand,
    Smash,
}

impl StrokeType {
    pub const ALL: [StrokeType; 8] = [
        StrokeType::Serve,
        StrokeType::Forehand,
        StrokeType::Backhand,
        StrokeType::InsideOutForehand,
        StrokeType::InsideOutBackhand,
        StrokeType::VolleyForehand,
        StrokeType::VolleyBackhand,
        StrokeType::Smash,
    ];
}

/// 击球方向区域。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Cross,
    Center,
    Parallel,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Cross, Direction::Center, Direction::Parallel];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
#[serde(tag = "type")]
pub enum TagError {
    #[error("no {field} selected")]
    MissingSelection { field: String },
    #[error("video time {value} is not a valid position")]
    InvalidVideoTime { value: f64 },
    #[error("unknown {kind} '{value}'")]
    UnknownLabel { kind: String, value: String },
    #[error("invalid score: {error}")]
    IntegrityViolation { error: ScoreIntegrityError },
    #[error("history diverges from replay at action {action_id}")]
    HistoryMismatch { action_id: ActionId },
    #[error("action id {action_id} is out of sequence")]
    InvalidActionId { action_id: ActionId },
}

impl TagError {
    fn missing(field: &str) -> Self {
        TagError::MissingSelection {
            field: field.to_string(),
        }
    }

    fn unknown(kind: &str, value: &str) -> Self {
        TagError::UnknownLabel {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

// 接受枚举标识（"inside_out_forehand"）或界面文本（"Derecha invertida"）。
fn parse_with_labels<T>(
    value: &str,
    kind: &str,
    from_label: fn(&str) -> Option<T>,
) -> Result<T, TagError>
where
    T: for<'de> Deserialize<'de>,
{
    let trimmed = value.trim();
    if let Some(parsed) = from_label(trimmed) {
        return Ok(parsed);
    }
    serde_json::from_value(serde_json::Value::String(trimmed.to_ascii_lowercase()))
        .map_err(|_| TagError::unknown(kind, value))
}

impl FromStr for Player {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Player::A),
            "B" => Ok(Player::B),
            _ => Err(TagError::unknown("player", s)),
        }
    }
}

impl FromStr for PointOutcome {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_labels(s, "outcome", labels::outcome_from_label)
    }
}

impl FromStr for StrokeType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_labels(s, "stroke", labels::stroke_from_label)
    }
}

impl FromStr for Direction {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_with_labels(s, "direction", labels::direction_from_label)
    }
}

// 空白表示界面上尚未选择，与 JSON 中缺少字段同样处理。
fn parse_selection<T>(value: &str, field: &str) -> Result<T, TagError>
where
    T: FromStr<Err = TagError>,
{
    if value.trim().is_empty() {
        return Err(TagError::missing(field));
    }
    value.parse()
}

/// 界面上的当前选择。四项都选中后才能登记。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionInput {
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub outcome: Option<PointOutcome>,
    #[serde(default)]
    pub stroke: Option<StrokeType>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl ActionInput {
    pub fn new(
        player: Player,
        outcome: PointOutcome,
        stroke: StrokeType,
        direction: Direction,
    ) -> Self {
        Self {
            player: Some(player),
            outcome: Some(outcome),
            stroke: Some(stroke),
            direction: Some(direction),
        }
    }

    pub fn from_labels(
        player: &str,
        outcome: &str,
        stroke: &str,
        direction: &str,
    ) -> Result<Self, TagError> {
        Ok(Self::new(
            parse_selection(player, "player")?,
            parse_selection(outcome, "outcome")?,
            parse_selection(stroke, "stroke")?,
            parse_selection(direction, "direction")?,
        ))
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<ValidatedInput, TagError> {
        Ok(ValidatedInput {
            player: self.player.ok_or_else(|| TagError::missing("player"))?,
            outcome: self.outcome.ok_or_else(|| TagError::missing("outcome"))?,
            stroke: self.stroke.ok_or_else(|| TagError::missing("stroke"))?,
            direction: self
                .direction
                .ok_or_else(|| TagError::missing("direction"))?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedInput {
    pub player: Player,
    pub outcome: PointOutcome,
    pub stroke: StrokeType,
    pub direction: Direction,
}

/// 已登记的一分。创建后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaggedAction {
    pub id: ActionId,
    pub timestamp: String,
    pub video_time: f64,
    pub player: Player,
    pub outcome: PointOutcome,
    pub stroke: StrokeType,
    pub direction: Direction,
    pub score: Score,
    pub score_snapshot: String,
}

impl TaggedAction {
    pub fn winner(&self) -> Player {
        crate::scoring::resolve_winner(self.player, self.outcome)
    }
}

pub fn validate_video_time(value: f64) -> Result<f64, TagError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TagError::InvalidVideoTime { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_selection_is_rejected() {
        let input = ActionInput {
            player: Some(Player::A),
            outcome: Some(PointOutcome::UnforcedError),
            stroke: None,
            direction: Some(Direction::Cross),
        };
        assert!(!input.is_complete());
        assert_eq!(
            input.validate(),
            Err(TagError::MissingSelection {
                field: "stroke".into()
            })
        );
    }

    #[test]
    fn labels_and_identifiers_both_parse() {
        assert_eq!("Remate".parse::<StrokeType>(), Ok(StrokeType::Smash));
        assert_eq!(
            "inside_out_backhand".parse::<StrokeType>(),
            Ok(StrokeType::InsideOutBackhand)
        );
        assert_eq!("CENTER".parse::<Direction>(), Ok(Direction::Center));
        assert_eq!(
            "Desequilibrio positivo".parse::<PointOutcome>(),
            Ok(PointOutcome::PositiveImbalance)
        );
        assert_eq!("b".parse::<Player>(), Ok(Player::B));
        assert!(matches!(
            "Globo".parse::<StrokeType>(),
            Err(TagError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn from_labels_builds_a_complete_input() {
        let input = ActionInput::from_labels("A", "Error no forzado", "Derecha", "Cruzado")
            .expect("labels should parse");
        let validated = input.validate().expect("input is complete");
        assert_eq!(validated.player, Player::A);
        assert_eq!(validated.outcome, PointOutcome::UnforcedError);
        assert_eq!(validated.stroke, StrokeType::Forehand);
        assert_eq!(validated.direction, Direction::Cross);
    }

    #[test]
    fn blank_labels_count_as_missing_selection() {
        assert_eq!(
            ActionInput::from_labels("A", "Error no forzado", "  ", "Cruzado"),
            Err(TagError::MissingSelection {
                field: "stroke".into()
            })
        );
        assert_eq!(
            ActionInput::from_labels("", "Error no forzado", "Derecha", "Cruzado"),
            Err(TagError::MissingSelection {
                field: "player".into()
            })
        );
    }

    #[test]
    fn video_time_must_be_a_position() {
        assert_eq!(validate_video_time(12.5), Ok(12.5));
        assert_eq!(validate_video_time(0.0), Ok(0.0));
        assert!(validate_video_time(-1.0).is_err());
        assert!(validate_video_time(f64::NAN).is_err());
        assert!(validate_video_time(f64::INFINITY).is_err());
    }

    #[test]
    fn tag_errors_serialize_with_type_tag() {
        let json = serde_json::to_string(&TagError::MissingSelection {
            field: "player".into(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"type":"MissingSelection","field":"player"}"#);
    }
}
