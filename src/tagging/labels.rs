//! 枚举到界面文本的映射。逻辑只使用枚举，显示文本集中在这里。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::action::{Direction, StrokeType};
use crate::scoring::PointOutcome;

const OUTCOME_LABELS: [(PointOutcome, &str); 3] = [
    (PointOutcome::UnforcedError, "Error no forzado"),
    (PointOutcome::PositiveImbalance, "Desequilibrio positivo"),
    (PointOutcome::NegativeImbalance, "Desequilibrio negativo"),
];

const OUTCOME_SHORT_LABELS: [(PointOutcome, &str); 3] = [
    (PointOutcome::UnforcedError, "Error No Forzado"),
    (PointOutcome::PositiveImbalance, "Desequilibrio (+)"),
    (PointOutcome::NegativeImbalance, "Desequilibrio (-)"),
];

const STROKE_LABELS: [(StrokeType, &str); 8] = [
    (StrokeType::Serve, "Servicio"),
    (StrokeType::Forehand, "Derecha"),
    (StrokeType::Backhand, "Reves"),
    (StrokeType::InsideOutForehand, "Derecha invertida"),
    (StrokeType::InsideOutBackhand, "Reves invertido"),
    (StrokeType::VolleyForehand, "Volea derecha"),
    (StrokeType::VolleyBackhand, "Volea reves"),
    (StrokeType::Smash, "Remate"),
];

const DIRECTION_LABELS: [(Direction, &str); 3] = [
    (Direction::Cross, "Cruzado"),
    (Direction::Center, "Centro"),
    (Direction::Parallel, "Paralelo"),
];

static OUTCOME_BY_LABEL: Lazy<HashMap<&'static str, PointOutcome>> =
    Lazy::new(|| reverse(&OUTCOME_LABELS));
static STROKE_BY_LABEL: Lazy<HashMap<&'static str, StrokeType>> =
    Lazy::new(|| reverse(&STROKE_LABELS));
static DIRECTION_BY_LABEL: Lazy<HashMap<&'static str, Direction>> =
    Lazy::new(|| reverse(&DIRECTION_LABELS));

fn reverse<T: Copy>(table: &[(T, &'static str)]) -> HashMap<&'static str, T> {
    table.iter().map(|(value, label)| (*label, *value)).collect()
}

fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T) -> &'static str {
    table
        .iter()
        .find(|(candidate, _)| *candidate == value)
        .map(|(_, label)| *label)
        .unwrap_or_default()
}

pub fn outcome_label(outcome: PointOutcome) -> &'static str {
    lookup(&OUTCOME_LABELS, outcome)
}

/// 图表坐标轴上使用的简短文本。
pub fn outcome_short_label(outcome: PointOutcome) -> &'static str {
    lookup(&OUTCOME_SHORT_LABELS, outcome)
}

pub fn stroke_label(stroke: StrokeType) -> &'static str {
    lookup(&STROKE_LABELS, stroke)
}

pub fn direction_label(direction: Direction) -> &'static str {
    lookup(&DIRECTION_LABELS, direction)
}

pub fn outcome_from_label(label: &str) -> Option<PointOutcome> {
    OUTCOME_BY_LABEL.get(label.trim()).copied()
}

pub fn stroke_from_label(label: &str) -> Option<StrokeType> {
    STROKE_BY_LABEL.get(label.trim()).copied()
}

pub fn direction_from_label(label: &str) -> Option<Direction> {
    DIRECTION_BY_LABEL.get(label.trim()).copied()
}
