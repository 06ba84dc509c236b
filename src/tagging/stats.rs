//! 基于历史记录的汇总统计：结果矩阵与击球分布。

use serde::{Deserialize, Serialize};

use super::action::{StrokeType, TaggedAction};
use super::labels;
use crate::scoring::{Player, PointOutcome};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub outcome: PointOutcome,
    pub label: String,
    pub short_label: String,
    pub count_a: usize,
    pub count_b: usize,
}

impl PerformanceRow {
    pub fn count(&self, player: Player) -> usize {
        match player {
            Player::A => self.count_a,
            Player::B => self.count_b,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerformanceMatrix {
    pub rows: Vec<PerformanceRow>,
}

impl PerformanceMatrix {
    pub fn from_actions<'a, I>(actions: I) -> Self
    where
        I: IntoIterator<Item = &'a TaggedAction>,
    {
        let mut rows: Vec<PerformanceRow> = PointOutcome::ALL
            .iter()
            .map(|outcome| PerformanceRow {
                outcome: *outcome,
                label: labels::outcome_label(*outcome).to_string(),
                short_label: labels::outcome_short_label(*outcome).to_string(),
                count_a: 0,
                count_b: 0,
            })
            .collect();

        for action in actions {
            if let Some(row) = rows.iter_mut().find(|row| row.outcome == action.outcome) {
                match action.player {
                    Player::A => row.count_a += 1,
                    Player::B => row.count_b += 1,
                }
            }
        }

        Self { rows }
    }

    pub fn count(&self, player: Player, outcome: PointOutcome) -> usize {
        self.rows
            .iter()
            .find(|row| row.outcome == outcome)
            .map(|row| row.count(player))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrokeSlice {
    pub stroke: StrokeType,
    pub label: String,
    pub count: usize,
    /// 百分比，保留一位小数。
    pub percentage: f64,
}

/// 某位选手的击球类型分布，按次数降序；没有记录时为空。
///
/// `actions` 按登记顺序传入。次数相同时，最近出现过的击球类型排在前面。
pub fn stroke_distribution<'a, I>(actions: I, player: Player) -> Vec<StrokeSlice>
where
    I: IntoIterator<Item = &'a TaggedAction>,
    I::IntoIter: DoubleEndedIterator,
{
    // 按显示顺序（最近的在前）记录每种击球首次出现的位置
    let mut counts: Vec<(StrokeType, usize)> = Vec::new();
    for action in actions
        .into_iter()
        .rev()
        .filter(|action| action.player == player)
    {
        match counts.iter_mut().find(|(stroke, _)| *stroke == action.stroke) {
            Some((_, count)) => *count += 1,
            None => counts.push((action.stroke, 1)),
        }
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut slices: Vec<StrokeSlice> = counts
        .into_iter()
        .map(|(stroke, count)| StrokeSlice {
            stroke,
            label: labels::stroke_label(stroke).to_string(),
            count,
            percentage: (count as f64 * 1000.0 / total as f64).round() / 10.0,
        })
        .collect();
    // sort_by 是稳定排序，次数相同时保持上面的出现顺序
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::action::{ActionInput, Direction};
    use crate::tagging::session::MatchSession;

    fn session_with(plays: &[(Player, PointOutcome, StrokeType)]) -> MatchSession {
        let mut session = MatchSession::default();
        for (player, outcome, stroke) in plays {
            let input = ActionInput::new(*player, *outcome, *stroke, Direction::Center);
            session
                .register_action(&input, "12:00:00", 0.0)
                .expect("registration should succeed");
        }
        session
    }

    #[test]
    fn matrix_counts_outcomes_per_player() {
        let session = session_with(&[
            (Player::A, PointOutcome::UnforcedError, StrokeType::Forehand),
            (Player::A, PointOutcome::UnforcedError, StrokeType::Backhand),
            (Player::B, PointOutcome::UnforcedError, StrokeType::Serve),
            (Player::B, PointOutcome::PositiveImbalance, StrokeType::Smash),
        ]);
        let matrix = PerformanceMatrix::from_actions(session.history());

        assert_eq!(matrix.rows.len(), 3);
        assert_eq!(matrix.count(Player::A, PointOutcome::UnforcedError), 2);
        assert_eq!(matrix.count(Player::B, PointOutcome::UnforcedError), 1);
        assert_eq!(matrix.count(Player::B, PointOutcome::PositiveImbalance), 1);
        assert_eq!(matrix.count(Player::A, PointOutcome::NegativeImbalance), 0);
        assert_eq!(matrix.rows[0].short_label, "Desequilibrio (+)");
    }

    #[test]
    fn empty_history_gives_zero_matrix() {
        let matrix = PerformanceMatrix::from_actions(MatchSession::default().history());
        assert!(matrix
            .rows
            .iter()
            .all(|row| row.count_a == 0 && row.count_b == 0));
    }

    #[test]
    fn distribution_is_sorted_by_count_with_percentages() {
        let session = session_with(&[
            (Player::A, PointOutcome::PositiveImbalance, StrokeType::Backhand),
            (Player::A, PointOutcome::PositiveImbalance, StrokeType::Forehand),
            (Player::A, PointOutcome::UnforcedError, StrokeType::Forehand),
            (Player::B, PointOutcome::UnforcedError, StrokeType::Smash),
        ]);

        let slices = stroke_distribution(session.history(), Player::A);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].stroke, StrokeType::Forehand);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].percentage, 66.7);
        assert_eq!(slices[1].stroke, StrokeType::Backhand);
        assert_eq!(slices[1].percentage, 33.3);
        assert_eq!(slices[1].label, "Reves");
    }

    #[test]
    fn ties_follow_the_most_recent_stroke() {
        let session = session_with(&[
            (Player::B, PointOutcome::PositiveImbalance, StrokeType::Serve),
            (Player::B, PointOutcome::UnforcedError, StrokeType::Smash),
            (Player::B, PointOutcome::UnforcedError, StrokeType::Backhand),
            (Player::B, PointOutcome::PositiveImbalance, StrokeType::Serve),
        ]);

        let strokes: Vec<StrokeType> = stroke_distribution(session.history(), Player::B)
            .into_iter()
            .map(|slice| slice.stroke)
            .collect();
        assert_eq!(
            strokes,
            vec![StrokeType::Serve, StrokeType::Backhand, StrokeType::Smash]
        );
    }

    #[test]
    fn distribution_is_empty_without_actions() {
        let session =
            session_with(&[(Player::A, PointOutcome::UnforcedError, StrokeType::Serve)]);
        assert!(stroke_distribution(session.history(), Player::B).is_empty());
    }
}
