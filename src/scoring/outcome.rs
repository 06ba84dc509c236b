use serde::{Deserialize, Serialize};

use super::score::Player;

/// 一分的结果类别。计分只关心谁赢了这一分，三类的区分用于统计。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PointOutcome {
    /// 击球方直接得分。
    PositiveImbalance,
    /// 击球方在压迫下失分。
    NegativeImbalance,
    /// 击球方自身失误。
    UnforcedError,
}

impl PointOutcome {
    pub const ALL: [PointOutcome; 3] = [
        PointOutcome::PositiveImbalance,
        PointOutcome::NegativeImbalance,
        PointOutcome::UnforcedError,
    ];

    pub fn awards_point_to_actor(self) -> bool {
        matches!(self, PointOutcome::PositiveImbalance)
    }
}

pub fn resolve_winner(acting: Player, outcome: PointOutcome) -> Player {
    if outcome.awards_point_to_actor() {
        acting
    } else {
        acting.opponent()
    }
}
