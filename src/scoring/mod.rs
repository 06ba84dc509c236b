//! 计分核心：得分判定与比分状态机。

pub mod outcome;
pub mod rules;
pub mod score;

pub use outcome::{resolve_winner, PointOutcome};
pub use rules::{PointResolution, ScoreEngine, ScoreEvent};
pub use score::{point_label, Player, Score, ScoreIntegrityError, ADVANTAGE, FORTY};
