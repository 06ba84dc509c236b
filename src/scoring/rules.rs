use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::score::{Player, Score, ADVANTAGE, FORTY};

const GAMES_PER_SET: u32 = 6;
const SET_MARGIN: u32 = 2;

/// 一分引发的比分事件流。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ScoreEvent {
    PointWon { player: Player },
    Deuce,
    Advantage { player: Player },
    GameWon { player: Player, games: u32 },
    SetWon { player: Player, sets: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointResolution {
    pub score: Score,
    pub events: Vec<ScoreEvent>,
}

/// 计分引擎：纯函数 reducer，当前比分由调用方持有。
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn apply_point(score: &Score, winner: Player) -> Score {
        Self::apply_point_with_events(score, winner).score
    }

    pub fn apply_point_with_events(score: &Score, winner: Player) -> PointResolution {
        let loser = winner.opponent();
        let mut next = *score;
        let mut events = vec![ScoreEvent::PointWon { player: winner }];

        let won_points = next.points(winner);
        let lost_points = next.points(loser);
        let game_won = if won_points == FORTY && lost_points < FORTY {
            true
        } else if won_points == FORTY && lost_points == FORTY {
            *next.points_mut(winner) = ADVANTAGE;
            events.push(ScoreEvent::Advantage { player: winner });
            false
        } else if won_points == ADVANTAGE {
            true
        } else if lost_points == ADVANTAGE {
            *next.points_mut(loser) = FORTY;
            events.push(ScoreEvent::Deuce);
            false
        } else {
            *next.points_mut(winner) += 1;
            if next.is_deuce() {
                events.push(ScoreEvent::Deuce);
            }
            false
        };

        if game_won {
            next.points_a = 0;
            next.points_b = 0;
            let games = next.games_mut(winner);
            *games = games.saturating_add(1);
            events.push(ScoreEvent::GameWon {
                player: winner,
                games: next.games(winner),
            });
            info!(
                "game to {}: games {}-{}",
                winner.tag(),
                next.games_a,
                next.games_b
            );
        }

        if let Some(event) = Self::settle_set(&mut next, winner) {
            events.push(event);
        }

        debug!(
            "point to {}: {} -> {}",
            winner.tag(),
            score.snapshot(),
            next.snapshot()
        );

        PointResolution {
            score: next,
            events,
        }
    }

    /// 从 0 比分开始依次应用每一分的胜者。
    pub fn replay<I>(winners: I) -> Score
    where
        I: IntoIterator<Item = Player>,
    {
        winners
            .into_iter()
            .fold(Score::default(), |score, winner| {
                Self::apply_point(&score, winner)
            })
    }

    // 6 局且领先 2 局拿下该盘；6-6 不进入抢七，继续打到领先 2 局。
    fn settle_set(score: &mut Score, winner: Player) -> Option<ScoreEvent> {
        let won = score.games(winner);
        let lost = score.games(winner.opponent());
        if won < GAMES_PER_SET || won.saturating_sub(lost) < SET_MARGIN {
            return None;
        }

        score.games_a = 0;
        score.games_b = 0;
        let sets = score.sets_mut(winner);
        *sets = sets.saturating_add(1);
        info!(
            "set to {}: sets {}-{}",
            winner.tag(),
            score.sets_a,
            score.sets_b
        );
        Some(ScoreEvent::SetWon {
            player: winner,
            sets: score.sets(winner),
        })
    }
}
