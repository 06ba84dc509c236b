use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 平分后领先一分（Ad）在分数字段中的编码。
pub const ADVANTAGE: u8 = 4;
/// 40 分在分数字段中的编码。
pub const FORTY: u8 = 3;

const POINT_LABELS: [&str; 5] = ["0", "15", "30", "40", "Ad"];

/// 比赛双方。引擎只针对两名选手定义。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::A, Player::B];

    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Player::A => "A",
            Player::B => "B",
        }
    }
}

/// 比分快照。值类型，引擎每次返回新的快照。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub points_a: u8,
    pub points_b: u8,
    pub games_a: u32,
    pub games_b: u32,
    pub sets_a: u32,
    pub sets_b: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum ScoreIntegrityError {
    #[error("player {player:?} has {value} points, above advantage")]
    PointsOutOfRange { player: Player, value: u8 },
    #[error("both players hold the advantage")]
    DoubleAdvantage,
    #[error("player {player:?} holds the advantage but the opponent is not at 40")]
    AdvantageWithoutDeuce { player: Player },
}

impl Score {
    pub fn new(
        points_a: u8,
        points_b: u8,
        games_a: u32,
        games_b: u32,
        sets_a: u32,
        sets_b: u32,
    ) -> Self {
        Self {
            points_a,
            points_b,
            games_a,
            games_b,
            sets_a,
            sets_b,
        }
    }

    pub fn points(&self, player: Player) -> u8 {
        match player {
            Player::A => self.points_a,
            Player::B => self.points_b,
        }
    }

    pub fn games(&self, player: Player) -> u32 {
        match player {
            Player::A => self.games_a,
            Player::B => self.games_b,
        }
    }

    pub fn sets(&self, player: Player) -> u32 {
        match player {
            Player::A => self.sets_a,
            Player::B => self.sets_b,
        }
    }

    pub(crate) fn points_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::A => &mut self.points_a,
            Player::B => &mut self.points_b,
        }
    }

    pub(crate) fn games_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::A => &mut self.games_a,
            Player::B => &mut self.games_b,
        }
    }

    pub(crate) fn sets_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::A => &mut self.sets_a,
            Player::B => &mut self.sets_b,
        }
    }

    pub fn is_deuce(&self) -> bool {
        self.points_a == FORTY && self.points_b == FORTY
    }

    pub fn advantage(&self) -> Option<Player> {
        Player::BOTH
            .into_iter()
            .find(|player| self.points(*player) == ADVANTAGE)
    }

    /// 历史记录与导出使用的比分文本，固定 A/B 顺序："盘-盘 (局-局)"。
    pub fn snapshot(&self) -> String {
        format!(
            "{}-{} ({}-{})",
            self.sets_a, self.sets_b, self.games_a, self.games_b
        )
    }

    pub fn point_label(&self, player: Player) -> &'static str {
        point_label(self.points(player))
    }

    /// 校验来自外部（JS）的比分。引擎自身产生的比分总是合法的。
    pub fn integrity_check(&self) -> Result<(), ScoreIntegrityError> {
        for player in Player::BOTH {
            let value = self.points(player);
            if value > ADVANTAGE {
                return Err(ScoreIntegrityError::PointsOutOfRange { player, value });
            }
        }

        if self.points_a == ADVANTAGE && self.points_b == ADVANTAGE {
            return Err(ScoreIntegrityError::DoubleAdvantage);
        }

        if let Some(player) = self.advantage() {
            if self.points(player.opponent()) != FORTY {
                return Err(ScoreIntegrityError::AdvantageWithoutDeuce { player });
            }
        }

        Ok(())
    }
}

/// 记分牌上的分数显示：0 / 15 / 30 / 40 / Ad。
pub fn point_label(points: u8) -> &'static str {
    POINT_LABELS.get(points as usize).copied().unwrap_or("?")
}
