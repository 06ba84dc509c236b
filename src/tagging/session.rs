use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::action::{validate_video_time, ActionId, ActionInput, TagError, TaggedAction};
use crate::scoring::{resolve_winner, Player, Score, ScoreEngine, ScoreEvent};

const DEFAULT_PLAYER_NAME_A: &str = "Ostapenko";
const DEFAULT_PLAYER_NAME_B: &str = "Suárez Navarro";
const DEFAULT_EXPORT_PREFIX: &str = "tennis_analysis";
// "default" 让浏览器使用宿主的默认区域设置
const DEFAULT_CAPTURE_LOCALE: &str = "default";

fn default_player_name_a() -> String {
    DEFAULT_PLAYER_NAME_A.to_string()
}

fn default_player_name_b() -> String {
    DEFAULT_PLAYER_NAME_B.to_string()
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}

fn default_capture_locale() -> String {
    DEFAULT_CAPTURE_LOCALE.to_string()
}

/// 会话配置，可由前端以 JSON 传入，缺省字段使用默认值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_player_name_a")]
    pub player_name_a: String,
    #[serde(default = "default_player_name_b")]
    pub player_name_b: String,
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
    /// 登记时刻时间文本所用的区域设置，如 "es-ES"。
    #[serde(default = "default_capture_locale")]
    pub capture_locale: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name_a: default_player_name_a(),
            player_name_b: default_player_name_b(),
            export_prefix: default_export_prefix(),
            capture_locale: default_capture_locale(),
        }
    }
}

/// 登记一分后的结果：新记录、新比分以及比分事件。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResolution {
    pub action: TaggedAction,
    pub score: Score,
    pub events: Vec<ScoreEvent>,
}

/// 一次标注会话：当前比分、按登记顺序保存的历史、选手名。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSession {
    #[serde(default)]
    pub config: SessionConfig,
    #[serde(default)]
    score: Score,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    history: Vec<TaggedAction>,
    #[serde(default = "first_action_id")]
    next_action_id: ActionId,
}

fn first_action_id() -> ActionId {
    1
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl MatchSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            score: Score::default(),
            history: Vec::new(),
            next_action_id: first_action_id(),
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// 按登记顺序（最早的在前）。
    pub fn history(&self) -> &[TaggedAction] {
        &self.history
    }

    /// 按显示顺序（最近的在前）。
    pub fn recent(&self) -> impl Iterator<Item = &TaggedAction> {
        self.history.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::A => &self.config.player_name_a,
            Player::B => &self.config.player_name_b,
        }
    }

    pub fn set_player_names(&mut self, name_a: impl Into<String>, name_b: impl Into<String>) {
        self.config.player_name_a = name_a.into();
        self.config.player_name_b = name_b.into();
    }

    pub fn register_action(
        &mut self,
        input: &ActionInput,
        timestamp: impl Into<String>,
        video_time: f64,
    ) -> Result<ActionResolution, TagError> {
        let selection = input.validate().map_err(|error| {
            warn!("rejected action: {error}");
            error
        })?;
        let video_time = validate_video_time(video_time).map_err(|error| {
            warn!("rejected action: {error}");
            error
        })?;

        let winner = resolve_winner(selection.player, selection.outcome);
        let resolution = ScoreEngine::apply_point_with_events(&self.score, winner);

        let action = TaggedAction {
            id: self.next_action_id,
            timestamp: timestamp.into(),
            video_time,
            player: selection.player,
            outcome: selection.outcome,
            stroke: selection.stroke,
            direction: selection.direction,
            score: resolution.score,
            score_snapshot: resolution.score.snapshot(),
        };

        self.next_action_id = self.next_action_id.saturating_add(1);
        self.score = resolution.score;
        self.history.push(action.clone());
        debug!(
            "registered action {} ({} actions, score {})",
            action.id,
            self.history.len(),
            action.score_snapshot
        );

        Ok(ActionResolution {
            action,
            score: resolution.score,
            events: resolution.events,
        })
    }

    /// 新比赛：清空比分和历史，保留选手名。
    pub fn new_match(&mut self) {
        info!("new match, discarding {} actions", self.history.len());
        self.score = Score::default();
        self.history.clear();
        self.next_action_id = first_action_id();
    }

    /// 校验从外部载入的会话：比分合法，标识严格递增，且每条记录的快照等于按顺序重放的结果。
    pub fn integrity_check(&self) -> Result<(), TagError> {
        let mut replayed = Score::default();
        let mut previous_id: ActionId = 0;
        for action in &self.history {
            if action.id <= previous_id {
                return Err(TagError::InvalidActionId {
                    action_id: action.id,
                });
            }
            previous_id = action.id;

            replayed = ScoreEngine::apply_point(&replayed, action.winner());
            if replayed != action.score || replayed.snapshot() != action.score_snapshot {
                return Err(TagError::HistoryMismatch {
                    action_id: action.id,
                });
            }
        }

        self.score
            .integrity_check()
            .map_err(|error| TagError::IntegrityViolation { error })?;

        // 下一个标识必须大于已用的标识，且还能继续递增
        if self.next_action_id <= previous_id || self.next_action_id == ActionId::MAX {
            return Err(TagError::InvalidActionId {
                action_id: self.next_action_id,
            });
        }

        if self.score != replayed {
            let action_id = self.history.last().map(|action| action.id).unwrap_or(0);
            return Err(TagError::HistoryMismatch { action_id });
        }

        Ok(())
    }
}
