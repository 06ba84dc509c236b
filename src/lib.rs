pub mod scoring;
pub mod tagging;
pub mod utils;

use log::LevelFilter;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Date;

pub use scoring::{
    point_label, resolve_winner, Player, PointOutcome, PointResolution, Score, ScoreEngine,
    ScoreEvent, ScoreIntegrityError,
};
pub use tagging::{
    export_csv, export_file_name, format_video_time, stroke_distribution, ActionId, ActionInput,
    ActionResolution, Direction, ExportError, MatchSession, PerformanceMatrix, SessionConfig,
    StrokeSlice, StrokeType, TagError, TaggedAction,
};

use tagging::labels;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
    utils::init_logger(LevelFilter::Info);
}

fn to_js_error(error: TagError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn checked_score(score: JsValue) -> Result<Score, JsValue> {
    let score: Score = from_value(score).map_err(JsValue::from)?;
    score
        .integrity_check()
        .map_err(|error| to_js_error(TagError::IntegrityViolation { error }))?;
    Ok(score)
}

// 登记时刻的本地时间文本，与视频时间一起写入记录。
fn capture_timestamp(locale: &str) -> String {
    Date::new_0().to_locale_time_string(locale).into()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LabelEntry<T> {
    id: T,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_label: Option<&'static str>,
}

#[derive(Serialize)]
struct LabelCatalog {
    outcomes: Vec<LabelEntry<PointOutcome>>,
    strokes: Vec<LabelEntry<StrokeType>>,
    directions: Vec<LabelEntry<Direction>>,
}

impl LabelCatalog {
    fn build() -> Self {
        Self {
            outcomes: PointOutcome::ALL
                .iter()
                .map(|outcome| LabelEntry {
                    id: *outcome,
                    label: labels::outcome_label(*outcome),
                    short_label: Some(labels::outcome_short_label(*outcome)),
                })
                .collect(),
            strokes: StrokeType::ALL
                .iter()
                .map(|stroke| LabelEntry {
                    id: *stroke,
                    label: labels::stroke_label(*stroke),
                    short_label: None,
                })
                .collect(),
            directions: Direction::ALL
                .iter()
                .map(|direction| LabelEntry {
                    id: *direction,
                    label: labels::direction_label(*direction),
                    short_label: None,
                })
                .collect(),
        }
    }
}

/// 前端持有的一次标注会话。所有写操作都经由这里串行执行。
#[wasm_bindgen]
pub struct TaggingSession {
    session: MatchSession,
}

#[wasm_bindgen]
impl TaggingSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TaggingSession, JsValue> {
        let config = if let Some(json) = config_json {
            serde_json::from_str(&json).map_err(serde_to_js_error)?
        } else {
            SessionConfig::default()
        };
        Ok(TaggingSession {
            session: MatchSession::new(config),
        })
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session).map_err(serde_to_js_error)
    }

    pub fn set_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        let session: MatchSession = serde_json::from_str(json).map_err(serde_to_js_error)?;
        session.integrity_check().map_err(to_js_error)?;
        self.session = session;
        Ok(())
    }

    pub fn score_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.score()).map_err(serde_to_js_error)
    }

    /// 记分牌上该选手当前的分数：0 / 15 / 30 / 40 / Ad。
    pub fn point_label(&self, player: &str) -> Result<String, JsValue> {
        let player: Player = player.parse().map_err(to_js_error)?;
        Ok(self.session.score().point_label(player).to_string())
    }

    fn capture_timestamp(&self) -> String {
        capture_timestamp(&self.session.config.capture_locale)
    }

    pub fn register_action_json(
        &mut self,
        input_json: &str,
        video_time: f64,
    ) -> Result<String, JsValue> {
        let input: ActionInput = serde_json::from_str(input_json).map_err(serde_to_js_error)?;
        let timestamp = self.capture_timestamp();
        let resolution = self
            .session
            .register_action(&input, timestamp, video_time)
            .map_err(to_js_error)?;
        serde_json::to_string(&resolution).map_err(serde_to_js_error)
    }

    /// 以界面文本登记，如 `("A", "Error no forzado", "Derecha", "Cruzado")`。
    pub fn register_labels(
        &mut self,
        player: &str,
        outcome: &str,
        stroke: &str,
        direction: &str,
        video_time: f64,
    ) -> Result<String, JsValue> {
        let input =
            ActionInput::from_labels(player, outcome, stroke, direction).map_err(to_js_error)?;
        let timestamp = self.capture_timestamp();
        let resolution = self
            .session
            .register_action(&input, timestamp, video_time)
            .map_err(to_js_error)?;
        serde_json::to_string(&resolution).map_err(serde_to_js_error)
    }

    pub fn new_match(&mut self) {
        self.session.new_match();
    }

    pub fn set_player_names(&mut self, name_a: String, name_b: String) {
        self.session.set_player_names(name_a, name_b);
    }

    pub fn player_name(&self, player: &str) -> Result<String, JsValue> {
        let player: Player = player.parse().map_err(to_js_error)?;
        Ok(self.session.player_name(player).to_string())
    }

    pub fn action_count(&self) -> usize {
        self.session.len()
    }

    /// 最近的记录在前。
    pub fn history_json(&self) -> Result<String, JsValue> {
        let recent: Vec<&TaggedAction> = self.session.recent().collect();
        serde_json::to_string(&recent).map_err(serde_to_js_error)
    }

    pub fn performance_json(&self) -> Result<String, JsValue> {
        let matrix = PerformanceMatrix::from_actions(self.session.history());
        serde_json::to_string(&matrix).map_err(serde_to_js_error)
    }

    pub fn stroke_distribution_json(&self, player: &str) -> Result<String, JsValue> {
        let player: Player = player.parse().map_err(to_js_error)?;
        let slices = stroke_distribution(self.session.history(), player);
        serde_json::to_string(&slices).map_err(serde_to_js_error)
    }

    pub fn export_csv(&self) -> Result<String, JsValue> {
        export_csv(&self.session).map_err(serde_to_js_error)
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(&self.session, Date::now() as u64)
    }
}

#[wasm_bindgen(js_name = "resolveWinner")]
pub fn resolve_winner_js(player: JsValue, outcome: JsValue) -> Result<JsValue, JsValue> {
    let player: Player = from_value(player).map_err(JsValue::from)?;
    let outcome: PointOutcome = from_value(outcome).map_err(JsValue::from)?;
    to_value(&resolve_winner(player, outcome)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyPoint")]
pub fn apply_point(score: JsValue, winner: JsValue) -> Result<JsValue, JsValue> {
    let score = checked_score(score)?;
    let winner: Player = from_value(winner).map_err(JsValue::from)?;
    to_value(&ScoreEngine::apply_point(&score, winner)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyPointWithEvents")]
pub fn apply_point_with_events(score: JsValue, winner: JsValue) -> Result<JsValue, JsValue> {
    let score = checked_score(score)?;
    let winner: Player = from_value(winner).map_err(JsValue::from)?;
    to_value(&ScoreEngine::apply_point_with_events(&score, winner)).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateScore")]
pub fn validate_score(score: JsValue) -> Result<(), JsValue> {
    checked_score(score).map(|_| ())
}

#[wasm_bindgen(js_name = "scoreSnapshot")]
pub fn score_snapshot(score: JsValue) -> Result<String, JsValue> {
    let score: Score = from_value(score).map_err(JsValue::from)?;
    Ok(score.snapshot())
}

#[wasm_bindgen(js_name = "pointLabel")]
pub fn point_label_js(points: u8) -> String {
    point_label(points).to_string()
}

#[wasm_bindgen(js_name = "formatVideoTime")]
pub fn format_video_time_js(seconds: f64) -> String {
    format_video_time(seconds)
}

/// 界面使用的全部选项及其显示文本。
#[wasm_bindgen(js_name = "labelCatalog")]
pub fn label_catalog() -> Result<JsValue, JsValue> {
    to_value(&LabelCatalog::build()).map_err(JsValue::from)
}
