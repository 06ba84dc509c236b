//! 标注会话：动作登记、历史、统计与导出。

pub mod action;
pub mod export;
pub mod labels;
pub mod session;
pub mod stats;

pub use action::{ActionId, ActionInput, Direction, StrokeType, TagError, TaggedAction};
pub use export::{export_csv, export_file_name, format_video_time, ExportError};
pub use session::{ActionResolution, MatchSession, SessionConfig};
pub use stats::{stroke_distribution, PerformanceMatrix, PerformanceRow, StrokeSlice};
