//! Application state, domain types, and the messages exchanged with tasks.

pub mod app_state;
pub mod messages;
pub mod types;

pub use app_state::{AppState, InputMode, Notice, NoticeKind, OpKind, OpState, Operation, ViewMode};
pub use messages::{AppMessage, Effect};
pub use types::{Column, ColumnKind, FilterState, InstallReason, Package, Row};
