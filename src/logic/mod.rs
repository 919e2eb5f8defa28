//! Pure interaction logic: viewport, presets, row projection, command
//! parsing, and the remote search join.

pub mod command;
pub mod presets;
pub mod rows;
pub mod search_join;
pub mod viewport;

pub use command::{Command, parse_command};
pub use presets::{Preset, PresetKind, default_presets};
pub use search_join::{JoinOutcome, SearchJoin, merge_search_results};
pub use viewport::Viewport;
