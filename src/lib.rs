//! Library entry for Pacviz exposing the controller, sources, and rendering
//! for integration tests.

pub mod app;
pub mod args;
pub mod events;
pub mod install;
pub mod logic;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;

#[cfg(test)]
pub(crate) mod test_utils;
