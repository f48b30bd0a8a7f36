// Library crate: the layout engine plus the headless harness and command
// protocol used by the replay binary and integration tests.

pub mod command;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod state;
pub mod transform;
