//! Record/replay of model calls as YAML cassettes.

pub mod format;
pub mod recorder;
pub mod replayer;
