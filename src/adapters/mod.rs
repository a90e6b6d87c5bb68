//! Adapter implementations for port traits.
//!
//! - `live/`: the Gemini REST client
//! - `recording/`: records interactions to cassettes
//! - `replaying/`: replays interactions from cassettes

#[cfg(test)]
pub mod fake;
pub mod live;
pub mod recording;
pub mod replaying;
