//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction};
use crate::error::ImageError;

/// Per `(port, method)` queues of recorded interactions.
///
/// Calls to different methods may interleave freely; within one method the
/// recorded order is preserved.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Build a replayer over a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Load a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ImageError> {
        Ok(Self::new(&Cassette::read(path)?))
    }

    /// Take the next interaction recorded for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the pair when nothing is left to replay.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let key = (port.to_string(), method.to_string());
        match self.queues.get_mut(&key) {
            Some(queue) => queue.pop_front().ok_or_else(|| {
                format!("Cassette exhausted: every {port}::{method} interaction has been replayed")
            }),
            None => {
                let mut available: Vec<String> =
                    self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
                available.sort();
                Err(format!(
                    "Cassette exhausted: no interactions recorded for {port}::{method}. \
                     Available: [{}]",
                    available.join(", ")
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cassette(methods: &[&str]) -> Cassette {
        let mut cassette = Cassette::new("test", "abc");
        for (seq, method) in methods.iter().enumerate() {
            cassette.interactions.push(Interaction {
                seq: seq as u64,
                port: "generative_model".into(),
                method: (*method).into(),
                input: json!({}),
                output: json!({"Ok": {}}),
            });
        }
        cassette
    }

    #[test]
    fn replay_in_order_per_method() {
        let methods = ["generate_images", "generate_content", "generate_images"];
        let mut replayer = CassetteReplayer::new(&cassette(&methods));
        let expected = [("generate_images", 0), ("generate_images", 2), ("generate_content", 1)];
        for (method, seq) in expected {
            let interaction = replayer.next_interaction("generative_model", method).unwrap();
            assert_eq!(interaction.seq, seq);
        }
    }

    #[test]
    fn exhausted_replayer_errors() {
        let mut replayer = CassetteReplayer::new(&cassette(&["generate_images"]));
        assert!(replayer.next_interaction("generative_model", "generate_images").is_ok());
        let err = replayer.next_interaction("generative_model", "generate_images").unwrap_err();
        assert!(err.contains("Cassette exhausted"));
    }

    #[test]
    fn unknown_method_lists_available_pairs() {
        let mut replayer = CassetteReplayer::new(&cassette(&["generate_images"]));
        let err = replayer.next_interaction("generative_model", "generate_content").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("generative_model::generate_images"));
    }

    #[test]
    fn from_file_reads_yaml() {
        let path = std::env::temp_dir().join("icon_genie_replayer_test").join("r.cassette.yaml");
        cassette(&["generate_content"]).write(&path).unwrap();
        let mut replayer = CassetteReplayer::from_file(&path).unwrap();
        assert!(replayer.next_interaction("generative_model", "generate_content").is_ok());
    }
}
