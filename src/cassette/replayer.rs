//! Serves the interactions of a loaded cassette back in order.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

impl PortMethodKey {
    fn new(port: &str, method: &str) -> Self {
        Self { port: port.to_string(), method: method.to_string() }
    }
}

/// Hands recorded interactions back out in recording order.
///
/// Names and endpoint responses are queued separately, so replaying the
/// names of a run does not depend on how its requests interleaved.
pub struct CassetteReplayer {
    /// Recorded interactions per port and method.
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    /// How many of each queue have been served.
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Queues every interaction of `cassette` by port and method.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey::new(&interaction.port, &interaction.method);
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Number of interactions not yet served for the given port and method.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        let key = PortMethodKey::new(port, method);
        let total = self.queues.get(&key).map_or(0, Vec::len);
        let served = self.cursors.get(&key).copied().unwrap_or(0);
        total - served
    }

    /// Takes the next recorded interaction, e.g. the next `names/generate_name`.
    ///
    /// Callers cap their use with [`CassetteReplayer::remaining`].
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded for `port`/`method` or all of it has
    /// been served already.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = PortMethodKey::new(port, method);

        let Some(queue) = self.queues.get(&key) else {
            let mut recorded: Vec<String> =
                self.queues.keys().map(|k| format!("{}/{}", k.port, k.method)).collect();
            recorded.sort();
            panic!("Nothing recorded for {port}/{method}; cassette has [{}]", recorded.join(", "));
        };

        let cursor = self.cursors.entry(key).or_default();
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} recorded {port}/{method} interactions were served \
             (last seq={last_seq})",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let interaction = &queue[*cursor];
        *cursor += 1;
        interaction
    }
}
