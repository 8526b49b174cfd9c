//! Replaying adapter for the `NameGenerator` port.

use std::sync::Mutex;

use crate::adapters::recording::{GENERATE_NAME, NAMES_PORT};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::generator::is_generated_name;
use crate::ports::NameGenerator;

/// Checks every recorded name before any of them is sent.
///
/// Returns the number of recorded names.
///
/// # Errors
///
/// Returns an error naming the first interaction whose output is not a
/// string of 5 letters from `A-Z`/`a-z`.
pub fn check_recorded_names(cassette: &Cassette) -> Result<usize, String> {
    let mut count = 0;
    for interaction in &cassette.interactions {
        if interaction.port != NAMES_PORT || interaction.method != GENERATE_NAME {
            continue;
        }
        match interaction.output.as_str() {
            Some(name) if is_generated_name(name) => count += 1,
            Some(name) => {
                return Err(format!(
                    "Recorded name {name:?} at seq={} is not 5 letters from A-Z/a-z",
                    interaction.seq
                ));
            }
            None => {
                return Err(format!(
                    "Recorded name at seq={} is not a string: {}",
                    interaction.seq, interaction.output
                ));
            }
        }
    }
    Ok(count)
}

/// Serves previously recorded names in their original order.
///
/// Run [`check_recorded_names`] on the cassette first: a recorded output
/// that is not a string panics when it is served.
pub struct ReplayingNameGenerator {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingNameGenerator {
    /// Creates a new replaying name generator from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Number of recorded names not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().expect("replayer lock poisoned").remaining(NAMES_PORT, GENERATE_NAME)
    }
}

impl NameGenerator for ReplayingNameGenerator {
    fn generate_name(&self) -> String {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction(NAMES_PORT, GENERATE_NAME);
            interaction.output.clone()
        };
        output.as_str().expect("recorded name is not a string").to_string()
    }
}
