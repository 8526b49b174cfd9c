//! Recording adapter for the `NameGenerator` port.

use std::sync::{Arc, Mutex};

use super::{record_interaction, GENERATE_NAME, NAMES_PORT};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::NameGenerator;

/// Records generated names while delegating to an inner implementation.
pub struct RecordingNameGenerator {
    inner: Box<dyn NameGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingNameGenerator {
    /// Creates a new recording name generator wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn NameGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl NameGenerator for RecordingNameGenerator {
    fn generate_name(&self) -> String {
        let name = self.inner.generate_name();
        record_interaction(&self.recorder, NAMES_PORT, GENERATE_NAME, &(), &name);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveNameGenerator;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_generate_name_interaction() {
        let dir = std::env::temp_dir().join("userload_rec_names_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("names.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        let name = {
            let gen = RecordingNameGenerator::new(Box::new(LiveNameGenerator), Arc::clone(&recorder));
            gen.generate_name()
        };

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].port, "names");
        assert_eq!(cassette.interactions[0].output, serde_json::json!(name));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
