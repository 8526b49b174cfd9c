//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reqwest::Url;
use tracing::info;
use uuid::Uuid;

use crate::adapters::live::{LiveNameGenerator, LiveUserApi, StdoutSink};
use crate::adapters::recording::{RecordingNameGenerator, RecordingUserApi};
use crate::adapters::replaying::names::check_recorded_names;
use crate::adapters::replaying::ReplayingNameGenerator;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{LineSink, NameGenerator, UserApi};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Source of usernames.
    pub names: Box<dyn NameGenerator>,
    /// Endpoint the usernames are posted to.
    pub api: Box<dyn UserApi>,
    /// Destination of the per-iteration lines.
    pub out: Box<dyn LineSink>,
    /// Recorder shared with the recording adapters, if any.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
    /// Upper bound on names the generator can supply.
    name_budget: Option<u64>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        names: Box<dyn NameGenerator>,
        api: Box<dyn UserApi>,
        out: Box<dyn LineSink>,
    ) -> Self {
        Self { names, api, out, recorder: None, name_budget: None }
    }

    /// Creates a live context: random names, real HTTP, stdout.
    #[must_use]
    pub fn live(endpoint: Url) -> Self {
        Self::new(
            Box::new(LiveNameGenerator),
            Box::new(LiveUserApi::new(endpoint)),
            Box::new(StdoutSink),
        )
    }

    /// Creates a live context that also records names and responses.
    ///
    /// The cassette is written to `path` by [`ServiceContext::finish`].
    #[must_use]
    pub fn recording(endpoint: Url, path: &Path) -> Self {
        let session_id = Uuid::new_v4().to_string();
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("userload {endpoint}"),
            session_id,
        )));

        Self {
            names: Box::new(RecordingNameGenerator::new(
                Box::new(LiveNameGenerator),
                Arc::clone(&recorder),
            )),
            api: Box::new(RecordingUserApi::new(
                Box::new(LiveUserApi::new(endpoint)),
                Arc::clone(&recorder),
            )),
            out: Box::new(StdoutSink),
            recorder: Some(recorder),
            name_budget: None,
        }
    }

    /// Creates a context that resends the names recorded in a cassette.
    ///
    /// Requests still go to the live `endpoint`; only the names are replayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed, or if
    /// any recorded name is not a 5-letter alphabetic string.
    pub fn replaying_names(endpoint: Url, path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        check_recorded_names(&cassette)
            .map_err(|e| format!("Invalid cassette {}: {e}", path.display()))?;
        let names = ReplayingNameGenerator::new(CassetteReplayer::new(&cassette));
        let budget = u64::try_from(names.remaining()).unwrap_or(u64::MAX);
        info!(cassette = %path.display(), names = budget, "replaying recorded names");

        let mut ctx =
            Self::new(Box::new(names), Box::new(LiveUserApi::new(endpoint)), Box::new(StdoutSink));
        ctx.name_budget = Some(budget);
        Ok(ctx)
    }

    /// Caps a requested iteration count at the number of names available.
    #[must_use]
    pub fn cap_iterations(&self, requested: u64) -> u64 {
        self.name_budget.map_or(requested, |budget| requested.min(budget))
    }

    /// Releases the adapters and writes the cassette when recording.
    ///
    /// Returns the cassette path if one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>, String> {
        let Self { names, api, out, recorder, .. } = self;
        // Drop the adapters first to release their Arc references
        drop((names, api, out));

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| "cassette recorder is still shared".to_string())?
            .into_inner()
            .map_err(|_| "cassette recorder lock poisoned".to_string())?;
        let path = recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok(Some(path))
    }
}
