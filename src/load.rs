//! The sequential request loop.

use clap::ValueEnum;
use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::RunError;
use crate::ports::CreateUserRequest;

/// How often the loop reports progress at info level.
const PROGRESS_EVERY: u64 = 10_000;

/// Layout of the line printed for each response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LineFormat {
    /// `<body> - <username>`
    #[default]
    BodyAndName,
    /// `<body>`
    BodyOnly,
}

impl LineFormat {
    /// Renders the output line for one completed iteration.
    #[must_use]
    pub fn render(self, body: &str, username: &str) -> String {
        match self {
            Self::BodyAndName => format!("{body} - {username}"),
            Self::BodyOnly => body.to_string(),
        }
    }
}

/// Parameters of a single load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    /// Number of request cycles to attempt.
    pub iterations: u64,
    /// Output line layout.
    pub format: LineFormat,
}

/// Outcome of a run that reached its iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of completed request cycles.
    pub completed: u64,
}

/// Runs `plan.iterations` request cycles, one at a time.
///
/// Each cycle generates a name, posts it, waits for the whole response body,
/// and emits one line. The next cycle starts only after the line is written.
///
/// # Errors
///
/// Returns [`RunError::Cycle`] on the first failed request. Nothing is
/// emitted for that iteration and no further iterations run. Returns
/// [`RunError::Output`] if a line cannot be written.
pub async fn run_load(ctx: &ServiceContext, plan: &LoadPlan) -> Result<RunSummary, RunError> {
    info!(iterations = plan.iterations, format = ?plan.format, "starting load run");

    for iteration in 0..plan.iterations {
        let request = CreateUserRequest { username: ctx.names.generate_name() };
        debug!(iteration, username = %request.username, "posting");

        let response =
            ctx.api.create_user(&request).await.map_err(|source| RunError::Cycle {
                iteration,
                username: request.username.clone(),
                source,
            })?;
        debug!(iteration, status = response.status, bytes = response.body.len(), "response read");

        ctx.out.emit(&plan.format.render(&response.body, &request.username))?;

        let completed = iteration + 1;
        if completed % PROGRESS_EVERY == 0 {
            info!(completed, total = plan.iterations, "progress");
        }
    }

    info!(completed = plan.iterations, "load run finished");
    Ok(RunSummary { completed: plan.iterations })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::ports::{ApiFuture, LineSink, NameGenerator, UserApi, UserResponse};

    struct CountingNames(AtomicUsize);

    impl NameGenerator for CountingNames {
        fn generate_name(&self) -> String {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            format!("name{n}")
        }
    }

    /// Answers `created`, fails on `fail_at`, and tracks in-flight requests.
    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fail_at: Option<usize>,
        seen: Mutex<Vec<String>>,
    }

    impl UserApi for FakeApi {
        fn create_user(&self, request: &CreateUserRequest) -> ApiFuture<'_> {
            let username = request.username.clone();
            Box::pin(async move {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                self.seen.lock().unwrap().push(username);

                // Stall one response to give an overlapping dispatch a chance to show up.
                if call == 1 {
                    for _ in 0..10 {
                        tokio::task::yield_now().await;
                    }
                }

                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                if self.fail_at == Some(call) {
                    return Err("connection refused".into());
                }
                Ok(UserResponse { status: 201, body: "created".into() })
            })
        }
    }

    #[derive(Default)]
    struct VecSink(Mutex<Vec<String>>);

    impl LineSink for VecSink {
        fn emit(&self, line: &str) -> std::io::Result<()> {
            self.0.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    impl LineSink for Arc<VecSink> {
        fn emit(&self, line: &str) -> std::io::Result<()> {
            (**self).emit(line)
        }
    }

    impl UserApi for Arc<FakeApi> {
        fn create_user(&self, request: &CreateUserRequest) -> ApiFuture<'_> {
            (**self).create_user(request)
        }
    }

    fn context(api: &Arc<FakeApi>, sink: &Arc<VecSink>) -> ServiceContext {
        ServiceContext::new(
            Box::new(CountingNames(AtomicUsize::new(0))),
            Box::new(Arc::clone(api)),
            Box::new(Arc::clone(sink)),
        )
    }

    fn plan(iterations: u64, format: LineFormat) -> LoadPlan {
        LoadPlan { iterations, format }
    }

    #[test]
    fn render_formats() {
        assert_eq!(LineFormat::BodyAndName.render("ok", "AbCdE"), "ok - AbCdE");
        assert_eq!(LineFormat::BodyOnly.render("ok", "AbCdE"), "ok");
    }

    #[tokio::test]
    async fn runs_exactly_the_requested_iterations() {
        let api = Arc::new(FakeApi::default());
        let sink = Arc::new(VecSink::default());
        let ctx = context(&api, &sink);

        let summary = run_load(&ctx, &plan(5, LineFormat::BodyAndName)).await.unwrap();

        assert_eq!(summary.completed, 5);
        assert_eq!(api.calls.load(Ordering::SeqCst), 5);
        let lines = sink.0.lock().unwrap().clone();
        assert_eq!(
            lines,
            vec![
                "created - name0",
                "created - name1",
                "created - name2",
                "created - name3",
                "created - name4"
            ]
        );
    }

    #[tokio::test]
    async fn body_only_format_omits_username() {
        let api = Arc::new(FakeApi::default());
        let sink = Arc::new(VecSink::default());
        let ctx = context(&api, &sink);

        run_load(&ctx, &plan(2, LineFormat::BodyOnly)).await.unwrap();

        assert_eq!(*sink.0.lock().unwrap(), vec!["created", "created"]);
    }

    #[tokio::test]
    async fn zero_iterations_sends_nothing() {
        let api = Arc::new(FakeApi::default());
        let sink = Arc::new(VecSink::default());
        let ctx = context(&api, &sink);

        let summary = run_load(&ctx, &plan(0, LineFormat::BodyAndName)).await.unwrap();

        assert_eq!(summary.completed, 0);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn never_more_than_one_request_in_flight() {
        let api = Arc::new(FakeApi::default());
        let sink = Arc::new(VecSink::default());
        let ctx = context(&api, &sink);

        run_load(&ctx, &plan(4, LineFormat::BodyAndName)).await.unwrap();

        assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(*api.seen.lock().unwrap(), vec!["name0", "name1", "name2", "name3"]);
    }

    #[tokio::test]
    async fn failure_stops_the_run_without_a_line() {
        let api = Arc::new(FakeApi { fail_at: Some(2), ..FakeApi::default() });
        let sink = Arc::new(VecSink::default());
        let ctx = context(&api, &sink);

        let err = run_load(&ctx, &plan(10, LineFormat::BodyAndName)).await.unwrap_err();

        match err {
            RunError::Cycle { iteration, username, .. } => {
                assert_eq!(iteration, 2);
                assert_eq!(username, "name2");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }
}
