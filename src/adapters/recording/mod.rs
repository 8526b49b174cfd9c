//! Recording adapters that capture interactions to a cassette.

pub mod names;
pub mod user_api;

pub use names::RecordingNameGenerator;
pub use user_api::RecordingUserApi;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Port name used for username interactions.
pub(crate) const NAMES_PORT: &str = "names";
/// Method name used for username interactions.
pub(crate) const GENERATE_NAME: &str = "generate_name";
/// Port name used for endpoint interactions.
pub(crate) const USER_API_PORT: &str = "user_api";
/// Method name used for endpoint interactions.
pub(crate) const CREATE_USER: &str = "create_user";

/// Appends a call whose output is stored as-is, such as a generated name.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Appends an endpoint call together with its outcome.
///
/// A response is stored as `{"Ok": {"status": .., "body": ..}}`; a failed
/// request as `{"Err": "<message>"}`, so a failed run's cassette still shows
/// where it stopped.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");

    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
