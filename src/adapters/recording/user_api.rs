//! Recording adapter for the `UserApi` port.

use std::sync::{Arc, Mutex};

use super::{record_result, CREATE_USER, USER_API_PORT};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ApiFuture, CreateUserRequest, UserApi};

/// Records endpoint responses while delegating to an inner implementation.
pub struct RecordingUserApi {
    inner: Box<dyn UserApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingUserApi {
    /// Creates a new recording user API wrapping the given implementation.
    #[must_use]
    pub fn new(inner: Box<dyn UserApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl UserApi for RecordingUserApi {
    fn create_user(&self, request: &CreateUserRequest) -> ApiFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.create_user(&request).await;
            record_result(&self.recorder, USER_API_PORT, CREATE_USER, &request, &result);
            result
        })
    }
}
