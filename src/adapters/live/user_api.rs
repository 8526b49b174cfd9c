//! Live adapter for the `UserApi` port using `reqwest`.

use reqwest::{Client, Url};

use crate::ports::{ApiError, ApiFuture, CreateUserRequest, UserApi, UserResponse};

/// Live user API that posts JSON to a fixed endpoint.
pub struct LiveUserApi {
    client: Client,
    endpoint: Url,
}

impl LiveUserApi {
    /// Creates a client for `endpoint` with reqwest's default connection handling.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self { client: Client::new(), endpoint }
    }

    /// The URL every request is posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl UserApi for LiveUserApi {
    fn create_user(&self, request: &CreateUserRequest) -> ApiFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            // `.json` sets `Content-Type: application/json`.
            let response = self
                .client
                .post(self.endpoint.clone())
                .json(&request)
                .send()
                .await
                .map_err(|e| -> ApiError {
                    format!("POST {} failed: {e}", self.endpoint).into()
                })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| -> ApiError {
                format!("failed to read response body from {}: {e}", self.endpoint).into()
            })?;

            Ok(UserResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_username_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"username": "AbCdE"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("User created"))
            .expect(1)
            .mount(&server)
            .await;

        let api = LiveUserApi::new(format!("{}/user", server.uri()).parse().unwrap());
        let response =
            api.create_user(&CreateUserRequest { username: "AbCdE".into() }).await.unwrap();

        assert_eq!(response, UserResponse { status: 201, body: "User created".into() });
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_string("User already exists"))
            .mount(&server)
            .await;

        let api = LiveUserApi::new(format!("{}/user", server.uri()).parse().unwrap());
        let response =
            api.create_user(&CreateUserRequest { username: "xxxxx".into() }).await.unwrap();

        assert_eq!(response.status, 409);
        assert_eq!(response.body, "User already exists");
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let api = LiveUserApi::new(format!("http://127.0.0.1:{port}/user").parse().unwrap());
        let err =
            api.create_user(&CreateUserRequest { username: "AbCdE".into() }).await.unwrap_err();

        assert!(err.to_string().contains("POST"));
    }
}
