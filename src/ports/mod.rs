//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the load loop and the outside
//! world (username source, user endpoint, line output).
//! Implementations live in `src/adapters/`.

pub mod names;
pub mod output;
pub mod user_api;

pub use names::NameGenerator;
pub use output::LineSink;
pub use user_api::{ApiError, ApiFuture, CreateUserRequest, UserApi, UserResponse};
