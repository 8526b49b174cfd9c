//! Live adapters for real external interactions.

pub mod names;
pub mod output;
pub mod user_api;

pub use names::LiveNameGenerator;
pub use output::StdoutSink;
pub use user_api::LiveUserApi;
