//! Cassette format for recording a run and replaying its usernames.

pub mod format;
pub mod recorder;
pub mod replayer;
