//! Backend test support utilities
//!
//! Shared by the backend's integration tests: unified logging initialization,
//! assertions on the `{ message, success }` error contract, and unique test
//! data helpers.

pub mod logging;
pub mod rejection;
pub mod unique_helpers;
