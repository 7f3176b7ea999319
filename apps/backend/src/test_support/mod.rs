//! Helpers shared by unit and integration tests.

pub mod app_builder;

pub use app_builder::create_test_app_builder;

use std::time::SystemTime;

use crate::auth::token::mint_token;
use crate::state::security_config::SecurityConfig;

/// Secret used by test harnesses that do not care about the value.
pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Mint a credential for `user_id` under [`TEST_SECRET`], valid from now.
pub fn test_token(user_id: &str) -> String {
    mint_token(user_id, SystemTime::now(), &test_security())
        .unwrap_or_else(|e| panic!("minting a test token failed: {e}"))
}
