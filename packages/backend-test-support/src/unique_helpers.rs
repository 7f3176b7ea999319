//! Unique test data, so parallel tests never share identities.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// let b = unique_str("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique user id shaped like the portal's ids.
pub fn unique_user_id() -> String {
    unique_str("u")
}
