//! Unique ids for test documents, so parallel tests never share a key.

use ulid::Ulid;

/// A unique id in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_id;
///
/// let a = unique_id("player");
/// assert_ne!(a, unique_id("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `count` unique player ids sharing one run tag, in creation order.
pub fn unique_player_ids(count: usize) -> Vec<String> {
    let run = Ulid::new();
    (0..count).map(|i| format!("player{i}-{run}")).collect()
}
