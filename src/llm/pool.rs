use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered set of API keys with a rotation cursor.
///
/// Shared process-wide behind an `Arc`; the cursor survives across calls so a
/// request starts from whichever key the previous one left selected.
pub struct CredentialPool {
    state: Mutex<PoolState>,
}

struct PoolState {
    keys: Vec<String>,
    cursor: usize,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            state: Mutex::new(PoolState { keys, cursor: 0 }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // The state is two plain fields; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().keys.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// The selected key and its slot, or `None` for an empty pool.
    pub fn current(&self) -> Option<(usize, String)> {
        let state = self.lock();
        state
            .keys
            .get(state.cursor)
            .map(|key| (state.cursor, key.clone()))
    }

    /// Put a newly supplied key at the front and make it the next one used.
    pub fn push_front(&self, key: String) {
        let mut state = self.lock();
        state.keys.insert(0, key);
        state.cursor = 0;
    }

    /// Move past `key` after it was rate limited.
    ///
    /// The cursor only advances if it still selects `key`. If another call
    /// already rotated away from it, or a new key was pushed to the front in
    /// the meantime, the cursor is left where it is. Returns the slot now
    /// selected.
    pub fn rotate_from(&self, key: &str) -> usize {
        let mut state = self.lock();
        if state.keys.is_empty() {
            return 0;
        }
        if state.keys[state.cursor] == key {
            state.cursor = (state.cursor + 1) % state.keys.len();
        }
        state.cursor
    }
}

impl std::fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("CredentialPool")
            .field("keys", &state.keys.len())
            .field("cursor", &state.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> CredentialPool {
        CredentialPool::new((0..n).map(|i| format!("key-{}", i)).collect())
    }

    #[test]
    fn test_rotation_wraps() {
        let pool = pool(3);
        assert_eq!(pool.rotate_from("key-0"), 1);
        assert_eq!(pool.rotate_from("key-1"), 2);
        assert_eq!(pool.rotate_from("key-2"), 0);
        assert_eq!(pool.current().unwrap(), (0, "key-0".to_string()));
    }

    #[test]
    fn test_stale_rotation_is_ignored() {
        let pool = pool(3);
        pool.rotate_from("key-0");
        // A second caller that also failed on key-0 must not skip key-1.
        assert_eq!(pool.rotate_from("key-0"), 1);
        assert_eq!(pool.cursor(), 1);
    }

    #[test]
    fn test_rotation_after_push_front_keeps_new_key() {
        let pool = pool(2);
        pool.push_front("fresh".to_string());

        // key-0 now sits in slot 1; its rate limit must not move off "fresh".
        assert_eq!(pool.rotate_from("key-0"), 0);
        assert_eq!(pool.current().unwrap(), (0, "fresh".to_string()));
    }

    #[test]
    fn test_push_front_resets_cursor() {
        let pool = pool(2);
        pool.rotate_from("key-0");
        assert_eq!(pool.cursor(), 1);

        pool.push_front("fresh".to_string());
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.current().unwrap(), (0, "fresh".to_string()));
    }

    #[test]
    fn test_empty_pool() {
        let pool = CredentialPool::new(Vec::new());
        assert!(pool.is_empty());
        assert!(pool.current().is_none());
        assert_eq!(pool.rotate_from("key-0"), 0);
    }

    #[test]
    fn test_debug_hides_keys() {
        let pool = CredentialPool::new(vec!["gsk_secret".to_string()]);
        let rendered = format!("{:?}", pool);
        assert!(!rendered.contains("gsk_secret"));
    }
}
