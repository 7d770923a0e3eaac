//! Shallow-equality memoization for rendered views.

#[derive(Debug)]
pub struct Memo<K, V> {
    cached: Option<(K, V)>,
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Return the cached value for `key`, computing it only when the key differs from the last one.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.cached.as_ref().is_some_and(|(k, _)| *k != key) {
            self.cached = None;
        }
        &self.cached.get_or_insert_with(|| (key, compute())).1
    }
}
