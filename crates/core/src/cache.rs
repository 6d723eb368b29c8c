/// A lazily computed value with an explicit invalidation flag.
///
/// Reads never mutate hidden state: callers go through [`Cached::get_or_update`],
/// which recomputes only when the cache is empty or was invalidated.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    value: Option<T>,
    dirty: bool,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cached<T> {
    /// An empty cache. The first `get_or_update` always computes.
    pub fn new() -> Self {
        Self {
            value: None,
            dirty: true,
        }
    }

    /// Mark the cached value stale. The old value stays readable through
    /// [`Cached::get`] until the next update replaces it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Drop the cached value entirely.
    pub fn clear(&mut self) {
        self.value = None;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.value.is_none()
    }

    /// The last computed value, stale or not.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Return the cached value, recomputing it with `compute` if stale.
    pub fn get_or_update(&mut self, compute: impl FnOnce() -> T) -> &T {
        if self.dirty {
            self.value = None;
            self.dirty = false;
        }
        self.value.get_or_insert_with(compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_until_invalidated() {
        let mut cache = Cached::new();
        let mut calls = 0;
        let first = *cache.get_or_update(|| {
            calls += 1;
            7
        });
        let second = *cache.get_or_update(|| {
            calls += 1;
            8
        });
        assert_eq!((first, second), (7, 7));
        assert_eq!(calls, 1);

        cache.invalidate();
        assert!(cache.is_dirty());
        let third = *cache.get_or_update(|| {
            calls += 1;
            9
        });
        assert_eq!(third, 9);
        assert_eq!(calls, 2);
        assert!(!cache.is_dirty());
    }

    #[test]
    fn stale_value_readable_after_invalidate() {
        let mut cache = Cached::new();
        cache.get_or_update(|| "first");
        cache.invalidate();
        assert_eq!(cache.get(), Some(&"first"));
    }

    #[test]
    fn clear_drops_value() {
        let mut cache = Cached::new();
        cache.get_or_update(|| 1u32);
        cache.clear();
        assert!(cache.get().is_none());
        assert!(cache.is_dirty());
    }
}
