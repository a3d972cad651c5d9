use crate::subscriber::{Handle, Key};

/// Ordered list of subscriber handles.
///
/// Insertion order is registration order. Entries may be expired until the next
/// [`reclaim`](Registry::reclaim) pass; the bus runs one at the start of every operation.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    handles: Vec<Handle>,
}

impl Registry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: Vec::with_capacity(capacity),
        }
    }

    /// Remove every expired handle. Returns the number removed.
    pub(crate) fn reclaim(&mut self) -> usize {
        let before = self.handles.len();
        self.handles.retain(|handle| !handle.is_expired());
        before - self.handles.len()
    }

    /// Returns `true` if a live handle carries `key`.
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.handles.iter().any(|handle| handle.is_live_for(key))
    }

    /// Append a handle at the end of the registry.
    #[inline]
    pub(crate) fn push(&mut self, handle: Handle) {
        self.handles.push(handle);
    }

    /// Remove every handle that is expired or carries `key`.
    ///
    /// Returns `true` if a handle carrying `key` was among them.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let mut matched = false;
        self.handles.retain(|handle| {
            if handle.key() == key {
                matched = true;
                return false;
            }
            !handle.is_expired()
        });
        matched
    }

    /// Copy of the current handles, in registration order.
    #[inline]
    pub(crate) fn snapshot(&self) -> Vec<Handle> {
        self.handles.clone()
    }

    /// Keys of live handles, in registration order.
    pub(crate) fn keys(&self) -> Vec<Key> {
        self.handles
            .iter()
            .filter(|handle| !handle.is_expired())
            .map(|handle| handle.key().clone())
            .collect()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.handles.clear();
    }
}
