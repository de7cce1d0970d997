use super::handle::Handle;

/// Append-only arena addressed by [`Handle`].
///
/// Slot 0 always holds the fallback item passed to [`AssetCache::with_fallback`].
pub struct AssetCache<T> {
    items: Vec<T>,
}

impl<T> AssetCache<T> {
    pub fn with_fallback(fallback: T) -> Self {
        Self {
            items: vec![fallback],
        }
    }

    pub fn insert(&mut self, item: T) -> Handle<T> {
        let idx = self.items.len() as u32;
        self.items.push(item);
        Handle::new(idx)
    }

    /// Get a reference to an asset by handle.
    /// Returns None if the handle is out of range.
    pub fn get(&self, h: Handle<T>) -> Option<&T> {
        self.items.get(h.idx())
    }

    /// Get a mutable reference to an asset by handle.
    /// Returns None if the handle is out of range.
    pub fn get_mut(&mut self, h: Handle<T>) -> Option<&mut T> {
        self.items.get_mut(h.idx())
    }

    pub fn fallback(&self) -> &T {
        &self.items[0]
    }

    /// Number of inserted items, not counting the fallback slot.
    pub fn len(&self) -> usize {
        self.items.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.len() <= 1
    }
}

impl<T: Default> Default for AssetCache<T> {
    fn default() -> Self {
        Self::with_fallback(T::default())
    }
}
