use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index into an [`AssetCache`](super::AssetCache).
///
/// Index 0 is reserved for the fallback entry every cache is created with,
/// so a lookup that fails can be replaced by [`Handle::INVALID`] and still
/// resolve to something drawable.
pub struct Handle<T>(u32, PhantomData<fn() -> T>);

// Manual impls so that none of them require bounds on T.
impl<T> Copy for Handle<T> {}
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::INVALID
    }
}

impl<T> Handle<T> {
    pub const INVALID: Self = Handle(0, PhantomData);

    pub const fn new(idx: u32) -> Self {
        Handle(idx, PhantomData)
    }

    pub fn idx(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_invalid(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_copy() {
        let h1: Handle<String> = Handle::new(5);
        let h2 = h1;
        let h3 = h1;
        assert_eq!(h1.idx(), h2.idx());
        assert_eq!(h1.idx(), h3.idx());
    }

    #[test]
    fn handles_order_by_index() {
        let a: Handle<f32> = Handle::new(2);
        let b: Handle<f32> = Handle::new(7);
        assert!(a < b);
        assert_eq!(Handle::<f32>::default(), Handle::INVALID);
        assert!(Handle::<f32>::INVALID.is_invalid());
    }
}
