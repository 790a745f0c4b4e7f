//! Deleters that record what they release.

use parking_lot::Mutex;
use std::sync::Arc;

/// Shared log of released values.
///
/// Every deleter handed out by [`deleter`](Self::deleter) appends to the
/// same log, so a test can tell how many times, and with which values,
/// cleanup actually ran.
#[derive(Debug)]
pub struct ReleaseRecorder<T> {
    released: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for ReleaseRecorder<T> {
    fn default() -> Self {
        Self {
            released: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for ReleaseRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            released: self.released.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> ReleaseRecorder<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a deleter that records each value it is called with.
    pub fn deleter(&self) -> impl FnMut(&mut T) + Send + 'static {
        let released = self.released.clone();
        move |value: &mut T| released.lock().push(value.clone())
    }

    /// Returns every released value, in release order.
    #[must_use]
    pub fn released(&self) -> Vec<T> {
        self.released.lock().clone()
    }

    /// Returns the number of releases so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.released.lock().len()
    }

    /// Returns how many times `value` was released.
    #[must_use]
    pub fn count_of(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.released.lock().iter().filter(|v| *v == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_collects_in_order() {
        let recorder = ReleaseRecorder::new();
        let mut first = recorder.deleter();
        let mut second = recorder.clone().deleter();
        first(&mut 3);
        second(&mut 1);
        first(&mut 3);
        assert_eq!(recorder.released(), vec![3, 1, 3]);
        assert_eq!(recorder.count(), 3);
        assert_eq!(recorder.count_of(&3), 2);
    }
}
