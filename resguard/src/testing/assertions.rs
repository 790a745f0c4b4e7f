//! Assertions over recorded releases.

use super::recorder::ReleaseRecorder;
use std::fmt::Debug;

/// Asserts that `value` was released exactly once.
pub fn assert_released_once<T>(recorder: &ReleaseRecorder<T>, value: &T)
where
    T: Clone + Debug + PartialEq + Send + 'static,
{
    let count = recorder.count_of(value);
    assert_eq!(
        count,
        1,
        "Expected {:?} to be released once, released {} times. Log: {:?}",
        value,
        count,
        recorder.released()
    );
}

/// Asserts that nothing has been released.
pub fn assert_nothing_released<T>(recorder: &ReleaseRecorder<T>)
where
    T: Clone + Debug + Send + 'static,
{
    assert!(
        recorder.count() == 0,
        "Expected no releases, got {:?}",
        recorder.released()
    );
}

/// Asserts that no value was released more than once.
pub fn assert_no_double_release<T>(recorder: &ReleaseRecorder<T>)
where
    T: Clone + Debug + PartialEq + Send + 'static,
{
    let released = recorder.released();
    for value in &released {
        let count = released.iter().filter(|v| *v == value).count();
        assert!(
            count == 1,
            "Expected {:?} to be released at most once, released {} times",
            value,
            count
        );
    }
}
