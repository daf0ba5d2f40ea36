//! Deadlock-free acquisition of two cell locks

use lock_api::{Mutex, MutexGuard, RawMutex};
use std::ptr;

/// Acquire both locks as one all-or-nothing step, returning the guards in
/// caller order.
///
/// Acquisition always happens in ascending machine-address order, so every
/// concurrent set of two-cell operations walks one global total order and no
/// lock cycle can form. Every two-cell operation must route through here,
/// and callers must short-circuit the identical-cell case first: taking one
/// exclusive lock twice would self-deadlock.
pub(crate) fn lock_pair<'a, T, R: RawMutex>(
    a: &'a Mutex<R, T>,
    b: &'a Mutex<R, T>,
) -> (MutexGuard<'a, R, T>, MutexGuard<'a, R, T>) {
    debug_assert!(
        !ptr::eq(a, b),
        "lock_pair called with the same mutex on both sides"
    );

    let a_addr = a as *const Mutex<R, T> as usize;
    let b_addr = b as *const Mutex<R, T> as usize;

    if a_addr <= b_addr {
        let first = a.lock();
        let second = b.lock();
        (first, second)
    } else {
        let second = b.lock();
        let first = a.lock();
        (first, second)
    }
}
