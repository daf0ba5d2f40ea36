//! Scope-bound accessors for a guarded cell

use lock_api::{MutexGuard, RawMutex};
use parking_lot::RawMutex as ParkingLotRawMutex;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Write accessor for a [`Guarded`](crate::Guarded) cell (auto-releases on drop)
///
/// The accessor holds the cell's lock from construction until it goes out of
/// scope, even in the case of panics, so the lock is released exactly once
/// on every exit path. All payload access through the accessor happens
/// inside the critical section.
#[must_use = "if unused the lock is released immediately"]
pub struct WriteGuard<'a, T, R: RawMutex = ParkingLotRawMutex> {
    /// Held base guard; releases the raw lock when dropped
    inner: MutexGuard<'a, R, T>,
}

impl<'a, T, R: RawMutex> WriteGuard<'a, T, R> {
    /// Wrap a freshly acquired base guard
    pub(crate) fn new(inner: MutexGuard<'a, R, T>) -> Self {
        Self { inner }
    }
}

impl<T, R: RawMutex> Deref for WriteGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.inner
    }
}

impl<T, R: RawMutex> DerefMut for WriteGuard<'_, T, R> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.inner
    }
}

impl<T: fmt::Debug, R: RawMutex> fmt::Debug for WriteGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: fmt::Display, R: RawMutex> fmt::Display for WriteGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

/// Read accessor for a [`Guarded`](crate::Guarded) cell (auto-releases on drop)
///
/// Mechanically identical to [`WriteGuard`] — the underlying lock is
/// exclusive, not reader/writer, so read accessors still serialize against
/// every other accessor — but only an immutable view of the payload is
/// exposed.
#[must_use = "if unused the lock is released immediately"]
pub struct ReadGuard<'a, T, R: RawMutex = ParkingLotRawMutex> {
    /// Held base guard; releases the raw lock when dropped
    inner: MutexGuard<'a, R, T>,
}

impl<'a, T, R: RawMutex> ReadGuard<'a, T, R> {
    /// Wrap a freshly acquired base guard
    pub(crate) fn new(inner: MutexGuard<'a, R, T>) -> Self {
        Self { inner }
    }
}

impl<T, R: RawMutex> Deref for ReadGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.inner
    }
}

impl<T: fmt::Debug, R: RawMutex> fmt::Debug for ReadGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: fmt::Display, R: RawMutex> fmt::Display for ReadGuard<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
