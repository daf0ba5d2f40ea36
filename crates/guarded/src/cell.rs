//! Mutex-guarded value cell

use crate::guard::{ReadGuard, WriteGuard};
use crate::order;
use lock_api::{Mutex, RawMutex};
use parking_lot::RawMutex as ParkingLotRawMutex;
use std::fmt;
use std::mem;
use std::ptr;

/// Value cell whose payload is reachable only through its lock
///
/// `Guarded<T, R>` owns a payload of type `T` together with the exclusive
/// lock that serializes access to it. The payload is never read or written
/// except while the lock is held by the accessing thread, and the lock is
/// never handed out directly — it is only acquired on the caller's behalf by
/// the accessor and snapshot operations.
///
/// Operations that touch two cells at once (copy, move, compare, swap)
/// acquire both locks as a single all-or-nothing step in a fixed global
/// order, so a concurrent reverse-order operation on the same pair of cells
/// cannot deadlock.
///
/// The second type parameter selects the raw lock. Any
/// [`lock_api::RawMutex`] implementation can replace the default
/// `parking_lot` raw mutex; `Send`/`Sync` are inherited from the underlying
/// [`lock_api::Mutex`].
pub struct Guarded<T, R = ParkingLotRawMutex> {
    /// Payload cell; the raw lock and the interior-mutable storage live here
    inner: Mutex<R, T>,
}

impl<T> Guarded<T> {
    /// Create a cell guarded by the default raw mutex
    ///
    /// Construction takes no lock: the cell is not observable by any other
    /// thread before this returns.
    pub const fn new(value: T) -> Guarded<T> {
        Guarded {
            inner: Mutex::new(value),
        }
    }
}

impl<T, R: RawMutex> Guarded<T, R> {
    /// Create a cell guarded by a caller-chosen raw mutex type
    pub const fn with_lock(value: T) -> Guarded<T, R> {
        Guarded {
            inner: Mutex::new(value),
        }
    }

    /// Lock the cell and return a write accessor
    ///
    /// Blocks until the lock is free. Used as a temporary
    /// (`cell.write().push_str("11")`) the lock spans that one expression;
    /// bound to a variable it spans the variable's scope, turning a sequence
    /// of operations into one atomic unit of work.
    pub fn write(&self) -> WriteGuard<'_, T, R> {
        WriteGuard::new(self.inner.lock())
    }

    /// Lock the cell and return a read accessor
    ///
    /// The lock is exclusive, so this serializes against every other
    /// accessor; only the exposed view differs from [`write`](Self::write).
    pub fn read(&self) -> ReadGuard<'_, T, R> {
        ReadGuard::new(self.inner.lock())
    }

    /// Non-blocking [`write`](Self::write); `None` if the lock is held
    pub fn try_write(&self) -> Option<WriteGuard<'_, T, R>> {
        self.inner.try_lock().map(WriteGuard::new)
    }

    /// Non-blocking [`read`](Self::read); `None` if the lock is held
    pub fn try_read(&self) -> Option<ReadGuard<'_, T, R>> {
        self.inner.try_lock().map(ReadGuard::new)
    }

    /// Whether some accessor currently holds the lock
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Replace the payload, returning the previous one
    pub fn replace(&self, value: T) -> T {
        mem::replace(&mut *self.inner.lock(), value)
    }

    /// Overwrite the payload
    ///
    /// The previous payload is dropped after the lock has been released, so
    /// no foreign `Drop` code runs inside the critical section.
    pub fn store(&self, value: T) {
        let _previous = self.replace(value);
    }

    /// Exchange the payload with a value outside any cell
    ///
    /// Takes only this cell's lock; the slot may sit on either side of the
    /// exchange.
    pub fn swap_value(&self, slot: &mut T) {
        mem::swap(&mut *self.inner.lock(), slot);
    }

    /// Exchange payloads with another cell
    ///
    /// Both locks are taken as one atomic acquisition. Swapping a cell with
    /// itself is a no-op.
    pub fn swap(&self, other: &Self) {
        if ptr::eq(self, other) {
            return;
        }
        let (mut ours, mut theirs) = order::lock_pair(&self.inner, &other.inner);
        mem::swap(&mut *ours, &mut *theirs);
    }

    /// Consume the cell and return the payload
    ///
    /// Takes no lock: exclusive ownership proves no accessor is alive.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }

    /// Reach the payload through an exclusive borrow, without locking
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }
}

impl<T: Clone, R: RawMutex> Guarded<T, R> {
    /// Copy the payload out as a snapshot
    ///
    /// The copy reflects the payload at one single point during the call; it
    /// may be stale the instant the lock is released again.
    pub fn load(&self) -> T {
        self.inner.lock().clone()
    }

    /// Copy-assign from another cell under both locks
    ///
    /// The source payload is observed and copied as one consistent snapshot.
    /// Self-assignment is a no-op.
    pub fn copy_from(&self, source: &Self) {
        if ptr::eq(self, source) {
            return;
        }
        let (mut ours, theirs) = order::lock_pair(&self.inner, &source.inner);
        (*ours).clone_from(&theirs);
    }
}

impl<T: Default, R: RawMutex> Guarded<T, R> {
    /// Move the payload out, leaving `T::default()` behind
    pub fn take(&self) -> T {
        mem::take(&mut *self.inner.lock())
    }

    /// Move-assign from another cell under both locks
    ///
    /// The source is left holding `T::default()`; the payload it held before
    /// the call becomes this cell's. Self-assignment is a no-op.
    pub fn take_from(&self, source: &Self) {
        if ptr::eq(self, source) {
            return;
        }
        let (mut ours, mut theirs) = order::lock_pair(&self.inner, &source.inner);
        *ours = mem::take(&mut *theirs);
    }
}

impl<T: Default, R: RawMutex> Default for Guarded<T, R> {
    fn default() -> Self {
        Self::with_lock(T::default())
    }
}

impl<T, R: RawMutex> From<T> for Guarded<T, R> {
    fn from(value: T) -> Self {
        Self::with_lock(value)
    }
}

impl<T: Clone, R: RawMutex> Clone for Guarded<T, R> {
    /// Locks only the source: the new cell is unreachable by any other
    /// thread until `clone` returns, so its lock admits no contention.
    fn clone(&self) -> Self {
        Self::with_lock(self.load())
    }
}

impl<T: PartialEq, R: RawMutex> PartialEq for Guarded<T, R> {
    /// Compare payloads under both locks as one consistent snapshot
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            // Same cell on both sides: the one lock is taken once; the
            // payload still decides, so a non-reflexive payload (NaN) stays
            // unequal to itself.
            let ours = self.inner.lock();
            #[allow(clippy::eq_op)]
            return *ours == *ours;
        }
        let (ours, theirs) = order::lock_pair(&self.inner, &other.inner);
        *ours == *theirs
    }
}

impl<T: Eq, R: RawMutex> Eq for Guarded<T, R> {}

impl<T: PartialEq, R: RawMutex> PartialEq<T> for Guarded<T, R> {
    /// Compare against a raw value under this cell's lock only
    fn eq(&self, other: &T) -> bool {
        *self.inner.lock() == *other
    }
}

impl<T: fmt::Debug, R: RawMutex> fmt::Debug for Guarded<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_tuple("Guarded").field(&&*guard).finish(),
            None => f
                .debug_tuple("Guarded")
                .field(&format_args!("<locked>"))
                .finish(),
        }
    }
}
