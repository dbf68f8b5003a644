// LockFreeOptional - Consume-on-read value slot between two threads
//
// One value slot plus an atomic "has value" flag. `set` stores the value and
// raises the flag with release ordering; `get` swaps the flag down with acquire
// ordering and copies the value out only if it was raised. A value is delivered
// at most once; one that is never read is overwritten by the next `set`.
//
// Like the double buffer, the slot is split into a non-cloneable setter and getter
// so the single-producer/single-consumer contract holds by construction.

use std::cell::{Cell, UnsafeCell};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct Shared<T> {
    value: UnsafeCell<Option<T>>,
    has_value: AtomicBool,
}

// SAFETY: the value is written only by the setter and read only by the getter
// after an acquire swap observed the setter's release store.
unsafe impl<T: Copy + Send> Sync for Shared<T> {}

/// Create an empty optional slot
pub fn lock_free_optional<T: Copy + Send>() -> (OptionalSetter<T>, OptionalGetter<T>) {
    let shared = Arc::new(Shared {
        value: UnsafeCell::new(None),
        has_value: AtomicBool::new(false),
    });

    (
        OptionalSetter {
            shared: Arc::clone(&shared),
            _not_sync: PhantomData,
        },
        OptionalGetter {
            shared,
            _not_sync: PhantomData,
        },
    )
}

/// Producer side of a [`lock_free_optional`] slot
pub struct OptionalSetter<T> {
    shared: Arc<Shared<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T: Copy + Send> OptionalSetter<T> {
    /// Store a value, replacing any value not yet consumed
    pub fn set(&mut self, value: T) {
        // SAFETY: single producer; the getter only copies after seeing the flag.
        unsafe {
            *self.shared.value.get() = Some(value);
        }
        self.shared.has_value.store(true, Ordering::Release);
    }
}

/// Consumer side of a [`lock_free_optional`] slot
pub struct OptionalGetter<T> {
    shared: Arc<Shared<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T: Copy + Send> OptionalGetter<T> {
    /// Take the pending value, if any. `None` means nothing changed since the
    /// last successful `get`.
    pub fn get(&mut self) -> Option<T> {
        if self.shared.has_value.swap(false, Ordering::Acquire) {
            // SAFETY: the acquire swap pairs with the release store in `set`.
            unsafe { *self.shared.value.get() }
        } else {
            None
        }
    }
}
