// DoubleBuffer - Lock-free "latest value wins" channel between two threads
//
// Two slots and an atomic index naming the readable one. The writer fills the
// other slot and publishes it with a release store; the reader acquire-loads the
// index and copies that slot out. This is not a queue: values written between two
// reads are never seen.
//
// The channel is split into a non-cloneable writer and reader so that exactly one
// thread writes and exactly one thread reads. Values must be `Copy`, so a read is
// a plain memory copy with no shared substructure.
//
// Known limit: if the writer completes two writes while a single read is still
// copying out of a slot, the second write targets that same slot and the read can
// observe a mix of both values. Writers are expected to publish no faster than the
// reader consumes (once per UI frame against once per audio block).

use std::cell::{Cell, UnsafeCell};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Shared<T> {
    slots: [UnsafeCell<T>; 2],
    /// Index of the slot the reader copies from
    read_index: AtomicUsize,
}

// SAFETY: slots are only written by the single writer handle and only read by the
// single reader handle; handoff happens through the release/acquire pair on
// `read_index`. `T: Copy + Send` means reading is a bitwise copy.
unsafe impl<T: Copy + Send> Sync for Shared<T> {}

/// Create a double buffer initialised with `initial` in both slots
pub fn double_buffer<T: Copy + Send>(initial: T) -> (DoubleBufferWriter<T>, DoubleBufferReader<T>) {
    let shared = Arc::new(Shared {
        slots: [UnsafeCell::new(initial), UnsafeCell::new(initial)],
        read_index: AtomicUsize::new(0),
    });

    (
        DoubleBufferWriter {
            shared: Arc::clone(&shared),
            _not_sync: PhantomData,
        },
        DoubleBufferReader {
            shared,
            _not_sync: PhantomData,
        },
    )
}

/// Producer side. Not `Clone`, not `Sync`: one writing thread.
pub struct DoubleBufferWriter<T> {
    shared: Arc<Shared<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T: Copy + Send> DoubleBufferWriter<T> {
    /// Publish a new value
    pub fn write(&mut self, value: T) {
        let target = 1 - self.shared.read_index.load(Ordering::Acquire);

        // SAFETY: the reader only copies from `read_index`, and only this handle
        // changes it, so `target` is not the slot handed to the reader.
        unsafe {
            *self.shared.slots[target].get() = value;
        }

        self.shared.read_index.store(target, Ordering::Release);
    }
}

/// Consumer side. Not `Clone`, not `Sync`: one reading thread.
pub struct DoubleBufferReader<T> {
    shared: Arc<Shared<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T: Copy + Send> DoubleBufferReader<T> {
    /// Copy out the most recently published value. Never blocks or allocates.
    pub fn read(&self) -> T {
        let index = self.shared.read_index.load(Ordering::Acquire);

        // SAFETY: the acquire load pairs with the writer's release store, so the
        // slot at `index` is fully written. See the module note on back-to-back
        // writes.
        unsafe { *self.shared.slots[index].get() }
    }
}
