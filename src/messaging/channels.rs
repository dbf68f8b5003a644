// Communication channels lock-free
//
// Continuous state travels through DoubleBuffer (latest value wins) and one-shot
// signals through LockFreeOptional. Discrete transport events that must all arrive
// in order use a bounded ring buffer.

use crate::messaging::command::TransportCommand;
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::HeapRb;

pub type TransportProducer = ringbuf::HeapProd<TransportCommand>;
pub type TransportConsumer = ringbuf::HeapCons<TransportCommand>;

pub fn create_transport_channel(capacity: usize) -> (TransportProducer, TransportConsumer) {
    let rb = HeapRb::<TransportCommand>::new(capacity);
    rb.split()
}

/// Push without blocking. Returns the command back when the queue is full.
pub fn send_transport(
    producer: &mut TransportProducer,
    command: TransportCommand,
) -> Result<(), TransportCommand> {
    producer.try_push(command)
}

/// Pop the next queued command, if any
pub fn next_transport(consumer: &mut TransportConsumer) -> Option<TransportCommand> {
    consumer.try_pop()
}
