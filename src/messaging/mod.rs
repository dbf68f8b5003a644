// Cross-thread messaging between the command thread and the audio thread
//
// Nothing in here locks, blocks or allocates on the audio side. Every channel has
// exactly one producer and one consumer; the handles are split and non-cloneable
// so that contract is enforced by the types. Direction is fixed per instance.

pub mod channels;
pub mod command;
pub mod double_buffer;
pub mod lock_free_optional;
pub mod notification;

pub use channels::{TransportConsumer, TransportProducer, create_transport_channel};
pub use command::TransportCommand;
pub use double_buffer::{DoubleBufferReader, DoubleBufferWriter, double_buffer};
pub use lock_free_optional::{OptionalGetter, OptionalSetter, lock_free_optional};
pub use notification::{Message, MessageLevel};
