// Module audio - Real-time consumer of the cross-thread bridge

pub mod engine;
pub mod processor;

pub use engine::{AudioEngine, EngineError};
pub use processor::{SequencerBridge, SequencerProcessor, create_bridge};
