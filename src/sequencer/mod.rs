// Sequencer state shared with the audio thread

pub mod state;

pub use state::{AudioThreadState, EngineParams, MAX_STEPS, StepPattern, TransportState};
