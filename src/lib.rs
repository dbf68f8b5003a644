// Stepline - Library exports for the binary, tests and benchmarks

pub mod app;
pub mod audio;
pub mod command;
pub mod config;
pub mod messaging;
pub mod sequencer;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use app::{SequencerApp, build_command_tree};
pub use audio::{AudioEngine, EngineError, SequencerBridge, SequencerProcessor, create_bridge};
pub use command::{
    ArgKind, ArgValue, ArgumentSpec, Command, CommandGroup, CommandHistory, CommandNode,
    CommandTree, ResolveError, TreeError, complete_id, generate_guide_text,
};
pub use config::{AppConfig, ConfigError};
pub use messaging::{Message, MessageLevel, TransportCommand};
pub use sequencer::{AudioThreadState, EngineParams, StepPattern, TransportState};
pub use session::{CommandSession, Executor};
