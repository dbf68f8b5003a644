// Sequencer application - Command vocabulary and executor

pub mod commands;
pub mod executor;

pub use commands::build_command_tree;
pub use executor::SequencerApp;
