// Transport commands - Discrete UI → Audio events that must not be dropped

/// Commands queued from the command thread to the audio thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    /// Stop playback and rewind to the first step
    Stop,
    /// Jump to a step index
    Seek(u32),
}
