// Sequencer state - Plain copyable values exchanged with the audio thread
//
// Everything here is `Copy` with no heap data so it can travel through the
// lock-free bridge as a bitwise copy.

/// Maximum number of steps in a pattern
pub const MAX_STEPS: usize = 16;

/// Transport state (play/pause/stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }
}

/// Parameters published by the command thread, read by the audio thread each block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    /// Tempo in beats per minute
    pub bpm: f32,
    /// Output gain (0.0 to 1.0)
    pub volume: f32,
    /// Frequency of the step click in Hz
    pub base_frequency: f32,
    /// Steps per beat (4 = sixteenth notes)
    pub steps_per_beat: u32,
    /// Active pattern length, 1..=MAX_STEPS
    pub step_count: u32,
    pub muted: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            volume: 0.8,
            base_frequency: 440.0,
            steps_per_beat: 4,
            step_count: MAX_STEPS as u32,
            muted: false,
        }
    }
}

impl EngineParams {
    /// Length of one step in samples
    pub fn samples_per_step(&self, sample_rate: u32) -> f64 {
        let steps_per_minute = self.bpm as f64 * self.steps_per_beat.max(1) as f64;
        sample_rate as f64 * 60.0 / steps_per_minute.max(f64::EPSILON)
    }
}

/// On/off mask for each step of the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPattern {
    pub steps: [bool; MAX_STEPS],
}

impl Default for StepPattern {
    /// Four on the floor
    fn default() -> Self {
        let mut steps = [false; MAX_STEPS];
        for step in steps.iter_mut().step_by(4) {
            *step = true;
        }
        Self { steps }
    }
}

impl StepPattern {
    pub fn empty() -> Self {
        Self {
            steps: [false; MAX_STEPS],
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.steps.get(index).copied().unwrap_or(false)
    }

    /// Set a step; out-of-range indices are ignored and reported as false
    pub fn set(&mut self, index: usize, active: bool) -> bool {
        match self.steps.get_mut(index) {
            Some(step) => {
                *step = active;
                true
            }
            None => false,
        }
    }

    /// Text view of the first `len` steps, e.g. `x...x...`
    pub fn render(&self, len: usize) -> String {
        self.steps
            .iter()
            .take(len)
            .map(|active| if *active { 'x' } else { '.' })
            .collect()
    }
}

/// State published by the audio thread for display (metering)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioThreadState {
    pub sample_rate: u32,
    /// Samples processed while playing since the last stop
    pub accumulated_samples: u64,
    pub current_step: u32,
    pub transport: TransportState,
    /// Peak absolute sample value of the last block
    pub peak: f32,
}
