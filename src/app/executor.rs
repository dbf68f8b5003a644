// SequencerApp - Executes sequencer commands and publishes state to the audio thread
//
// The app keeps the authoritative copy of the parameters and the pattern on the
// command thread. Every change is published through the bridge right away; the
// audio thread picks it up at its next block.

use crate::audio::processor::SequencerBridge;
use crate::command::invocation::Invocation;
use crate::command::reference;
use crate::command::tree::CommandTree;
use crate::messaging::command::TransportCommand;
use crate::messaging::notification::Message;
use crate::sequencer::state::{EngineParams, MAX_STEPS, StepPattern};
use crate::session::Executor;

/// Accepted tempo range in BPM
const BPM_RANGE: std::ops::RangeInclusive<f64> = 20.0..=400.0;

/// Accepted click frequency range in Hz
const FREQUENCY_RANGE: std::ops::RangeInclusive<f64> = 20.0..=20_000.0;

pub struct SequencerApp {
    params: EngineParams,
    pattern: StepPattern,
    bridge: SequencerBridge,
    /// Markdown command reference shown by `help`
    reference: String,
    quit: bool,
}

impl SequencerApp {
    /// Create the app and publish the initial state
    pub fn new(
        tree: &CommandTree,
        params: EngineParams,
        pattern: StepPattern,
        mut bridge: SequencerBridge,
    ) -> Self {
        bridge.publish_params(params);
        bridge.publish_pattern(pattern);

        match reference::to_json(tree) {
            Ok(json) => log::debug!("Command reference: {}", json),
            Err(e) => log::warn!("Failed to serialize command reference: {}", e),
        }

        Self {
            params,
            pattern,
            bridge,
            reference: reference::markdown_table(tree),
            quit: false,
        }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    pub fn bridge(&self) -> &SequencerBridge {
        &self.bridge
    }

    /// One-line summary of the state seen by the audio thread
    pub fn status_line(&self) -> String {
        let meter = self.bridge.meter();
        format!(
            "{:?} | {} bpm | step {}/{} | vol {:.2}{} | peak {:.2} | {}",
            meter.transport,
            self.params.bpm,
            meter.current_step + 1,
            self.params.step_count,
            self.params.volume,
            if self.params.muted { " (muted)" } else { "" },
            meter.peak,
            self.pattern.render(self.params.step_count as usize)
        )
    }

    fn update_params(&mut self, update: impl FnOnce(&mut EngineParams)) {
        update(&mut self.params);
        self.bridge.publish_params(self.params);
    }

    fn update_pattern(&mut self, update: impl FnOnce(&mut StepPattern)) {
        update(&mut self.pattern);
        self.bridge.publish_pattern(self.pattern);
    }

    fn transport(&mut self, command: TransportCommand, done: &str) -> Message {
        if self.bridge.send_transport(command) {
            Message::info(done)
        } else {
            Message::warning("Transport queue is full, command dropped")
        }
    }

    fn step_command(&mut self, invocation: &Invocation<'_>, action: &str) -> Message {
        let Some(index) = invocation.arg("index").and_then(|v| v.as_unsigned()) else {
            return Message::error("Missing step index");
        };
        let index = index as usize;
        if index >= self.params.step_count as usize {
            return Message::error(format!(
                "Step {} out of range (0 to {})",
                index,
                self.params.step_count - 1
            ));
        }

        let active = match action {
            "on" => true,
            "off" => false,
            _ => !self.pattern.is_active(index),
        };
        self.update_pattern(|pattern| {
            pattern.set(index, active);
        });
        Message::info(format!(
            "Step {} {}",
            index,
            if active { "on" } else { "off" }
        ))
    }
}

impl Executor for SequencerApp {
    fn execute(&mut self, invocation: &Invocation<'_>) -> Message {
        let float = |name: &str| invocation.arg(name).and_then(|v| v.as_float());
        let unsigned = |name: &str| invocation.arg(name).and_then(|v| v.as_unsigned());

        match invocation.path.as_slice() {
            ["play"] => self.transport(TransportCommand::Play, "Playing"),
            ["pause"] => self.transport(TransportCommand::Pause, "Paused"),
            ["stop"] => self.transport(TransportCommand::Stop, "Stopped"),
            ["seek"] => match unsigned("step") {
                Some(step) if step < self.params.step_count as u64 => {
                    self.transport(TransportCommand::Seek(step as u32), "Seeked")
                }
                _ => Message::error(format!(
                    "Seek target must be below {}",
                    self.params.step_count
                )),
            },
            ["tempo"] => match float("bpm") {
                Some(bpm) if BPM_RANGE.contains(&bpm) => {
                    self.update_params(|p| p.bpm = bpm as f32);
                    Message::info(format!("Tempo set to {}", bpm))
                }
                _ => Message::error(format!(
                    "Tempo must be between {} and {}",
                    BPM_RANGE.start(),
                    BPM_RANGE.end()
                )),
            },
            ["volume"] => match float("level") {
                Some(level) if (0.0..=1.0).contains(&level) => {
                    self.update_params(|p| p.volume = level as f32);
                    Message::info(format!("Volume set to {}", level))
                }
                _ => Message::error("Volume must be between 0.0 and 1.0"),
            },
            ["mute"] => {
                let muted = invocation.arg("state").and_then(|v| v.as_str()) == Some("on");
                self.update_params(|p| p.muted = muted);
                Message::info(if muted { "Muted" } else { "Unmuted" })
            }
            ["set", "frequency"] => match float("hz") {
                Some(hz) if FREQUENCY_RANGE.contains(&hz) => {
                    self.update_params(|p| p.base_frequency = hz as f32);
                    Message::info(format!("Click frequency set to {} Hz", hz))
                }
                _ => Message::error(format!(
                    "Frequency must be between {} and {} Hz",
                    FREQUENCY_RANGE.start(),
                    FREQUENCY_RANGE.end()
                )),
            },
            ["set", "steps"] => match unsigned("count") {
                Some(count) if (1..=MAX_STEPS as u64).contains(&count) => {
                    self.update_params(|p| p.step_count = count as u32);
                    Message::info(format!("Pattern length set to {}", count))
                }
                _ => Message::error(format!("Step count must be between 1 and {}", MAX_STEPS)),
            },
            ["set", "division"] => match unsigned("steps_per_beat") {
                Some(division) if (1..=16).contains(&division) => {
                    self.update_params(|p| p.steps_per_beat = division as u32);
                    Message::info(format!("{} steps per beat", division))
                }
                _ => Message::error("Division must be between 1 and 16"),
            },
            ["step", "clear"] => {
                self.update_pattern(|pattern| *pattern = StepPattern::empty());
                Message::info("Pattern cleared")
            }
            ["step", action] => self.step_command(invocation, action),
            ["status"] => Message::info(self.status_line()),
            ["help"] => Message::info(self.reference.clone()),
            ["quit"] => {
                self.quit = true;
                Message::info("Bye")
            }
            _ => Message::warning(format!("'{}' is not implemented", invocation.id())),
        }
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}
