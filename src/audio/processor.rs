// Sequencer processor - Real-time side of the bridge
//
// `process_block` is called once per audio block. It reads the latest engine
// parameters, picks up a changed pattern if one was published, drains queued
// transport commands, renders a click on each active step and publishes metering
// back to the command thread. It never locks, blocks or allocates.

use std::f32::consts::TAU;

use crate::messaging::channels::{
    TransportConsumer, TransportProducer, create_transport_channel, next_transport, send_transport,
};
use crate::messaging::command::TransportCommand;
use crate::messaging::double_buffer::{DoubleBufferReader, DoubleBufferWriter, double_buffer};
use crate::messaging::lock_free_optional::{OptionalGetter, OptionalSetter, lock_free_optional};
use crate::sequencer::state::{AudioThreadState, EngineParams, StepPattern, TransportState};

/// Click length in seconds
const CLICK_DECAY_SECONDS: f32 = 0.03;

/// Command-thread ends of the bridge
pub struct SequencerBridge {
    params: DoubleBufferWriter<EngineParams>,
    pattern: OptionalSetter<StepPattern>,
    transport: TransportProducer,
    meter: DoubleBufferReader<AudioThreadState>,
}

impl SequencerBridge {
    /// Publish parameters; the audio thread sees them from its next block on
    pub fn publish_params(&mut self, params: EngineParams) {
        self.params.write(params);
    }

    /// Publish a changed pattern; consumed once by the audio thread
    pub fn publish_pattern(&mut self, pattern: StepPattern) {
        self.pattern.set(pattern);
    }

    /// Queue a transport command. Returns false when the queue is full.
    pub fn send_transport(&mut self, command: TransportCommand) -> bool {
        match send_transport(&mut self.transport, command) {
            Ok(()) => true,
            Err(dropped) => {
                log::warn!("Transport queue full, dropped {:?}", dropped);
                false
            }
        }
    }

    /// Latest metering published by the audio thread
    pub fn meter(&self) -> AudioThreadState {
        self.meter.read()
    }
}

/// Create both ends of the bridge
pub fn create_bridge(
    params: EngineParams,
    pattern: StepPattern,
    sample_rate: u32,
    transport_capacity: usize,
) -> (SequencerBridge, SequencerProcessor) {
    let (params_tx, params_rx) = double_buffer(params);
    let (pattern_tx, pattern_rx) = lock_free_optional();
    let (transport_tx, transport_rx) = create_transport_channel(transport_capacity);
    let (meter_tx, meter_rx) = double_buffer(AudioThreadState {
        sample_rate,
        ..AudioThreadState::default()
    });

    let bridge = SequencerBridge {
        params: params_tx,
        pattern: pattern_tx,
        transport: transport_tx,
        meter: meter_rx,
    };

    let processor = SequencerProcessor {
        params: params_rx,
        pattern_updates: pattern_rx,
        transport: transport_rx,
        meter: meter_tx,
        pattern,
        sample_rate,
        state: TransportState::Stopped,
        accumulated_samples: 0,
        step: 0,
        samples_into_step: 0.0,
        step_started: true,
        phase: 0.0,
        envelope: 0.0,
    };

    (bridge, processor)
}

/// Audio-thread end of the bridge plus the click generator
pub struct SequencerProcessor {
    params: DoubleBufferReader<EngineParams>,
    pattern_updates: OptionalGetter<StepPattern>,
    transport: TransportConsumer,
    meter: DoubleBufferWriter<AudioThreadState>,

    pattern: StepPattern,
    sample_rate: u32,
    state: TransportState,
    accumulated_samples: u64,
    step: u32,
    /// Samples elapsed in the current step, fractional part carried over
    samples_into_step: f64,
    /// Set when a step begins, cleared once its click was triggered
    step_started: bool,
    phase: f32,
    envelope: f32,
}

impl SequencerProcessor {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Change the sample rate before the processor starts running
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1);
    }

    pub fn transport_state(&self) -> TransportState {
        self.state
    }

    /// Fill one interleaved block. `output.len()` must be a multiple of `channels`.
    pub fn process_block(&mut self, output: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let params = self.params.read();

        // No value means the pattern did not change since the last block
        if let Some(pattern) = self.pattern_updates.get() {
            self.pattern = pattern;
        }

        while let Some(command) = next_transport(&mut self.transport) {
            self.apply_transport(command, &params);
        }

        let mut peak = 0.0f32;
        let step_count = params.step_count.max(1);
        // The pattern may have been shortened below the playhead
        self.step %= step_count;

        if self.state.is_playing() {
            let samples_per_step = params.samples_per_step(self.sample_rate);
            let phase_increment = TAU * params.base_frequency / self.sample_rate as f32;
            let decay = (-1.0 / (CLICK_DECAY_SECONDS * self.sample_rate as f32)).exp();
            let gain = if params.muted { 0.0 } else { params.volume };

            for frame in output.chunks_mut(channels) {
                if self.step_started {
                    self.step_started = false;
                    if self.pattern.is_active(self.step as usize) {
                        self.envelope = 1.0;
                        self.phase = 0.0;
                    }
                }

                let sample = self.phase.sin() * self.envelope * gain;
                self.phase = (self.phase + phase_increment) % TAU;
                self.envelope *= decay;
                peak = peak.max(sample.abs());
                frame.fill(sample);

                self.accumulated_samples += 1;
                self.samples_into_step += 1.0;
                if self.samples_into_step >= samples_per_step {
                    self.samples_into_step -= samples_per_step;
                    self.step = (self.step + 1) % step_count;
                    self.step_started = true;
                }
            }
        } else {
            output.fill(0.0);
        }

        self.meter.write(AudioThreadState {
            sample_rate: self.sample_rate,
            accumulated_samples: self.accumulated_samples,
            current_step: self.step,
            transport: self.state,
            peak,
        });
    }

    fn apply_transport(&mut self, command: TransportCommand, params: &EngineParams) {
        match command {
            TransportCommand::Play => self.state = TransportState::Playing,
            TransportCommand::Pause => {
                if self.state.is_playing() {
                    self.state = TransportState::Paused;
                }
            }
            TransportCommand::Stop => {
                self.state = TransportState::Stopped;
                self.step = 0;
                self.samples_into_step = 0.0;
                self.step_started = true;
                self.accumulated_samples = 0;
                self.envelope = 0.0;
            }
            TransportCommand::Seek(step) => {
                self.step = step % params.step_count.max(1);
                self.samples_into_step = 0.0;
                self.step_started = true;
            }
        }
    }
}
