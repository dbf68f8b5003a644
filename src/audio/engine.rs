// Audio engine - Drives the sequencer processor on a real-time thread
//
// Two backends share the same processor:
// - **Simulated**: a dedicated thread that renders one block per block period into
//   a scratch buffer. Used by default, in tests and on machines without audio.
// - **Device** (feature `cpal`): the default output device. The callback renders
//   f32 internally and converts to the device sample format (F32, I16, U16) through
//   cpal's `FromSample<f32>`.
//
// Neither callback allocates or logs. Scratch buffers are sized before the stream
// starts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::audio::processor::SequencerProcessor;

/// Output channel count used by the simulated backend
const SIMULATED_CHANNELS: usize = 2;

/// Errors raised while starting an audio backend
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No audio output device found")]
    NoDevice,

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Audio device configuration error: {0}")]
    DeviceConfig(String),

    #[error("Unsupported sample format: {0}. Supported formats: F32, I16, U16")]
    UnsupportedFormat(String),

    #[error("Audio stream error: {0}")]
    Stream(String),

    #[error("Failed to spawn audio thread: {0}")]
    Spawn(#[from] std::io::Error),
}

enum Backend {
    Simulated {
        running: Arc<AtomicBool>,
        handle: Option<JoinHandle<()>>,
    },
    #[cfg(feature = "cpal")]
    Device { _stream: cpal::Stream },
}

pub struct AudioEngine {
    backend: Backend,
    sample_rate: u32,
    block_size: usize,
}

impl AudioEngine {
    /// Run the processor on a background thread at the processor's sample rate,
    /// one block of `block_size` frames per block period.
    pub fn start_simulated(
        mut processor: SequencerProcessor,
        block_size: usize,
    ) -> Result<Self, EngineError> {
        if block_size == 0 {
            return Err(EngineError::InvalidConfig("block size must be non-zero".into()));
        }

        let sample_rate = processor.sample_rate();
        if sample_rate == 0 {
            return Err(EngineError::InvalidConfig("sample rate must be non-zero".into()));
        }

        let period = Duration::from_secs_f64(block_size as f64 / sample_rate as f64);
        let running = Arc::new(AtomicBool::new(true));
        let running_thread = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("stepline-audio".into())
            .spawn(move || {
                let mut block = vec![0.0f32; block_size * SIMULATED_CHANNELS];
                while running_thread.load(Ordering::Acquire) {
                    processor.process_block(&mut block, SIMULATED_CHANNELS);
                    thread::sleep(period);
                }
            })?;

        log::info!(
            "Simulated audio engine started ({} Hz, {} frames per block)",
            sample_rate,
            block_size
        );

        Ok(Self {
            backend: Backend::Simulated {
                running,
                handle: Some(handle),
            },
            sample_rate,
            block_size,
        })
    }

    /// Open the default output device and run the processor in its callback
    #[cfg(feature = "cpal")]
    pub fn start_device(
        mut processor: SequencerProcessor,
        block_size: usize,
    ) -> Result<Self, EngineError> {
        use cpal::SampleFormat;
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(EngineError::NoDevice)?;
        log::info!(
            "Audio device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let supported = device
            .default_output_config()
            .map_err(|e| EngineError::DeviceConfig(e.to_string()))?;
        let sample_format = supported.sample_format();
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let config: cpal::StreamConfig = supported.into();

        processor.set_sample_rate(sample_rate);
        let block_size = block_size.max(1);

        let stream = match sample_format {
            SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, channels, block_size, processor)
            }
            SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, channels, block_size, processor)
            }
            SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, channels, block_size, processor)
            }
            other => return Err(EngineError::UnsupportedFormat(format!("{:?}", other))),
        }?;

        stream
            .play()
            .map_err(|e| EngineError::Stream(e.to_string()))?;

        log::info!(
            "Audio stream started ({} Hz, {} channels, {:?})",
            sample_rate,
            channels,
            sample_format
        );

        Ok(Self {
            backend: Backend::Device { _stream: stream },
            sample_rate,
            block_size,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn is_running(&self) -> bool {
        match &self.backend {
            Backend::Simulated { handle, .. } => handle.is_some(),
            #[cfg(feature = "cpal")]
            Backend::Device { .. } => true,
        }
    }

    /// Stop the audio thread and wait for it to finish. Idempotent.
    pub fn stop(&mut self) {
        match &mut self.backend {
            Backend::Simulated { running, handle } => {
                running.store(false, Ordering::Release);
                if let Some(handle) = handle.take() {
                    if handle.join().is_err() {
                        log::error!("Audio thread panicked");
                    }
                    log::info!("Audio engine stopped");
                }
            }
            #[cfg(feature = "cpal")]
            Backend::Device { .. } => {}
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Build an output stream for sample type `T`
#[cfg(feature = "cpal")]
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    block_size: usize,
    mut processor: SequencerProcessor,
) -> Result<cpal::Stream, EngineError>
where
    T: cpal::SizedSample + cpal::FromSample<f32> + Send + 'static,
{
    use cpal::Sample;
    use cpal::traits::DeviceTrait;

    let channels = channels.max(1);
    let mut scratch = vec![0.0f32; block_size * channels];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for chunk in data.chunks_mut(scratch.len()) {
                    let rendered = &mut scratch[..chunk.len()];
                    processor.process_block(rendered, channels);
                    for (out, sample) in chunk.iter_mut().zip(rendered.iter()) {
                        *out = T::from_sample(*sample);
                    }
                }
            },
            |err| {
                log::error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| EngineError::Stream(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::processor::create_bridge;
    use crate::messaging::command::TransportCommand;
    use crate::sequencer::state::{EngineParams, StepPattern, TransportState};
    use std::time::Instant;

    #[test]
    fn test_rejects_zero_block_size() {
        let (_bridge, processor) =
            create_bridge(EngineParams::default(), StepPattern::default(), 48_000, 4);
        let result = AudioEngine::start_simulated(processor, 0);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_simulated_engine_processes_blocks() {
        let (mut bridge, processor) =
            create_bridge(EngineParams::default(), StepPattern::default(), 48_000, 4);
        let mut engine = AudioEngine::start_simulated(processor, 64).unwrap();
        assert!(engine.is_running());
        assert!(bridge.send_transport(TransportCommand::Play));

        let deadline = Instant::now() + Duration::from_secs(5);
        while bridge.meter().accumulated_samples == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        let meter = bridge.meter();
        assert_eq!(meter.transport, TransportState::Playing);
        assert!(meter.accumulated_samples > 0);

        engine.stop();
        assert!(!engine.is_running());
        engine.stop();
    }
}
