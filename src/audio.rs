use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::HostResult;

pub const SAMPLE_RATE: u32 = 44100;

type SampleQueue = Arc<Mutex<VecDeque<(f32, f32)>>>;

/// Default audio output device. Stereo frames pushed here are streamed to the
/// sink; when the queue runs dry the device plays silence.
pub struct AudioDevice {
    _stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    _sink: Sink,
    queue: SampleQueue,
}

impl AudioDevice {
    pub fn open(volume: f32) -> HostResult<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;

        let queue = SampleQueue::default();
        sink.append(StreamSource::new(Arc::clone(&queue), SAMPLE_RATE));
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.play();

        log::debug!("audio output opened at {} Hz", SAMPLE_RATE);

        Ok(AudioDevice {
            _stream: stream,
            _stream_handle: stream_handle,
            _sink: sink,
            queue,
        })
    }

    pub fn push_samples(&self, samples: &[(f32, f32)]) {
        if let Ok(mut queue) = self.queue.lock() {
            enqueue(&mut queue, samples, SAMPLE_RATE);
        }
    }

    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

// Keeps at most two seconds queued, dropping the oldest down to one second.
fn enqueue(queue: &mut VecDeque<(f32, f32)>, samples: &[(f32, f32)], sample_rate: u32) {
    queue.extend(samples.iter().copied());

    let max_size = sample_rate as usize * 2;
    if queue.len() > max_size {
        let excess = queue.len() - sample_rate as usize;
        queue.drain(..excess);
    }
}

// Endless source reading interleaved stereo from the shared queue
struct StreamSource {
    queue: SampleQueue,
    sample_rate: u32,
    right: Option<f32>,
}

impl StreamSource {
    fn new(queue: SampleQueue, sample_rate: u32) -> Self {
        Self {
            queue,
            sample_rate,
            right: None,
        }
    }
}

impl Iterator for StreamSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(right) = self.right.take() {
            return Some(right);
        }

        let frame = self.queue.lock().ok().and_then(|mut queue| queue.pop_front());
        match frame {
            Some((left, right)) => {
                self.right = Some(right);
                Some(left)
            }
            None => Some(0.0),
        }
    }
}

impl Source for StreamSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
