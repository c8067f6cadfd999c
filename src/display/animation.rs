// src/display/animation.rs
//! Score count-up animation.
//!
//! [`ScoreAnimation`] is the pure curve: an ease-out quartic from `start` to
//! `end` over 1.5 s, sampled lazily through [`Frames`]. [`AnimationSlot`]
//! drives one curve in real time and publishes values on a watch channel;
//! starting a new curve on the slot aborts the previous one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(1500);
/// 60 Hz
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// 30 Hz, the coarsest sampling allowed
pub const MAX_FRAME_INTERVAL: Duration = Duration::from_micros(33_333);
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAnimation {
    start: u32,
    end: u32,
    duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub elapsed: Duration,
    pub value: u32,
}

impl ScoreAnimation {
    /// Count up from 0
    pub fn new(end: u32) -> Self {
        Self::between(0, end)
    }

    pub fn between(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            duration: ANIMATION_DURATION,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// `floor(start + (end - start) * ease(p))`, with `p` clamped to [0, 1]
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return self.end;
        }
        let start = self.start as f64;
        let end = self.end as f64;
        let value = (start + (end - start) * ease_out_quart(progress)).floor();
        value.max(0.0) as u32
    }

    /// Lazy frame sequence. The interval is clamped to 1 ms..=33 ms.
    pub fn frames(self, interval: Duration) -> Frames {
        Frames {
            animation: self,
            interval: interval.clamp(MIN_FRAME_INTERVAL, MAX_FRAME_INTERVAL),
            index: 0,
            done: false,
        }
    }
}

/// Finite iterator over animation frames. The last frame is always `end`.
#[derive(Debug, Clone)]
pub struct Frames {
    animation: ScoreAnimation,
    interval: Duration,
    index: u32,
    done: bool,
}

impl Frames {
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Iterator for Frames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }

        let elapsed = self.interval * self.index;
        if elapsed >= self.animation.duration {
            self.done = true;
            return Some(Frame {
                elapsed: self.animation.duration,
                value: self.animation.end,
            });
        }

        self.index += 1;
        Some(Frame {
            elapsed,
            value: self.animation.value_at(elapsed),
        })
    }
}

/// One on-screen score position. At most one animation writes to it.
#[derive(Debug)]
pub struct AnimationSlot {
    value: Arc<watch::Sender<u32>>,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Default for AnimationSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationSlot {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        let (value, _) = watch::channel(0);
        Self {
            value: Arc::new(value),
            task: None,
            interval: interval.clamp(MIN_FRAME_INTERVAL, MAX_FRAME_INTERVAL),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.value.subscribe()
    }

    /// Value currently on screen
    pub fn current(&self) -> u32 {
        *self.value.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Restart the count-up from 0 towards `target`, replacing any running one.
    /// Must be called inside a tokio runtime.
    pub fn animate_to(&mut self, target: u32) {
        self.run(ScoreAnimation::new(target.min(100)));
    }

    pub fn run(&mut self, animation: ScoreAnimation) {
        self.cancel();

        let value = Arc::clone(&self.value);
        let frames = animation.frames(self.interval);
        let interval = frames.interval();

        trace!("Starting score animation to {}", animation.end());
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            for frame in frames {
                ticker.tick().await;
                value.send_replace(frame.value);
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Stop any running animation and show 0 again
    pub fn reset(&mut self) {
        self.cancel();
        self.value.send_replace(0);
    }

    /// Wait for the running animation, if any, to publish its last frame
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for AnimationSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
