//! In-process frame host for headless runs and tests.
//!
//! [`FrameQueue`] hands out tokens in order and stamps each with a virtual
//! timestamp advancing by a fixed frame interval. [`drive`] fires queued
//! frames one at a time, optionally sleeping to hold a real-time cadence.

use crate::scheduler::{FrameHost, FrameOutcome, FrameToken, Session};
use liquid_lab_core::error::LabError;
use liquid_lab_core::RenderSurface;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// Deterministic frame host backed by a FIFO of pending tokens.
#[derive(Debug, Clone)]
pub struct FrameQueue {
    pending: VecDeque<FrameToken>,
    next_id: u64,
    frame_ms: f64,
    now_ms: f64,
    cancelled: u64,
}

impl FrameQueue {
    /// A queue whose frames are `frame_ms` apart on its virtual clock.
    pub fn new(frame_ms: f64) -> Self {
        Self {
            pending: VecDeque::new(),
            next_id: 0,
            frame_ms,
            now_ms: 0.0,
            cancelled: 0,
        }
    }

    /// Removes the next pending frame and advances the clock to its timestamp.
    pub fn pop_next(&mut self) -> Option<(FrameToken, f64)> {
        let token = self.pending.pop_front()?;
        self.now_ms += self.frame_ms;
        Some((token, self.now_ms))
    }

    /// Number of frames currently scheduled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames withdrawn before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Virtual time of the most recently fired frame.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameHost for FrameQueue {
    fn request_frame(&mut self) -> Result<FrameToken, LabError> {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.pending.push_back(token);
        Ok(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|&t| t != token);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Tally of a [`drive`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveReport {
    pub rendered: u64,
    pub dropped: u64,
    pub ignored: u64,
}

impl DriveReport {
    fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Rendered => self.rendered += 1,
            FrameOutcome::Dropped => self.dropped += 1,
            FrameOutcome::Ignored => self.ignored += 1,
        }
    }

    /// Frames whose tick actually ran.
    pub fn ticks(&self) -> u64 {
        self.rendered + self.dropped
    }
}

/// Fires up to `frames` queued frames, calling `between` before each one.
///
/// `between(index, session)` is where pointer events land: after the
/// previous tick finished and before the next one starts. Stops early when
/// the session goes idle. With `pace`, sleeps so frames fire no faster than
/// the queue's frame interval in wall-clock time.
pub fn drive_with<S, F>(
    session: &mut Session<FrameQueue, S>,
    frames: usize,
    pace: bool,
    mut between: F,
) -> DriveReport
where
    S: RenderSurface,
    F: FnMut(usize, &mut Session<FrameQueue, S>),
{
    let mut report = DriveReport::default();
    let started = Instant::now();
    let frame_ms = session.host().frame_ms();
    for index in 0..frames {
        between(index, session);
        let Some((token, timestamp_ms)) = session.host_mut().pop_next() else {
            break;
        };
        report.record(session.tick(token, timestamp_ms));
        if pace && frame_ms > 0.0 {
            // Intervals too large for a Duration are not paced.
            let Ok(due) = Duration::try_from_secs_f64(frame_ms * (index + 1) as f64 / 1000.0)
            else {
                continue;
            };
            if let Some(wait) = due.checked_sub(started.elapsed()) {
                thread::sleep(wait);
            }
        }
    }
    report
}

/// [`drive_with`] without pointer events.
pub fn drive<S: RenderSurface>(
    session: &mut Session<FrameQueue, S>,
    frames: usize,
    pace: bool,
) -> DriveReport {
    drive_with(session, frames, pace, |_, _| {})
}
