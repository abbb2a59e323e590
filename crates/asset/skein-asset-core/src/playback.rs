//! Per-instance playback state over an immutable, shareable clip.
//!
//! A controller owns only elapsed time and a play state; any number of
//! controllers can drive the same `Arc<AnimationClip>` at independent
//! positions. Each controller's mutable state belongs to one driver thread
//! (or is externally synchronized); the shared clip needs no synchronization.

use std::sync::Arc;

use crate::clip::{AnimationClip, TransformUpdate};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    /// Elapsed time has passed every sampler's end. The clip stays
    /// evaluable but `advance` no longer moves; whether completion means
    /// looping, halting or advancing to another clip is the caller's policy.
    Complete,
}

#[derive(Debug)]
pub struct PlaybackController {
    clip: Arc<AnimationClip>,
    state: PlaybackState,
    time: f32,
    // Reused across ticks; cleared at the top of each advance().
    updates: Vec<TransformUpdate>,
}

impl PlaybackController {
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            state: PlaybackState::Stopped,
            time: 0.0,
            updates: Vec::new(),
        }
    }

    #[inline]
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == PlaybackState::Complete
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.clip.duration()
    }

    /// Start from stopped, or continue from paused.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Stopped | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Playing | PlaybackState::Complete => {}
        }
    }

    /// Alias for `play` from the paused state.
    pub fn resume(&mut self) {
        self.play();
    }

    /// Freeze elapsed time.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Reset elapsed time and return to the initial state.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.time = 0.0;
    }

    /// Jump to `time`, clamped into the clip envelope. Seeking out of the
    /// complete condition leaves the controller paused.
    pub fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.clip.end_time());
        if self.state == PlaybackState::Complete {
            self.state = PlaybackState::Paused;
        }
    }

    /// Advance elapsed time by `dt` (any spacing, including irregular) and
    /// evaluate every sampler at the new time. Returns one update per
    /// target while playing, or nothing in any other state. When elapsed
    /// time passes the clip end, the final frame is emitted and the
    /// controller enters `Complete`.
    pub fn advance(&mut self, dt: f32) -> &[TransformUpdate] {
        self.updates.clear();
        if self.state != PlaybackState::Playing {
            return &self.updates;
        }
        self.time = (self.time + dt).max(0.0);
        let end = self.clip.end_time();
        let finished = self.time >= end;
        if finished {
            self.time = end;
        }
        self.clip.sample_into(self.time, &mut self.updates);
        if finished {
            self.state = PlaybackState::Complete;
        }
        &self.updates
    }
}
