//! Resize frame vetting.
//!
//! The pointer engine's resize stream carries two known artifacts: frames
//! with a zero dimension, and a spuriously tiny height right after a
//! legitimate resize. Both must be filtered before they touch a surface or
//! a subscriber; everything else passes through untouched.

use crate::constants::MIN_RESIZE_HEIGHT_PX;

/// Tunable thresholds for the resize guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardPolicy {
    /// Heights below this many px are treated as engine noise when they
    /// also undercut the last accepted height. See `MIN_RESIZE_HEIGHT_PX`.
    pub min_height: f64,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            min_height: MIN_RESIZE_HEIGHT_PX,
        }
    }
}

/// Outcome of vetting one resize frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVerdict {
    Accepted,
    /// A dimension was zero (or negative). Applying it would collapse the
    /// pane to a point no further gesture could recover.
    ZeroArea,
    /// Height under the policy threshold and under the last accepted
    /// height: the engine's post-resize artifact.
    SpuriousHeight,
}

impl FrameVerdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, FrameVerdict::Accepted)
    }
}

/// Per-pane resize frame filter.
///
/// Tracks the last accepted height so the tiny-height debounce only fires
/// on shrinking frames; a pane that starts small is never blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeGuard {
    policy: GuardPolicy,
    last_accepted: Option<f64>,
    rejected: u64,
}

impl ResizeGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self {
            policy,
            last_accepted: None,
            rejected: 0,
        }
    }

    /// Vet one resize frame. Accepted frames record their height; rejected
    /// frames leave all guard state except the rejection count untouched.
    pub fn admit(&mut self, width: f64, height: f64) -> FrameVerdict {
        if width <= 0.0 || height <= 0.0 {
            self.rejected += 1;
            tracing::trace!(width, height, "rejected zero-area resize frame");
            return FrameVerdict::ZeroArea;
        }
        if height < self.policy.min_height
            && self
                .last_accepted
                .is_some_and(|last| height < last)
        {
            self.rejected += 1;
            tracing::trace!(
                height,
                min_height = self.policy.min_height,
                last_accepted = self.last_accepted,
                "rejected spurious tiny-height resize frame"
            );
            return FrameVerdict::SpuriousHeight;
        }
        self.last_accepted = Some(height);
        FrameVerdict::Accepted
    }

    /// Forget the accepted-height history. Called on rebind, the documented
    /// recovery path for a wedged pane.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    pub fn last_accepted_height(&self) -> Option<f64> {
        self.last_accepted
    }

    pub fn rejected_frames(&self) -> u64 {
        self.rejected
    }
}
