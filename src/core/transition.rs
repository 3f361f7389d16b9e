use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::FrameParams;
use crate::core::primitives::lerp;

pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(100);

/// Continuous part of [`FrameParams`]: the only fields that animate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameExtrema {
    pub max_price: f64,
    pub min_price: f64,
    pub max_volume: f64,
    pub min_volume: f64,
}

impl FrameExtrema {
    #[must_use]
    pub fn of(params: &FrameParams) -> Self {
        Self {
            max_price: params.max_price,
            min_price: params.min_price,
            max_volume: params.max_volume,
            min_volume: params.min_volume,
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            max_price: lerp_finite(self.max_price, to.max_price, t),
            min_price: lerp_finite(self.min_price, to.min_price, t),
            max_volume: lerp_finite(self.max_volume, to.max_volume, t),
            min_volume: lerp_finite(self.min_volume, to.min_volume, t),
        }
    }

    /// `true` when at least one field would actually blend toward `to`.
    #[must_use]
    pub fn blends_toward(self, to: Self) -> bool {
        [
            (self.max_price, to.max_price),
            (self.min_price, to.min_price),
            (self.max_volume, to.max_volume),
            (self.min_volume, to.min_volume),
        ]
        .into_iter()
        .any(|(a, b)| is_blendable(a, b))
    }

    fn apply_to(self, params: &mut FrameParams) {
        params.max_price = self.max_price;
        params.min_price = self.min_price;
        params.max_volume = self.max_volume;
        params.min_volume = self.min_volume;
    }
}

// Infinite sentinels cannot be blended; they snap to the target.
fn lerp_finite(a: f64, b: f64, t: f64) -> f64 {
    if is_blendable(a, b) {
        lerp(a, b, t)
    } else {
        b
    }
}

fn is_blendable(a: f64, b: f64) -> bool {
    a != b && a.is_finite() && b.is_finite()
}

/// Frame at fraction `t` between `prev` and `next`: extrema are blended,
/// everything else is taken from `next`.
#[must_use]
pub fn lerp_frame(prev: &FrameParams, next: &FrameParams, t: f64) -> FrameParams {
    let t = t.clamp(0.0, 1.0);
    let mut out = next.clone();
    FrameExtrema::of(prev)
        .lerp(FrameExtrema::of(next), t)
        .apply_to(&mut out);
    out
}

/// Time-driven blend toward the latest target frame.
///
/// Time comes from the host's frame clock as a monotonic `Duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransition {
    duration: Duration,
    from: Option<FrameExtrema>,
    target: Option<FrameParams>,
    started_at: Duration,
}

impl Default for FrameTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DURATION)
    }
}

impl FrameTransition {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            from: None,
            target: None,
            started_at: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn target(&self) -> Option<&FrameParams> {
        self.target.as_ref()
    }

    /// Replaces the target frame.
    ///
    /// The first target is shown as-is. Later targets with different extrema
    /// restart the blend from whatever is on screen at `now`; targets with
    /// equal extrema only swap the discrete fields.
    pub fn retarget(&mut self, next: FrameParams, now: Duration) {
        let next_extrema = FrameExtrema::of(&next);
        match self.target.as_ref() {
            None => {
                self.from = Some(next_extrema);
                self.started_at = now;
            }
            Some(current) if FrameExtrema::of(current) != next_extrema => {
                let on_screen = self.sample_extrema(now);
                trace!(
                    from_max_price = on_screen.map(|e| e.max_price),
                    to_max_price = next_extrema.max_price,
                    "restart frame transition"
                );
                self.from = on_screen;
                self.started_at = now;
            }
            Some(_) => {}
        }
        self.target = Some(next);
    }

    /// Blend progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        let Some(target) = self.target.as_ref() else {
            return false;
        };
        let target = FrameExtrema::of(target);
        self.from.is_some_and(|from| from.blends_toward(target)) && self.progress(now) < 1.0
    }

    /// Frame to draw at `now`, or `None` before the first target.
    #[must_use]
    pub fn sample(&self, now: Duration) -> Option<FrameParams> {
        let mut frame = self.target.clone()?;
        if let Some(extrema) = self.sample_extrema(now) {
            extrema.apply_to(&mut frame);
        }
        Some(frame)
    }

    fn sample_extrema(&self, now: Duration) -> Option<FrameExtrema> {
        let target = FrameExtrema::of(self.target.as_ref()?);
        let from = self.from.unwrap_or(target);
        Some(from.lerp(target, self.progress(now)))
    }
}
