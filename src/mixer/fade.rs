//! Per-track fade state and the linear ramp it produces.

use std::time::Duration;

/// Where a track is in its fade.
///
/// `remaining` counts down from the full fade duration to zero. `ceiling` is
/// the target volume captured when the fade began, so a volume change made
/// mid-fade does not bend the ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fade {
    Idle,
    In { remaining: Duration, ceiling: f32 },
    Out { remaining: Duration, ceiling: f32 },
}

/// Coarse fade direction, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Steady,
    FadingIn,
    FadingOut,
}

/// What a single tick asks the handle to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Nothing in flight.
    Steady,
    /// Mid-ramp: apply this volume.
    Ramp(f32),
    /// Fade-in finished: settle at the target volume.
    FadedIn,
    /// Fade-out finished: silence and pause.
    FadedOut,
}

fn ratio(remaining: Duration, full: Duration) -> f32 {
    if full.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f32() / full.as_secs_f32()).clamp(0.0, 1.0)
}

impl Fade {
    pub fn fade_in(full: Duration, ceiling: f32) -> Self {
        Fade::In {
            remaining: full,
            ceiling,
        }
    }

    pub fn fade_out(full: Duration, ceiling: f32) -> Self {
        Fade::Out {
            remaining: full,
            ceiling,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Fade::Idle)
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self, Fade::Out { .. })
    }

    pub fn phase(&self) -> FadePhase {
        match self {
            Fade::Idle => FadePhase::Steady,
            Fade::In { .. } => FadePhase::FadingIn,
            Fade::Out { .. } => FadePhase::FadingOut,
        }
    }

    /// Remaining fade time in milliseconds, positive while fading out and
    /// negative while fading in.
    pub fn signed_remaining_ms(&self) -> i64 {
        match *self {
            Fade::Idle => 0,
            Fade::In { remaining, .. } => -(remaining.as_millis() as i64),
            Fade::Out { remaining, .. } => remaining.as_millis() as i64,
        }
    }

    /// Audible level of an in-flight fade, `None` when idle.
    pub fn level(&self, full: Duration) -> Option<f32> {
        match *self {
            Fade::Idle => None,
            Fade::In { remaining, ceiling } => Some((1.0 - ratio(remaining, full)) * ceiling),
            Fade::Out { remaining, ceiling } => Some(ratio(remaining, full) * ceiling),
        }
    }

    /// The opposite fade, starting from the same audible level.
    ///
    /// A fade that has not moved yet reverses onto its own starting point,
    /// so the result is `Idle` and the caller settles the track at once.
    pub fn reversed(&self, full: Duration) -> Self {
        let reversed = match *self {
            Fade::Idle => return Fade::Idle,
            Fade::In { remaining, ceiling } => Fade::Out {
                remaining: full.saturating_sub(remaining),
                ceiling,
            },
            Fade::Out { remaining, ceiling } => Fade::In {
                remaining: full.saturating_sub(remaining),
                ceiling,
            },
        };
        match reversed {
            Fade::In { remaining, .. } | Fade::Out { remaining, .. } if remaining.is_zero() => {
                Fade::Idle
            }
            other => other,
        }
    }

    /// Move the fade forward by one tick of length `step`.
    pub fn advance(&mut self, step: Duration, full: Duration) -> FadeStep {
        match *self {
            Fade::Idle => FadeStep::Steady,
            Fade::In { remaining, ceiling } => {
                let remaining = remaining.saturating_sub(step);
                if remaining.is_zero() {
                    *self = Fade::Idle;
                    FadeStep::FadedIn
                } else {
                    *self = Fade::In { remaining, ceiling };
                    FadeStep::Ramp((1.0 - ratio(remaining, full)) * ceiling)
                }
            }
            Fade::Out { remaining, ceiling } => {
                let remaining = remaining.saturating_sub(step);
                if remaining.is_zero() {
                    *self = Fade::Idle;
                    FadeStep::FadedOut
                } else {
                    *self = Fade::Out { remaining, ceiling };
                    FadeStep::Ramp(ratio(remaining, full) * ceiling)
                }
            }
        }
    }
}
