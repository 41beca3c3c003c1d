//! Time-driven progress estimate for in-flight operations.
//!
//! Purely presentational: the fraction is a function of elapsed time, not of
//! actual completion, and must never gate correctness. The shape is
//! "looks alive without promising completion" — hold at zero briefly, ramp
//! with a decelerating ease toward a ceiling below 100%, then snap to 100%
//! once the task settles and stay visible for a short grace period.
//!
//! The estimator is fed `Instant`s by the caller instead of reading a clock,
//! so the curve is deterministic and testable.

use std::time::{Duration, Instant};

use clipdex_core::defaults;

/// Timing and shape parameters for the progress curve.
#[derive(Debug, Clone, Copy)]
pub struct ProgressCurve {
    /// Hold at zero this long after a start, so a restart visibly resets.
    pub settle_delay: Duration,
    /// Duration of the ramp from zero to the ceiling.
    pub ramp: Duration,
    /// Ramp ceiling in `(0, 1]`. Time alone never reaches 100%.
    pub ceiling: f64,
    /// Duration of the snap from the current fraction to 1.0 on settle.
    pub snap: Duration,
    /// How long the full bar stays visible before dismissal.
    pub grace: Duration,
}

impl Default for ProgressCurve {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(defaults::PROGRESS_SETTLE_MS),
            ramp: Duration::from_secs(defaults::PROGRESS_RAMP_SECS),
            ceiling: defaults::PROGRESS_CEILING,
            snap: Duration::from_millis(defaults::PROGRESS_SNAP_MS),
            grace: Duration::from_millis(defaults::PROGRESS_GRACE_MS),
        }
    }
}

impl ProgressCurve {
    pub fn with_settle_delay(mut self, d: Duration) -> Self {
        self.settle_delay = d;
        self
    }

    pub fn with_ramp(mut self, d: Duration) -> Self {
        self.ramp = d;
        self
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = ceiling.clamp(0.0, 1.0);
        self
    }

    pub fn with_snap(mut self, d: Duration) -> Self {
        self.snap = d;
        self
    }

    pub fn with_grace(mut self, d: Duration) -> Self {
        self.grace = d;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    Ramp { started_at: Instant },
    Snap { from: f64, started_at: Instant },
}

/// Deterministic progress estimator for one task slot.
#[derive(Debug, Clone)]
pub struct ProgressEstimator {
    curve: ProgressCurve,
    phase: Phase,
}

impl Default for ProgressEstimator {
    fn default() -> Self {
        Self::new(ProgressCurve::default())
    }
}

/// Decelerating ease: fast early movement, asymptotic approach to the end.
fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

impl ProgressEstimator {
    pub fn new(curve: ProgressCurve) -> Self {
        Self {
            curve,
            phase: Phase::Hidden,
        }
    }

    /// The task entered Running. Always restarts the ramp from zero, even if
    /// a previous ramp or snap was still showing.
    pub fn start(&mut self, now: Instant) {
        self.phase = Phase::Ramp { started_at: now };
    }

    /// The task left Running (success, failure, or cancel). If the bar was
    /// showing, snap to 100% from wherever the ramp got to.
    pub fn settle(&mut self, now: Instant) {
        if let Phase::Ramp { .. } = self.phase {
            let from = self.fraction(now).unwrap_or(0.0);
            self.phase = Phase::Snap {
                from,
                started_at: now,
            };
        }
    }

    /// Fraction complete at `now`, or `None` when the bar is dismissed.
    pub fn fraction(&self, now: Instant) -> Option<f64> {
        match self.phase {
            Phase::Hidden => None,
            Phase::Ramp { started_at } => {
                let since = now.saturating_duration_since(started_at);
                if since < self.curve.settle_delay {
                    return Some(0.0);
                }
                let ramping = since - self.curve.settle_delay;
                let t = if self.curve.ramp.is_zero() {
                    1.0
                } else {
                    (ramping.as_secs_f64() / self.curve.ramp.as_secs_f64()).min(1.0)
                };
                Some(self.curve.ceiling * ease_out_cubic(t))
            }
            Phase::Snap { from, started_at } => {
                let since = now.saturating_duration_since(started_at);
                if since < self.curve.snap {
                    let t = since.as_secs_f64() / self.curve.snap.as_secs_f64();
                    Some(from + (1.0 - from) * t)
                } else if since < self.curve.snap + self.curve.grace {
                    Some(1.0)
                } else {
                    None
                }
            }
        }
    }

    /// Whether the bar should be rendered at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        self.fraction(now).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> ProgressCurve {
        ProgressCurve::default()
            .with_settle_delay(Duration::from_millis(50))
            .with_ramp(Duration::from_secs(30))
            .with_ceiling(0.95)
            .with_snap(Duration::from_millis(500))
            .with_grace(Duration::from_millis(400))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_hidden_before_start() {
        let est = ProgressEstimator::new(curve());
        assert_eq!(est.fraction(Instant::now()), None);
    }

    #[test]
    fn test_holds_at_zero_during_settle_delay() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);
        assert!(approx(est.fraction(t0).unwrap(), 0.0));
        assert!(approx(est.fraction(t0 + Duration::from_millis(49)).unwrap(), 0.0));
    }

    #[test]
    fn test_ramp_is_monotonic_and_capped_at_ceiling() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);

        let mut last = 0.0;
        for secs in 1..=40 {
            let f = est.fraction(t0 + Duration::from_secs(secs)).unwrap();
            assert!(f >= last, "fraction regressed at {secs}s");
            assert!(f <= 0.95 + 1e-9);
            last = f;
        }
        // Fully ramped well past the ramp duration.
        let f = est.fraction(t0 + Duration::from_secs(60)).unwrap();
        assert!(approx(f, 0.95));
    }

    #[test]
    fn test_ramp_decelerates() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);

        let early = est.fraction(t0 + Duration::from_secs(5)).unwrap()
            - est.fraction(t0 + Duration::from_secs(1)).unwrap();
        let late = est.fraction(t0 + Duration::from_secs(29)).unwrap()
            - est.fraction(t0 + Duration::from_secs(25)).unwrap();
        assert!(early > late);
    }

    #[test]
    fn test_settle_snaps_to_full_then_dismisses() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);

        let t1 = t0 + Duration::from_secs(10);
        let mid = est.fraction(t1).unwrap();
        est.settle(t1);

        // Snap starts from the ramp's last value and reaches 1.0.
        assert!(approx(est.fraction(t1).unwrap(), mid));
        let f = est.fraction(t1 + Duration::from_millis(250)).unwrap();
        assert!(f > mid && f < 1.0);
        assert!(approx(
            est.fraction(t1 + Duration::from_millis(500)).unwrap(),
            1.0
        ));

        // Full bar stays through the grace period, then dismisses.
        assert!(approx(
            est.fraction(t1 + Duration::from_millis(800)).unwrap(),
            1.0
        ));
        assert_eq!(est.fraction(t1 + Duration::from_millis(950)), None);
        assert!(!est.is_visible(t1 + Duration::from_millis(950)));
    }

    #[test]
    fn test_settle_without_start_stays_hidden() {
        let mut est = ProgressEstimator::new(curve());
        let now = Instant::now();
        est.settle(now);
        assert_eq!(est.fraction(now), None);
    }

    #[test]
    fn test_restart_resets_ramp_from_scratch() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);

        let t1 = t0 + Duration::from_secs(20);
        assert!(est.fraction(t1).unwrap() > 0.5);

        // Restart mid-ramp: back to zero, no resuming the stale ramp.
        est.start(t1);
        assert!(approx(est.fraction(t1).unwrap(), 0.0));
        assert!(approx(est.fraction(t1 + Duration::from_millis(40)).unwrap(), 0.0));
        let f = est.fraction(t1 + Duration::from_secs(1)).unwrap();
        assert!(f > 0.0 && f < 0.5);
    }

    #[test]
    fn test_restart_during_snap_resets() {
        let t0 = Instant::now();
        let mut est = ProgressEstimator::new(curve());
        est.start(t0);
        let t1 = t0 + Duration::from_secs(5);
        est.settle(t1);

        let t2 = t1 + Duration::from_millis(200);
        est.start(t2);
        assert!(approx(est.fraction(t2).unwrap(), 0.0));
    }
}
