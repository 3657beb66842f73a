//! One-shot scripted timelines: an ordered list of property interpolation
//! segments interpreted by a small state machine, used for the cinematic
//! camera flythrough.
//!
//! Segments run strictly in sequence; leftover delta at a segment boundary
//! carries into the next segment, so boundaries land at exact accumulated
//! durations regardless of frame timing. `trigger()` is latched: however
//! many "ready" signals arrive, the sequence runs exactly once.

/// A property channel a segment can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PosX,
    PosY,
    PosZ,
}

/// Interpolation easing. The demos use linear moves; the enum is the seam
/// for anything fancier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    SmoothStep,
}

impl Easing {
    /// Maps normalized segment time `t` in [0, 1] to an eased fraction.
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// One interpolation segment: target values per channel, a duration in
/// seconds, and an easing. Start values are whatever the channels hold
/// when the segment begins.
pub struct SegmentSpec {
    pub targets: Vec<(Channel, f32)>,
    pub duration: f32,
    pub easing: Easing,
}

impl SegmentSpec {
    pub fn new(targets: Vec<(Channel, f32)>, duration: f32, easing: Easing) -> Self {
        Self {
            targets,
            duration,
            easing,
        }
    }
}

/// Something a timeline can drive: mutable access to its channels, plus a
/// hook run after every interpolation step so dependent state (a camera's
/// look-at, typically) is recomputed from the freshly written values.
pub trait TimelineTarget {
    fn channel_mut(&mut self, channel: Channel) -> &mut f32;
    fn on_segment_update(&mut self) {}
}

enum TimelineState {
    Pending,
    Running {
        segment: usize,
        /// Seconds into the current segment.
        elapsed: f32,
        /// Channel values captured when the segment began, or `None`
        /// until the first `advance` after entering it.
        from: Option<Vec<f32>>,
    },
    Done,
}

/// An ordered, one-shot sequence of property interpolations.
pub struct ScriptedTimeline {
    segments: Vec<SegmentSpec>,
    state: TimelineState,
    triggered: bool,
}

impl ScriptedTimeline {
    pub fn new(segments: Vec<SegmentSpec>) -> Self {
        Self {
            segments,
            state: TimelineState::Pending,
            triggered: false,
        }
    }

    /// Starts the sequence. Latched: repeat calls (extra "ready" signals,
    /// re-fired load events) neither restart nor stack it.
    pub fn trigger(&mut self) {
        if self.triggered {
            return;
        }
        self.triggered = true;
        self.state = if self.segments.is_empty() {
            TimelineState::Done
        } else {
            TimelineState::Running {
                segment: 0,
                elapsed: 0.0,
                from: None,
            }
        };
        log::debug!("timeline triggered ({} segments)", self.segments.len());
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, TimelineState::Done)
    }

    /// Index of the running segment, if any. Mostly for tests and logging.
    pub fn current_segment(&self) -> Option<usize> {
        match self.state {
            TimelineState::Running { segment, .. } => Some(segment),
            _ => None,
        }
    }

    /// Advances the sequence by `delta` seconds against `target`. A no-op
    /// before `trigger()` and after the last segment finishes.
    pub fn advance(&mut self, delta: f32, target: &mut impl TimelineTarget) {
        let mut remaining = delta;

        loop {
            let TimelineState::Running {
                segment,
                elapsed,
                from,
            } = &mut self.state
            else {
                return;
            };

            let spec = &self.segments[*segment];

            // Capture start values on segment entry
            let from = from.get_or_insert_with(|| {
                spec.targets
                    .iter()
                    .map(|(channel, _)| *target.channel_mut(*channel))
                    .collect()
            });

            let step = remaining.min(spec.duration - *elapsed);
            *elapsed += step;
            remaining -= step;

            let t = if spec.duration > 0.0 {
                (*elapsed / spec.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = spec.easing.apply(t);

            for ((channel, to), start) in spec.targets.iter().zip(from.iter()) {
                *target.channel_mut(*channel) = start + (to - start) * eased;
            }
            target.on_segment_update();

            if *elapsed < spec.duration {
                return;
            }

            // Segment complete; leftover delta flows into the next one
            let next = *segment + 1;
            self.state = if next < self.segments.len() {
                TimelineState::Running {
                    segment: next,
                    elapsed: 0.0,
                    from: None,
                }
            } else {
                TimelineState::Done
            };

            if remaining <= 0.0 {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        x: f32,
        y: f32,
        z: f32,
        hook_calls: usize,
    }

    impl Probe {
        fn origin() -> Self {
            Self {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                hook_calls: 0,
            }
        }
    }

    impl TimelineTarget for Probe {
        fn channel_mut(&mut self, channel: Channel) -> &mut f32 {
            match channel {
                Channel::PosX => &mut self.x,
                Channel::PosY => &mut self.y,
                Channel::PosZ => &mut self.z,
            }
        }

        fn on_segment_update(&mut self) {
            self.hook_calls += 1;
        }
    }

    fn camera_move() -> ScriptedTimeline {
        ScriptedTimeline::new(vec![
            SegmentSpec::new(vec![(Channel::PosX, 4.0)], 3.0, Easing::Linear),
            SegmentSpec::new(vec![(Channel::PosX, 6.0)], 3.0, Easing::Linear),
            SegmentSpec::new(
                vec![(Channel::PosY, 8.0), (Channel::PosZ, 5.0)],
                3.0,
                Easing::Linear,
            ),
        ])
    }

    #[test]
    fn test_advance_before_trigger_is_noop() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.advance(1.0, &mut probe);
        assert_eq!(probe.x, 0.0);
        assert_eq!(probe.hook_calls, 0);
    }

    #[test]
    fn test_linear_interpolation_within_segment() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();

        timeline.advance(1.5, &mut probe);
        assert!((probe.x - 2.0).abs() < 1e-6); // halfway to 4.0
        assert_eq!(timeline.current_segment(), Some(0));
        assert!(probe.hook_calls > 0);
    }

    #[test]
    fn test_segments_run_strictly_in_sequence() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();

        // Just short of the first boundary: still segment 0, Y untouched
        timeline.advance(2.999, &mut probe);
        assert_eq!(timeline.current_segment(), Some(0));
        assert_eq!(probe.y, 0.0);

        // Crossing 3.0s enters segment 1; crossing 6.0s enters segment 2
        timeline.advance(0.001, &mut probe);
        assert_eq!(timeline.current_segment(), Some(1));
        assert!((probe.x - 4.0).abs() < 1e-3);

        timeline.advance(3.0, &mut probe);
        assert_eq!(timeline.current_segment(), Some(2));
        assert!((probe.x - 6.0).abs() < 1e-3);
        assert_eq!(probe.z, 0.0); // segment 2 has only just begun

        timeline.advance(3.0, &mut probe);
        assert!(timeline.is_done());
        assert!((probe.y - 8.0).abs() < 1e-3);
        assert!((probe.z - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_boundary_overshoot_carries_into_next_segment() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();

        // 4.5s in one frame: 3s finishes segment 0, 1.5s lands mid segment 1
        timeline.advance(4.5, &mut probe);
        assert_eq!(timeline.current_segment(), Some(1));
        assert!((probe.x - 5.0).abs() < 1e-6); // 4.0 + (6.0-4.0) * 0.5
    }

    #[test]
    fn test_closing_segment_moves_at_constant_rate() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();

        // Skip the two x legs, then sample the y/z leg a third of the way
        timeline.advance(6.0, &mut probe);
        assert_eq!(timeline.current_segment(), Some(2));
        timeline.advance(1.0, &mut probe);
        assert!((probe.y - 8.0 / 3.0).abs() < 1e-5);
        assert!((probe.z - 5.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();
        timeline.advance(5.0, &mut probe);
        let mid_x = probe.x;

        // A second trigger must not restart or stack the sequence
        timeline.trigger();
        assert_eq!(timeline.current_segment(), Some(1));
        timeline.advance(0.0, &mut probe);
        assert_eq!(probe.x, mid_x);

        timeline.advance(10.0, &mut probe);
        assert!(timeline.is_done());
        timeline.trigger();
        assert!(timeline.is_done());
    }

    #[test]
    fn test_full_run_reaches_all_targets_once() {
        let mut timeline = camera_move();
        let mut probe = Probe::origin();
        timeline.trigger();
        for _ in 0..90 {
            timeline.advance(0.1, &mut probe);
        }
        assert!(timeline.is_done());
        assert!((probe.x - 6.0).abs() < 1e-4);
        assert!((probe.y - 8.0).abs() < 1e-4);
        assert!((probe.z - 5.0).abs() < 1e-4);
    }
}
