//! Value engine: ratio, pixel-offset and drag-to-value mapping.

use slidekit_ui::{AnimationKind, AnimationRequest, Animator, ObservableValue};
use tracing::{debug, trace};

use super::{ConfigurationError, layout::LayoutSnapshot};

/// The closed interval a slider value lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    minimum: f32,
    maximum: f32,
}

impl Range {
    /// Creates a range. `minimum` must be strictly below `maximum`, both
    /// must be finite, and so must their difference.
    pub fn new(minimum: f32, maximum: f32) -> Result<Self, ConfigurationError> {
        if !minimum.is_finite() || !maximum.is_finite() {
            return Err(ConfigurationError::NonFiniteBound { minimum, maximum });
        }
        if minimum >= maximum {
            return Err(ConfigurationError::DegenerateRange { minimum, maximum });
        }
        if !(maximum - minimum).is_finite() {
            return Err(ConfigurationError::SpanOverflow { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// Lower bound.
    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    /// Upper bound.
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// `maximum - minimum`, always positive.
    pub fn span(&self) -> f32 {
        self.maximum - self.minimum
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.minimum, self.maximum)
    }

    /// Whether `value` lies within the range, bounds included.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.minimum && value <= self.maximum
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
        }
    }
}

/// One allowed value of a discrete-stop slider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteStop {
    /// The value drags snap to.
    pub value: f32,
    /// Whether the stop's marker is drawn. Hidden stops still snap.
    pub visible: bool,
}

impl DiscreteStop {
    /// A drawn stop.
    pub const fn visible(value: f32) -> Self {
        Self {
            value,
            visible: true,
        }
    }

    /// A stop that snaps without being drawn.
    pub const fn hidden(value: f32) -> Self {
        Self {
            value,
            visible: false,
        }
    }
}

impl From<f32> for DiscreteStop {
    fn from(value: f32) -> Self {
        Self::visible(value)
    }
}

/// How drag results are snapped.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StepPolicy {
    /// Continuous values.
    #[default]
    None,
    /// Multiples of `step` measured from the range minimum.
    Uniform(f32),
    /// The nearest value in an explicit, ordered list.
    DiscreteStops(Vec<DiscreteStop>),
}

impl StepPolicy {
    /// Builds a policy from the `step` / `discrete_stops` configuration pair.
    ///
    /// `step == 0` with no stops is [`StepPolicy::None`]. Setting both is an
    /// error, as is an empty or out-of-range stop list.
    pub fn from_config(
        range: &Range,
        step: f32,
        discrete_stops: Option<&[DiscreteStop]>,
    ) -> Result<Self, ConfigurationError> {
        if !step.is_finite() || step < 0.0 {
            return Err(ConfigurationError::InvalidStep(step));
        }

        match discrete_stops {
            Some(_) if step > 0.0 => Err(ConfigurationError::ConflictingStepPolicies),
            Some([]) => Err(ConfigurationError::EmptyDiscreteStops),
            Some(stops) => {
                for stop in stops {
                    if !stop.value.is_finite() {
                        return Err(ConfigurationError::NonFiniteStop(stop.value));
                    }
                    if !range.contains(stop.value) {
                        return Err(ConfigurationError::StopOutOfRange {
                            value: stop.value,
                            minimum: range.minimum(),
                            maximum: range.maximum(),
                        });
                    }
                }
                Ok(StepPolicy::DiscreteStops(stops.to_vec()))
            }
            None if step == 0.0 => Ok(StepPolicy::None),
            None if step > range.span() => Err(ConfigurationError::StepExceedsRange {
                step,
                span: range.span(),
            }),
            None => Ok(StepPolicy::Uniform(step)),
        }
    }
}

/// Where a drag-derived position comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOrigin {
    /// An absolute tap on the track; the displacement is the tap position.
    TrackTap,
    /// A drag of the thumb, relative to its left edge at gesture start.
    Thumb {
        /// Thumb left edge captured when the gesture began.
        anchor_offset: f32,
    },
}

/// Maps between domain values, ratios and pixel offsets, and owns the
/// current value.
pub struct ValueEngine {
    range: Range,
    policy: StepPolicy,
    current: ObservableValue,
    layout: Option<LayoutSnapshot>,
    animator: Box<dyn Animator>,
}

impl ValueEngine {
    /// Creates an engine holding `initial` verbatim.
    pub fn new(
        range: Range,
        policy: StepPolicy,
        initial: f32,
        animator: Box<dyn Animator>,
    ) -> Self {
        Self {
            range,
            policy,
            current: ObservableValue::new(initial),
            layout: None,
            animator,
        }
    }

    /// The configured range.
    pub fn range(&self) -> &Range {
        &self.range
    }

    /// The configured step policy.
    pub fn policy(&self) -> &StepPolicy {
        &self.policy
    }

    /// Installs the layout the pixel math runs against.
    pub fn set_layout(&mut self, layout: LayoutSnapshot) {
        self.layout = Some(layout);
    }

    /// The layout in use, if readiness has been reached.
    pub fn layout(&self) -> Option<&LayoutSnapshot> {
        self.layout.as_ref()
    }

    /// The observable cell holding the current value.
    pub fn observable(&self) -> &ObservableValue {
        &self.current
    }

    /// `(value - minimum) / (maximum - minimum)`. Not clamped.
    pub fn ratio_of(&self, value: f32) -> f32 {
        (value - self.range.minimum) / self.range.span()
    }

    /// Pixel offset of the thumb's left edge for `value`.
    ///
    /// Zero until the layout is known.
    pub fn pixel_offset_of(&self, value: f32) -> f32 {
        match &self.layout {
            Some(layout) => self.ratio_of(value) * layout.thumb_travel(),
            None => 0.0,
        }
    }

    /// Width of the filled track segment for `value`: the thumb offset plus
    /// half a thumb.
    pub fn minimum_track_width(&self, value: f32) -> f32 {
        match &self.layout {
            Some(layout) => self.pixel_offset_of(value) + layout.thumb.width / 2.0,
            None => 0.0,
        }
    }

    /// Converts a pointer displacement into a domain value.
    ///
    /// With more than one active contact the result is never snapped.
    /// Returns the range minimum when no usable track length exists.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn value_from_drag(
        &self,
        displacement: f32,
        origin: DragOrigin,
        active_contacts: usize,
    ) -> f32 {
        let Some(layout) = &self.layout else {
            trace!("drag before layout is ready");
            return self.range.minimum;
        };

        let (usable, raw_offset) = match origin {
            DragOrigin::TrackTap => (layout.container.width, displacement),
            DragOrigin::Thumb { anchor_offset } => {
                (layout.thumb_travel(), anchor_offset + displacement)
            }
        };
        if usable <= 0.0 || !raw_offset.is_finite() {
            trace!(usable, raw_offset, "degenerate track length");
            return self.range.minimum;
        }

        let ratio = raw_offset / usable;
        let candidate = self.range.minimum + ratio * self.range.span();
        if active_contacts > 1 {
            return self.range.clamp(candidate);
        }

        match &self.policy {
            StepPolicy::None => self.range.clamp(candidate),
            StepPolicy::Uniform(step) => {
                // f32::round rounds half away from zero.
                let steps = (ratio * self.range.span() / step).round();
                self.range.clamp(self.range.minimum + steps * step)
            }
            StepPolicy::DiscreteStops(stops) => {
                nearest_stop(stops, self.range.clamp(candidate)).unwrap_or(candidate)
            }
        }
    }

    /// Stores `value` verbatim and supersedes any running animation.
    pub fn set_current_value(&self, value: f32) {
        self.current.set(value);
    }

    /// Hands an animation towards `target` to the animator and returns.
    pub fn animate_current_value_to(&mut self, target: f32, kind: AnimationKind) {
        debug!(from = self.current.get(), target, ?kind, "animating value");
        let request = AnimationRequest::new(&self.current, target, kind);
        self.animator.animate(request);
    }

    /// Stops whatever animation is driving the value, leaving it in place.
    pub fn interrupt_animation(&self) {
        self.current.claim();
    }

    /// The present value.
    pub fn current_value(&self) -> f32 {
        self.current.get()
    }
}

/// Nearest stop to `value`. Ties keep the earliest stop in list order.
fn nearest_stop(stops: &[DiscreteStop], value: f32) -> Option<f32> {
    stops
        .iter()
        .map(|stop| stop.value)
        .fold(None, |best: Option<(f32, f32)>, stop| {
            let distance = (stop - value).abs();
            match best {
                Some((best_distance, _)) if best_distance <= distance => best,
                _ => Some((distance, stop)),
            }
        })
        .map(|(_, stop)| stop)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use slidekit_ui::{ImmediateAnimator, PxSize, RecordingAnimator, SpringConfig};

    use super::*;

    fn layout(container: f32, thumb: f32) -> LayoutSnapshot {
        LayoutSnapshot {
            container: PxSize::new(container, 40.0),
            track: PxSize::new(container, 4.0),
            thumb: PxSize::new(thumb, 20.0),
        }
    }

    fn engine(min: f32, max: f32, policy: StepPolicy) -> ValueEngine {
        let mut engine = ValueEngine::new(
            Range::new(min, max).expect("valid range"),
            policy,
            min,
            Box::new(ImmediateAnimator),
        );
        engine.set_layout(layout(200.0, 20.0));
        engine
    }

    fn thumb(anchor_offset: f32) -> DragOrigin {
        DragOrigin::Thumb { anchor_offset }
    }

    fn stops(values: &[f32]) -> Vec<DiscreteStop> {
        values.iter().copied().map(DiscreteStop::from).collect()
    }

    #[test]
    fn test_range_validation() {
        assert!(matches!(
            Range::new(1.0, 1.0),
            Err(ConfigurationError::DegenerateRange { .. })
        ));
        assert!(matches!(
            Range::new(2.0, 1.0),
            Err(ConfigurationError::DegenerateRange { .. })
        ));
        assert!(matches!(
            Range::new(0.0, f32::INFINITY),
            Err(ConfigurationError::NonFiniteBound { .. })
        ));
        let range = Range::new(-5.0, 5.0).expect("valid range");
        assert_eq!(range.span(), 10.0);
        assert_eq!(range.clamp(7.0), 5.0);
    }

    #[test]
    fn test_range_rejects_overflowing_span() {
        assert!(matches!(
            Range::new(-f32::MAX, f32::MAX),
            Err(ConfigurationError::SpanOverflow { .. })
        ));
        let wide = Range::new(-f32::MAX / 2.0, f32::MAX / 2.0).expect("finite span");
        assert!(wide.span().is_finite());
    }

    #[test]
    fn test_policy_from_config() {
        let range = Range::new(0.0, 10.0).expect("valid range");
        assert_eq!(StepPolicy::from_config(&range, 0.0, None), Ok(StepPolicy::None));
        assert_eq!(
            StepPolicy::from_config(&range, 2.5, None),
            Ok(StepPolicy::Uniform(2.5))
        );
        assert_eq!(
            StepPolicy::from_config(&range, 0.0, Some(&stops(&[0.0, 5.0]))),
            Ok(StepPolicy::DiscreteStops(stops(&[0.0, 5.0])))
        );
        assert_eq!(
            StepPolicy::from_config(&range, 0.0, Some(&[])),
            Err(ConfigurationError::EmptyDiscreteStops)
        );
        assert_eq!(
            StepPolicy::from_config(&range, 1.0, Some(&stops(&[1.0]))),
            Err(ConfigurationError::ConflictingStepPolicies)
        );
        assert_eq!(
            StepPolicy::from_config(&range, -1.0, None),
            Err(ConfigurationError::InvalidStep(-1.0))
        );
        assert!(matches!(
            StepPolicy::from_config(&range, 11.0, None),
            Err(ConfigurationError::StepExceedsRange { .. })
        ));
        assert!(matches!(
            StepPolicy::from_config(&range, 0.0, Some(&stops(&[3.0, 12.0]))),
            Err(ConfigurationError::StopOutOfRange { value, .. }) if value == 12.0
        ));
    }

    #[test]
    fn test_ratio_and_pixel_offset() {
        let engine = engine(0.0, 100.0, StepPolicy::None);
        assert_eq!(engine.ratio_of(25.0), 0.25);
        assert_eq!(engine.ratio_of(150.0), 1.5);
        assert_eq!(engine.pixel_offset_of(50.0), 90.0);
        assert_eq!(engine.minimum_track_width(50.0), 100.0);
    }

    #[test]
    fn test_pixel_offset_before_layout_is_zero() {
        let engine = ValueEngine::new(
            Range::default(),
            StepPolicy::None,
            0.5,
            Box::new(ImmediateAnimator),
        );
        assert_eq!(engine.pixel_offset_of(0.5), 0.0);
        assert_eq!(engine.value_from_drag(50.0, thumb(0.0), 1), 0.0);
    }

    #[test]
    fn test_zero_travel_returns_minimum() {
        let mut engine = engine(10.0, 20.0, StepPolicy::None);
        engine.set_layout(layout(20.0, 20.0));
        assert_eq!(engine.value_from_drag(5.0, thumb(0.0), 1), 10.0);
        // Track taps still have the full container to work with.
        assert_eq!(engine.value_from_drag(10.0, DragOrigin::TrackTap, 1), 15.0);
    }

    #[test]
    fn test_track_tap_uses_container_width() {
        let engine = engine(0.0, 100.0, StepPolicy::None);
        assert_eq!(engine.value_from_drag(50.0, DragOrigin::TrackTap, 1), 25.0);
        assert_eq!(engine.value_from_drag(-10.0, DragOrigin::TrackTap, 1), 0.0);
        assert_eq!(engine.value_from_drag(250.0, DragOrigin::TrackTap, 1), 100.0);
    }

    #[test]
    fn test_uniform_snapping_rounds_half_away_from_zero() {
        let mut engine = engine(0.0, 128.0, StepPolicy::Uniform(16.0));
        engine.set_layout(layout(148.0, 20.0));
        // 8 px is exactly half a step.
        assert_eq!(engine.value_from_drag(8.0, thumb(0.0), 1), 16.0);
        assert_eq!(engine.value_from_drag(7.5, thumb(0.0), 1), 0.0);
        assert_eq!(engine.value_from_drag(-8.0, thumb(0.0), 1), 0.0);
        assert_eq!(engine.value_from_drag(500.0, thumb(0.0), 1), 128.0);
    }

    #[test]
    fn test_discrete_stops_pick_nearest() {
        let quarters = stops(&[0.0, 0.334, 0.668, 1.0]);
        let engine = engine(0.0, 1.0, StepPolicy::DiscreteStops(quarters.clone()));
        // 90 of 180 px is a candidate of exactly 0.5.
        assert_eq!(engine.value_from_drag(90.0, thumb(0.0), 1), 0.334);
        assert_eq!(engine.value_from_drag(95.4, thumb(0.0), 1), 0.668);
        assert_eq!(engine.value_from_drag(-40.0, thumb(0.0), 1), 0.0);
        assert_eq!(engine.value_from_drag(400.0, thumb(0.0), 1), 1.0);

        assert_eq!(nearest_stop(&quarters, 0.499), Some(0.334));
        assert_eq!(nearest_stop(&quarters, 0.503), Some(0.668));
        // Midpoint between the two middle stops keeps the earlier one.
        assert_eq!(nearest_stop(&quarters, 0.501), Some(0.334));
    }

    #[test]
    fn test_discrete_stop_ties_keep_first_listed() {
        let forward = engine(0.0, 1.0, StepPolicy::DiscreteStops(stops(&[0.0, 1.0])));
        let reversed = engine(0.0, 1.0, StepPolicy::DiscreteStops(stops(&[1.0, 0.0])));
        assert_eq!(forward.value_from_drag(90.0, thumb(0.0), 1), 0.0);
        assert_eq!(reversed.value_from_drag(90.0, thumb(0.0), 1), 1.0);
        assert_eq!(nearest_stop(&stops(&[0.25, 0.75, 0.25]), 0.5), Some(0.25));
        assert_eq!(nearest_stop(&[], 0.5), None);
        // Visibility does not affect snapping.
        let mixed = [DiscreteStop::hidden(0.2), DiscreteStop::visible(0.9)];
        assert_eq!(nearest_stop(&mixed, 0.3), Some(0.2));
    }

    #[test]
    fn test_multi_touch_skips_snapping() {
        let engine = engine(0.0, 100.0, StepPolicy::Uniform(50.0));
        assert_eq!(engine.value_from_drag(36.0, thumb(0.0), 1), 0.0);
        assert!((engine.value_from_drag(36.0, thumb(0.0), 2) - 20.0).abs() < 1e-4);
        assert_eq!(engine.value_from_drag(400.0, thumb(0.0), 3), 100.0);
    }

    #[test]
    fn test_set_current_value_is_verbatim() {
        let engine = engine(0.0, 1.0, StepPolicy::None);
        engine.set_current_value(4.0);
        assert_eq!(engine.current_value(), 4.0);
    }

    #[test]
    fn test_animation_is_handed_off() {
        let recorder = RecordingAnimator::new();
        let mut engine = ValueEngine::new(
            Range::default(),
            StepPolicy::None,
            0.0,
            Box::new(recorder.clone()),
        );
        let kind = AnimationKind::Spring(SpringConfig::default());
        engine.animate_current_value_to(0.8, kind);

        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, 0.8);
        assert_eq!(requests[0].kind, kind);
        assert_eq!(engine.current_value(), 0.0);

        engine.interrupt_animation();
        assert!(!recorder.finish_last());
        assert_eq!(engine.current_value(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_unstepped_round_trip(ratio in 0.0f32..=1.0) {
            let engine = engine(-50.0, 150.0, StepPolicy::None);
            let value = -50.0 + ratio * 200.0;
            let displacement = engine.ratio_of(value) * 180.0;
            let result = engine.value_from_drag(displacement, thumb(0.0), 1);
            prop_assert!((result - value).abs() < 1e-3);
        }

        #[test]
        fn prop_output_stays_in_range(
            displacement in -10_000.0f32..10_000.0,
            anchor in -500.0f32..500.0,
            contacts in 0usize..4,
        ) {
            for policy in [
                StepPolicy::None,
                StepPolicy::Uniform(7.0),
                StepPolicy::DiscreteStops(stops(&[0.0, 33.0, 100.0])),
            ] {
                let engine = engine(0.0, 100.0, policy);
                let value = engine.value_from_drag(displacement, thumb(anchor), contacts);
                prop_assert!((0.0..=100.0).contains(&value));
                let tapped = engine.value_from_drag(displacement, DragOrigin::TrackTap, contacts);
                prop_assert!((0.0..=100.0).contains(&tapped));
            }
        }

        #[test]
        fn prop_uniform_lands_on_grid(displacement in -100.0f32..400.0) {
            let engine = engine(3.0, 83.0, StepPolicy::Uniform(8.0));
            let value = engine.value_from_drag(displacement, thumb(0.0), 1);
            let k = (value - 3.0) / 8.0;
            prop_assert!((k - k.round()).abs() < 1e-3);
            prop_assert!((3.0..=83.0).contains(&value));
        }
    }
}
