//! A draggable control for picking a value in a range.
//!
//! ## Usage
//!
//! Build a [`Slider`] from [`SliderArgs`] and an [`Animator`], then feed it
//! what the host observes: layout measurements through [`Slider::on_layout`],
//! thumb drags through [`Slider::on_gesture`], and taps on the track or on
//! step markers. Every handler runs the matching `on_*` callback and returns
//! the [`SliderEvent`]s it produced, in order.
//!
//! Values may be continuous, snapped to a uniform `step`, or snapped to an
//! explicit list of `discrete_stops`.
use derive_setters::Setters;
use slidekit_ui::{
    AnimationKind, AnimationOptions, AnimationType, Animator, CallbackWith, Color, PxRect, PxSize,
    SubscriptionId,
};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::touchable::{Touchable, TouchableArgs, TouchableEvent, TouchableInput};

use steps::step_markers;
use touch_target::{compute_touch_rect, contains_point};

pub use interaction::{DragSession, GestureCoordinator, GestureEvent, SliderEvent, SliderEvents};
pub use layout::{LayoutRegion, LayoutSnapshot, LayoutTracker, MeasureOutcome};
pub use steps::{MAX_STEP_MARKERS, StepMarker};
pub use value::{DiscreteStop, DragOrigin, Range, StepPolicy, ValueEngine};

mod interaction;
mod layout;
mod steps;
mod touch_target;
mod value;

/// Rejected slider configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// A range bound is NaN or infinite.
    #[error("range bounds must be finite, got {minimum}..{maximum}")]
    NonFiniteBound {
        /// Configured minimum.
        minimum: f32,
        /// Configured maximum.
        maximum: f32,
    },
    /// `minimum >= maximum`.
    #[error("minimum {minimum} must be below maximum {maximum}")]
    DegenerateRange {
        /// Configured minimum.
        minimum: f32,
        /// Configured maximum.
        maximum: f32,
    },
    /// `maximum - minimum` overflows to infinity.
    #[error("range {minimum}..{maximum} is too wide to represent its span")]
    SpanOverflow {
        /// Configured minimum.
        minimum: f32,
        /// Configured maximum.
        maximum: f32,
    },
    /// Negative or non-finite step.
    #[error("step must be a finite non-negative number, got {0}")]
    InvalidStep(f32),
    /// The step does not fit in the range even once.
    #[error("step {step} is larger than the range span {span}")]
    StepExceedsRange {
        /// Configured step.
        step: f32,
        /// `maximum - minimum`.
        span: f32,
    },
    /// `discrete_stops` was set to an empty list.
    #[error("discrete stops must not be empty")]
    EmptyDiscreteStops,
    /// A stop is NaN or infinite.
    #[error("discrete stop {0} is not finite")]
    NonFiniteStop(f32),
    /// A stop lies outside the range.
    #[error("discrete stop {value} is outside {minimum}..={maximum}")]
    StopOutOfRange {
        /// The offending stop.
        value: f32,
        /// Range minimum.
        minimum: f32,
        /// Range maximum.
        maximum: f32,
    },
    /// Both a positive `step` and `discrete_stops` were given.
    #[error("step and discrete stops are mutually exclusive")]
    ConflictingStepPolicies,
    /// The thumb touch size is negative or non-finite.
    #[error("thumb touch size must be finite and non-negative, got {width}x{height}")]
    InvalidTouchSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
}

/// Arguments for [`Slider`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct SliderArgs {
    /// Initial value. Clamped into the range.
    pub value: f32,
    /// Ignore drags, taps and step presses.
    pub disabled: bool,
    /// Lower bound of the range.
    pub minimum_value: f32,
    /// Upper bound of the range.
    pub maximum_value: f32,
    /// Uniform step; `0` means continuous.
    pub step: f32,
    /// Explicit values to snap to. Exclusive with `step`.
    #[setters(skip)]
    pub discrete_stops: Option<Vec<DiscreteStop>>,
    /// Color of the filled part of the track.
    pub minimum_track_tint_color: Color,
    /// Color of the unfilled part of the track.
    pub maximum_track_tint_color: Color,
    /// Color of the thumb.
    pub thumb_tint_color: Color,
    /// Hit area around the thumb.
    pub thumb_touch_size: PxSize,
    /// Animate external value updates instead of jumping.
    pub animate_transitions: bool,
    /// Animation family used when `animate_transitions` is set.
    pub animation_type: AnimationType,
    /// Overrides for the selected animation family.
    pub animation_config: AnimationOptions,
    /// Whether step markers are keyboard tab stops. Defaults to `!disabled`.
    #[setters(strip_option)]
    pub is_focusable: Option<bool>,
    /// Expose the thumb's touch rect through [`Slider::debug_touch_rect`].
    pub debug_touch_area: bool,
    /// Called with each user-driven value.
    #[setters(skip)]
    pub on_value_change: CallbackWith<f32>,
    /// Called when a thumb drag begins.
    #[setters(skip)]
    pub on_sliding_start: CallbackWith<f32>,
    /// Called when a thumb drag ends.
    #[setters(skip)]
    pub on_sliding_complete: CallbackWith<f32>,
    /// Called when the track is tapped.
    #[setters(skip)]
    pub on_track_press: CallbackWith<f32>,
    /// Called when a step marker is pressed.
    #[setters(skip)]
    pub on_step_press: CallbackWith<f32>,
    /// Called when the pointer enters (`Some`) or leaves (`None`) a marker.
    #[setters(skip)]
    pub on_step_hover: CallbackWith<Option<f32>>,
    /// Called when a marker gains (`Some`) or loses (`None`) focus.
    #[setters(skip)]
    pub on_focus_change: CallbackWith<Option<f32>>,
    /// Called when the pointer enters or leaves the thumb.
    #[setters(skip)]
    pub on_hover: CallbackWith<bool>,
}

impl Default for SliderArgs {
    fn default() -> Self {
        Self {
            value: 0.0,
            disabled: false,
            minimum_value: 0.0,
            maximum_value: 1.0,
            step: 0.0,
            discrete_stops: None,
            minimum_track_tint_color: Color::from_rgb_u8(0x3f, 0x3f, 0x3f),
            maximum_track_tint_color: Color::from_rgb_u8(0xb3, 0xb3, 0xb3),
            thumb_tint_color: Color::from_rgb_u8(0x34, 0x34, 0x34),
            thumb_touch_size: PxSize::new(24.0, 24.0),
            animate_transitions: false,
            animation_type: AnimationType::default(),
            animation_config: AnimationOptions::default(),
            is_focusable: None,
            debug_touch_area: false,
            on_value_change: CallbackWith::noop(),
            on_sliding_start: CallbackWith::noop(),
            on_sliding_complete: CallbackWith::noop(),
            on_track_press: CallbackWith::noop(),
            on_step_press: CallbackWith::noop(),
            on_step_hover: CallbackWith::noop(),
            on_focus_change: CallbackWith::noop(),
            on_hover: CallbackWith::noop(),
        }
    }
}

impl SliderArgs {
    /// Sets the discrete stops.
    pub fn discrete_stops(mut self, stops: impl IntoIterator<Item = DiscreteStop>) -> Self {
        self.discrete_stops = Some(stops.into_iter().collect());
        self
    }

    /// Sets discrete stops that are all drawn.
    pub fn discrete_values(self, values: impl IntoIterator<Item = f32>) -> Self {
        self.discrete_stops(values.into_iter().map(DiscreteStop::visible))
    }

    /// Sets the value-change handler.
    pub fn on_value_change(mut self, handler: impl Into<CallbackWith<f32>>) -> Self {
        self.on_value_change = handler.into();
        self
    }

    /// Sets the drag-start handler.
    pub fn on_sliding_start(mut self, handler: impl Into<CallbackWith<f32>>) -> Self {
        self.on_sliding_start = handler.into();
        self
    }

    /// Sets the drag-end handler.
    pub fn on_sliding_complete(mut self, handler: impl Into<CallbackWith<f32>>) -> Self {
        self.on_sliding_complete = handler.into();
        self
    }

    /// Sets the track-tap handler.
    pub fn on_track_press(mut self, handler: impl Into<CallbackWith<f32>>) -> Self {
        self.on_track_press = handler.into();
        self
    }

    /// Sets the step-press handler.
    pub fn on_step_press(mut self, handler: impl Into<CallbackWith<f32>>) -> Self {
        self.on_step_press = handler.into();
        self
    }

    /// Sets the step-hover handler.
    pub fn on_step_hover(mut self, handler: impl Into<CallbackWith<Option<f32>>>) -> Self {
        self.on_step_hover = handler.into();
        self
    }

    /// Sets the marker focus handler.
    pub fn on_focus_change(mut self, handler: impl Into<CallbackWith<Option<f32>>>) -> Self {
        self.on_focus_change = handler.into();
        self
    }

    /// Sets the thumb hover handler.
    pub fn on_hover(mut self, handler: impl Into<CallbackWith<bool>>) -> Self {
        self.on_hover = handler.into();
        self
    }

    fn marker_args(&self) -> TouchableArgs {
        TouchableArgs {
            disabled: self.disabled,
            is_tab_stop: self.is_focusable,
            ..TouchableArgs::default()
        }
    }
}

/// A configured slider instance.
pub struct Slider {
    args: SliderArgs,
    animation: AnimationKind,
    tracker: LayoutTracker,
    engine: ValueEngine,
    gestures: GestureCoordinator,
    markers: Vec<StepMarker>,
    marker_touchables: Vec<Touchable>,
}

impl Slider {
    /// Validates `args` and builds a slider that animates through `animator`.
    pub fn new(args: SliderArgs, animator: Box<dyn Animator>) -> Result<Self, ConfigurationError> {
        let range = Range::new(args.minimum_value, args.maximum_value)?;
        let policy = StepPolicy::from_config(&range, args.step, args.discrete_stops.as_deref())?;
        let touch = args.thumb_touch_size;
        if !touch.is_valid() {
            return Err(ConfigurationError::InvalidTouchSize {
                width: touch.width,
                height: touch.height,
            });
        }

        let initial = ingest(&range, args.value);
        let markers = step_markers(&range, &policy);
        let marker_touchables = markers
            .iter()
            .map(|_| Touchable::new(args.marker_args()))
            .collect();
        let animation = args.animation_config.resolve(args.animation_type);
        debug!(?range, ?policy, initial, "slider created");

        Ok(Self {
            animation,
            tracker: LayoutTracker::new(),
            engine: ValueEngine::new(range, policy, initial, animator),
            gestures: GestureCoordinator::new(args.disabled),
            markers,
            marker_touchables,
            args,
        })
    }

    /// The arguments the slider was built with.
    pub fn args(&self) -> &SliderArgs {
        &self.args
    }

    /// The animation used for external value updates.
    pub fn animation(&self) -> AnimationKind {
        self.animation
    }

    /// The value engine.
    pub fn engine(&self) -> &ValueEngine {
        &self.engine
    }

    /// Records a layout measurement; a complete layout is handed to the
    /// value engine.
    pub fn on_layout(&mut self, region: LayoutRegion, size: PxSize) -> MeasureOutcome {
        let outcome = self.tracker.record_measurement(region, size);
        if let MeasureOutcome::Published(snapshot) = outcome {
            self.engine.set_layout(snapshot);
        }
        outcome
    }

    /// Applies a thumb gesture.
    pub fn on_gesture(&mut self, event: GestureEvent) -> SliderEvents {
        let events = self.gestures.handle(&self.engine, event);
        self.dispatch(events)
    }

    /// Applies a tap on the track at `x`, measured from the container's left
    /// edge.
    pub fn on_track_press(&mut self, x: f32) -> SliderEvents {
        let events = self.gestures.on_track_tap(&self.engine, x);
        self.dispatch(events)
    }

    /// Applies a press on the step marker for `value`.
    pub fn on_step_press(&mut self, value: f32) -> SliderEvents {
        let events = self.gestures.on_step_press(&self.engine, value);
        self.dispatch(events)
    }

    /// Reports the pointer entering (`Some`) or leaving (`None`) a marker.
    pub fn on_step_hover(&mut self, value: Option<f32>) -> SliderEvents {
        let events = self.gestures.on_step_hover(value);
        self.dispatch(events)
    }

    /// Reports a marker gaining (`Some`) or losing (`None`) focus.
    pub fn on_focus_change(&mut self, value: Option<f32>) -> SliderEvents {
        let events = self.gestures.on_focus_change(value);
        self.dispatch(events)
    }

    /// Reports the pointer entering or leaving the thumb.
    pub fn on_thumb_hover(&mut self, hovered: bool) -> SliderEvents {
        let events = self.gestures.on_thumb_hover(hovered);
        self.dispatch(events)
    }

    /// Routes raw input on the marker at `index` through its touchable.
    ///
    /// Presses (including Enter) select the marker's value, focus changes
    /// report the marker's value, and pointer enter/leave report hover.
    pub fn on_step_marker(&mut self, index: usize, input: TouchableInput) -> SliderEvents {
        let (Some(marker), Some(touchable)) = (
            self.markers.get(index).copied(),
            self.marker_touchables.get_mut(index),
        ) else {
            warn!(index, "input for a step marker that does not exist");
            return SmallVec::new();
        };

        let events = match touchable.handle(input) {
            Some(TouchableEvent::Pressed) => {
                self.gestures.on_step_press(&self.engine, marker.value)
            }
            Some(TouchableEvent::FocusGained) => self.gestures.on_focus_change(Some(marker.value)),
            Some(TouchableEvent::FocusLost) => self.gestures.on_focus_change(None),
            Some(TouchableEvent::PointerEntered) => self.gestures.on_step_hover(Some(marker.value)),
            Some(TouchableEvent::PointerLeft) => self.gestures.on_step_hover(None),
            _ => SmallVec::new(),
        };
        self.dispatch(events)
    }

    /// The touchable behind the marker at `index`.
    pub fn step_marker_touchable(&self, index: usize) -> Option<&Touchable> {
        self.marker_touchables.get(index)
    }

    /// Enables or disables user input, markers included.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.args.disabled = disabled;
        self.gestures.set_disabled(disabled);
        let marker_args = self.args.marker_args();
        for touchable in &mut self.marker_touchables {
            touchable.set_args(marker_args.clone());
        }
    }

    /// Applies a value supplied from outside, such as a host state change.
    ///
    /// Out-of-range values are clamped. A value equal to the current one is
    /// ignored. No callbacks fire.
    pub fn set_value(&mut self, value: f32) {
        let value = ingest(self.engine.range(), value);
        if value == self.engine.current_value() {
            return;
        }
        if self.args.animate_transitions {
            self.engine.animate_current_value_to(value, self.animation);
        } else {
            self.engine.set_current_value(value);
        }
    }

    /// The current value.
    pub fn value(&self) -> f32 {
        self.engine.current_value()
    }

    /// Whether container, track and thumb have all been measured.
    pub fn is_ready(&self) -> bool {
        self.tracker.is_ready()
    }

    /// Whether the thumb should be shown. Hidden until the layout is known.
    pub fn thumb_visible(&self) -> bool {
        self.tracker.is_ready()
    }

    /// Whether a thumb drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Left edge of the thumb.
    pub fn thumb_left(&self) -> f32 {
        self.engine.pixel_offset_of(self.value())
    }

    /// Width of the filled track segment.
    pub fn minimum_track_width(&self) -> f32 {
        self.engine.minimum_track_width(self.value())
    }

    /// Hit area of the thumb, once the layout is known.
    pub fn touch_rect(&self) -> Option<PxRect> {
        let layout = self.engine.layout()?;
        Some(compute_touch_rect(
            self.thumb_left(),
            layout,
            self.args.thumb_touch_size,
        ))
    }

    /// The touch rect when `debug_touch_area` is enabled.
    pub fn debug_touch_rect(&self) -> Option<PxRect> {
        if self.args.debug_touch_area {
            self.touch_rect()
        } else {
            None
        }
    }

    /// Whether `(x, y)` falls inside the thumb's hit area.
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.touch_rect()
            .is_some_and(|rect| contains_point(&rect, x, y))
    }

    /// Markers along the track.
    pub fn step_markers(&self) -> &[StepMarker] {
        &self.markers
    }

    /// Registers an observer of the live value, including animation frames.
    pub fn subscribe(&self, handler: impl Into<CallbackWith<f32>>) -> SubscriptionId {
        self.engine.observable().subscribe(handler)
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.engine.observable().unsubscribe(id)
    }

    fn dispatch(&self, events: SliderEvents) -> SliderEvents {
        for event in &events {
            match *event {
                SliderEvent::SlidingStart(v) => self.args.on_sliding_start.call(v),
                SliderEvent::ValueChange(v) => self.args.on_value_change.call(v),
                SliderEvent::SlidingComplete(v) => self.args.on_sliding_complete.call(v),
                SliderEvent::TrackPress(v) => self.args.on_track_press.call(v),
                SliderEvent::StepPress(v) => self.args.on_step_press.call(v),
                SliderEvent::StepHover(v) => self.args.on_step_hover.call(v),
                SliderEvent::FocusChange(v) => self.args.on_focus_change.call(v),
                SliderEvent::ThumbHover(hovered) => self.args.on_hover.call(hovered),
            }
        }
        events
    }
}

fn ingest(range: &Range, value: f32) -> f32 {
    if !value.is_finite() {
        warn!(value, "non-finite slider value replaced by the minimum");
        return range.minimum();
    }
    if !range.contains(value) {
        let clamped = range.clamp(value);
        warn!(value, clamped, "slider value outside its range was clamped");
        return clamped;
    }
    value
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use slidekit_ui::{
        ImmediateAnimator, RecordingAnimator, SpringConfig, focus_state::serial_focus_guard,
    };

    use super::*;
    use crate::touchable::Key;

    fn measured(mut slider: Slider, container: f32, thumb: f32) -> Slider {
        slider.on_layout(LayoutRegion::Container, PxSize::new(container, 40.0));
        slider.on_layout(LayoutRegion::Track, PxSize::new(container, 4.0));
        slider.on_layout(LayoutRegion::Thumb, PxSize::new(thumb, 20.0));
        slider
    }

    fn build(args: SliderArgs) -> Slider {
        Slider::new(args, Box::new(ImmediateAnimator)).expect("valid slider args")
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[derive(Default, Clone)]
    struct Log(Arc<Mutex<Vec<(&'static str, f32)>>>);

    impl Log {
        fn sink(&self, name: &'static str) -> CallbackWith<f32> {
            let log = self.0.clone();
            CallbackWith::new(move |v: f32| log.lock().push((name, v)))
        }

        fn entries(&self) -> Vec<(&'static str, f32)> {
            self.0.lock().clone()
        }
    }

    #[test]
    fn test_drag_end_to_end() {
        let log = Log::default();
        let args = SliderArgs::default()
            .minimum_value(0.0)
            .maximum_value(100.0)
            .value(20.0)
            .on_sliding_start(log.sink("start"))
            .on_value_change(log.sink("change"))
            .on_sliding_complete(log.sink("complete"));
        let mut slider = measured(build(args), 200.0, 20.0);

        slider.on_gesture(GestureEvent::Start);
        slider.on_gesture(GestureEvent::Move {
            dx: 50.0,
            dy: 0.0,
            active_contacts: 1,
        });
        let expected = 20.0 + 50.0 / 180.0 * 100.0;
        assert!(approx(slider.value(), expected));
        assert!((slider.value() - 47.78).abs() < 1e-2);

        slider.on_gesture(GestureEvent::End {
            dx: 50.0,
            dy: 0.0,
            active_contacts: 0,
        });
        let entries = log.entries();
        let names: Vec<_> = entries.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["start", "change", "change", "complete"]);
        assert_eq!(entries[0].1, 20.0);
        let last_change = entries[2].1;
        assert_eq!(entries[3].1, last_change);
        assert!(approx(last_change, expected));
        assert!(!slider.is_dragging());
    }

    #[test]
    fn test_readiness_gates_geometry() {
        let mut slider = build(SliderArgs::default().value(0.5));
        assert!(!slider.thumb_visible());
        assert_eq!(slider.touch_rect(), None);
        assert_eq!(slider.thumb_left(), 0.0);
        assert!(!slider.hit_test(0.0, 0.0));

        slider.on_layout(LayoutRegion::Thumb, PxSize::new(20.0, 20.0));
        slider.on_layout(LayoutRegion::Container, PxSize::new(220.0, 40.0));
        assert!(!slider.is_ready());
        assert_eq!(
            slider.on_layout(LayoutRegion::Track, PxSize::new(220.0, 4.0)),
            MeasureOutcome::Published(LayoutSnapshot {
                container: PxSize::new(220.0, 40.0),
                track: PxSize::new(220.0, 4.0),
                thumb: PxSize::new(20.0, 20.0),
            })
        );
        assert!(slider.thumb_visible());
        assert_eq!(
            slider.on_layout(LayoutRegion::Track, PxSize::new(220.0, 4.0)),
            MeasureOutcome::Unchanged
        );

        assert_eq!(slider.thumb_left(), 100.0);
        assert_eq!(slider.minimum_track_width(), 110.0);
        // 24x24 touch area around a 20 px thumb in a 40 px tall container.
        assert_eq!(slider.touch_rect(), Some(PxRect::new(100.0, 8.0, 24.0, 24.0)));
        assert!(slider.hit_test(110.0, 20.0));
        assert!(!slider.hit_test(90.0, 20.0));
        assert_eq!(slider.debug_touch_rect(), None);
    }

    #[test]
    fn test_touch_rect_collapses_when_sizes_match() {
        let args = SliderArgs::default()
            .thumb_touch_size(PxSize::new(40.0, 40.0))
            .debug_touch_area(true);
        let mut slider = build(args);
        for region in [LayoutRegion::Container, LayoutRegion::Track, LayoutRegion::Thumb] {
            slider.on_layout(region, PxSize::new(40.0, 40.0));
        }
        assert_eq!(
            slider.debug_touch_rect(),
            Some(PxRect::new(0.0, 0.0, 40.0, 40.0))
        );
    }

    #[test]
    fn test_configuration_errors() {
        let reject = |args: SliderArgs| Slider::new(args, Box::new(ImmediateAnimator)).err();

        assert!(matches!(
            reject(SliderArgs::default().minimum_value(5.0).maximum_value(5.0)),
            Some(ConfigurationError::DegenerateRange { .. })
        ));
        assert_eq!(
            reject(SliderArgs::default().step(0.5).discrete_values([0.0, 1.0])),
            Some(ConfigurationError::ConflictingStepPolicies)
        );
        assert!(matches!(
            reject(SliderArgs::default().thumb_touch_size(PxSize::new(-1.0, 24.0))),
            Some(ConfigurationError::InvalidTouchSize { .. })
        ));
        assert_eq!(
            reject(SliderArgs::default().discrete_stops(Vec::new())),
            Some(ConfigurationError::EmptyDiscreteStops)
        );
        assert!(reject(SliderArgs::default().step(0.25)).is_none());
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let slider = build(SliderArgs::default().value(3.0));
        assert_eq!(slider.value(), 1.0);
        let slider = build(SliderArgs::default().value(f32::NAN));
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_set_value_clamps_without_callbacks() {
        let log = Log::default();
        let args = SliderArgs::default()
            .minimum_value(0.0)
            .maximum_value(10.0)
            .on_value_change(log.sink("change"));
        let mut slider = build(args);

        slider.set_value(25.0);
        assert_eq!(slider.value(), 10.0);
        slider.set_value(-3.0);
        assert_eq!(slider.value(), 0.0);
        assert!(log.entries().is_empty());

        // The engine itself stores whatever it is given.
        slider.engine().set_current_value(25.0);
        assert_eq!(slider.value(), 25.0);
    }

    #[test]
    fn test_animated_set_value() {
        let recorder = RecordingAnimator::new();
        let args = SliderArgs::default()
            .animate_transitions(true)
            .animation_type(AnimationType::Spring)
            .animation_config(AnimationOptions {
                friction: Some(12.0),
                ..Default::default()
            });
        let mut slider = Slider::new(args, Box::new(recorder.clone())).expect("valid slider args");
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = observed.clone();
        slider.subscribe(move |v: f32| sink.lock().push(v));

        slider.set_value(0.75);
        assert_eq!(slider.value(), 0.0);
        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, 0.75);
        assert_eq!(
            requests[0].kind,
            AnimationKind::Spring(SpringConfig {
                friction: 12.0,
                tension: 100.0,
            })
        );

        assert!(recorder.finish_last());
        assert_eq!(slider.value(), 0.75);
        assert_eq!(*observed.lock(), vec![0.75]);

        // Same value: nothing requested.
        slider.set_value(0.75);
        assert_eq!(recorder.requests().len(), 1);
    }

    #[test]
    fn test_gesture_start_interrupts_animation() {
        let recorder = RecordingAnimator::new();
        let args = SliderArgs::default().animate_transitions(true);
        let slider = Slider::new(args, Box::new(recorder.clone())).expect("valid slider args");
        let mut slider = measured(slider, 200.0, 20.0);

        slider.set_value(1.0);
        slider.on_gesture(GestureEvent::Start);
        assert!(!recorder.finish_last());
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_track_press_and_disabled() {
        let log = Log::default();
        let args = SliderArgs::default()
            .maximum_value(100.0)
            .on_track_press(log.sink("track"))
            .on_value_change(log.sink("change"));
        let mut slider = measured(build(args), 200.0, 20.0);

        let events = slider.on_track_press(50.0);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::ValueChange(25.0), SliderEvent::TrackPress(25.0)]
        );
        assert_eq!(log.entries(), vec![("change", 25.0), ("track", 25.0)]);

        slider.set_disabled(true);
        assert!(slider.on_track_press(150.0).is_empty());
        assert!(slider.on_step_press(75.0).is_empty());
        assert_eq!(slider.value(), 25.0);
        assert_eq!(
            slider.on_thumb_hover(true).as_slice(),
            &[SliderEvent::ThumbHover(true)]
        );
    }

    #[test]
    fn test_discrete_stop_markers() {
        let log = Log::default();
        let args = SliderArgs::default()
            .discrete_values([0.0, 0.334, 0.668, 1.0])
            .value(0.5)
            .on_step_press(log.sink("step"));
        let mut slider = measured(build(args), 200.0, 20.0);

        let markers = slider.step_markers();
        assert_eq!(markers.len(), 4);
        let filled: Vec<bool> = markers.iter().map(|m| m.is_filled(slider.value())).collect();
        assert_eq!(filled, vec![true, true, false, false]);

        let events = slider.on_step_marker(2, TouchableInput::Press);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::ValueChange(0.668), SliderEvent::StepPress(0.668)]
        );
        assert_eq!(slider.value(), 0.668);

        let events = slider.on_step_marker(3, TouchableInput::KeyDown(Key::Enter));
        assert_eq!(events.last(), Some(&SliderEvent::StepPress(1.0)));
        assert_eq!(log.entries(), vec![("step", 0.668), ("step", 1.0)]);

        assert!(slider.on_step_marker(9, TouchableInput::Press).is_empty());
    }

    #[test]
    fn test_hidden_stops_snap_but_never_fill() {
        let args = SliderArgs::default()
            .discrete_stops([
                DiscreteStop::visible(0.0),
                DiscreteStop::hidden(0.5),
                DiscreteStop::visible(1.0),
            ])
            .value(0.8);
        let mut slider = measured(build(args), 200.0, 20.0);

        let filled: Vec<bool> = slider
            .step_markers()
            .iter()
            .map(|m| m.is_filled(slider.value()))
            .collect();
        assert_eq!(filled, vec![true, false, false]);

        // 100 of 180 px is a candidate of 0.555..., nearest the hidden stop.
        slider.on_gesture(GestureEvent::Start);
        slider.on_gesture(GestureEvent::End {
            dx: 100.0 - 144.0,
            dy: 0.0,
            active_contacts: 0,
        });
        assert_eq!(slider.value(), 0.5);
    }

    #[test]
    fn test_tiny_step_snaps_without_markers() {
        let mut slider = measured(build(SliderArgs::default().step(1e-6)), 200.0, 20.0);
        assert!(slider.step_markers().is_empty());
        assert!(slider.step_marker_touchable(0).is_none());

        slider.on_gesture(GestureEvent::Start);
        slider.on_gesture(GestureEvent::End {
            dx: 90.0,
            dy: 0.0,
            active_contacts: 0,
        });
        assert!(approx(slider.value(), 0.5));
    }

    #[test]
    fn test_overflowing_range_is_rejected() {
        let args = SliderArgs::default()
            .minimum_value(-f32::MAX)
            .maximum_value(f32::MAX);
        assert!(matches!(
            Slider::new(args, Box::new(ImmediateAnimator)).err(),
            Some(ConfigurationError::SpanOverflow { .. })
        ));
    }

    #[test]
    fn test_marker_hover_and_focus() {
        let _guard = serial_focus_guard();
        let args = SliderArgs::default().step(0.5).is_focusable(false);
        let mut slider = build(args);
        assert_eq!(slider.step_markers().len(), 3);
        assert!(
            slider
                .step_marker_touchable(0)
                .is_some_and(|t| !t.is_tab_stop())
        );

        assert_eq!(
            slider.on_step_marker(1, TouchableInput::MouseEnter).as_slice(),
            &[SliderEvent::StepHover(Some(0.5))]
        );
        assert_eq!(
            slider.on_step_marker(1, TouchableInput::MouseLeave).as_slice(),
            &[SliderEvent::StepHover(None)]
        );
        assert_eq!(
            slider.on_step_marker(2, TouchableInput::GotFocus).as_slice(),
            &[SliderEvent::FocusChange(Some(1.0))]
        );
        assert!(
            slider
                .step_marker_touchable(2)
                .is_some_and(|t| t.is_focused())
        );
        assert_eq!(
            slider.on_step_marker(2, TouchableInput::LostFocus).as_slice(),
            &[SliderEvent::FocusChange(None)]
        );

        slider.set_disabled(true);
        assert!(slider.on_step_marker(1, TouchableInput::Press).is_empty());
        assert_eq!(slider.value(), 0.0);
    }
}
