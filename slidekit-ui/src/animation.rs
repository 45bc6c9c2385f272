//! Animation capability.
//!
//! Components never interpolate values themselves. They describe *what* to
//! animate with an [`AnimationRequest`] and hand it to an [`Animator`]
//! supplied by the host, which advances the [`ObservableValue`] on later
//! frames. Requests are fire-and-forget: there is no completion callback and
//! observers read the value live.
//!
//! ## Defaults
//!
//! | kind   | parameters                                   |
//! |--------|----------------------------------------------|
//! | spring | friction `7`, tension `100`                  |
//! | timing | duration `150ms`, [`Easing::EaseInOut`], no delay |
//!
//! [`AnimationOptions`] overrides individual fields of the default for the
//! selected [`AnimationType`].

use std::time::Duration;

use crate::observable::{ObservableValue, WriteToken};

/// Which family of animation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnimationType {
    /// Physically based spring.
    Spring,
    /// Fixed-duration curve.
    #[default]
    Timing,
}

/// Named easing curves understood by animation drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Standard ease curve.
    Ease,
    /// Accelerating from zero velocity.
    EaseIn,
    /// Decelerating to zero velocity.
    EaseOut,
    /// Accelerating then decelerating.
    #[default]
    EaseInOut,
}

/// Spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Damping applied to the spring.
    pub friction: f32,
    /// Stiffness of the spring.
    pub tension: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            friction: 7.0,
            tension: 100.0,
        }
    }
}

/// Timing-curve parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    /// Total running time.
    pub duration: Duration,
    /// Curve shape.
    pub easing: Easing,
    /// Wait before starting.
    pub delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(150),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

/// A fully resolved animation description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Spring animation.
    Spring(SpringConfig),
    /// Timing animation.
    Timing(TimingConfig),
}

impl AnimationKind {
    /// The family this kind belongs to.
    pub fn animation_type(&self) -> AnimationType {
        match self {
            AnimationKind::Spring(_) => AnimationType::Spring,
            AnimationKind::Timing(_) => AnimationType::Timing,
        }
    }
}

/// Per-field overrides merged over the defaults of an [`AnimationType`].
///
/// Fields that do not apply to the selected type are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationOptions {
    /// Spring friction.
    pub friction: Option<f32>,
    /// Spring tension.
    pub tension: Option<f32>,
    /// Timing duration in milliseconds.
    pub duration_ms: Option<u64>,
    /// Timing easing.
    pub easing: Option<Easing>,
    /// Timing delay in milliseconds.
    pub delay_ms: Option<u64>,
}

impl AnimationOptions {
    /// Merges these overrides over the defaults for `animation_type`.
    ///
    /// ```
    /// use slidekit_ui::animation::{AnimationKind, AnimationOptions, AnimationType, SpringConfig};
    ///
    /// let options = AnimationOptions {
    ///     tension: Some(40.0),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     options.resolve(AnimationType::Spring),
    ///     AnimationKind::Spring(SpringConfig { friction: 7.0, tension: 40.0 })
    /// );
    /// ```
    pub fn resolve(&self, animation_type: AnimationType) -> AnimationKind {
        match animation_type {
            AnimationType::Spring => {
                let base = SpringConfig::default();
                AnimationKind::Spring(SpringConfig {
                    friction: self.friction.unwrap_or(base.friction),
                    tension: self.tension.unwrap_or(base.tension),
                })
            }
            AnimationType::Timing => {
                let base = TimingConfig::default();
                AnimationKind::Timing(TimingConfig {
                    duration: self
                        .duration_ms
                        .map(Duration::from_millis)
                        .unwrap_or(base.duration),
                    easing: self.easing.unwrap_or(base.easing),
                    delay: self
                        .delay_ms
                        .map(Duration::from_millis)
                        .unwrap_or(base.delay),
                })
            }
        }
    }
}

/// A request to move `value` towards `target`.
#[derive(Debug, Clone)]
pub struct AnimationRequest {
    /// Cell to animate.
    pub value: ObservableValue,
    /// Generation the driver must write under; see [`ObservableValue::drive`].
    pub token: WriteToken,
    /// Value at the time of the request.
    pub from: f32,
    /// Destination value.
    pub target: f32,
    /// Curve to use.
    pub kind: AnimationKind,
}

impl AnimationRequest {
    /// Claims a new write generation on `value` and builds a request.
    pub fn new(value: &ObservableValue, target: f32, kind: AnimationKind) -> Self {
        let token = value.claim();
        Self {
            from: value.get(),
            value: value.clone(),
            token,
            target,
            kind,
        }
    }
}

/// Host-provided animation driver.
///
/// Implementations must return promptly; interpolation happens on later
/// frames and must write through [`ObservableValue::drive`] so newer writers
/// win.
pub trait Animator: Send + Sync {
    /// Starts animating. Fire-and-forget.
    fn animate(&mut self, request: AnimationRequest);
}

/// Driver that jumps straight to the target.
///
/// Useful for headless hosts and reduced-motion settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateAnimator;

impl Animator for ImmediateAnimator {
    fn animate(&mut self, request: AnimationRequest) {
        request.value.drive(request.token, request.target);
    }
}

#[cfg(any(test, feature = "testing"))]
pub use recording::RecordingAnimator;

#[cfg(any(test, feature = "testing"))]
mod recording {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::{AnimationRequest, Animator};

    /// Driver that only records requests, for tests.
    ///
    /// Clones share the same log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingAnimator {
        requests: Arc<Mutex<Vec<AnimationRequest>>>,
    }

    impl RecordingAnimator {
        /// Creates an empty recorder.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns every recorded request.
        pub fn requests(&self) -> Vec<AnimationRequest> {
            self.requests.lock().clone()
        }

        /// Completes the most recent request, as a driver would on its last
        /// frame. Returns whether the write landed.
        pub fn finish_last(&self) -> bool {
            let last = self.requests.lock().last().cloned();
            match last {
                Some(request) => request.value.drive(request.token, request.target),
                None => false,
            }
        }
    }

    impl Animator for RecordingAnimator {
        fn animate(&mut self, request: AnimationRequest) {
            self.requests.lock().push(request);
        }
    }
}
