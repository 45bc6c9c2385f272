//! Shared primitives for slidekit components.
//!
//! This crate holds what every interactive control needs but no control owns:
//!
//! - [`px`]: fractional pixel geometry used by layout measurements and hit-testing
//! - [`color`]: configuration colors
//! - [`prop`]: identity-compared callback handles for `*Args` structs
//! - [`observable`]: the [`ObservableValue`] cell that animated state lives in
//! - [`animation`]: the [`Animator`] capability that advances observable values
//! - [`focus_state`]: the process-wide single focus owner
//! - [`logging`]: a default `tracing` subscriber for binaries
//!
//! Everything here is synchronous. Components are driven from the host's UI
//! event thread; shared handles are `Send + Sync` so hosts are free to move
//! them across threads anyway.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod color;
pub mod focus_state;
pub mod logging;
pub mod observable;
pub mod prop;
pub mod px;

pub use crate::{
    animation::{
        AnimationKind, AnimationOptions, AnimationRequest, AnimationType, Animator, Easing,
        ImmediateAnimator, SpringConfig, TimingConfig,
    },
    color::Color,
    focus_state::Focus,
    observable::{ObservableValue, SubscriptionId, WriteToken},
    prop::{Callback, CallbackWith},
    px::{PxPosition, PxRect, PxSize},
};

#[cfg(any(test, feature = "testing"))]
pub use crate::animation::RecordingAnimator;
