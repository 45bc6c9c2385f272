//! Interactive controls built on [`slidekit_ui`].
//!
//! # Usage
//!
//! Controls here are headless: the host measures, draws and captures raw
//! input, and forwards what it sees to the control. The control answers
//! with values, geometry and callbacks.
//!
//! # Example
//!
//! ```
//! use slidekit_components::slider::{GestureEvent, LayoutRegion, Slider, SliderArgs};
//! use slidekit_ui::{ImmediateAnimator, PxSize};
//!
//! let args = SliderArgs::default()
//!     .maximum_value(100.0)
//!     .value(20.0)
//!     .on_value_change(|v: f32| println!("value: {v}"));
//! let mut slider = Slider::new(args, Box::new(ImmediateAnimator))?;
//!
//! slider.on_layout(LayoutRegion::Container, PxSize::new(200.0, 40.0));
//! slider.on_layout(LayoutRegion::Track, PxSize::new(200.0, 4.0));
//! slider.on_layout(LayoutRegion::Thumb, PxSize::new(20.0, 20.0));
//!
//! slider.on_gesture(GestureEvent::Start);
//! slider.on_gesture(GestureEvent::Move { dx: 90.0, dy: 0.0, active_contacts: 1 });
//! assert!((slider.value() - 70.0).abs() < 1e-3);
//! # Ok::<(), slidekit_components::slider::ConfigurationError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod slider;
pub mod touchable;
