//! Replays a scripted session through two sliders and logs what they report.
//!
//! Run with `RUST_LOG=info` (the default) or `RUST_LOG=trace` to see the
//! value engine at work.

use slidekit_components::{
    slider::{ConfigurationError, GestureEvent, LayoutRegion, Slider, SliderArgs, SliderEvent},
    touchable::{Key, TouchableInput},
};
use slidekit_ui::{AnimationType, ImmediateAnimator, PxSize, logging::init_tracing};
use tracing::{error, info};

fn measure(slider: &mut Slider, width: f32) {
    slider.on_layout(LayoutRegion::Container, PxSize::new(width, 40.0));
    slider.on_layout(LayoutRegion::Track, PxSize::new(width, 4.0));
    slider.on_layout(LayoutRegion::Thumb, PxSize::new(20.0, 20.0));
}

fn log_events(label: &str, events: &[SliderEvent]) {
    for event in events {
        info!(label, ?event, "slider event");
    }
}

fn continuous_demo() -> Result<(), ConfigurationError> {
    let args = SliderArgs::default()
        .maximum_value(100.0)
        .value(20.0)
        .animate_transitions(true)
        .animation_type(AnimationType::Spring);
    let mut slider = Slider::new(args, Box::new(ImmediateAnimator))?;
    slider.subscribe(|v: f32| info!(value = v, "continuous slider value"));
    measure(&mut slider, 200.0);
    info!(thumb_left = slider.thumb_left(), touch_rect = ?slider.touch_rect(), "layout ready");

    log_events("continuous", &slider.on_gesture(GestureEvent::Start));
    for dx in [10.0, 30.0, 50.0] {
        let events = slider.on_gesture(GestureEvent::Move {
            dx,
            dy: 0.0,
            active_contacts: 1,
        });
        log_events("continuous", &events);
    }
    log_events(
        "continuous",
        &slider.on_gesture(GestureEvent::End {
            dx: 50.0,
            dy: 0.0,
            active_contacts: 0,
        }),
    );
    log_events("continuous", &slider.on_track_press(150.0));

    slider.set_value(10.0);
    info!(value = slider.value(), "external update applied");
    Ok(())
}

fn discrete_demo() -> Result<(), ConfigurationError> {
    let args = SliderArgs::default()
        .discrete_values([0.0, 0.334, 0.668, 1.0])
        .on_step_press(|v: f32| info!(value = v, "stop selected"));
    let mut slider = Slider::new(args, Box::new(ImmediateAnimator))?;
    measure(&mut slider, 240.0);

    log_events("discrete", &slider.on_step_marker(1, TouchableInput::MouseEnter));
    log_events("discrete", &slider.on_step_marker(1, TouchableInput::Press));
    log_events(
        "discrete",
        &slider.on_step_marker(3, TouchableInput::KeyDown(Key::Enter)),
    );

    let filled = slider
        .step_markers()
        .iter()
        .filter(|marker| marker.is_filled(slider.value()))
        .count();
    info!(value = slider.value(), filled, "discrete slider settled");
    Ok(())
}

fn main() {
    init_tracing();

    if let Err(err) = continuous_demo().and_then(|()| discrete_demo()) {
        error!(%err, "demo slider rejected its configuration");
        std::process::exit(1);
    }
}
