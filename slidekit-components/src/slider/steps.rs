use tracing::warn;

use super::value::{Range, StepPolicy};

/// Uniform steps that would need more markers than this get none; snapping
/// still applies.
pub const MAX_STEP_MARKERS: usize = 1024;

/// A tappable tick along the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMarker {
    /// Value selected when the marker is pressed.
    pub value: f32,
    /// Whether the marker is drawn. Uniform-step markers are hit targets
    /// only; discrete stops carry their own flag.
    pub visible: bool,
}

impl StepMarker {
    /// Whether the marker sits inside the filled part of the track.
    pub fn is_filled(&self, current_value: f32) -> bool {
        self.visible && current_value > self.value
    }
}

/// Builds the markers for a policy.
///
/// Uniform steps produce `minimum, minimum + step, ...` below the maximum and
/// then the maximum itself, strictly increasing. Values that collapse onto
/// their predecessor in `f32` are dropped.
pub fn step_markers(range: &Range, policy: &StepPolicy) -> Vec<StepMarker> {
    match policy {
        StepPolicy::None => Vec::new(),
        StepPolicy::Uniform(step) => uniform_markers(range, *step),
        StepPolicy::DiscreteStops(stops) => stops
            .iter()
            .map(|stop| StepMarker {
                value: stop.value,
                visible: stop.visible,
            })
            .collect(),
    }
}

fn uniform_markers(range: &Range, step: f32) -> Vec<StepMarker> {
    let count = (range.span() / step).ceil();
    // Negated so a NaN count is rejected too.
    if !(count <= MAX_STEP_MARKERS as f32) {
        warn!(step, count, "too many step markers; none will be created");
        return Vec::new();
    }

    let hidden = |value| StepMarker {
        value,
        visible: false,
    };
    let mut markers: Vec<StepMarker> = Vec::with_capacity(count as usize + 1);
    for i in 0..count as usize {
        let value = range.minimum() + i as f32 * step;
        if value >= range.maximum() {
            break;
        }
        if markers.last().is_some_and(|last| last.value >= value) {
            continue;
        }
        markers.push(hidden(value));
    }
    markers.push(hidden(range.maximum()));
    markers
}
