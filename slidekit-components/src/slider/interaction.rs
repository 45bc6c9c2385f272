use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace, warn};

use super::value::{DragOrigin, ValueEngine};

/// Notifications a slider emits to its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// A thumb drag began at this value.
    SlidingStart(f32),
    /// The value changed because of user input.
    ValueChange(f32),
    /// A thumb drag finished at this value.
    SlidingComplete(f32),
    /// The track was tapped and the value jumped here.
    TrackPress(f32),
    /// A step marker was pressed.
    StepPress(f32),
    /// The pointer entered a step marker (`Some`) or left it (`None`).
    StepHover(Option<f32>),
    /// A step marker gained focus (`Some`) or lost it (`None`).
    FocusChange(Option<f32>),
    /// The pointer entered or left the thumb's touch area.
    ThumbHover(bool),
}

/// Events produced by one input, in emission order.
pub type SliderEvents = SmallVec<[SliderEvent; 2]>;

/// Pointer gesture lifecycle reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The thumb was grabbed.
    Start,
    /// The pointer moved by `(dx, dy)` since the start.
    Move {
        /// Horizontal displacement since the start.
        dx: f32,
        /// Vertical displacement since the start.
        dy: f32,
        /// Number of contacts currently down.
        active_contacts: usize,
    },
    /// The pointer was released.
    End {
        /// Horizontal displacement since the start.
        dx: f32,
        /// Vertical displacement since the start.
        dy: f32,
        /// Number of contacts still down.
        active_contacts: usize,
    },
    /// The host took the gesture away.
    Cancel {
        /// Horizontal displacement since the start.
        dx: f32,
        /// Vertical displacement since the start.
        dy: f32,
    },
}

/// An active thumb drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Thumb left edge when the drag began.
    pub anchor_offset: f32,
}

/// Turns gestures and presses into value updates and [`SliderEvent`]s.
///
/// `Idle -> Dragging -> Idle`. The host guarantees a single pointer, so a
/// second `Start` while dragging simply re-anchors.
#[derive(Debug, Default)]
pub struct GestureCoordinator {
    session: Option<DragSession>,
    disabled: bool,
}

impl GestureCoordinator {
    /// Creates an idle coordinator.
    pub fn new(disabled: bool) -> Self {
        Self {
            session: None,
            disabled,
        }
    }

    /// Enables or disables value-changing input.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether value-changing input is ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Dispatches a gesture lifecycle event.
    pub fn handle(&mut self, engine: &ValueEngine, event: GestureEvent) -> SliderEvents {
        match event {
            GestureEvent::Start => self.on_gesture_start(engine),
            GestureEvent::Move {
                dx,
                active_contacts,
                ..
            } => self.on_gesture_move(engine, dx, active_contacts),
            GestureEvent::End {
                dx,
                active_contacts,
                ..
            } => self.on_gesture_end(engine, dx, active_contacts),
            GestureEvent::Cancel { dx, .. } => self.on_gesture_cancel(engine, dx),
        }
    }

    /// Captures the anchor and reports where the drag starts.
    pub fn on_gesture_start(&mut self, engine: &ValueEngine) -> SliderEvents {
        engine.interrupt_animation();
        let value = engine.current_value();
        let anchor_offset = engine.pixel_offset_of(value);
        debug!(value, anchor_offset, "drag started");
        self.session = Some(DragSession { anchor_offset });
        smallvec![SliderEvent::SlidingStart(value)]
    }

    /// Moves the value with the pointer.
    #[tracing::instrument(level = "trace", skip(self, engine))]
    pub fn on_gesture_move(
        &mut self,
        engine: &ValueEngine,
        displacement: f32,
        active_contacts: usize,
    ) -> SliderEvents {
        if self.disabled {
            return SmallVec::new();
        }
        let value = self.drag_value(engine, displacement, active_contacts);
        engine.set_current_value(value);
        smallvec![SliderEvent::ValueChange(value)]
    }

    /// Settles the value and ends the drag.
    pub fn on_gesture_end(
        &mut self,
        engine: &ValueEngine,
        displacement: f32,
        active_contacts: usize,
    ) -> SliderEvents {
        if self.disabled {
            self.session = None;
            return SmallVec::new();
        }
        let value = self.drag_value(engine, displacement, active_contacts);
        self.session = None;
        engine.set_current_value(value);
        debug!(value, "drag complete");
        smallvec![
            SliderEvent::ValueChange(value),
            SliderEvent::SlidingComplete(value)
        ]
    }

    /// Cancellation settles exactly like a release.
    pub fn on_gesture_cancel(&mut self, engine: &ValueEngine, displacement: f32) -> SliderEvents {
        trace!("gesture cancelled");
        self.on_gesture_end(engine, displacement, 0)
    }

    /// Jumps to the tapped track position.
    pub fn on_track_tap(&mut self, engine: &ValueEngine, position: f32) -> SliderEvents {
        if self.disabled {
            return SmallVec::new();
        }
        let value = engine.value_from_drag(position, DragOrigin::TrackTap, 1);
        engine.set_current_value(value);
        smallvec![SliderEvent::ValueChange(value), SliderEvent::TrackPress(value)]
    }

    /// Jumps to a pressed step marker or discrete stop.
    pub fn on_step_press(&mut self, engine: &ValueEngine, value: f32) -> SliderEvents {
        if self.disabled {
            return SmallVec::new();
        }
        engine.set_current_value(value);
        smallvec![SliderEvent::ValueChange(value), SliderEvent::StepPress(value)]
    }

    /// Reports pointer hover over a step marker.
    pub fn on_step_hover(&self, value: Option<f32>) -> SliderEvents {
        smallvec![SliderEvent::StepHover(value)]
    }

    /// Reports focus moving onto (`Some`) or off (`None`) a step marker.
    pub fn on_focus_change(&self, value: Option<f32>) -> SliderEvents {
        smallvec![SliderEvent::FocusChange(value)]
    }

    /// Reports pointer hover over the thumb's touch area.
    pub fn on_thumb_hover(&self, hovered: bool) -> SliderEvents {
        smallvec![SliderEvent::ThumbHover(hovered)]
    }

    fn drag_value(&self, engine: &ValueEngine, displacement: f32, active_contacts: usize) -> f32 {
        let anchor_offset = match self.session {
            Some(session) => session.anchor_offset,
            None => {
                warn!("drag input without a gesture start; anchoring at the thumb");
                engine.pixel_offset_of(engine.current_value())
            }
        };
        engine.value_from_drag(
            displacement,
            DragOrigin::Thumb { anchor_offset },
            active_contacts,
        )
    }
}
