//! A pressable, hoverable, focusable control.
//!
//! ## Usage
//!
//! Wrap any tappable region (buttons, slider step markers) to get consistent
//! press/hover/focus bookkeeping and Enter/Space/Escape key handling. The
//! control does not draw anything; [`Touchable::current_style`] picks which
//! of the caller's style values applies to the current state.
use derive_setters::Setters;
use slidekit_ui::{Callback, Focus};
use tracing::trace;

/// Keys the control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Anything else, identified by the platform key code.
    Other(u32),
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchableInput {
    /// A completed tap.
    Press,
    /// Primary button or touch went down.
    PressIn,
    /// Primary button or touch went up.
    PressOut,
    /// Pointer entered the control.
    MouseEnter,
    /// Pointer left the control.
    MouseLeave,
    /// A key went down while focused.
    KeyDown(Key),
    /// A key went up while focused.
    KeyUp(Key),
    /// The platform focused the control.
    GotFocus,
    /// The platform moved focus away.
    LostFocus,
}

/// What an input amounted to, after disabled gating and key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchableEvent {
    /// The control was activated (tap, or Enter without a dedicated handler).
    Pressed,
    /// Press began.
    PressedIn,
    /// Press ended.
    PressedOut,
    /// Pointer entered.
    PointerEntered,
    /// Pointer left.
    PointerLeft,
    /// A key handler ran.
    KeyDown(Key),
    /// A key-up handler ran.
    KeyUp(Key),
    /// Focus arrived.
    FocusGained,
    /// Focus left.
    FocusLost,
}

/// Arguments for [`Touchable`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct TouchableArgs {
    /// Ignore presses and keys, and freeze the hover flag.
    pub disabled: bool,
    /// Whether Tab reaches the control. Defaults to `!disabled`.
    #[setters(strip_option)]
    pub is_tab_stop: Option<bool>,
    /// Keyboard order; `0` is document order. Defaults to `0`.
    #[setters(strip_option)]
    pub tab_index: Option<i32>,
    /// Request focus on [`Touchable::mount`].
    pub auto_focus: bool,
    /// Text read by assistive technologies.
    #[setters(strip_option, into)]
    pub accessibility_label: Option<String>,
    /// Identifier for end-to-end tests.
    #[setters(strip_option, into)]
    pub test_id: Option<String>,
    /// Activation handler.
    #[setters(skip)]
    pub on_press: Callback,
    /// Press-began handler.
    #[setters(skip)]
    pub on_press_in: Option<Callback>,
    /// Press-ended handler.
    #[setters(skip)]
    pub on_press_out: Option<Callback>,
    /// Enter-down handler; replaces `on_press` for Enter when set.
    #[setters(skip)]
    pub on_enter_key_down: Option<Callback>,
    /// Enter-up handler.
    #[setters(skip)]
    pub on_enter_key_up: Option<Callback>,
    /// Space-down handler.
    #[setters(skip)]
    pub on_space_key_down: Option<Callback>,
    /// Space-up handler.
    #[setters(skip)]
    pub on_space_key_up: Option<Callback>,
    /// Escape-down handler.
    #[setters(skip)]
    pub on_esc_key_down: Option<Callback>,
    /// Escape-up handler.
    #[setters(skip)]
    pub on_esc_key_up: Option<Callback>,
    /// Focus-gained handler.
    #[setters(skip)]
    pub on_got_focus: Option<Callback>,
    /// Focus-lost handler.
    #[setters(skip)]
    pub on_lost_focus: Option<Callback>,
    /// Pointer-entered handler. Runs even when disabled.
    #[setters(skip)]
    pub on_mouse_enter: Option<Callback>,
    /// Pointer-left handler. Runs even when disabled.
    #[setters(skip)]
    pub on_mouse_leave: Option<Callback>,
}

impl Default for TouchableArgs {
    fn default() -> Self {
        Self {
            disabled: false,
            is_tab_stop: None,
            tab_index: None,
            auto_focus: false,
            accessibility_label: None,
            test_id: None,
            on_press: Callback::default(),
            on_press_in: None,
            on_press_out: None,
            on_enter_key_down: None,
            on_enter_key_up: None,
            on_space_key_down: None,
            on_space_key_up: None,
            on_esc_key_down: None,
            on_esc_key_up: None,
            on_got_focus: None,
            on_lost_focus: None,
            on_mouse_enter: None,
            on_mouse_leave: None,
        }
    }
}

impl TouchableArgs {
    /// Sets the activation handler.
    pub fn on_press(mut self, handler: impl Into<Callback>) -> Self {
        self.on_press = handler.into();
        self
    }

    /// Sets the press-began handler.
    pub fn on_press_in(mut self, handler: impl Into<Callback>) -> Self {
        self.on_press_in = Some(handler.into());
        self
    }

    /// Sets the press-ended handler.
    pub fn on_press_out(mut self, handler: impl Into<Callback>) -> Self {
        self.on_press_out = Some(handler.into());
        self
    }

    /// Sets the key-down handler for `key`. Unhandled keys are ignored.
    pub fn on_key_down(mut self, key: Key, handler: impl Into<Callback>) -> Self {
        let handler = Some(handler.into());
        match key {
            Key::Enter => self.on_enter_key_down = handler,
            Key::Space => self.on_space_key_down = handler,
            Key::Escape => self.on_esc_key_down = handler,
            Key::Other(_) => {}
        }
        self
    }

    /// Sets the key-up handler for `key`. Unhandled keys are ignored.
    pub fn on_key_up(mut self, key: Key, handler: impl Into<Callback>) -> Self {
        let handler = Some(handler.into());
        match key {
            Key::Enter => self.on_enter_key_up = handler,
            Key::Space => self.on_space_key_up = handler,
            Key::Escape => self.on_esc_key_up = handler,
            Key::Other(_) => {}
        }
        self
    }

    /// Sets the focus-gained handler.
    pub fn on_got_focus(mut self, handler: impl Into<Callback>) -> Self {
        self.on_got_focus = Some(handler.into());
        self
    }

    /// Sets the focus-lost handler.
    pub fn on_lost_focus(mut self, handler: impl Into<Callback>) -> Self {
        self.on_lost_focus = Some(handler.into());
        self
    }

    /// Sets the pointer-entered handler.
    pub fn on_mouse_enter(mut self, handler: impl Into<Callback>) -> Self {
        self.on_mouse_enter = Some(handler.into());
        self
    }

    /// Sets the pointer-left handler.
    pub fn on_mouse_leave(mut self, handler: impl Into<Callback>) -> Self {
        self.on_mouse_leave = Some(handler.into());
        self
    }

    fn key_down_handler(&self, key: Key) -> Option<&Callback> {
        match key {
            Key::Enter => self.on_enter_key_down.as_ref(),
            Key::Space => self.on_space_key_down.as_ref(),
            Key::Escape => self.on_esc_key_down.as_ref(),
            Key::Other(_) => None,
        }
    }

    fn key_up_handler(&self, key: Key) -> Option<&Callback> {
        match key {
            Key::Enter => self.on_enter_key_up.as_ref(),
            Key::Space => self.on_space_key_up.as_ref(),
            Key::Escape => self.on_esc_key_up.as_ref(),
            Key::Other(_) => None,
        }
    }
}

/// Per-state style values. Unset states fall back to whatever applied before.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchableStyles<S> {
    /// Always-applicable style.
    pub base: S,
    /// Style while disabled.
    pub disabled: Option<S>,
    /// Style while pressed.
    pub pressed: Option<S>,
    /// Style while hovered.
    pub hover: Option<S>,
}

impl<S> TouchableStyles<S> {
    /// Styles with only a base value.
    pub fn new(base: S) -> Self {
        Self {
            base,
            disabled: None,
            pressed: None,
            hover: None,
        }
    }
}

/// Interaction state of one pressable control.
pub struct Touchable {
    args: TouchableArgs,
    hovered: bool,
    pressed: bool,
    focus: Focus,
}

impl Touchable {
    /// Creates an idle control.
    pub fn new(args: TouchableArgs) -> Self {
        Self {
            args,
            hovered: false,
            pressed: false,
            focus: Focus::new(),
        }
    }

    /// The current arguments.
    pub fn args(&self) -> &TouchableArgs {
        &self.args
    }

    /// Replaces the arguments, keeping hover/press/focus state.
    pub fn set_args(&mut self, args: TouchableArgs) {
        self.args = args;
    }

    /// Whether the pointer is over the control.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the control is held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the control holds keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// Whether Tab reaches the control.
    pub fn is_tab_stop(&self) -> bool {
        self.args.is_tab_stop.unwrap_or(!self.args.disabled)
    }

    /// Keyboard order.
    pub fn tab_index(&self) -> i32 {
        self.args.tab_index.unwrap_or(0)
    }

    /// Runs mount-time behaviour: takes focus when `auto_focus` is set.
    pub fn mount(&mut self) -> Option<TouchableEvent> {
        if self.args.auto_focus {
            self.handle(TouchableInput::GotFocus)
        } else {
            None
        }
    }

    /// Applies one input, runs the matching handler and reports what
    /// happened. Returns `None` when the input was swallowed.
    pub fn handle(&mut self, input: TouchableInput) -> Option<TouchableEvent> {
        trace!(?input, disabled = self.args.disabled, "touchable input");
        let enabled = !self.args.disabled;
        match input {
            TouchableInput::Press => {
                if !enabled {
                    return None;
                }
                self.args.on_press.call();
                Some(TouchableEvent::Pressed)
            }
            TouchableInput::PressIn => {
                self.pressed = true;
                if !enabled {
                    return None;
                }
                if let Some(handler) = &self.args.on_press_in {
                    handler.call();
                }
                Some(TouchableEvent::PressedIn)
            }
            TouchableInput::PressOut => {
                self.pressed = false;
                if !enabled {
                    return None;
                }
                if let Some(handler) = &self.args.on_press_out {
                    handler.call();
                }
                Some(TouchableEvent::PressedOut)
            }
            TouchableInput::MouseEnter => {
                if enabled {
                    self.hovered = true;
                }
                if let Some(handler) = &self.args.on_mouse_enter {
                    handler.call();
                }
                Some(TouchableEvent::PointerEntered)
            }
            TouchableInput::MouseLeave => {
                if enabled {
                    self.hovered = false;
                }
                if let Some(handler) = &self.args.on_mouse_leave {
                    handler.call();
                }
                Some(TouchableEvent::PointerLeft)
            }
            TouchableInput::KeyDown(key) => {
                if !enabled {
                    return None;
                }
                if let Some(handler) = self.args.key_down_handler(key) {
                    handler.call();
                    return Some(TouchableEvent::KeyDown(key));
                }
                if key == Key::Enter {
                    self.args.on_press.call();
                    return Some(TouchableEvent::Pressed);
                }
                None
            }
            TouchableInput::KeyUp(key) => {
                if !enabled {
                    return None;
                }
                let handler = self.args.key_up_handler(key)?;
                handler.call();
                Some(TouchableEvent::KeyUp(key))
            }
            TouchableInput::GotFocus => {
                self.focus.request_focus();
                if let Some(handler) = &self.args.on_got_focus {
                    handler.call();
                }
                Some(TouchableEvent::FocusGained)
            }
            TouchableInput::LostFocus => {
                self.focus.unfocus();
                if let Some(handler) = &self.args.on_lost_focus {
                    handler.call();
                }
                Some(TouchableEvent::FocusLost)
            }
        }
    }

    /// Picks the style for the current state.
    ///
    /// Starting from `base`, the disabled, pressed and hover styles are
    /// applied in that order when their state is active; the last applicable
    /// one wins.
    pub fn current_style<'a, S>(&self, styles: &'a TouchableStyles<S>) -> &'a S {
        let mut style = &styles.base;
        if self.args.disabled
            && let Some(disabled) = &styles.disabled
        {
            style = disabled;
        }
        if self.pressed
            && let Some(pressed) = &styles.pressed
        {
            style = pressed;
        }
        if self.hovered
            && let Some(hover) = &styles.hover
        {
            style = hover;
        }
        style
    }
}
