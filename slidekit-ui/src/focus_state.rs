//! # Focus State Management
//!
//! Only one focusable control holds keyboard focus at a time. Each control
//! owns a [`Focus`] handle; requesting focus on one handle implicitly takes it
//! from whichever handle held it before.
//!
//! ```
//! use slidekit_ui::Focus;
//!
//! let first = Focus::new();
//! let second = Focus::new();
//!
//! first.request_focus();
//! assert!(first.is_focused());
//!
//! second.request_focus();
//! assert!(!first.is_focused());
//! assert!(second.is_focused());
//! ```
//!
//! The registry is a process-wide static guarded by a `parking_lot` lock.

use std::sync::OnceLock;

use parking_lot::RwLock;
use uuid::Uuid;

static FOCUS_STATE: OnceLock<RwLock<FocusState>> = OnceLock::new();

#[derive(Default)]
struct FocusState {
    focused: Option<Uuid>,
}

fn focus_state() -> &'static RwLock<FocusState> {
    FOCUS_STATE.get_or_init(|| RwLock::new(FocusState::default()))
}

/// A focus handle for one focusable control.
///
/// Dropping the handle releases focus if it held it.
#[derive(Debug)]
pub struct Focus {
    id: Uuid,
}

impl Default for Focus {
    fn default() -> Self {
        Self::new()
    }
}

impl Focus {
    /// Creates a handle with a fresh identity.
    pub fn new() -> Self {
        Focus { id: Uuid::new_v4() }
    }

    /// Whether this handle currently holds focus.
    pub fn is_focused(&self) -> bool {
        focus_state().read().focused == Some(self.id)
    }

    /// Takes focus. Returns `true` if focus moved to this handle.
    pub fn request_focus(&self) -> bool {
        let mut state = focus_state().write();
        let changed = state.focused != Some(self.id);
        state.focused = Some(self.id);
        changed
    }

    /// Releases focus if this handle holds it. Returns `true` if it did.
    pub fn unfocus(&self) -> bool {
        let mut state = focus_state().write();
        if state.focused == Some(self.id) {
            state.focused = None;
            true
        } else {
            false
        }
    }
}

/// Serializes tests that assert on the process-wide focus owner.
#[cfg(any(test, feature = "testing"))]
pub fn serial_focus_guard() -> parking_lot::MutexGuard<'static, ()> {
    static GUARD: parking_lot::Mutex<()> = parking_lot::const_mutex(());
    GUARD.lock()
}

impl Drop for Focus {
    fn drop(&mut self) {
        self.unfocus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfocus_only_affects_owner() {
        let _guard = serial_focus_guard();
        let a = Focus::new();
        let b = Focus::new();

        assert!(b.request_focus());
        assert!(!b.request_focus());
        assert!(!a.unfocus());
        assert!(b.is_focused());
        assert!(b.unfocus());
        assert!(!b.is_focused());
    }

    #[test]
    fn test_drop_releases_focus() {
        let _guard = serial_focus_guard();
        let survivor = Focus::new();
        {
            let temp = Focus::new();
            temp.request_focus();
            assert!(!survivor.is_focused());
        }
        survivor.request_focus();
        assert!(survivor.is_focused());
    }
}
