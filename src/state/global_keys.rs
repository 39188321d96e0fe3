//! Global Keys Module - page-level keys around the scanner stream
//!
//! Provides global key handlers for:
//! - Ctrl+C: Graceful shutdown, even while busy
//! - Busy gate: swallow every other key while a lookup is in flight
//! - Escape: Cancel the current line (and whatever the page attaches to it)
//! - F1..F12: Checkout hotkeys
//!
//! Register these *before* the scanner subscription: handlers run in
//! registration order, so Ctrl+C, the gate and Escape see keys first.
//!
//! # Example
//!
//! ```ignore
//! use pdv_scanner::state::global_keys::{self, GlobalBindings};
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = global_keys::setup_global_keys(running.clone(), GlobalBindings::default());
//!
//! // Later, on cleanup:
//! handle.cleanup();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::keyboard;

/// Page callbacks wired to global keys. All optional.
#[derive(Default)]
pub struct GlobalBindings {
    /// While this returns true every key is swallowed.
    pub is_busy: Option<Box<dyn Fn() -> bool>>,
    /// Escape pressed.
    pub on_cancel: Option<Box<dyn Fn()>>,
    /// Function key pressed (e.g. "F2"). Return true to consume.
    pub on_hotkey: Option<Box<dyn Fn(&str) -> bool>>,
}

// =============================================================================
// GLOBAL KEYS HANDLE
// =============================================================================

/// Cleanup handle for global key handlers. Cleans up on drop.
pub struct GlobalKeysHandle {
    ctrl_c_cleanup: Option<Box<dyn FnOnce()>>,
    gate_cleanup: Option<Box<dyn FnOnce()>>,
    escape_cleanup: Option<Box<dyn FnOnce()>>,
    hotkey_cleanup: Option<Box<dyn FnOnce()>>,
}

impl GlobalKeysHandle {
    /// Clean up all global key handlers
    pub fn cleanup(mut self) {
        self.cleanup_inner();
    }

    fn cleanup_inner(&mut self) {
        for cleanup in [
            self.ctrl_c_cleanup.take(),
            self.gate_cleanup.take(),
            self.escape_cleanup.take(),
            self.hotkey_cleanup.take(),
        ]
        .into_iter()
        .flatten()
        {
            cleanup();
        }
    }
}

impl Drop for GlobalKeysHandle {
    fn drop(&mut self) {
        self.cleanup_inner();
    }
}

/// "F1".."F24"
pub fn is_function_key(key: &str) -> bool {
    key.strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=24).contains(&n))
}

// =============================================================================
// SETUP FUNCTIONS
// =============================================================================

/// Set up global key handlers.
/// Returns a handle for cleanup.
///
/// # Arguments
/// * `running` - Atomic bool to set to false on Ctrl+C
/// * `bindings` - Page callbacks
pub fn setup_global_keys(
    running: Arc<AtomicBool>,
    bindings: GlobalBindings,
) -> GlobalKeysHandle {
    let GlobalBindings {
        is_busy,
        on_cancel,
        on_hotkey,
    } = bindings;

    // Ctrl+C first: raw mode disables SIGINT, so quitting must survive the gate
    let ctrl_c_cleanup = keyboard::on(move |event| {
        if event.modifiers.ctrl && event.key == "c" {
            running.store(false, Ordering::SeqCst);
            true
        } else {
            false
        }
    });

    // Busy gate next so nothing else reaches the scanner mid-lookup
    let gate_cleanup = is_busy.map(|is_busy| {
        let cleanup = keyboard::on(move |_event| {
            if is_busy() {
                debug!("key swallowed while busy");
                true
            } else {
                false
            }
        });
        Box::new(cleanup) as Box<dyn FnOnce()>
    });

    let escape_cleanup = on_cancel.map(|on_cancel| {
        let cleanup = keyboard::on(move |event| {
            if event.key == "Escape" {
                on_cancel();
                true
            } else {
                false
            }
        });
        Box::new(cleanup) as Box<dyn FnOnce()>
    });

    let hotkey_cleanup = on_hotkey.map(|on_hotkey| {
        let cleanup =
            keyboard::on(move |event| is_function_key(&event.key) && on_hotkey(&event.key));
        Box::new(cleanup) as Box<dyn FnOnce()>
    });

    GlobalKeysHandle {
        ctrl_c_cleanup: Some(Box::new(ctrl_c_cleanup)),
        gate_cleanup,
        escape_cleanup,
        hotkey_cleanup,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::state::keyboard::{
        dispatch, handler_count, reset_keyboard_state, KeyboardEvent, Modifiers,
    };

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_ctrl_c_sets_running_false() {
        setup();

        let running = Arc::new(AtomicBool::new(true));
        let handle = setup_global_keys(running.clone(), GlobalBindings::default());

        assert!(running.load(Ordering::SeqCst));

        dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));

        assert!(!running.load(Ordering::SeqCst));

        handle.cleanup();
    }

    #[test]
    fn test_regular_c_does_not_stop() {
        setup();

        let running = Arc::new(AtomicBool::new(true));
        let _handle = setup_global_keys(running.clone(), GlobalBindings::default());

        assert!(!dispatch(KeyboardEvent::new("c")));
        assert!(running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_cleanup_removes_handlers() {
        setup();

        let running = Arc::new(AtomicBool::new(true));
        let handle = setup_global_keys(
            running.clone(),
            GlobalBindings {
                is_busy: Some(Box::new(|| false)),
                on_cancel: Some(Box::new(|| {})),
                on_hotkey: Some(Box::new(|_| true)),
            },
        );
        assert_eq!(handler_count(), 4);

        handle.cleanup();
        assert_eq!(handler_count(), 0);

        dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        assert!(running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_drop_removes_handlers() {
        setup();
        {
            let _handle =
                setup_global_keys(Arc::new(AtomicBool::new(true)), GlobalBindings::default());
            assert_eq!(handler_count(), 1);
        }
        assert_eq!(handler_count(), 0);
    }

    #[test]
    fn test_escape_cancels() {
        setup();

        let cancelled = Rc::new(Cell::new(0));
        let cancelled_clone = cancelled.clone();
        let _handle = setup_global_keys(
            Arc::new(AtomicBool::new(true)),
            GlobalBindings {
                on_cancel: Some(Box::new(move || {
                    cancelled_clone.set(cancelled_clone.get() + 1)
                })),
                ..Default::default()
            },
        );

        assert!(dispatch(KeyboardEvent::new("Escape")));
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn test_busy_gate_swallows_everything() {
        setup();

        let busy = Rc::new(Cell::new(true));
        let busy_clone = busy.clone();
        let _handle = setup_global_keys(
            Arc::new(AtomicBool::new(true)),
            GlobalBindings {
                is_busy: Some(Box::new(move || busy_clone.get())),
                ..Default::default()
            },
        );

        let reached = Rc::new(Cell::new(0));
        let reached_clone = reached.clone();
        let _later = keyboard::on(move |_| {
            reached_clone.set(reached_clone.get() + 1);
            false
        });

        assert!(dispatch(KeyboardEvent::new("1")));
        assert_eq!(reached.get(), 0);

        busy.set(false);
        assert!(!dispatch(KeyboardEvent::new("1")));
        assert_eq!(reached.get(), 1);
    }

    #[test]
    fn test_ctrl_c_gets_past_busy_gate() {
        setup();

        let running = Arc::new(AtomicBool::new(true));
        let _handle = setup_global_keys(
            running.clone(),
            GlobalBindings {
                is_busy: Some(Box::new(|| true)),
                ..Default::default()
            },
        );

        assert!(dispatch(KeyboardEvent::new("c")));
        assert!(running.load(Ordering::SeqCst));

        assert!(dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl())));
        assert!(!running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_hotkeys() {
        setup();

        let pressed = Rc::new(RefCell::new(Vec::new()));
        let pressed_clone = pressed.clone();
        let _handle = setup_global_keys(
            Arc::new(AtomicBool::new(true)),
            GlobalBindings {
                on_hotkey: Some(Box::new(move |key| {
                    pressed_clone.borrow_mut().push(key.to_string());
                    key != "F12"
                })),
                ..Default::default()
            },
        );

        assert!(dispatch(KeyboardEvent::new("F2")));
        assert!(!dispatch(KeyboardEvent::new("F12")));
        assert!(!dispatch(KeyboardEvent::new("F")));
        assert!(!dispatch(KeyboardEvent::new("f2")));
        assert_eq!(*pressed.borrow(), vec!["F2", "F12"]);
    }

    #[test]
    fn test_is_function_key() {
        assert!(is_function_key("F1"));
        assert!(is_function_key("F12"));
        assert!(!is_function_key("F0"));
        assert!(!is_function_key("F"));
        assert!(!is_function_key("Fx"));
        assert!(!is_function_key("Enter"));
    }
}
