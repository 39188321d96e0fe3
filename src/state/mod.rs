//! State Module - Runtime keyboard state
//!
//! - **Focus** - Focused target, focus guard
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm conversion, polling, routing, raw mode
//! - **Global keys** - Busy gate, Ctrl+C, Escape, function-key hotkeys

pub mod focus;
pub mod global_keys;
pub mod input;
pub mod keyboard;

pub use focus::{
    blur, focus, focused_target, guard, is_text_entry_focused, reset_focus_state, GuardDecision,
};
pub use global_keys::{is_function_key, setup_global_keys, GlobalBindings, GlobalKeysHandle};
pub use input::{
    convert_key_event, poll_event, read_event, route_event, route_key, InputEvent, RawModeGuard,
};
pub use keyboard::{
    dispatch, handler_count, on, on_key, reset_keyboard_state, KeyHandler, KeyState,
    KeyboardEvent, Modifiers,
};
