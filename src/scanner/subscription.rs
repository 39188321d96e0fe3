//! Scan Subscription - owned registration of a classifier with the keyboard
//! router.
//!
//! Acquire with [`subscribe`]; the classifier sees every routed keystroke
//! until the handle is released or dropped. Release unregisters the handler
//! and clears whatever was half-typed.
//!
//! # Example
//!
//! ```ignore
//! use pdv_scanner::scanner::{subscribe, Classifier, ScanHandlers};
//!
//! let classifier = Classifier::new(Default::default())?;
//! let subscription = subscribe(classifier, ScanHandlers::new(
//!     |code| println!("barcode {code}"),
//!     |kg| println!("weight {kg:.3}"),
//! ));
//!
//! // ... route events ...
//!
//! drop(subscription); // handler gone, buffer empty
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::classifier::{Classifier, ScanHandlers};
use crate::state::keyboard;

/// Live registration of a classifier. Released on drop.
pub struct ScanSubscription {
    classifier: Rc<RefCell<Classifier>>,
    cleanup: Option<Box<dyn FnOnce()>>,
}

/// Register a classifier with the keyboard router.
pub fn subscribe(classifier: Classifier, handlers: ScanHandlers) -> ScanSubscription {
    subscribe_shared(Rc::new(RefCell::new(classifier)), handlers)
}

/// Register a classifier that other page code also holds, e.g. a cancel key
/// bound before the subscription exists.
pub fn subscribe_shared(
    classifier: Rc<RefCell<Classifier>>,
    handlers: ScanHandlers,
) -> ScanSubscription {
    let for_handler = classifier.clone();

    let cleanup = keyboard::on(move |event| {
        // Re-entrant dispatch from inside a callback: leave it to the page
        let Ok(mut classifier) = for_handler.try_borrow_mut() else {
            return false;
        };
        let outcome = classifier.handle_key(event);
        drop(classifier);

        if let Some(token) = outcome.token() {
            handlers.dispatch(token);
        }
        outcome.is_consumed()
    });

    debug!("scanner subscription acquired");
    ScanSubscription {
        classifier,
        cleanup: Some(Box::new(cleanup)),
    }
}

impl ScanSubscription {
    /// Shared handle to the classifier, e.g. to reset it from a cancel key.
    pub fn classifier(&self) -> Rc<RefCell<Classifier>> {
        self.classifier.clone()
    }

    /// Still registered with the router.
    pub fn is_active(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Reset the classifier buffer. Returns false if the classifier is busy
    /// handling a key right now.
    pub fn reset(&self) -> bool {
        match self.classifier.try_borrow_mut() {
            Ok(mut classifier) => {
                classifier.reset();
                true
            }
            Err(_) => false,
        }
    }

    /// Current buffer text.
    pub fn buffer(&self) -> String {
        self.classifier.borrow().buffer().to_string()
    }

    /// Unregister now instead of at drop.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
            self.reset();
            debug!("scanner subscription released");
        }
    }
}

impl Drop for ScanSubscription {
    fn drop(&mut self) {
        self.release_inner();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::config::ClassifierConfig;
    use crate::scanner::buffer::BufferState;
    use crate::state::keyboard::{dispatch, handler_count, reset_keyboard_state, KeyboardEvent};

    #[derive(Default)]
    struct Seen {
        barcodes: RefCell<Vec<String>>,
        weights: RefCell<Vec<f64>>,
    }

    fn setup() -> Rc<Seen> {
        reset_keyboard_state();
        Rc::new(Seen::default())
    }

    fn handlers(seen: &Rc<Seen>) -> ScanHandlers {
        let barcodes = seen.clone();
        let weights = seen.clone();
        ScanHandlers::new(
            move |code| barcodes.barcodes.borrow_mut().push(code.to_string()),
            move |kg| weights.weights.borrow_mut().push(kg),
        )
    }

    fn classifier() -> Classifier {
        Classifier::new(ClassifierConfig::default()).unwrap()
    }

    fn type_line(line: &str) {
        for c in line.chars() {
            dispatch(KeyboardEvent::new(c.to_string()));
        }
        dispatch(KeyboardEvent::new("Enter"));
    }

    #[test]
    fn test_routed_lines_reach_handlers() {
        let seen = setup();
        let _subscription = subscribe(classifier(), handlers(&seen));

        type_line("7891000315517");
        type_line("0,450");

        assert_eq!(*seen.barcodes.borrow(), vec!["7891000315517"]);
        assert_eq!(*seen.weights.borrow(), vec![0.45]);
    }

    #[test]
    fn test_consumes_line_keys_only() {
        let seen = setup();
        let _subscription = subscribe(classifier(), handlers(&seen));

        assert!(dispatch(KeyboardEvent::new("1")));
        assert!(dispatch(KeyboardEvent::new("Backspace")));
        assert!(!dispatch(KeyboardEvent::new("F1")));
    }

    #[test]
    fn test_drop_releases_handler() {
        let seen = setup();
        let subscription = subscribe(classifier(), handlers(&seen));
        assert_eq!(handler_count(), 1);

        let shared = subscription.classifier();
        dispatch(KeyboardEvent::new("5"));
        assert_eq!(shared.borrow().buffer(), "5");

        drop(subscription);
        assert_eq!(handler_count(), 0);
        assert_eq!(shared.borrow().state(), &BufferState::Empty);

        type_line("123");
        assert!(seen.barcodes.borrow().is_empty());
    }

    #[test]
    fn test_explicit_release() {
        let seen = setup();
        let subscription = subscribe(classifier(), handlers(&seen));
        assert!(subscription.is_active());
        subscription.release();
        assert_eq!(handler_count(), 0);
    }

    #[test]
    fn test_reset_between_keys() {
        let seen = setup();
        let subscription = subscribe(classifier(), handlers(&seen));

        dispatch(KeyboardEvent::new("9"));
        dispatch(KeyboardEvent::new("9"));
        assert_eq!(subscription.buffer(), "99");

        assert!(subscription.reset());
        assert_eq!(subscription.buffer(), "");

        dispatch(KeyboardEvent::new("Enter"));
        assert!(seen.barcodes.borrow().is_empty());
    }

    #[test]
    fn test_handler_sees_empty_buffer() {
        reset_keyboard_state();
        let observed = Rc::new(Cell::new(None::<bool>));
        let shared = Rc::new(RefCell::new(classifier()));

        let observed_clone = observed.clone();
        let for_handler = shared.clone();
        let _subscription = subscribe_shared(
            shared,
            ScanHandlers::new(
                move |_| observed_clone.set(Some(for_handler.borrow().buffer().is_empty())),
                |_| {},
            ),
        );

        type_line("42");
        assert_eq!(observed.get(), Some(true));
    }
}
