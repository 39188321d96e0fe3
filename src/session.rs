//! Checkout Session - the checkout lane around the classifier
//!
//! Owns a scanner subscription plus the page-level keys that go with it, and
//! turns classified tokens into sale entries:
//!
//! - a weight is held as *pending* until the next barcode, which then becomes
//!   a weighed entry (the "weight detected, scan the product" prompt)
//! - a barcode with nothing pending is a unit entry
//! - Escape drops both the half-typed line and any pending weight
//! - while a product lookup is in flight (`set_busy(true)`) every key is
//!   swallowed
//!
//! # Example
//!
//! ```ignore
//! use pdv_scanner::session::CheckoutSession;
//!
//! let session = CheckoutSession::builder(Default::default())
//!     .on_entry(|entry| println!("{entry:?}"))
//!     .start()?;
//!
//! println!("{}", session.status_line());
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::display::format_weight;
use crate::error::Result;
use crate::scanner::{subscribe_shared, Classifier, ScanHandlers, ScanSubscription};
use crate::state::global_keys::{setup_global_keys, GlobalBindings, GlobalKeysHandle};

// =============================================================================
// TYPES
// =============================================================================

/// One scanned item.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEntry {
    /// Sold by unit.
    Unit { code: String },
    /// Sold by weight; the weight was read before the code.
    Weighed { code: String, kg: f64 },
}

/// What the lane is doing, in display priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleStatus {
    /// Product lookup in flight.
    Loading,
    /// Operator or device mid-line.
    Typing(String),
    /// Weight read, waiting for the product code.
    WeightPending(f64),
    /// At least one item scanned.
    InSale,
    /// Nothing scanned yet.
    Free,
}

impl SaleStatus {
    /// Text for the footer status line.
    pub fn line(&self) -> String {
        match self {
            Self::Loading => "Searching product...".to_string(),
            Self::Typing(buffer) => format!("Typing: {buffer}"),
            Self::WeightPending(kg) => {
                format!("{} - scan the product now (Esc cancels)", format_weight(*kg))
            }
            Self::InSale => "Sale in progress".to_string(),
            Self::Free => "Lane free".to_string(),
        }
    }
}

type EntryCallback = Box<dyn Fn(&ScanEntry)>;
type HotkeyCallback = Box<dyn Fn(&str) -> bool>;

struct SessionState {
    busy: Signal<bool>,
    pending_weight: Signal<Option<f64>>,
    entries: RefCell<Vec<ScanEntry>>,
    on_entry: Option<EntryCallback>,
}

impl SessionState {
    fn weight_read(&self, kg: f64) {
        if let Some(previous) = self.pending_weight.get() {
            debug!(previous, kg, "pending weight replaced");
        }
        self.pending_weight.set(Some(kg));
    }

    fn code_read(&self, code: &str) {
        let entry = match self.pending_weight.get() {
            Some(kg) => {
                self.pending_weight.set(None);
                ScanEntry::Weighed {
                    code: code.to_string(),
                    kg,
                }
            }
            None => ScanEntry::Unit {
                code: code.to_string(),
            },
        };
        info!(?entry, "item scanned");

        self.entries.borrow_mut().push(entry.clone());
        if let Some(on_entry) = &self.on_entry {
            on_entry(&entry);
        }
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Configures and starts a [`CheckoutSession`].
pub struct CheckoutSessionBuilder {
    config: ClassifierConfig,
    running: Option<Arc<AtomicBool>>,
    on_entry: Option<EntryCallback>,
    on_hotkey: Option<HotkeyCallback>,
}

impl CheckoutSessionBuilder {
    /// Called for every scanned item.
    pub fn on_entry<F>(mut self, on_entry: F) -> Self
    where
        F: Fn(&ScanEntry) + 'static,
    {
        self.on_entry = Some(Box::new(on_entry));
        self
    }

    /// Called for function keys. Return true to consume.
    pub fn on_hotkey<F>(mut self, on_hotkey: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.on_hotkey = Some(Box::new(on_hotkey));
        self
    }

    /// Flag cleared by Ctrl+C. A fresh one is created if not given.
    pub fn running(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    /// Validate the config and register the lane's key handlers.
    pub fn start(self) -> Result<CheckoutSession> {
        let display = signal(String::new());
        let classifier = Classifier::with_display(self.config, display.clone())?;
        let classifier = Rc::new(RefCell::new(classifier));
        let running = self.running.unwrap_or_else(|| Arc::new(AtomicBool::new(true)));

        let state = Rc::new(SessionState {
            busy: signal(false),
            pending_weight: signal(None),
            entries: RefCell::new(Vec::new()),
            on_entry: self.on_entry,
        });

        // Page keys go first so Escape and the busy gate win over the scanner
        let busy = state.busy.clone();
        let cancel_state = state.clone();
        let cancel_classifier = classifier.clone();
        let global_keys = setup_global_keys(
            running.clone(),
            GlobalBindings {
                is_busy: Some(Box::new(move || busy.get())),
                on_cancel: Some(Box::new(move || {
                    cancel_state.pending_weight.set(None);
                    if let Ok(mut classifier) = cancel_classifier.try_borrow_mut() {
                        classifier.reset();
                    }
                    debug!("checkout input cancelled");
                })),
                on_hotkey: self.on_hotkey,
            },
        );

        let on_code = state.clone();
        let on_weight = state.clone();
        let subscription = subscribe_shared(
            classifier,
            ScanHandlers::new(
                move |code| on_code.code_read(code),
                move |kg| on_weight.weight_read(kg),
            ),
        );

        info!("checkout session started");
        Ok(CheckoutSession {
            subscription,
            _global_keys: global_keys,
            state,
            display,
            running,
        })
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// A running checkout lane. Key handlers are released on drop.
pub struct CheckoutSession {
    subscription: ScanSubscription,
    _global_keys: GlobalKeysHandle,
    state: Rc<SessionState>,
    display: Signal<String>,
    running: Arc<AtomicBool>,
}

impl CheckoutSession {
    pub fn builder(config: ClassifierConfig) -> CheckoutSessionBuilder {
        CheckoutSessionBuilder {
            config,
            running: None,
            on_entry: None,
            on_hotkey: None,
        }
    }

    /// Live echo of the line being typed.
    pub fn display(&self) -> Signal<String> {
        self.display.clone()
    }

    /// Mark a product lookup as in flight (or finished).
    pub fn set_busy(&self, busy: bool) {
        self.state.busy.set(busy);
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy.get()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn pending_weight(&self) -> Option<f64> {
        self.state.pending_weight.get()
    }

    /// Items scanned so far, oldest first.
    pub fn entries(&self) -> Vec<ScanEntry> {
        self.state.entries.borrow().clone()
    }

    /// Same as pressing Escape.
    pub fn cancel(&self) {
        self.state.pending_weight.set(None);
        self.subscription.reset();
    }

    pub fn status(&self) -> SaleStatus {
        if self.state.busy.get() {
            return SaleStatus::Loading;
        }
        let buffer = self.display.get();
        if !buffer.is_empty() {
            return SaleStatus::Typing(buffer);
        }
        if let Some(kg) = self.state.pending_weight.get() {
            return SaleStatus::WeightPending(kg);
        }
        if self.state.entries.borrow().is_empty() {
            SaleStatus::Free
        } else {
            SaleStatus::InSale
        }
    }

    pub fn status_line(&self) -> String {
        self.status().line()
    }

    /// Release every key handler now.
    pub fn end(self) {
        info!(items = self.state.entries.borrow().len(), "checkout session ended");
    }
}

// =============================================================================
// TESTS
// =============================================================================
