//! End-to-end checkout flows driven through device streams.

use std::io::Cursor;
use std::time::Duration;

use pdv_scanner::state::focus;
use pdv_scanner::{
    drain, reset_keyboard_state, CheckoutSession, ClassifierConfig, EventTarget, Modifiers,
    SaleStatus, ScaleAdapter, ScanEntry, TargetKind, TestHarnessAdapter,
};

fn start() -> CheckoutSession {
    reset_keyboard_state();
    focus::reset_focus_state();
    CheckoutSession::builder(ClassifierConfig::default())
        .start()
        .expect("default config is valid")
}

fn unit(code: &str) -> ScanEntry {
    ScanEntry::Unit {
        code: code.to_string(),
    }
}

#[test]
fn scanner_and_scale_share_one_lane() {
    let session = start();

    let mut scanner = TestHarnessAdapter::new();
    scanner.type_line("7891000315517");
    drain(&mut scanner, Duration::ZERO).unwrap();

    let mut scale = ScaleAdapter::new(Cursor::new(b"\x020,450kg\x03\r\n".to_vec()));
    drain(&mut scale, Duration::ZERO).unwrap();
    assert_eq!(session.status(), SaleStatus::WeightPending(0.45));

    scanner.type_line("2000045");
    drain(&mut scanner, Duration::ZERO).unwrap();

    assert_eq!(
        session.entries(),
        vec![
            unit("7891000315517"),
            ScanEntry::Weighed {
                code: "2000045".to_string(),
                kg: 0.45,
            },
        ]
    );
    assert_eq!(session.status(), SaleStatus::InSale);
}

#[test]
fn implausible_weight_is_treated_as_code() {
    let session = start();

    let mut harness = TestHarnessAdapter::new();
    harness.type_line("150.5");
    drain(&mut harness, Duration::ZERO).unwrap();

    assert_eq!(session.pending_weight(), None);
    assert_eq!(session.entries(), vec![unit("150.5")]);
}

#[test]
fn typing_into_a_focused_input_never_reaches_the_scanner() {
    let session = start();

    focus::focus(EventTarget::new(TargetKind::Input));
    let mut harness = TestHarnessAdapter::new();
    harness.type_line("maria");
    drain(&mut harness, Duration::ZERO).unwrap();
    assert_eq!(session.display().get(), "");
    assert!(session.entries().is_empty());

    focus::blur();
    harness.type_line("123");
    drain(&mut harness, Duration::ZERO).unwrap();
    assert_eq!(session.entries(), vec![unit("123")]);
}

#[test]
fn keys_aimed_at_a_search_box_are_left_to_it() {
    let session = start();

    let mut search_box = TestHarnessAdapter::new().aimed_at(EventTarget::new(TargetKind::Input));
    search_box.type_line("0,450");
    drain(&mut search_box, Duration::ZERO).unwrap();
    assert_eq!(session.pending_weight(), None);
    assert_eq!(session.status(), SaleStatus::Free);

    search_box.set_target(EventTarget::DOCUMENT);
    search_box.type_line("0,450");
    drain(&mut search_box, Duration::ZERO).unwrap();
    assert_eq!(session.pending_weight(), Some(0.45));
}

#[test]
fn scale_line_noise_does_not_split_a_reading() {
    let session = start();

    let mut scale = ScaleAdapter::new(Cursor::new(b"1,2\xfe50\r\n".to_vec()));
    assert_eq!(drain(&mut scale, Duration::ZERO).unwrap(), 6);
    assert_eq!(session.pending_weight(), Some(1.25));
    assert_eq!(session.display().get(), "");
}

#[test]
fn ctrl_c_quits_during_a_product_lookup() {
    let session = start();
    session.set_busy(true);

    let mut keyboard = TestHarnessAdapter::new();
    keyboard.type_text("12").chord("c", Modifiers::ctrl());
    drain(&mut keyboard, Duration::ZERO).unwrap();

    assert!(!session.is_running());
    assert_eq!(session.display().get(), "");
    assert_eq!(session.status(), SaleStatus::Loading);
}

#[test]
fn manual_correction_with_backspace() {
    let session = start();

    let mut harness = TestHarnessAdapter::new();
    harness.type_text("1239").key("Backspace").key("4");
    drain(&mut harness, Duration::ZERO).unwrap();
    assert_eq!(session.status(), SaleStatus::Typing("1234".to_string()));

    harness.key("Enter");
    drain(&mut harness, Duration::ZERO).unwrap();
    assert_eq!(session.entries(), vec![unit("1234")]);
    assert_eq!(session.display().get(), "");
}

#[test]
fn escape_mid_line_then_rescan() {
    let session = start();

    let mut harness = TestHarnessAdapter::new();
    harness.type_text("78910").key("Escape").type_line("555");
    drain(&mut harness, Duration::ZERO).unwrap();

    assert_eq!(session.entries(), vec![unit("555")]);
}

#[test]
fn ending_the_session_stops_classification() {
    let session = start();
    session.end();

    let mut harness = TestHarnessAdapter::new();
    harness.type_line("0.450");
    assert_eq!(drain(&mut harness, Duration::ZERO).unwrap(), 6);
    assert_eq!(pdv_scanner::state::handler_count(), 0);
}
