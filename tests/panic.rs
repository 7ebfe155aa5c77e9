//! Converting recovered panic values into wrapped errors.

use std::any::Any;
use std::io;
use std::panic;
use wrapat::{PANIC_MESSAGE, Recovered, WrapError, catch, cause, panic_to_error};

fn payload<T: Any + Send>(value: T) -> Box<dyn Any + Send> {
    Box::new(value)
}

#[test]
fn absent_value_gives_no_error() {
    assert!(panic_to_error(Recovered::Absent).is_none());
    assert!(panic_to_error(None::<Box<dyn Any + Send>>).is_none());
}

#[test]
fn error_value_is_wrapped_as_is() {
    let err = panic_to_error(Recovered::error(io::Error::other("boom"))).expect("present");
    assert_eq!(err.message(), PANIC_MESSAGE);
    assert!(err.inner().is::<io::Error>());
    assert_eq!(cause(&err).to_string(), "boom");
}

#[test]
fn string_value_becomes_error_with_that_text() {
    let err = panic_to_error(Recovered::message("oops")).expect("present");
    assert_eq!(err.message(), "panic recovered");
    assert_eq!(err.inner().to_string(), "oops");
}

#[test]
fn other_value_uses_debug_rendering() {
    let err = panic_to_error(Recovered::other(&42)).expect("present");
    assert_eq!(err.inner().to_string(), "42");
    assert_eq!(err.message(), PANIC_MESSAGE);
}

#[test]
fn payload_str_and_string_are_messages() {
    assert!(matches!(Recovered::from(payload("static")), Recovered::Message(m) if m == "static"));
    assert!(matches!(
        Recovered::from(payload(String::from("owned"))),
        Recovered::Message(m) if m == "owned"
    ));
}

#[test]
fn payload_errors_are_recognized() {
    let wrapped = wrapat::wrap(io::Error::other("inner"));
    match Recovered::from(payload(wrapped)) {
        Recovered::Error(err) => assert!(err.is::<WrapError>()),
        other => panic!("unexpected {other:?}"),
    }

    let boxed: wrapat::BoxError = Box::new(io::Error::other("boxed"));
    match Recovered::from(payload(boxed)) {
        Recovered::Error(err) => assert_eq!(err.to_string(), "boxed"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn payload_of_primitive_keeps_its_value() {
    let err = panic_to_error(payload(42i32)).expect("present");
    assert_eq!(err.inner().to_string(), "42");
    assert_eq!(err.message(), PANIC_MESSAGE);

    assert!(matches!(Recovered::from(payload(7u64)), Recovered::Other(ref r) if r == "7"));
    assert!(matches!(Recovered::from(payload(1.5f64)), Recovered::Other(ref r) if r == "1.5"));
    assert!(matches!(Recovered::from(payload('x')), Recovered::Other(ref r) if r == "'x'"));
    assert!(matches!(Recovered::from(payload(true)), Recovered::Other(ref r) if r == "true"));
}

#[test]
fn payload_of_unknown_type_is_other() {
    #[derive(Debug)]
    struct Opaque;

    let err = panic_to_error(payload(Opaque)).expect("present");
    assert_eq!(err.inner().to_string(), "Box<dyn Any>");
}

#[test]
fn catch_panic_any_integer() {
    let err = catch(|| -> u8 { panic::panic_any(42) }).unwrap_err();
    assert_eq!(err.inner().to_string(), "42");
}

#[test]
fn catch_unwind_payload_round_trip() {
    let payload = panic::catch_unwind(|| panic!("index {} out of range", 9)).unwrap_err();
    let err = panic_to_error(payload).expect("present");
    assert_eq!(err.inner().to_string(), "index 9 out of range");
}

#[test]
fn catch_passes_value_through() {
    assert_eq!(catch(|| 5).ok(), Some(5));
}

#[test]
fn catch_converts_panic() {
    let err = catch(|| -> u8 { panic!("boom") }).unwrap_err();
    assert_eq!(err.message(), PANIC_MESSAGE);
    assert_eq!(err.inner().to_string(), "boom");
}

#[test]
fn catch_preserves_panicked_wrap_error() {
    let err = catch(|| -> u8 { panic::panic_any(wrapat::wrap(io::Error::other("deep"))) }).unwrap_err();
    assert!(err.inner().is::<WrapError>());
    assert_eq!(cause(&err).to_string(), "deep");
}
