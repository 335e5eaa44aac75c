//! End-to-end session scenarios driven by `scan-test-support`'s scripted
//! transport, matching the concrete worked examples for the memory-full
//! protocol and device-rejection abort.

use scan_dispatcher::{Backoff, CancelToken, DispatcherError, NoopSleeper, RejectKind, Session};
use scan_params::ParametersBuilder;
use scan_test_support::{reply_bytes, ScriptedTransport};
use wire_codec::PinVector;

fn params() -> scan_params::Parameters {
    ParametersBuilder::new()
        .rpm(2400.0)
        .facets(4)
        .fractions(0.1, 0.9)
        .bits_per_line(1)
        .motors(2)
        .build()
        .unwrap()
}

fn session(transport: ScriptedTransport) -> Session<ScriptedTransport, NoopSleeper> {
    Session::with_sleeper(transport, params(), NoopSleeper)
}

#[test]
fn memory_full_recovery_retries_the_identical_frame() {
    let mut transport = ScriptedTransport::new();
    transport
        .push_reply(reply_bytes(0b0000_0100, 0))
        .push_reply(reply_bytes(0b0000_0100, 0))
        .set_default_reply(reply_bytes(0, 0));
    let mut session = session(transport);

    let vector = PinVector::new(0).with_polygon_motor(true);
    session.set_pins(vector, &CancelToken::new()).unwrap();
}

#[test]
fn parse_error_on_third_frame_aborts_move_after_first_two() {
    let mut transport = ScriptedTransport::new();
    transport
        .push_reply(reply_bytes(0, 0))
        .push_reply(reply_bytes(0, 0))
        .push_reply(reply_bytes(0b0000_0010, 0))
        .set_default_reply(reply_bytes(0, 0));
    let mut session = session(transport);

    let err = session
        .move_to(100, &[[1, 0, 0]], &CancelToken::new())
        .unwrap_err();

    assert!(matches!(
        err,
        DispatcherError::DeviceRejected {
            kind: RejectKind::Parse,
            ..
        }
    ));
}

#[test]
fn backpressure_exhausted_after_max_attempts() {
    let mut transport = ScriptedTransport::new();
    transport.set_default_reply(reply_bytes(0b0000_0100, 0));
    let mut session = session(transport);
    session.set_backoff(Backoff {
        initial: std::time::Duration::from_millis(1),
        max: std::time::Duration::from_millis(1),
        max_attempts: 3,
    });

    let err = session
        .set_pins(PinVector::new(0), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(
        err,
        DispatcherError::BackpressureExhausted { attempts: 3 }
    ));
}

#[test]
fn cancellation_stops_before_the_first_frame() {
    let mut transport = ScriptedTransport::new();
    transport.set_default_reply(reply_bytes(0, 0));
    let mut session = session(transport);

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = session.move_to(100, &[[1, 0, 0]], &cancel).unwrap_err();
    assert!(matches!(err, DispatcherError::Cancelled));
}

#[test]
fn read_position_updates_the_mirror_per_motor() {
    let mut transport = ScriptedTransport::new();
    transport
        .push_reply(reply_bytes(0, 7))
        .push_reply(reply_bytes(0, u64::MAX));
    let mut session = session(transport);

    let positions = session.read_position().unwrap().to_vec();
    assert_eq!(positions, vec![7, -1]);
    assert_eq!(session.position().all(), &[7, -1]);
}

#[test]
fn start_stop_read_state_are_single_exchanges() {
    let mut transport = ScriptedTransport::new();
    transport.set_default_reply(reply_bytes(0b0000_1000, 0));
    let mut session = session(transport);

    assert!(session.start().unwrap().executing());
    assert!(session.stop().unwrap().executing());
    assert!(session.read_state().unwrap().executing());
}
