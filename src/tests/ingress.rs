use crate::ingress::Ingress;
use crate::response_slot::ResponseSlot;
use crate::tests::mock::{TestSlot, TEST_BUF_SIZE};

#[test]
fn test_complete_line_published() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(b"\r\nOK\r\n");

    assert!(slot.take_signal());
    assert_eq!("\r\nOK\r\n", slot.last().as_str());
    assert!(ingress.is_empty());
}

#[test]
fn test_signal_fires_at_most_once() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(b"OK\r\n");

    assert!(slot.take_signal());
    assert!(!slot.take_signal());
}

#[test]
fn test_partial_line_retained_across_deliveries() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(b"CONNECT");
    assert!(!slot.take_signal());
    assert_eq!("", slot.last().as_str());

    ingress.write(b" OK\r\n");
    assert!(slot.take_signal());
    assert_eq!("CONNECT OK\r\n", slot.last().as_str());
}

#[test]
fn test_no_completion_without_trailing_line_feed() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    // Line feed present but not final, response is not complete yet
    ingress.write(b"STATE: IP START\r\npart");

    assert!(!slot.take_signal());
    assert_eq!(b"STATE: IP START\r\npart".len(), ingress.len());
}

#[test]
fn test_new_line_overwrites_unconsumed_result() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(b"first\r\n");
    ingress.write(b"second\r\n");

    assert!(slot.take_signal());
    assert_eq!("second\r\n", slot.last().as_str());
}

#[test]
fn test_reset_clears_line_and_signal() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(b"OK\r\n");
    slot.reset();

    assert!(!slot.take_signal());
    assert_eq!("", slot.last().as_str());
}

#[test]
fn test_overflow_drops_buffer() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<16, 256> = Ingress::new(&slot);

    ingress.write(b"way too long for a sixteen byte buffer");
    assert!(!slot.take_signal());
    assert!(ingress.is_empty());

    // Listener recovers with the next complete line
    ingress.write(b"OK\r\n");
    assert!(slot.take_signal());
    assert_eq!("OK\r\n", slot.last().as_str());
}

#[test]
fn test_non_utf8_line_dropped() {
    let slot = TestSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 256> = Ingress::new(&slot);

    ingress.write(&[0xff, 0xfe, b'\n']);

    assert!(!slot.take_signal());
    assert_eq!("", slot.last().as_str());
    assert!(ingress.is_empty());
}

#[test]
fn test_overlong_line_truncated_to_slot_capacity() {
    let slot: ResponseSlot<8> = ResponseSlot::new();
    let mut ingress: Ingress<TEST_BUF_SIZE, 8> = Ingress::new(&slot);

    ingress.write(b"0123456789\r\n");

    assert!(slot.take_signal());
    assert_eq!("01234567", slot.last().as_str());
}
