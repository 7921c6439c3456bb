mod common;

use common::{port_set, port_unset, Bus, Call, StubConnector};
use st3215_utils::commands::list::{run, ListOptions};
use st3215_utils::config::DEFAULT_BAUDRATE;
use st3215_utils::report::OutputFormat;

fn options(format: OutputFormat, ids: Option<&str>) -> ListOptions {
    ListOptions {
        baudrate: DEFAULT_BAUDRATE,
        format,
        ids: ids.map(|s| s.parse().unwrap()),
    }
}

fn list(
    lookup: &dyn Fn(&str) -> Option<String>,
    connector: &mut StubConnector,
    options: &ListOptions,
) -> (i32, String) {
    let mut out = Vec::new();
    let code = run(lookup, connector, options, &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn reports_every_servo_in_scan_order() {
    let bus = Bus::with(&[7, 3]);
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_set, &mut connector, &options(OutputFormat::Plain, None));

    assert_eq!(code, 0);
    let expected = "\
Connecting to serial port: /dev/ttyUSB0
--------------------------------------------------
Scanning for servos...

Found 2 servo(s):

Servo ID: 7
  Position:    2048 steps (180.0°)
  Voltage:     12.1 V
  Temperature: 31 °C
  Mode:        Position Servo
  Load:        2.5%

Servo ID: 3
  Position:    2048 steps (180.0°)
  Voltage:     12.1 V
  Temperature: 31 °C
  Mode:        Position Servo
  Load:        2.5%

--------------------------------------------------
Scan complete. Total servos found: 2
";
    assert_eq!(out, expected);
}

#[test]
fn unreadable_fields_are_skipped() {
    let bus = Bus::with(&[1, 2]);
    bus.borrow_mut().unreadable = vec!["voltage", "mode"];
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_set, &mut connector, &options(OutputFormat::Plain, None));

    assert_eq!(code, 0);
    assert!(!out.contains("Voltage:"));
    assert!(!out.contains("Mode:"));
    assert_eq!(out.matches("Temperature: 31 °C").count(), 2);
    assert_eq!(out.matches("Load:").count(), 2);
    // Every field of every servo was still asked for.
    let reads = bus
        .borrow()
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Read(..)))
        .count();
    assert_eq!(reads, 10);
}

#[test]
fn empty_bus_is_not_a_failure() {
    let bus = Bus::with(&[]);
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_set, &mut connector, &options(OutputFormat::Plain, None));

    assert_eq!(code, 0);
    assert!(out.contains("No servos found on the bus."));
    assert!(!out.contains("Scan complete"));
}

#[test]
fn unopenable_port_is_a_failure() {
    let bus = Bus::with(&[1]);
    let mut connector = StubConnector::new(&bus);
    connector.fail = true;

    let (code, _) = list(&port_set, &mut connector, &options(OutputFormat::Plain, None));

    assert_eq!(code, 1);
    assert!(bus.borrow().calls.is_empty());
}

#[test]
fn missing_port_variable_fails_before_opening() {
    let bus = Bus::with(&[1]);
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_unset, &mut connector, &options(OutputFormat::Plain, None));

    assert_eq!(code, 1);
    assert_eq!(connector.opened, 0);
    assert!(out.is_empty());
}

#[test]
fn json_output_is_an_array() {
    let bus = Bus::with(&[4]);
    bus.borrow_mut().unreadable = vec!["position", "voltage", "load"];
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_set, &mut connector, &options(OutputFormat::Json, None));

    assert_eq!(code, 0);
    assert_eq!(
        out,
        "[{\"id\":4,\"temperature\":31,\"mode\":\"Position Servo\"}]\n"
    );
}

#[test]
fn json_readings_keep_their_decimal_form() {
    let bus = Bus::with(&[4]);
    bus.borrow_mut().unreadable = vec!["position"];
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(&port_set, &mut connector, &options(OutputFormat::Json, None));

    assert_eq!(code, 0);
    assert_eq!(
        out,
        "[{\"id\":4,\"voltage\":12.1,\"temperature\":31,\"mode\":\"Position Servo\",\"load\":2.5}]\n"
    );
}

#[test]
fn id_filter_limits_the_report() {
    let bus = Bus::with(&[1, 5, 9]);
    let mut connector = StubConnector::new(&bus);

    let (code, out) = list(
        &port_set,
        &mut connector,
        &options(OutputFormat::Plain, Some("4-9")),
    );

    assert_eq!(code, 0);
    assert!(!out.contains("Servo ID: 1"));
    assert!(out.contains("Servo ID: 5"));
    assert!(out.contains("Servo ID: 9"));
    assert!(out.contains("Total servos found: 2"));
}
