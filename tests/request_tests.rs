//! Request Tests
//!
//! Tests for operation parsing, request building and response rendering.

use mbtool::protocol::{format_bytes, Operation, Request, Response, COIL_OFF, COIL_ON};
use mbtool::MbError;

// =============================================================================
// Operation Tests
// =============================================================================

#[test]
fn test_operation_names_round_trip() {
    for op in Operation::ALL {
        assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        assert_eq!(op.to_string(), op.name());
    }
}

#[test]
fn test_operation_unknown() {
    let err = "readRegisters".parse::<Operation>().unwrap_err();
    assert!(matches!(err, MbError::UnknownOperation(ref name) if name == "readRegisters"));
    assert!(err.to_string().contains("writeSingleCoil"));

    // Names are case sensitive
    assert!("readcoils".parse::<Operation>().is_err());
}

#[test]
fn test_operation_function_codes() {
    assert_eq!(Operation::ReadCoils.function_code(), 0x01);
    assert_eq!(Operation::WriteSingleCoil.function_code(), 0x05);
    assert_eq!(Operation::WriteSingleRegister.function_code(), 0x10);
    assert_eq!(Operation::WriteMultipleCoils.function_code(), 0x0F);
    assert_eq!(Operation::WriteMultipleRegisters.function_code(), 0x10);
}

// =============================================================================
// Request::build Tests
// =============================================================================

#[test]
fn test_build_requires_address() {
    let err = Request::build(Operation::WriteSingleCoil, None, None, &["1"]).unwrap_err();
    assert!(matches!(err, MbError::MissingArgument("-address")));
}

#[test]
fn test_build_read_coils() {
    let request = Request::build::<&str>(Operation::ReadCoils, Some(10), Some(8), &[]).unwrap();
    assert_eq!(
        request,
        Request::ReadCoils {
            address: 10,
            quantity: 8
        }
    );

    let err = Request::build::<&str>(Operation::ReadCoils, Some(10), None, &[]).unwrap_err();
    assert!(matches!(err, MbError::MissingArgument("-size")));
}

#[test]
fn test_build_single_coil_states() {
    let on = Request::build(Operation::WriteSingleCoil, Some(3), None, &["5"]).unwrap();
    assert_eq!(
        on,
        Request::WriteSingleCoil {
            address: 3,
            value: COIL_ON
        }
    );

    let off = Request::build(Operation::WriteSingleCoil, Some(3), None, &["0"]).unwrap();
    assert_eq!(
        off,
        Request::WriteSingleCoil {
            address: 3,
            value: COIL_OFF
        }
    );
}

#[test]
fn test_build_single_coil_errors() {
    let err = Request::build::<&str>(Operation::WriteSingleCoil, Some(3), None, &[]).unwrap_err();
    assert!(matches!(err, MbError::MissingArgument(_)));

    let err = Request::build(Operation::WriteSingleCoil, Some(3), None, &["300"]).unwrap_err();
    assert!(matches!(err, MbError::InvalidValue { .. }));
}

#[test]
fn test_build_multiple_coils() {
    let request = Request::build(
        Operation::WriteMultipleCoils,
        Some(20),
        Some(99),
        &["1", "0", "1", "1", "0", "0", "0", "0", "1"],
    )
    .unwrap();

    assert_eq!(
        request,
        Request::WriteMultipleCoils {
            address: 20,
            quantity: 9,
            payload: vec![0x0D, 0x01],
        }
    );
}

#[test]
fn test_build_single_register() {
    let request =
        Request::build(Operation::WriteSingleRegister, Some(100), None, &["1", "2"]).unwrap();
    assert_eq!(
        request,
        Request::WriteSingleRegister {
            address: 100,
            quantity: 2,
            payload: vec![0x00, 0x01, 0x00, 0x02],
        }
    );

    let request =
        Request::build(Operation::WriteSingleRegister, Some(100), None, &["4660"]).unwrap();
    assert_eq!(
        request,
        Request::WriteSingleRegister {
            address: 100,
            quantity: 1,
            payload: vec![0x12, 0x34],
        }
    );

    let err =
        Request::build::<&str>(Operation::WriteSingleRegister, Some(100), None, &[]).unwrap_err();
    assert!(matches!(err, MbError::MissingArgument("values")));
}

#[test]
fn test_build_multiple_registers() {
    let request =
        Request::build(Operation::WriteMultipleRegisters, Some(7), None, &["1", "2"]).unwrap();
    assert_eq!(
        request,
        Request::WriteMultipleRegisters {
            address: 7,
            quantity: 2,
            payload: vec![0x00, 0x01, 0x00, 0x02],
        }
    );
    assert_eq!(request.operation(), Operation::WriteMultipleRegisters);
    assert_eq!(request.address(), 7);

    let err = Request::build(Operation::WriteMultipleRegisters, Some(7), None, &["70000"])
        .unwrap_err();
    assert!(matches!(err, MbError::InvalidValue { .. }));
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(&[]), "[]");
    assert_eq!(format_bytes(&[0, 5, 255]), "[0 5 255]");
}

#[test]
fn test_write_response_display() {
    let response = Response::write(Operation::WriteSingleCoil, vec![0xFF, 0x00]);
    assert_eq!(response.coil_states(), None);
    assert_eq!(response.to_string(), "response [255 0]");
}

#[test]
fn test_read_coils_response_display() {
    let response = Response::coils(vec![0x05], 3);
    assert_eq!(response.coil_states(), Some(vec![true, false, true]));
    assert_eq!(response.to_string(), "response [5]\ncoils [1 0 1]");
}
