// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::DeviceError;
use crate::support::test_utils::{MockDevice, MockDeviceBehaviour};
use crate::traits::RandomDevice;

#[test]
fn test_mock_device_scripted_reaches_end_of_stream() {
    let mut mock = MockDevice::scripted(&[1, 2, 3]);
    let mut buf = [0u8; 4];

    assert_eq!(mock.read(&mut buf).expect("Failed to read(..) (#0)"), 3);
    assert_eq!(buf, [1, 2, 3, 0]);
    assert_eq!(mock.read(&mut buf).expect("Failed to read(..) (#1)"), 0);
    assert_eq!(mock.read_count(), 2);
}

#[test]
fn test_mock_device_cycling_wraps() {
    let mut mock = MockDevice::cycling(&[7, 8]);
    let mut buf = [0u8; 5];

    assert_eq!(mock.read(&mut buf).expect("Failed to read(..)"), 5);
    assert_eq!(buf, [7, 8, 7, 8, 7]);
}

#[test]
fn test_mock_device_change_behaviour() {
    let mut mock = MockDevice::counting();
    let mut buf = [0u8; 4];

    // First works
    assert!(mock.read(&mut buf).is_ok());

    // Change behaviour
    mock.change_behaviour(MockDeviceBehaviour::FailAtRead);

    // Now fails
    assert!(matches!(mock.read(&mut buf), Err(DeviceError::IoFailure(_))));

    // Change back
    mock.change_behaviour(MockDeviceBehaviour::None);

    // Works again
    assert!(mock.read(&mut buf).is_ok());
    assert_eq!(mock.read_count(), 3);
}

#[test]
fn test_mock_device_records_writes_only_when_writable() {
    let mut mock = MockDevice::counting();
    mock.write_exact(&[1, 2]).expect("Failed to write_exact(..) (#0)");
    assert!(mock.written().is_empty());
    assert_eq!(mock.write_count(), 0);

    let mut mock = MockDevice::counting().with_writable(true);
    mock.write_exact(&[1, 2]).expect("Failed to write_exact(..) (#1)");
    mock.write_exact(&[3]).expect("Failed to write_exact(..) (#2)");
    assert_eq!(mock.written(), &[1, 2, 3]);
    assert_eq!(mock.write_count(), 2);
}

#[test]
fn test_mock_device_close() {
    let mut mock = MockDevice::counting().with_writable(true);
    mock.close();
    mock.close();

    let mut buf = [0u8; 1];
    assert!(!mock.is_open());
    assert!(matches!(mock.read(&mut buf), Err(DeviceError::Closed)));
    assert!(matches!(mock.write_exact(&[1]), Err(DeviceError::Closed)));
}

#[test]
fn test_mock_device_interrupt_once() {
    let mut mock = MockDevice::counting().with_behaviour(MockDeviceBehaviour::InterruptOnce);
    let mut buf = [0u8; 2];

    assert!(matches!(
        mock.read(&mut buf),
        Err(DeviceError::IoFailure(ref err)) if err.kind() == std::io::ErrorKind::Interrupted
    ));
    assert_eq!(mock.read(&mut buf).expect("Failed to read(..)"), 2);
    assert_eq!(buf, [0, 1]);
}
