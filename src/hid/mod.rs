//! HID boot-protocol report types and classification of raw notifications.

pub mod keyboard;
pub mod mouse;


pub use keyboard::KeyboardReport;
pub use mouse::MouseReport;

/// Report ID conventionally assigned to the keyboard in report mode.
pub const KEYBOARD_REPORT_ID: u8 = 1;
/// Report ID conventionally assigned to the mouse in report mode.
pub const MOUSE_REPORT_ID: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
}

/// Classify a report by ID, falling back to its length for unknown IDs.
pub fn classify_report(report_id: u8, data: &[u8]) -> Option<HidReport> {
    match report_id {
        KEYBOARD_REPORT_ID => KeyboardReport::from_bytes(data).map(HidReport::Keyboard),
        MOUSE_REPORT_ID => MouseReport::from_bytes(data).map(HidReport::Mouse),
        _ => infer_from_length(data),
    }
}

/// Classify a notification where the payload may be either:
/// - raw boot report bytes, or
/// - report-protocol bytes prefixed with Report ID.
pub fn classify_notification(data: &[u8]) -> Option<HidReport> {
    classify_report(0, data).or_else(|| match data.split_first() {
        Some((&report_id, rest)) if !rest.is_empty() => classify_report(report_id, rest),
        _ => None,
    })
}

fn infer_from_length(data: &[u8]) -> Option<HidReport> {
    match data.len() {
        keyboard::KEYBOARD_REPORT_SIZE => KeyboardReport::from_bytes(data).map(HidReport::Keyboard),
        3..=4 => MouseReport::from_bytes(data).map(HidReport::Mouse),
        _ => {
            debug!("unrecognised HID report length: {}", data.len());
            None
        }
    }
}
