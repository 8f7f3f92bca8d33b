//! Advertising-data parsing for the scanner.
//!
//! Advertising payloads are a sequence of AD structures, each
//! `[len, ad_type, data[len - 1]]`.  A zero length or a structure running
//! past the end of the payload terminates parsing.

use heapless::String;

/// HID over GATT service UUID.
pub const HID_SERVICE_UUID16: u16 = 0x1812;

pub const AD_INCOMPLETE_UUID16: u8 = 0x02;
pub const AD_COMPLETE_UUID16: u8 = 0x03;
pub const AD_SHORT_NAME: u8 = 0x08;
pub const AD_COMPLETE_NAME: u8 = 0x09;

/// One AD structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdStructure<'a> {
    pub ad_type: u8,
    pub data: &'a [u8],
}

/// Iterator over the well-formed AD structures of a payload.
#[derive(Clone, Debug)]
pub struct AdStructures<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = AdStructure<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, tail) = self.rest.split_first()?;
        let len = usize::from(len);
        if len == 0 || len > tail.len() {
            self.rest = &[];
            return None;
        }
        let (body, rest) = tail.split_at(len);
        self.rest = rest;
        Some(AdStructure {
            ad_type: body[0],
            data: &body[1..],
        })
    }
}

pub fn structures(data: &[u8]) -> AdStructures<'_> {
    AdStructures { rest: data }
}

/// Whether the payload lists `uuid` among its 16-bit service UUIDs.
pub fn has_service_uuid16(data: &[u8], uuid: u16) -> bool {
    let wanted = uuid.to_le_bytes();
    structures(data)
        .filter(|ad| matches!(ad.ad_type, AD_INCOMPLETE_UUID16 | AD_COMPLETE_UUID16))
        .any(|ad| ad.data.chunks_exact(2).any(|chunk| chunk == wanted))
}

/// Whether the payload advertises the HID service.
pub fn is_hid_peripheral(data: &[u8]) -> bool {
    has_service_uuid16(data, HID_SERVICE_UUID16)
}

/// Complete or shortened local name, truncated to 32 characters.
pub fn local_name(data: &[u8]) -> Option<String<32>> {
    let ad = structures(data).find(|ad| matches!(ad.ad_type, AD_SHORT_NAME | AD_COMPLETE_NAME))?;
    let mut name = String::new();
    for &b in ad.data {
        if name.push(char::from(b)).is_err() {
            break;
        }
    }
    Some(name)
}
