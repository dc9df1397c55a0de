//! Minimal EDID decoding: manufacturer id and physical image size.

use crate::domain::DisplayDeviceFacts;
use crate::ports::EdidBlob;

const MANUFACTURER_OFFSET: usize = 8;
const PRODUCT_CODE_OFFSET: usize = 10;
const WIDTH_CM_OFFSET: usize = 21;
const HEIGHT_CM_OFFSET: usize = 22;

/// Shortest block that still covers the basic display parameters.
pub const MIN_EDID_LEN: usize = HEIGHT_CM_OFFSET + 1;

/// Decode the PNP manufacturer id and product code, e.g. `"DEL40B5"`.
///
/// The id packs three 5-bit letters (`1` = `A`) into two big-endian bytes;
/// the product code is little-endian.
pub fn model_id(bytes: &[u8]) -> Option<String> {
    let hi = *bytes.get(MANUFACTURER_OFFSET)?;
    let lo = *bytes.get(MANUFACTURER_OFFSET + 1)?;
    let product_lo = *bytes.get(PRODUCT_CODE_OFFSET)?;
    let product_hi = *bytes.get(PRODUCT_CODE_OFFSET + 1)?;

    let letters = [
        (hi & 0x7C) >> 2,
        ((hi & 0x03) << 3) | ((lo & 0xE0) >> 5),
        lo & 0x1F,
    ];
    let mut id: String = letters.iter().map(|l| char::from(l + 64)).collect();
    id.push_str(&format!("{product_hi:02X}{product_lo:02X}"));
    Some(id)
}

/// Physical size of a display device, `None` if the block is too short.
pub fn parse(blob: &EdidBlob) -> Option<DisplayDeviceFacts> {
    if blob.bytes.len() < MIN_EDID_LEN {
        return None;
    }

    Some(DisplayDeviceFacts {
        registry_path: blob.registry_path.clone(),
        manufacturer: model_id(&blob.bytes),
        width_cm: blob.bytes[WIDTH_CM_OFFSET],
        height_cm: blob.bytes[HEIGHT_CM_OFFSET],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_edid() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
        // "DEL" = 04 05 0C -> 0b0_00100_00101_01100
        bytes[8] = 0x10;
        bytes[9] = 0xAC;
        bytes[10] = 0xB5;
        bytes[11] = 0x40;
        bytes[21] = 53;
        bytes[22] = 30;
        bytes
    }

    #[test]
    fn test_model_id_decodes_pnp_letters() {
        assert_eq!(model_id(&sample_edid()).as_deref(), Some("DEL40B5"));
    }

    #[test]
    fn test_parse_reads_image_size() {
        let blob = EdidBlob {
            registry_path: "DISPLAY\\DELA0B5\\1&2\\Device Parameters".into(),
            bytes: sample_edid(),
        };
        let facts = parse(&blob).unwrap();
        assert_eq!(facts.width_cm, 53);
        assert_eq!(facts.height_cm, 30);
        assert_eq!(facts.registry_path, blob.registry_path);
    }

    #[test]
    fn test_parse_rejects_truncated_block() {
        let blob = EdidBlob {
            registry_path: String::new(),
            bytes: vec![0u8; 16],
        };
        assert!(parse(&blob).is_none());
    }
}
