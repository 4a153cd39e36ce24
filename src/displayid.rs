// DisplayID structure layout, both the standalone section format and the
// EDID extension block variant.  Offsets follow VESA DisplayID 1.3.

use byteorder::ByteOrder;
use byteorder::LittleEndian;
use modular_bitfield::prelude::*;
use num_derive::FromPrimitive;

use crate::edid::version_digits;
use crate::layout::checksum_byte;
use crate::layout::ByteBlock;
use crate::layout::ByteRange;
use crate::layout::FieldValue;
use crate::types::Error;
use crate::types::Result;

/// An EDID extension block is always exactly 128 bytes.
pub const EXTENSION_BLOCK_LENGTH: usize = 128;
/// Payload capacity of an extension block: 128 minus the five header bytes
/// and the two trailing checksums.
pub const EXTENSION_PAYLOAD_LENGTH: usize = 121;

const EXTENSION_BLOCK_TAG: u8 = 0x70;
const TYPE_VII_BLOCK_TAG: u8 = 0x22;
const TYPE_VII_DESCRIPTOR_LENGTH: usize = 20;

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum ProductType {
    ExtensionSection = 0,
    TestStructure = 1,
    DisplayPanel = 2,
    StandaloneDisplay = 3,
    TelevisionReceiver = 4,
    Repeater = 5,
    DirectDriveMonitor = 6,
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum ScanningType {
    Progressive = 0,
    Interlaced = 1,
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum Stereo3d {
    Mono = 0,
    Stereo = 1,
    MonoOrStereo = 2,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    a
}

/// The 4-bit aspect ratio code of the timing-options byte, derived from the
/// reduced active-pixel ratio.  The table is keyed in lowest terms, so 15:9
/// matches as 5:3 and 16:10 as 8:5.  Anything not listed is 8 (custom).
fn aspect_ratio_code(width: u32, height: u32) -> u8 {
    let divisor = gcd(width, height).max(1);
    match (width / divisor, height / divisor) {
        (1, 1) => 0,
        (5, 4) => 1,
        (4, 3) => 2,
        (5, 3) => 3,
        (16, 9) => 4,
        (8, 5) => 5,
        (64, 27) => 6,
        (256, 135) => 7,
        _ => 8,
    }
}

#[bitfield]
struct TimingOptionsByte {
    aspect_ratio: B4,
    scanning_type: B1,
    stereo_3d: B2,
    preferred: bool,
}

#[bitfield]
struct RevisionDscByte {
    revision: B2,
    dsc_pass_through: bool,
    #[skip]
    __: B5,
}

/// Input parameters of one Type VII timing descriptor.  Counts are the real
/// values; the wire stores each count minus one.
#[derive(Debug, Clone, Copy)]
pub struct TypeViiTiming {
    pub pixel_clock_khz: u32,
    pub horizontal_active_pixels: u32,
    pub horizontal_blank_pixels: u32,
    pub horizontal_front_porch: u32,
    pub horizontal_sync_positive: bool,
    pub horizontal_sync_width: u32,
    pub vertical_active_pixels: u32,
    pub vertical_blank_pixels: u32,
    pub vertical_front_porch: u32,
    pub vertical_sync_positive: bool,
    pub vertical_sync_width: u32,
    pub scanning_type: ScanningType,
    pub stereo_3d: Stereo3d,
    pub preferred: bool,
}

/// 20-byte Type VII detailed timing.
pub struct TypeViiDescriptor {
    timing: TypeViiTiming,
}

impl TypeViiDescriptor {
    pub fn new(timing: TypeViiTiming) -> Result<Self> {
        if timing.pixel_clock_khz == 0 || timing.pixel_clock_khz > 1 << 24 {
            return Err(Error::Validation {
                field: "pixel_clock_khz",
                constraint: "must be 1 - 16777216 kHz",
            });
        }
        let sixteen_bit: [(&'static str, u32); 6] = [
            ("horizontal_active_pixels", timing.horizontal_active_pixels),
            ("horizontal_blank_pixels", timing.horizontal_blank_pixels),
            ("horizontal_sync_width", timing.horizontal_sync_width),
            ("vertical_active_pixels", timing.vertical_active_pixels),
            ("vertical_blank_pixels", timing.vertical_blank_pixels),
            ("vertical_sync_width", timing.vertical_sync_width),
        ];
        for (field, value) in sixteen_bit.iter().copied() {
            if value == 0 || value > 1 << 16 {
                return Err(Error::Validation { field, constraint: "must be 1 - 65536" });
            }
        }
        if timing.horizontal_front_porch == 0 || timing.horizontal_front_porch > 1 << 15 {
            return Err(Error::Validation {
                field: "horizontal_front_porch",
                constraint: "must be 1 - 32768",
            });
        }
        if timing.vertical_front_porch == 0 || timing.vertical_front_porch > 1 << 15 {
            return Err(Error::Validation {
                field: "vertical_front_porch",
                constraint: "must be 1 - 32768",
            });
        }
        Ok(Self { timing })
    }

    fn timing_options_byte(&self) -> u8 {
        TimingOptionsByte::new()
            .with_aspect_ratio(aspect_ratio_code(
                self.timing.horizontal_active_pixels,
                self.timing.vertical_active_pixels,
            ))
            .with_scanning_type(self.timing.scanning_type as u8)
            .with_stereo_3d(self.timing.stereo_3d as u8)
            .with_preferred(self.timing.preferred)
            .into_bytes()[0]
    }
}

/// `value - 1`, little endian, 16 bits.
fn minus_one_word(value: u32) -> Vec<u8> {
    let mut bytes = [0u8; 2];
    LittleEndian::write_u16(&mut bytes, (value - 1) as u16);
    bytes.to_vec()
}

/// Front porch minus one in the low 15 bits, sync polarity in bit 15.
fn offset_word(front_porch: u32, sync_positive: bool) -> Vec<u8> {
    let word = ((front_porch - 1) as u16) | (u16::from(sync_positive) << 15);
    let mut bytes = [0u8; 2];
    LittleEndian::write_u16(&mut bytes, word);
    bytes.to_vec()
}

impl ByteBlock for TypeViiDescriptor {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let timing = &self.timing;
        let mut clock = [0u8; 3];
        LittleEndian::write_u24(&mut clock, timing.pixel_clock_khz - 1);
        vec![
            FieldValue::leaf(
                "pixel_clock",
                ByteRange::span(0, 3),
                clock.to_vec(),
                format!("{} kHz", timing.pixel_clock_khz),
            ),
            FieldValue::leaf(
                "timing_options",
                ByteRange::at(3),
                vec![self.timing_options_byte()],
                format!(
                    "{:?}, {:?}, preferred: {}",
                    timing.scanning_type, timing.stereo_3d, timing.preferred
                ),
            ),
            FieldValue::leaf(
                "horizontal_active_pixels",
                ByteRange::span(4, 6),
                minus_one_word(timing.horizontal_active_pixels),
                timing.horizontal_active_pixels,
            ),
            FieldValue::leaf(
                "horizontal_blank_pixels",
                ByteRange::span(6, 8),
                minus_one_word(timing.horizontal_blank_pixels),
                timing.horizontal_blank_pixels,
            ),
            FieldValue::leaf(
                "horizontal_offset",
                ByteRange::span(8, 10),
                offset_word(timing.horizontal_front_porch, timing.horizontal_sync_positive),
                format!(
                    "{}, positive sync: {}",
                    timing.horizontal_front_porch, timing.horizontal_sync_positive
                ),
            ),
            FieldValue::leaf(
                "horizontal_sync_width",
                ByteRange::span(10, 12),
                minus_one_word(timing.horizontal_sync_width),
                timing.horizontal_sync_width,
            ),
            FieldValue::leaf(
                "vertical_active_pixels",
                ByteRange::span(12, 14),
                minus_one_word(timing.vertical_active_pixels),
                timing.vertical_active_pixels,
            ),
            FieldValue::leaf(
                "vertical_blank_pixels",
                ByteRange::span(14, 16),
                minus_one_word(timing.vertical_blank_pixels),
                timing.vertical_blank_pixels,
            ),
            FieldValue::leaf(
                "vertical_offset",
                ByteRange::span(16, 18),
                offset_word(timing.vertical_front_porch, timing.vertical_sync_positive),
                format!(
                    "{}, positive sync: {}",
                    timing.vertical_front_porch, timing.vertical_sync_positive
                ),
            ),
            FieldValue::leaf(
                "vertical_sync_width",
                ByteRange::span(18, 20),
                minus_one_word(timing.vertical_sync_width),
                timing.vertical_sync_width,
            ),
        ]
    }
}

/// Data block tag 0x22: a list of Type VII timing descriptors behind a
/// 3-byte block header.
pub struct TypeViiTimingBlock {
    revision: u8,
    dsc_pass_through: bool,
    descriptors: Vec<TypeViiDescriptor>,
}

impl TypeViiTimingBlock {
    pub fn new(
        revision: u8,
        dsc_pass_through: bool,
        descriptors: Vec<TypeViiDescriptor>,
    ) -> Result<Self> {
        if revision > 3 {
            return Err(Error::Validation { field: "revision", constraint: "must be 0 - 3" });
        }
        // The payload length byte caps the descriptor count.
        if descriptors.len() * TYPE_VII_DESCRIPTOR_LENGTH > 255 {
            return Err(Error::Validation {
                field: "descriptors",
                constraint: "must be at most 12 descriptors",
            });
        }
        Ok(Self { revision, dsc_pass_through, descriptors })
    }

    fn payload_length(&self) -> usize {
        self.descriptors.len() * TYPE_VII_DESCRIPTOR_LENGTH
    }
}

impl ByteBlock for TypeViiTimingBlock {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let payload = self.payload_length();
        vec![
            FieldValue::leaf("block_tag", ByteRange::at(0), vec![TYPE_VII_BLOCK_TAG], "type VII timing"),
            FieldValue::leaf(
                "revision_dsc",
                ByteRange::at(1),
                RevisionDscByte::new()
                    .with_revision(self.revision)
                    .with_dsc_pass_through(self.dsc_pass_through)
                    .into_bytes()
                    .to_vec(),
                format!("revision {}, DSC pass-through: {}", self.revision, self.dsc_pass_through),
            ),
            FieldValue::leaf(
                "num_payload_bytes",
                ByteRange::at(2),
                vec![payload as u8],
                payload,
            ),
            FieldValue::list(
                "timing_descriptors",
                ByteRange::span(3, 3 + payload),
                &self.descriptors,
            ),
        ]
    }
}

/// The tagged union of DisplayID data block kinds.
pub enum DataBlock {
    TypeViiTimings(TypeViiTimingBlock),
}

impl ByteBlock for DataBlock {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        match self {
            DataBlock::TypeViiTimings(inner) => inner.field_values(),
        }
    }
}

fn data_blocks_payload(data_blocks: &[DataBlock]) -> usize {
    data_blocks.iter().map(ByteBlock::block_size).sum()
}

/// A standalone DisplayID section: 4-byte header, data blocks, one trailing
/// checksum over the whole section.
pub struct DisplayIdSection {
    revision: (u8, u8),
    product_type: ProductType,
    data_blocks: Vec<DataBlock>,
    checksum: u8,
}

impl DisplayIdSection {
    pub fn new(revision: &str, product_type: ProductType, data_blocks: Vec<DataBlock>) -> Result<Self> {
        let revision = version_digits("revision", revision)?;
        if data_blocks_payload(&data_blocks) > 255 {
            return Err(Error::Validation {
                field: "data_blocks",
                constraint: "payload must be at most 255 bytes",
            });
        }
        let mut section = Self { revision, product_type, data_blocks, checksum: 0 };
        let bytes = section.to_bytes()?;
        section.checksum = checksum_byte(&bytes[..bytes.len() - 1]);
        Ok(section)
    }

    fn revision_byte(&self) -> u8 {
        (self.revision.0 << 4) | self.revision.1
    }

    fn revision_text(&self) -> String {
        format!("{}.{}", self.revision.0, self.revision.1)
    }
}

impl ByteBlock for DisplayIdSection {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let payload = data_blocks_payload(&self.data_blocks);
        vec![
            FieldValue::leaf("revision", ByteRange::at(0), vec![self.revision_byte()], self.revision_text()),
            FieldValue::leaf("length_of_block", ByteRange::at(1), vec![payload as u8], payload),
            FieldValue::leaf(
                "product_type",
                ByteRange::at(2),
                vec![self.product_type as u8],
                format!("{:?}", self.product_type),
            ),
            FieldValue::leaf(
                "extension_count",
                ByteRange::at(3),
                vec![self.data_blocks.len() as u8],
                self.data_blocks.len(),
            ),
            FieldValue::list("data_blocks", ByteRange::span(4, 4 + payload), &self.data_blocks),
            FieldValue::leaf("checksum", ByteRange::at(4 + payload), vec![self.checksum], self.checksum),
        ]
    }
}

/// A DisplayID section wrapped as a 128-byte EDID extension block: tag 0x70,
/// the section fields shifted down one byte, an inner DisplayID checksum at
/// byte 126 over bytes 1-126 and the outer EDID checksum at byte 127 over
/// the whole block.
pub struct DisplayIdExtensionBlock {
    revision: (u8, u8),
    product_type: ProductType,
    data_blocks: Vec<DataBlock>,
    checksum: u8,
    edid_checksum: u8,
}

impl DisplayIdExtensionBlock {
    pub fn new(revision: &str, product_type: ProductType, data_blocks: Vec<DataBlock>) -> Result<Self> {
        let revision = version_digits("revision", revision)?;
        let payload = data_blocks_payload(&data_blocks);
        if payload > EXTENSION_PAYLOAD_LENGTH {
            return Err(Error::EncodingOverflow {
                field: "data_blocks".to_string(),
                width: EXTENSION_PAYLOAD_LENGTH,
                actual: payload,
            });
        }
        let mut block = Self { revision, product_type, data_blocks, checksum: 0, edid_checksum: 0 };
        // Inner checksum first; the outer checksum covers it.
        let bytes = block.to_bytes()?;
        block.checksum = checksum_byte(&bytes[1..126]);
        let bytes = block.to_bytes()?;
        block.edid_checksum = checksum_byte(&bytes[..127]);
        Ok(block)
    }

    fn revision_text(&self) -> String {
        format!("{}.{}", self.revision.0, self.revision.1)
    }
}

impl ByteBlock for DisplayIdExtensionBlock {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let payload = data_blocks_payload(&self.data_blocks);
        vec![
            FieldValue::leaf(
                "edid_block_tag",
                ByteRange::at(0),
                vec![EXTENSION_BLOCK_TAG],
                "DisplayID extension",
            ),
            FieldValue::leaf(
                "revision",
                ByteRange::at(1),
                vec![(self.revision.0 << 4) | self.revision.1],
                self.revision_text(),
            ),
            FieldValue::leaf(
                "length_of_block",
                ByteRange::at(2),
                vec![EXTENSION_PAYLOAD_LENGTH as u8],
                EXTENSION_PAYLOAD_LENGTH,
            ),
            FieldValue::leaf(
                "product_type",
                ByteRange::at(3),
                vec![self.product_type as u8],
                format!("{:?}", self.product_type),
            ),
            // Extension blocks never nest further sections.
            FieldValue::leaf("extension_count", ByteRange::at(4), vec![0], 0),
            FieldValue::list("data_blocks", ByteRange::span(5, 5 + payload), &self.data_blocks),
            // The unused payload tail is an owned field, not a gap, so the
            // footprint sum stays at the fixed 128 bytes.
            FieldValue::leaf(
                "padding",
                ByteRange::span(5 + payload, 126),
                vec![0; EXTENSION_PAYLOAD_LENGTH - payload],
                0,
            ),
            FieldValue::leaf("checksum", ByteRange::at(126), vec![self.checksum], self.checksum),
            FieldValue::leaf(
                "edid_checksum",
                ByteRange::at(127),
                vec![self.edid_checksum],
                self.edid_checksum,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing_1080p120() -> TypeViiTiming {
        TypeViiTiming {
            pixel_clock_khz: 274_560,
            horizontal_active_pixels: 1920,
            horizontal_blank_pixels: 80,
            horizontal_front_porch: 8,
            horizontal_sync_positive: false,
            horizontal_sync_width: 32,
            vertical_active_pixels: 1080,
            vertical_blank_pixels: 64,
            vertical_front_porch: 50,
            vertical_sync_positive: true,
            vertical_sync_width: 8,
            scanning_type: ScanningType::Progressive,
            stereo_3d: Stereo3d::Mono,
            preferred: false,
        }
    }

    fn timing_block() -> TypeViiTimingBlock {
        TypeViiTimingBlock::new(
            0,
            false,
            vec![TypeViiDescriptor::new(timing_1080p120()).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn descriptor_bytes_match_reference() {
        let descriptor = TypeViiDescriptor::new(timing_1080p120()).unwrap();
        let bytes = descriptor.to_bytes().unwrap();
        assert_eq!(bytes.len(), 20);
        assert_eq!(descriptor.block_size(), 20);
        assert_eq!(
            bytes,
            vec![
                0x7F, 0x30, 0x04, // 274560 - 1 kHz, little endian
                0x04, // 16:9 aspect, progressive
                0x7F, 0x07, // 1920 - 1
                0x4F, 0x00, // 80 - 1
                0x07, 0x00, // porch 8 - 1, negative sync
                0x1F, 0x00, // 32 - 1
                0x37, 0x04, // 1080 - 1
                0x3F, 0x00, // 64 - 1
                0x31, 0x80, // porch 50 - 1, positive sync
                0x07, 0x00, // 8 - 1
            ]
        );
    }

    #[test]
    fn descriptor_rejects_out_of_domain_counts() {
        let timing = TypeViiTiming { horizontal_active_pixels: 0, ..timing_1080p120() };
        assert!(TypeViiDescriptor::new(timing).is_err());
        let timing = TypeViiTiming { horizontal_active_pixels: 65537, ..timing_1080p120() };
        assert!(TypeViiDescriptor::new(timing).is_err());
        let timing = TypeViiTiming { horizontal_front_porch: 32769, ..timing_1080p120() };
        assert!(TypeViiDescriptor::new(timing).is_err());
        let timing = TypeViiTiming { pixel_clock_khz: 0, ..timing_1080p120() };
        assert!(TypeViiDescriptor::new(timing).is_err());
    }

    #[test]
    fn aspect_ratio_codes() {
        assert_eq!(aspect_ratio_code(1920, 1080), 4);
        assert_eq!(aspect_ratio_code(1920, 1200), 5);
        assert_eq!(aspect_ratio_code(2560, 1600), 5);
        assert_eq!(aspect_ratio_code(1280, 1024), 1);
        assert_eq!(aspect_ratio_code(800, 800), 0);
        // 1280x768 is 15:9 in lowest terms 5:3.
        assert_eq!(aspect_ratio_code(1280, 768), 3);
        // 1366x768 reduces to 683:384, which has no code point.
        assert_eq!(aspect_ratio_code(1366, 768), 8);
    }

    #[test]
    fn timing_block_header_and_sizing() {
        let block = timing_block();
        let bytes = block.to_bytes().unwrap();
        assert_eq!(bytes.len(), 23);
        assert_eq!(block.block_size(), 23);
        assert_eq!(&bytes[0..3], &[0x22, 0x00, 20]);
    }

    #[test]
    fn timing_block_revision_and_dsc_byte() {
        let block = TypeViiTimingBlock::new(2, true, Vec::new()).unwrap();
        let bytes = block.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x22, 0b0000_0110, 0]);
        assert!(TypeViiTimingBlock::new(4, false, Vec::new()).is_err());
    }

    #[test]
    fn timing_block_descriptor_count_is_capped() {
        let mut descriptors = Vec::new();
        for _ in 0..13 {
            descriptors.push(TypeViiDescriptor::new(timing_1080p120()).unwrap());
        }
        assert!(TypeViiTimingBlock::new(0, false, descriptors).is_err());
    }

    #[test]
    fn standalone_section_layout_and_checksum() {
        let section = DisplayIdSection::new(
            "1.2",
            ProductType::StandaloneDisplay,
            vec![DataBlock::TypeViiTimings(timing_block())],
        )
        .unwrap();
        let bytes = section.to_bytes().unwrap();
        assert_eq!(bytes.len(), 28);
        assert_eq!(section.block_size(), 28);
        assert_eq!(&bytes[0..4], &[0x12, 23, 0x03, 1]);
        assert_eq!(&bytes[4..7], &[0x22, 0x00, 20]);
        let sum: u32 = bytes.iter().map(|byte| u32::from(*byte)).sum();
        assert_eq!(sum % 256, 0);
    }

    #[test]
    fn standalone_section_rejects_bad_revision() {
        assert!(DisplayIdSection::new("12", ProductType::StandaloneDisplay, Vec::new()).is_err());
        assert!(DisplayIdSection::new("1.x", ProductType::StandaloneDisplay, Vec::new()).is_err());
    }

    fn extension_block() -> DisplayIdExtensionBlock {
        DisplayIdExtensionBlock::new(
            "1.2",
            ProductType::ExtensionSection,
            vec![DataBlock::TypeViiTimings(timing_block())],
        )
        .unwrap()
    }

    #[test]
    fn extension_block_is_128_bytes_with_double_checksum() {
        let block = extension_block();
        let bytes = block.to_bytes().unwrap();
        assert_eq!(bytes.len(), EXTENSION_BLOCK_LENGTH);
        assert_eq!(block.block_size(), EXTENSION_BLOCK_LENGTH);
        assert_eq!(bytes[0], 0x70);
        assert_eq!(bytes[1], 0x12);
        assert_eq!(bytes[2], 121);
        assert_eq!(bytes[4], 0);
        // Inner DisplayID checksum zeroes bytes 1-126.
        let inner: u32 = bytes[1..127].iter().map(|byte| u32::from(*byte)).sum();
        assert_eq!(inner % 256, 0);
        // Outer EDID checksum zeroes the whole block; with the inner sum at
        // zero that byte is fully determined by the tag.
        let outer: u32 = bytes.iter().map(|byte| u32::from(*byte)).sum();
        assert_eq!(outer % 256, 0);
        assert_eq!(bytes[127], 0x90);
    }

    #[test]
    fn extension_block_pads_unused_payload_with_zeros() {
        let bytes = extension_block().to_bytes().unwrap();
        // 23 payload bytes used out of 121.
        assert!(bytes[5 + 23..126].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn extension_block_rejects_oversized_payload() {
        let mut blocks = Vec::new();
        for _ in 0..6 {
            blocks.push(DataBlock::TypeViiTimings(timing_block()));
        }
        // 6 x 23 = 138 bytes of payload against a 121 byte budget.
        let result = DisplayIdExtensionBlock::new("1.2", ProductType::ExtensionSection, blocks);
        assert_eq!(
            result.err(),
            Some(Error::EncodingOverflow {
                field: "data_blocks".to_string(),
                width: EXTENSION_PAYLOAD_LENGTH,
                actual: 138,
            })
        );
    }

    #[test]
    fn locate_descends_through_data_blocks() {
        let block = extension_block();
        let hit = block.locate(8).unwrap();
        assert_eq!(hit.path, "data_blocks0.timing_descriptors0.pixel_clock");
        assert_eq!(hit.value, "274560 kHz");
        assert_eq!(hit.range, ByteRange::span(8, 11));
        // Byte 50 sits in the padding tail after the 23 payload bytes.
        let hit = block.locate(50).unwrap();
        assert_eq!(hit.path, "padding");
        assert_eq!(hit.range, ByteRange::span(28, 126));
    }

    #[test]
    fn extension_block_size_is_fixed_regardless_of_payload() {
        let empty = DisplayIdExtensionBlock::new("1.2", ProductType::ExtensionSection, Vec::new())
            .unwrap();
        assert_eq!(empty.block_size(), EXTENSION_BLOCK_LENGTH);
        assert_eq!(empty.to_bytes().unwrap().len(), EXTENSION_BLOCK_LENGTH);
        let block = extension_block();
        assert_eq!(block.block_size(), block.to_bytes().unwrap().len());
    }
}
