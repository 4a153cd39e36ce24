// This file contains the EDID base-block layout.  Byte positions follow the
// VESA E-EDID standard; please only change them against the released spec.

use byteorder::BigEndian;
use byteorder::ByteOrder;
use byteorder::LittleEndian;
use modular_bitfield::prelude::*;
use num_derive::FromPrimitive;
use strum_macros::Display;

use crate::displayid::DisplayIdExtensionBlock;
use crate::layout::checksum_byte;
use crate::layout::ByteBlock;
use crate::layout::ByteRange;
use crate::layout::FieldValue;
use crate::types::Error;
use crate::types::Result;

const FIXED_HEADER_PATTERN: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

fn hex_digits(field: &'static str, text: &str, count: usize, constraint: &'static str) -> Result<Vec<u8>> {
    if text.len() != count || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(Error::Validation { field, constraint });
    }
    Ok(text
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let high = (pair[0] as char).to_digit(16).unwrap_or(0) as u8;
            let low = (pair[1] as char).to_digit(16).unwrap_or(0) as u8;
            (high << 4) | low
        })
        .collect())
}

/// Parses a `major.minor` version string such as `1.4` into its two digits.
pub(crate) fn version_digits(field: &'static str, text: &str) -> Result<(u8, u8)> {
    let bytes = text.as_bytes();
    if bytes.len() != 3 || !bytes[0].is_ascii_digit() || bytes[1] != b'.' || !bytes[2].is_ascii_digit() {
        return Err(Error::Validation { field, constraint: "version must be a digit.digit string" });
    }
    Ok((bytes[0] - b'0', bytes[2] - b'0'))
}

/// The 20-byte EDID preamble: fixed magic pattern plus vendor identity.
pub struct Header {
    manufacturer_id: String,
    product_code: [u8; 2],
    serial_num: u32,
    manufacture_week: u8,
    manufacture_year: u16,
    edid_version: (u8, u8),
}

impl Header {
    pub fn new(
        manufacturer_id: &str,
        product_code: &str,
        serial_num: u32,
        manufacture_week: u8,
        manufacture_year: u16,
        edid_version: &str,
    ) -> Result<Self> {
        if manufacturer_id.len() != 3 || !manufacturer_id.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(Error::Validation {
                field: "manufacturer_id",
                constraint: "must be a three letter string",
            });
        }
        let product = hex_digits(
            "product_code",
            product_code,
            4,
            "must be a 4 digit hexadecimal string",
        )?;
        if serial_num > 0xFFFF_FFFE {
            return Err(Error::Validation {
                field: "serial_num",
                constraint: "must be an integer <= 4294967294",
            });
        }
        if !(1990..=2245).contains(&manufacture_year) {
            return Err(Error::Validation {
                field: "manufacture_year",
                constraint: "must be a year 1990 - 2245",
            });
        }
        let edid_version = version_digits("edid_version", edid_version)?;
        Ok(Self {
            manufacturer_id: manufacturer_id.to_ascii_uppercase(),
            product_code: [product[0], product[1]],
            serial_num,
            manufacture_week,
            manufacture_year,
            edid_version,
        })
    }

    /// Three letters, 5 bits each (`A` = 1), behind a zero bit, big-endian.
    fn manufacturer_word(&self) -> [u8; 2] {
        let mut word = 0u16;
        for letter in self.manufacturer_id.bytes() {
            word = (word << 5) | u16::from(letter - 64);
        }
        let mut bytes = [0u8; 2];
        BigEndian::write_u16(&mut bytes, word);
        bytes
    }
}

impl ByteBlock for Header {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::leaf(
                "fixed_pattern",
                ByteRange::span(0, 8),
                FIXED_HEADER_PATTERN.to_vec(),
                "00FFFFFFFFFFFF00",
            ),
            FieldValue::leaf(
                "manufacturer_id",
                ByteRange::span(8, 10),
                self.manufacturer_word().to_vec(),
                &self.manufacturer_id,
            ),
            FieldValue::leaf(
                "product_code",
                ByteRange::span(10, 12),
                self.product_code.to_vec(),
                format!("{:02X}{:02X}", self.product_code[0], self.product_code[1]),
            ),
            FieldValue::leaf("serial_num", ByteRange::span(12, 16), {
                let mut bytes = [0u8; 4];
                BigEndian::write_u32(&mut bytes, self.serial_num);
                bytes.to_vec()
            }, self.serial_num),
            FieldValue::leaf(
                "manufacture_week",
                ByteRange::at(16),
                vec![self.manufacture_week],
                self.manufacture_week,
            ),
            FieldValue::leaf(
                "manufacture_year",
                ByteRange::at(17),
                vec![(self.manufacture_year - 1990) as u8],
                self.manufacture_year,
            ),
            FieldValue::leaf(
                "edid_version",
                ByteRange::span(18, 20),
                vec![self.edid_version.0, self.edid_version.1],
                format!("{}.{}", self.edid_version.0, self.edid_version.1),
            ),
        ]
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum ColorBitDepth {
    Undefined = 0b000,
    Depth6 = 0b001,
    Depth8 = 0b010,
    Depth10 = 0b011,
    Depth12 = 0b100,
    Depth14 = 0b101,
    Depth16 = 0b110,
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum DigitalInterface {
    Undefined = 0,
    Dvi = 1,
    HdmiA = 2,
    HdmiB = 3,
    Mddi = 4,
    DisplayPort = 5,
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum SignalLevel {
    V0700S0300 = 0b00, // 0.700 : 0.300 : 1.000 Vpp
    V0714S0286 = 0b01,
    V1000S0400 = 0b10,
    V0700S0000 = 0b11,
}

#[bitfield]
struct DigitalInputByte {
    interface: B4,
    color_depth: B3,
    digital: bool,
}

#[bitfield]
struct AnalogueInputByte {
    serration_vsync: bool,
    sync_on_green: bool,
    composite_sync: bool,
    separate_sync: bool,
    blank_to_black: bool,
    signal_level: B2,
    digital: bool,
}

/// Byte 0 of the basic display parameters: a digital and an analogue variant
/// with disjoint bit layouts.
#[derive(Debug, Clone, Copy)]
pub enum VideoInput {
    Digital {
        bit_depth: ColorBitDepth,
        interface: DigitalInterface,
    },
    Analogue {
        signal_level: SignalLevel,
        blank_to_black: bool,
        separate_sync: bool,
        composite_sync: bool,
        sync_on_green: bool,
        serration_vsync: bool,
    },
}

impl VideoInput {
    fn input_byte(&self) -> u8 {
        match *self {
            VideoInput::Digital { bit_depth, interface } => DigitalInputByte::new()
                .with_interface(interface as u8)
                .with_color_depth(bit_depth as u8)
                .with_digital(true)
                .into_bytes()[0],
            VideoInput::Analogue {
                signal_level,
                blank_to_black,
                separate_sync,
                composite_sync,
                sync_on_green,
                serration_vsync,
            } => {
                // Composite sync and sync-on-green imply serration on vsync.
                let serration = serration_vsync || composite_sync || sync_on_green;
                AnalogueInputByte::new()
                    .with_serration_vsync(serration)
                    .with_sync_on_green(sync_on_green)
                    .with_composite_sync(composite_sync)
                    .with_separate_sync(separate_sync)
                    .with_blank_to_black(blank_to_black)
                    .with_signal_level(signal_level as u8)
                    .with_digital(false)
                    .into_bytes()[0]
            }
        }
    }

    fn is_digital(&self) -> bool {
        matches!(self, VideoInput::Digital { .. })
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum DigitalDisplayType {
    Rgb444 = 0b00,
    Rgb444YCrCb444 = 0b01,
    Rgb444YCrCb422 = 0b10,
    Rgb444YCrCb444YCrCb422 = 0b11,
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum AnalogueDisplayType {
    Monochrome = 0b00,
    Rgb = 0b01,
    NonRgb = 0b10,
    Undefined = 0b11,
}

/// Bits 4:3 of the feature bitmap read differently depending on the video
/// input variant; construction checks the pairing.
#[derive(Debug, Clone, Copy)]
pub enum DisplayColorType {
    Digital(DigitalDisplayType),
    Analogue(AnalogueDisplayType),
}

impl DisplayColorType {
    fn code(&self) -> u8 {
        match *self {
            DisplayColorType::Digital(kind) => kind as u8,
            DisplayColorType::Analogue(kind) => kind as u8,
        }
    }

    fn is_digital(&self) -> bool {
        matches!(self, DisplayColorType::Digital(_))
    }
}

#[bitfield]
struct FeatureByte {
    continuous_timings: bool,
    preferred_timing: bool,
    standard_srgb: bool,
    display_type: B2,
    dpms_active_off: bool,
    dpms_suspend: bool,
    dpms_standby: bool,
}

/// Byte 4 of the basic display parameters.
#[derive(Debug, Clone, Copy)]
pub struct SupportedFeatures {
    pub dpms_standby: bool,
    pub dpms_suspend: bool,
    pub dpms_active_off: bool,
    pub display_type: DisplayColorType,
    pub standard_srgb: bool,
    pub dtd_block_1_is_preferred: bool,
    pub continuous_timings: bool,
}

impl SupportedFeatures {
    fn feature_byte(&self) -> u8 {
        FeatureByte::new()
            .with_continuous_timings(self.continuous_timings)
            .with_preferred_timing(self.dtd_block_1_is_preferred)
            .with_standard_srgb(self.standard_srgb)
            .with_display_type(self.display_type.code())
            .with_dpms_active_off(self.dpms_active_off)
            .with_dpms_suspend(self.dpms_suspend)
            .with_dpms_standby(self.dpms_standby)
            .into_bytes()[0]
    }
}

/// EDID bytes 20-24: video input, physical size, gamma and feature bitmap.
pub struct BasicDisplayParameters {
    video_input: VideoInput,
    horizontal_size: u8,
    vertical_size: u8,
    gamma: f32,
    supported_features: SupportedFeatures,
}

impl BasicDisplayParameters {
    pub fn new(
        video_input: VideoInput,
        horizontal_size: u8,
        vertical_size: u8,
        gamma: f32,
        supported_features: SupportedFeatures,
    ) -> Result<Self> {
        if horizontal_size == 0 {
            return Err(Error::Validation {
                field: "horizontal_size",
                constraint: "must be an integer 1 - 255",
            });
        }
        if vertical_size == 0 {
            return Err(Error::Validation {
                field: "vertical_size",
                constraint: "must be an integer 1 - 255",
            });
        }
        if !(1.0..=3.54).contains(&gamma) {
            return Err(Error::Validation { field: "gamma", constraint: "must be 1.00 - 3.54" });
        }
        if video_input.is_digital() != supported_features.display_type.is_digital() {
            return Err(Error::Validation {
                field: "supported_features",
                constraint: "display type variant must match the video input variant",
            });
        }
        Ok(Self { video_input, horizontal_size, vertical_size, gamma, supported_features })
    }
}

impl ByteBlock for BasicDisplayParameters {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::leaf(
                "video_input",
                ByteRange::at(0),
                vec![self.video_input.input_byte()],
                format!("{:?}", self.video_input),
            ),
            FieldValue::leaf(
                "horizontal_size",
                ByteRange::at(1),
                vec![self.horizontal_size],
                self.horizontal_size,
            ),
            FieldValue::leaf(
                "vertical_size",
                ByteRange::at(2),
                vec![self.vertical_size],
                self.vertical_size,
            ),
            FieldValue::leaf(
                "gamma",
                ByteRange::at(3),
                vec![((self.gamma - 1.0) * 100.0).round() as u8],
                self.gamma,
            ),
            FieldValue::leaf(
                "supported_features",
                ByteRange::at(4),
                vec![self.supported_features.feature_byte()],
                format!("{:?}", self.supported_features),
            ),
        ]
    }
}

/// EDID bytes 25-34: 10-bit CIE chromaticity registers.  Accepts 0.0 - 1.0
/// coordinates and performs the fixed-point quantization itself.
pub struct ChromaticityCoordinates {
    red: (f32, f32),
    green: (f32, f32),
    blue: (f32, f32),
    white: (f32, f32),
}

fn coordinate10(field: &'static str, value: f32) -> Result<u16> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Validation { field, constraint: "must be a coordinate 0.0 - 1.0" });
    }
    Ok(((value * 1024.0).round() as u16).min(1023))
}

impl ChromaticityCoordinates {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        red_x: f32,
        red_y: f32,
        green_x: f32,
        green_y: f32,
        blue_x: f32,
        blue_y: f32,
        white_x: f32,
        white_y: f32,
    ) -> Result<Self> {
        coordinate10("red_x", red_x)?;
        coordinate10("red_y", red_y)?;
        coordinate10("green_x", green_x)?;
        coordinate10("green_y", green_y)?;
        coordinate10("blue_x", blue_x)?;
        coordinate10("blue_y", blue_y)?;
        coordinate10("white_x", white_x)?;
        coordinate10("white_y", white_y)?;
        Ok(Self {
            red: (red_x, red_y),
            green: (green_x, green_y),
            blue: (blue_x, blue_y),
            white: (white_x, white_y),
        })
    }

    fn quantized(&self) -> [u16; 8] {
        let quantize = |value: f32| ((value * 1024.0).round() as u16).min(1023);
        [
            quantize(self.red.0),
            quantize(self.red.1),
            quantize(self.green.0),
            quantize(self.green.1),
            quantize(self.blue.0),
            quantize(self.blue.1),
            quantize(self.white.0),
            quantize(self.white.1),
        ]
    }
}

impl ByteBlock for ChromaticityCoordinates {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let [red_x, red_y, green_x, green_y, blue_x, blue_y, white_x, white_y] = self.quantized();
        let lsb_pair = |a: u16, b: u16, c: u16, d: u16| {
            (((a & 3) << 6) | ((b & 3) << 4) | ((c & 3) << 2) | (d & 3)) as u8
        };
        vec![
            FieldValue::leaf(
                "red_green_lsb",
                ByteRange::at(0),
                vec![lsb_pair(red_x, red_y, green_x, green_y)],
                format!("{:?} {:?}", self.red, self.green),
            ),
            FieldValue::leaf(
                "blue_white_lsb",
                ByteRange::at(1),
                vec![lsb_pair(blue_x, blue_y, white_x, white_y)],
                format!("{:?} {:?}", self.blue, self.white),
            ),
            FieldValue::leaf("red_x_msb", ByteRange::at(2), vec![(red_x >> 2) as u8], self.red.0),
            FieldValue::leaf("red_y_msb", ByteRange::at(3), vec![(red_y >> 2) as u8], self.red.1),
            FieldValue::leaf(
                "green_xy_msb",
                ByteRange::span(4, 6),
                vec![(green_x >> 2) as u8, (green_y >> 2) as u8],
                format!("{:?}", self.green),
            ),
            FieldValue::leaf(
                "blue_xy_msb",
                ByteRange::span(6, 8),
                vec![(blue_x >> 2) as u8, (blue_y >> 2) as u8],
                format!("{:?}", self.blue),
            ),
            FieldValue::leaf(
                "white_xy_msb",
                ByteRange::span(8, 10),
                vec![(white_x >> 2) as u8, (white_y >> 2) as u8],
                format!("{:?}", self.white),
            ),
        ]
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, FromPrimitive, Clone, Copy, Display)]
pub enum AspectRatio {
    #[strum(serialize = "16:10")]
    Wide16x10 = 0b00,
    #[strum(serialize = "4:3")]
    Conventional4x3 = 0b01,
    #[strum(serialize = "5:4")]
    Tall5x4 = 0b10,
    #[strum(serialize = "16:9")]
    Wide16x9 = 0b11,
}

#[bitfield]
struct VerticalTimingByte {
    vertical_freq_offset: B6,
    aspect_ratio: B2,
}

/// Compact 2-byte resolution / aspect ratio / refresh rate combination.
pub struct StandardTiming {
    x_resolution: u16,
    aspect_ratio: AspectRatio,
    vertical_freq: u8,
}

impl StandardTiming {
    pub fn new(x_resolution: u16, aspect_ratio: AspectRatio, vertical_freq: u8) -> Result<Self> {
        if x_resolution < 256 || x_resolution % 8 != 0 {
            return Err(Error::Validation {
                field: "x_resolution",
                constraint: "must be a multiple of 8, at least 256 pixels",
            });
        }
        if !(60..=123).contains(&vertical_freq) {
            return Err(Error::Validation {
                field: "vertical_freq",
                constraint: "must be 60 - 123",
            });
        }
        Ok(Self { x_resolution, aspect_ratio, vertical_freq })
    }

    /// The sentinel that fills unused standard timing slots.
    pub fn empty() -> Self {
        Self { x_resolution: 256, aspect_ratio: AspectRatio::Wide16x10, vertical_freq: 61 }
    }
}

impl ByteBlock for StandardTiming {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::leaf(
                "x_resolution",
                ByteRange::at(0),
                vec![((self.x_resolution / 8 - 31) & 0xFF) as u8],
                self.x_resolution,
            ),
            FieldValue::leaf(
                "vertical_timing",
                ByteRange::at(1),
                VerticalTimingByte::new()
                    .with_vertical_freq_offset(self.vertical_freq - 60)
                    .with_aspect_ratio(self.aspect_ratio as u8)
                    .into_bytes()
                    .to_vec(),
                format!("{}, {} Hz", self.aspect_ratio, self.vertical_freq),
            ),
        ]
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum StereoMode {
    None = 0,
    RightDuringSync = 1,
    LeftDuringSync = 2,
    InterleavedRight = 3,
    InterleavedLeft = 4,
    InterleavedFourWay = 5,
    InterleavedSideBySide = 6,
}

impl StereoMode {
    /// Bits 6:5 plus the bit-0 interleave flag of descriptor byte 17.
    fn feature_bits(&self) -> u8 {
        match self {
            StereoMode::None => 0,
            StereoMode::RightDuringSync => 0b01 << 5,
            StereoMode::LeftDuringSync => 0b10 << 5,
            StereoMode::InterleavedRight => (0b01 << 5) | 1,
            StereoMode::InterleavedLeft => (0b10 << 5) | 1,
            StereoMode::InterleavedFourWay => 0b11 << 5,
            StereoMode::InterleavedSideBySide => (0b11 << 5) | 1,
        }
    }
}

/// Sync signal selector for descriptor byte 17, bits 4:1.
#[derive(Debug, Clone, Copy)]
pub enum SyncSignal {
    AnalogueComposite { bipolar: bool, serration: bool, sync_on_rgb: bool },
    DigitalComposite { serration: bool, hsync_positive: bool },
    DigitalSeparate { vsync_positive: bool, hsync_positive: bool },
}

impl SyncSignal {
    fn feature_bits(&self) -> u8 {
        match *self {
            SyncSignal::AnalogueComposite { bipolar, serration, sync_on_rgb } => {
                (u8::from(bipolar) << 3) | (u8::from(serration) << 2) | (u8::from(sync_on_rgb) << 1)
            }
            SyncSignal::DigitalComposite { serration, hsync_positive } => {
                (0b10 << 3) | (u8::from(serration) << 2) | (u8::from(hsync_positive) << 1)
            }
            SyncSignal::DigitalSeparate { vsync_positive, hsync_positive } => {
                (0b11 << 3) | (u8::from(vsync_positive) << 2) | (u8::from(hsync_positive) << 1)
            }
        }
    }
}

/// Input parameters of a detailed timing descriptor.
#[derive(Debug, Clone, Copy)]
pub struct DetailedTiming {
    /// MHz.
    pub pixel_clock: f64,
    pub hor_pixels: u16,
    pub hor_blnk_pixels: u16,
    pub vert_pixels: u16,
    pub vert_blnk_pixels: u16,
    pub hor_front_porch: u16,
    pub hor_synch_pulse: u16,
    pub vert_front_porch: u8,
    pub vert_synch_pulse: u8,
    pub hor_size_mm: u16,
    pub vert_size_mm: u16,
    pub hor_border_pixels: u8,
    pub vert_border_pixels: u8,
    pub interlaced: bool,
    pub stereo: StereoMode,
    pub sync: SyncSignal,
}

impl Default for DetailedTiming {
    fn default() -> Self {
        Self {
            pixel_clock: 594.0,
            hor_pixels: 3840,
            hor_blnk_pixels: 560,
            vert_pixels: 2160,
            vert_blnk_pixels: 90,
            hor_front_porch: 176,
            hor_synch_pulse: 88,
            vert_front_porch: 8,
            vert_synch_pulse: 10,
            hor_size_mm: 1000,
            vert_size_mm: 562,
            hor_border_pixels: 0,
            vert_border_pixels: 0,
            interlaced: false,
            stereo: StereoMode::None,
            sync: SyncSignal::DigitalSeparate { vsync_positive: true, hsync_positive: true },
        }
    }
}

/// 18-byte precise timing mode description.
pub struct DetailedTimingDescriptor {
    timing: DetailedTiming,
}

impl DetailedTimingDescriptor {
    pub fn new(timing: DetailedTiming) -> Result<Self> {
        if !(0.01..=655.35).contains(&timing.pixel_clock) {
            return Err(Error::Validation {
                field: "pixel_clock",
                constraint: "must be between 0.01 - 655.35 MHz",
            });
        }
        let twelve_bit: [(&'static str, u16); 6] = [
            ("hor_pixels", timing.hor_pixels),
            ("hor_blnk_pixels", timing.hor_blnk_pixels),
            ("vert_pixels", timing.vert_pixels),
            ("vert_blnk_pixels", timing.vert_blnk_pixels),
            ("hor_size_mm", timing.hor_size_mm),
            ("vert_size_mm", timing.vert_size_mm),
        ];
        for (field, value) in twelve_bit.iter().copied() {
            if value > 0xFFF {
                return Err(Error::Validation { field, constraint: "must fit in 12 bits" });
            }
        }
        if timing.hor_front_porch > 0x3FF || timing.hor_synch_pulse > 0x3FF {
            return Err(Error::Validation {
                field: "hor_front_porch",
                constraint: "horizontal porch and sync must fit in 10 bits",
            });
        }
        if timing.vert_front_porch > 0x3F || timing.vert_synch_pulse > 0x3F {
            return Err(Error::Validation {
                field: "vert_front_porch",
                constraint: "vertical porch and sync must fit in 6 bits",
            });
        }
        Ok(Self { timing })
    }
}

impl ByteBlock for DetailedTimingDescriptor {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let timing = &self.timing;
        let mut clock = [0u8; 2];
        LittleEndian::write_u16(&mut clock, (timing.pixel_clock * 100.0).round() as u16);
        let features = (u8::from(timing.interlaced) << 7)
            | timing.stereo.feature_bits()
            | timing.sync.feature_bits();
        vec![
            FieldValue::leaf("pixel_clock", ByteRange::span(0, 2), clock.to_vec(), timing.pixel_clock),
            FieldValue::leaf(
                "hor_pixels",
                ByteRange::at(2),
                vec![(timing.hor_pixels & 0xFF) as u8],
                timing.hor_pixels,
            ),
            FieldValue::leaf(
                "hor_blnk_pixels",
                ByteRange::at(3),
                vec![(timing.hor_blnk_pixels & 0xFF) as u8],
                timing.hor_blnk_pixels,
            ),
            FieldValue::leaf(
                "hor_act_blank_msb",
                ByteRange::at(4),
                vec![(((timing.hor_pixels >> 8) & 0xF) << 4) as u8 | ((timing.hor_blnk_pixels >> 8) & 0xF) as u8],
                format!("{} / {}", timing.hor_pixels, timing.hor_blnk_pixels),
            ),
            FieldValue::leaf(
                "vert_pixels",
                ByteRange::at(5),
                vec![(timing.vert_pixels & 0xFF) as u8],
                timing.vert_pixels,
            ),
            FieldValue::leaf(
                "vert_blnk_pixels",
                ByteRange::at(6),
                vec![(timing.vert_blnk_pixels & 0xFF) as u8],
                timing.vert_blnk_pixels,
            ),
            FieldValue::leaf(
                "vert_act_blank_msb",
                ByteRange::at(7),
                vec![(((timing.vert_pixels >> 8) & 0xF) << 4) as u8 | ((timing.vert_blnk_pixels >> 8) & 0xF) as u8],
                format!("{} / {}", timing.vert_pixels, timing.vert_blnk_pixels),
            ),
            FieldValue::leaf(
                "hor_front_porch",
                ByteRange::at(8),
                vec![(timing.hor_front_porch & 0xFF) as u8],
                timing.hor_front_porch,
            ),
            FieldValue::leaf(
                "hor_synch_pulse",
                ByteRange::at(9),
                vec![(timing.hor_synch_pulse & 0xFF) as u8],
                timing.hor_synch_pulse,
            ),
            FieldValue::leaf(
                "vert_porch_sync_lsb",
                ByteRange::at(10),
                vec![((timing.vert_front_porch & 0xF) << 4) | (timing.vert_synch_pulse & 0xF)],
                format!("{} / {}", timing.vert_front_porch, timing.vert_synch_pulse),
            ),
            FieldValue::leaf(
                "porch_sync_msb",
                ByteRange::at(11),
                vec![
                    (((timing.hor_front_porch >> 8) & 3) << 6) as u8
                        | (((timing.hor_synch_pulse >> 8) & 3) << 4) as u8
                        | (((timing.vert_front_porch >> 4) & 3) << 2)
                        | ((timing.vert_synch_pulse >> 4) & 3),
                ],
                "porch/sync high bits",
            ),
            FieldValue::leaf(
                "hor_size_mm",
                ByteRange::at(12),
                vec![(timing.hor_size_mm & 0xFF) as u8],
                timing.hor_size_mm,
            ),
            FieldValue::leaf(
                "vert_size_mm",
                ByteRange::at(13),
                vec![(timing.vert_size_mm & 0xFF) as u8],
                timing.vert_size_mm,
            ),
            FieldValue::leaf(
                "image_size_msb",
                ByteRange::at(14),
                vec![(((timing.hor_size_mm >> 8) & 0xF) << 4) as u8 | ((timing.vert_size_mm >> 8) & 0xF) as u8],
                format!("{} x {} mm", timing.hor_size_mm, timing.vert_size_mm),
            ),
            FieldValue::leaf(
                "hor_border_pixels",
                ByteRange::at(15),
                vec![timing.hor_border_pixels],
                timing.hor_border_pixels,
            ),
            FieldValue::leaf(
                "vert_border_pixels",
                ByteRange::at(16),
                vec![timing.vert_border_pixels],
                timing.vert_border_pixels,
            ),
            FieldValue::leaf(
                "features",
                ByteRange::at(17),
                vec![features],
                format!("interlaced: {}, {:?}, {:?}", timing.interlaced, timing.stereo, timing.sync),
            ),
        ]
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum MonitorDescriptorType {
    Dummy = 0x10,
    DisplayName = 0xFC,
    RangeLimits = 0xFD,
    Text = 0xFE,
    SerialNumber = 0xFF,
}

/// Text payloads occupy bytes 5-17: up to 13 ASCII characters, a newline
/// terminator when shorter, then space fill.
fn descriptor_text_bytes(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    if bytes.len() < 13 {
        bytes.push(b'\n');
    }
    bytes.resize(13, b' ');
    bytes
}

fn validated_text(field: &'static str, text: &str) -> Result<String> {
    if text.is_empty() || text.len() > 13 || !text.bytes().all(|byte| byte.is_ascii() && byte >= 0x20) {
        return Err(Error::Validation {
            field,
            constraint: "must be 1 - 13 printable ASCII characters",
        });
    }
    Ok(text.to_string())
}

fn text_descriptor_fields(
    descriptor_type: MonitorDescriptorType,
    field: &'static str,
    text: &str,
) -> Vec<FieldValue<'static>> {
    vec![
        FieldValue::leaf("header", ByteRange::span(0, 3), vec![0; 3], "000000"),
        FieldValue::leaf(
            "descriptor_type",
            ByteRange::at(3),
            vec![descriptor_type as u8],
            format!("{:?}", descriptor_type),
        ),
        FieldValue::leaf("reserved", ByteRange::at(4), vec![0], 0),
        FieldValue::leaf(field, ByteRange::span(5, 18), descriptor_text_bytes(text), text.to_string()),
    ]
}

/// Monitor descriptor 0xFC: the display product name.
pub struct MonitorName {
    name: String,
}

impl MonitorName {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self { name: validated_text("name", name)? })
    }
}

impl ByteBlock for MonitorName {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        text_descriptor_fields(MonitorDescriptorType::DisplayName, "name", &self.name)
    }
}

/// Monitor descriptor 0xFF: the display serial number string.
pub struct MonitorSerialNumber {
    serial: String,
}

impl MonitorSerialNumber {
    pub fn new(serial: &str) -> Result<Self> {
        Ok(Self { serial: validated_text("serial", serial)? })
    }
}

impl ByteBlock for MonitorSerialNumber {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        text_descriptor_fields(MonitorDescriptorType::SerialNumber, "serial", &self.serial)
    }
}

/// Monitor descriptor 0xFE: unstructured ASCII text.
pub struct MonitorText {
    text: String,
}

impl MonitorText {
    pub fn new(text: &str) -> Result<Self> {
        Ok(Self { text: validated_text("text", text)? })
    }
}

impl ByteBlock for MonitorText {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        text_descriptor_fields(MonitorDescriptorType::Text, "text", &self.text)
    }
}

/// Monitor descriptor 0x10: an intentionally blank slot.
pub struct DummyDescriptor;

impl ByteBlock for DummyDescriptor {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        vec![
            FieldValue::leaf("header", ByteRange::span(0, 3), vec![0; 3], "000000"),
            FieldValue::leaf(
                "descriptor_type",
                ByteRange::at(3),
                vec![MonitorDescriptorType::Dummy as u8],
                "Dummy",
            ),
            FieldValue::leaf("padding", ByteRange::span(4, 18), vec![0; 14], 0),
        ]
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, FromPrimitive, Clone, Copy)]
pub enum ExtendedTimingInfoType {
    DefaultGtf = 0x00,
    None = 0x01,
    SecondaryGtf = 0x02,
    Cvt = 0x04,
}

/// Monitor descriptor 0xFD: supported frequency ranges and peak pixel clock.
pub struct MonitorRangeLimits {
    vert_freq_min: u16,
    vert_freq_max: u16,
    hor_freq_min: u16,
    hor_freq_max: u16,
    /// MHz; stored on the wire in 10 MHz units.
    pixel_clock_max: u16,
    extended_timing_info: ExtendedTimingInfoType,
}

/// Splits a min/max rate pair into the +255 offset flag bits and the stored
/// byte values.
fn rate_offsets(min: u16, max: u16) -> (u8, u8, u8) {
    match (min > 255, max > 255) {
        (true, _) => (0b11, (min - 255) as u8, (max - 255) as u8),
        (false, true) => (0b10, min as u8, (max - 255) as u8),
        (false, false) => (0b00, min as u8, max as u8),
    }
}

impl MonitorRangeLimits {
    pub fn new(
        vert_freq_min: u16,
        vert_freq_max: u16,
        hor_freq_min: u16,
        hor_freq_max: u16,
        pixel_clock_max: u16,
        extended_timing_info: ExtendedTimingInfoType,
    ) -> Result<Self> {
        let pairs: [(&'static str, u16, u16); 2] = [
            ("vert_freq", vert_freq_min, vert_freq_max),
            ("hor_freq", hor_freq_min, hor_freq_max),
        ];
        for (field, min, max) in pairs.iter().copied() {
            if min == 0 || max > 510 {
                return Err(Error::Validation { field, constraint: "must be 1 - 510" });
            }
            if min > max {
                return Err(Error::Validation {
                    field,
                    constraint: "minimum must not exceed maximum",
                });
            }
        }
        if pixel_clock_max == 0 || pixel_clock_max > 2550 || pixel_clock_max % 10 != 0 {
            return Err(Error::Validation {
                field: "pixel_clock_max",
                constraint: "must be a multiple of 10, at most 2550 MHz",
            });
        }
        Ok(Self {
            vert_freq_min,
            vert_freq_max,
            hor_freq_min,
            hor_freq_max,
            pixel_clock_max,
            extended_timing_info,
        })
    }
}

impl ByteBlock for MonitorRangeLimits {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let (vert_flags, vert_min, vert_max) = rate_offsets(self.vert_freq_min, self.vert_freq_max);
        let (hor_flags, hor_min, hor_max) = rate_offsets(self.hor_freq_min, self.hor_freq_max);
        let mut filler = vec![0x0A];
        filler.resize(7, 0x20);
        vec![
            FieldValue::leaf("header", ByteRange::span(0, 3), vec![0; 3], "000000"),
            FieldValue::leaf(
                "descriptor_type",
                ByteRange::at(3),
                vec![MonitorDescriptorType::RangeLimits as u8],
                "RangeLimits",
            ),
            FieldValue::leaf(
                "rate_offsets",
                ByteRange::at(4),
                vec![(hor_flags << 2) | vert_flags],
                format!("hor: {:02b}, vert: {:02b}", hor_flags, vert_flags),
            ),
            FieldValue::leaf("vert_freq_min", ByteRange::at(5), vec![vert_min], self.vert_freq_min),
            FieldValue::leaf("vert_freq_max", ByteRange::at(6), vec![vert_max], self.vert_freq_max),
            FieldValue::leaf("hor_freq_min", ByteRange::at(7), vec![hor_min], self.hor_freq_min),
            FieldValue::leaf("hor_freq_max", ByteRange::at(8), vec![hor_max], self.hor_freq_max),
            FieldValue::leaf(
                "pixel_clock_max",
                ByteRange::at(9),
                vec![(self.pixel_clock_max / 10) as u8],
                self.pixel_clock_max,
            ),
            FieldValue::leaf(
                "extended_timing_info",
                ByteRange::at(10),
                vec![self.extended_timing_info as u8],
                format!("{:?}", self.extended_timing_info),
            ),
            FieldValue::leaf("filler", ByteRange::span(11, 18), filler, "filler"),
        ]
    }
}

/// One of the four 18-byte descriptor slots of a base EDID.
pub enum Descriptor {
    DetailedTiming(DetailedTimingDescriptor),
    Name(MonitorName),
    SerialNumber(MonitorSerialNumber),
    Text(MonitorText),
    RangeLimits(MonitorRangeLimits),
    Dummy(DummyDescriptor),
}

impl ByteBlock for Descriptor {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        match self {
            Descriptor::DetailedTiming(inner) => inner.field_values(),
            Descriptor::Name(inner) => inner.field_values(),
            Descriptor::SerialNumber(inner) => inner.field_values(),
            Descriptor::Text(inner) => inner.field_values(),
            Descriptor::RangeLimits(inner) => inner.field_values(),
            Descriptor::Dummy(inner) => inner.field_values(),
        }
    }
}

/// The 128-byte EDID base block, plus any 128-byte extension blocks appended
/// after it.  The checksum is finalized during construction; instances are
/// immutable afterwards.
pub struct BaseEdid {
    header: Header,
    basic_display_parameters: BasicDisplayParameters,
    chromaticity_coordinates: ChromaticityCoordinates,
    established_timing: [u8; 3],
    standard_timings: Vec<StandardTiming>,
    descriptors: Vec<Descriptor>,
    extension_blocks: Vec<DisplayIdExtensionBlock>,
    checksum: u8,
}

pub const BASE_EDID_LENGTH: usize = 128;

impl BaseEdid {
    pub fn new(
        header: Header,
        basic_display_parameters: BasicDisplayParameters,
        chromaticity_coordinates: ChromaticityCoordinates,
        established_timing: &str,
        standard_timings: Vec<StandardTiming>,
        descriptors: Vec<Descriptor>,
        extension_blocks: Vec<DisplayIdExtensionBlock>,
    ) -> Result<Self> {
        let established = hex_digits(
            "established_timing",
            established_timing,
            6,
            "must be a 6 digit hexadecimal string",
        )?;
        if standard_timings.is_empty() || standard_timings.len() > 8 {
            return Err(Error::Validation {
                field: "standard_timings",
                constraint: "must be a list of at least 1 and at most 8 standard timings",
            });
        }
        if descriptors.len() != 4 {
            return Err(Error::Validation {
                field: "descriptors",
                constraint: "must be a list of 4 descriptors",
            });
        }
        if !matches!(descriptors[0], Descriptor::DetailedTiming(_)) {
            return Err(Error::Validation {
                field: "descriptors",
                constraint: "descriptor 1 must be a detailed timing descriptor",
            });
        }
        if extension_blocks.len() > 255 {
            return Err(Error::Validation {
                field: "extension_blocks",
                constraint: "must be at most 255 blocks",
            });
        }

        let mut standard_timings = standard_timings;
        while standard_timings.len() < 8 {
            standard_timings.push(StandardTiming::empty());
        }

        let mut edid = Self {
            header,
            basic_display_parameters,
            chromaticity_coordinates,
            established_timing: [established[0], established[1], established[2]],
            standard_timings,
            descriptors,
            extension_blocks,
            checksum: 0,
        };
        // Two-pass checksum: serialize with the placeholder, then derive the
        // byte that zeroes the base block sum.
        let bytes = edid.to_bytes()?;
        edid.checksum = checksum_byte(&bytes[..BASE_EDID_LENGTH]);
        Ok(edid)
    }
}

impl ByteBlock for BaseEdid {
    fn field_values(&self) -> Vec<FieldValue<'_>> {
        let extension_end = BASE_EDID_LENGTH + BASE_EDID_LENGTH * self.extension_blocks.len();
        vec![
            FieldValue::block("header", ByteRange::span(0, 20), &self.header),
            FieldValue::block(
                "basic_display_parameters",
                ByteRange::span(20, 25),
                &self.basic_display_parameters,
            ),
            FieldValue::block(
                "chromaticity_coordinates",
                ByteRange::span(25, 35),
                &self.chromaticity_coordinates,
            ),
            FieldValue::leaf(
                "established_timing",
                ByteRange::span(35, 38),
                self.established_timing.to_vec(),
                format!(
                    "{:02X}{:02X}{:02X}",
                    self.established_timing[0],
                    self.established_timing[1],
                    self.established_timing[2]
                ),
            ),
            FieldValue::list("standard_timings", ByteRange::span(38, 54), &self.standard_timings),
            FieldValue::list("descriptors", ByteRange::span(54, 126), &self.descriptors),
            FieldValue::leaf(
                "extension_count",
                ByteRange::at(126),
                vec![self.extension_blocks.len() as u8],
                self.extension_blocks.len(),
            ),
            FieldValue::leaf("checksum", ByteRange::at(127), vec![self.checksum], self.checksum),
            FieldValue::list(
                "extension_blocks",
                ByteRange::span(BASE_EDID_LENGTH, extension_end),
                &self.extension_blocks,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_header() -> Header {
        Header::new("LNX", "0000", 0, 5, 2012, "1.3").unwrap()
    }

    fn digital_parameters() -> BasicDisplayParameters {
        BasicDisplayParameters::new(
            VideoInput::Digital {
                bit_depth: ColorBitDepth::Depth10,
                interface: DigitalInterface::DisplayPort,
            },
            60,
            34,
            2.2,
            SupportedFeatures {
                dpms_standby: false,
                dpms_suspend: false,
                dpms_active_off: true,
                display_type: DisplayColorType::Digital(
                    DigitalDisplayType::Rgb444YCrCb444YCrCb422,
                ),
                standard_srgb: false,
                dtd_block_1_is_preferred: false,
                continuous_timings: true,
            },
        )
        .unwrap()
    }

    fn acer_chromaticity() -> ChromaticityCoordinates {
        ChromaticityCoordinates::new(0.672, 0.318, 0.208, 0.710, 0.148, 0.056, 0.3125, 0.329)
            .unwrap()
    }

    fn four_descriptors() -> Vec<Descriptor> {
        vec![
            Descriptor::DetailedTiming(
                DetailedTimingDescriptor::new(DetailedTiming::default()).unwrap(),
            ),
            Descriptor::Name(MonitorName::new("XV273K").unwrap()),
            Descriptor::RangeLimits(
                MonitorRangeLimits::new(24, 144, 10, 510, 1070, ExtendedTimingInfoType::None)
                    .unwrap(),
            ),
            Descriptor::Dummy(DummyDescriptor),
        ]
    }

    fn sample_edid(extension_blocks: Vec<DisplayIdExtensionBlock>) -> BaseEdid {
        BaseEdid::new(
            linux_header(),
            digital_parameters(),
            acer_chromaticity(),
            "000000",
            vec![StandardTiming::new(3840, AspectRatio::Wide16x9, 60).unwrap()],
            four_descriptors(),
            extension_blocks,
        )
        .unwrap()
    }

    #[test]
    fn header_bytes_match_reference() {
        let bytes = linux_header().to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, // magic
                0x31, 0xD8, // LNX
                0x00, 0x00, // product code
                0x00, 0x00, 0x00, 0x00, // serial
                0x05, // week
                0x16, // 2012 - 1990
                0x01, 0x03, // version 1.3
            ]
        );
        assert_eq!(linux_header().block_size(), 20);
    }

    #[test]
    fn header_rejects_bad_manufacturer() {
        let result = Header::new("TOOLONG", "0000", 0, 0, 2020, "1.4");
        assert_eq!(
            result.err(),
            Some(Error::Validation {
                field: "manufacturer_id",
                constraint: "must be a three letter string",
            })
        );
    }

    #[test]
    fn header_rejects_bad_product_code() {
        assert!(Header::new("LNX", "00G0", 0, 0, 2020, "1.4").is_err());
        assert!(Header::new("LNX", "000", 0, 0, 2020, "1.4").is_err());
    }

    #[test]
    fn digital_input_byte_packs_depth_and_interface() {
        let parameters = digital_parameters();
        let bytes = parameters.to_bytes().unwrap();
        // 10 bpc DisplayPort digital input.
        assert_eq!(bytes[0], 0xB5);
        // Active-off + all-color-format display type + continuous timings.
        assert_eq!(bytes[4], 0b0011_1001);
        assert_eq!(parameters.block_size(), 5);
    }

    #[test]
    fn analogue_serration_is_forced_by_composite_sync() {
        let parameters = BasicDisplayParameters::new(
            VideoInput::Analogue {
                signal_level: SignalLevel::V0700S0300,
                blank_to_black: false,
                separate_sync: false,
                composite_sync: true,
                sync_on_green: false,
                serration_vsync: false,
            },
            100,
            56,
            2.2,
            SupportedFeatures {
                dpms_standby: false,
                dpms_suspend: false,
                dpms_active_off: false,
                display_type: DisplayColorType::Analogue(AnalogueDisplayType::Rgb),
                standard_srgb: false,
                dtd_block_1_is_preferred: false,
                continuous_timings: false,
            },
        )
        .unwrap();
        let bytes = parameters.to_bytes().unwrap();
        assert_eq!(bytes[0], 0b0000_0101);
    }

    #[test]
    fn display_type_variant_must_match_input() {
        let result = BasicDisplayParameters::new(
            VideoInput::Digital {
                bit_depth: ColorBitDepth::Depth8,
                interface: DigitalInterface::Dvi,
            },
            60,
            34,
            2.2,
            SupportedFeatures {
                dpms_standby: false,
                dpms_suspend: false,
                dpms_active_off: false,
                display_type: DisplayColorType::Analogue(AnalogueDisplayType::Rgb),
                standard_srgb: false,
                dtd_block_1_is_preferred: false,
                continuous_timings: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn chromaticity_is_ten_bits_per_coordinate() {
        let chromaticity = acer_chromaticity();
        let bytes = chromaticity.to_bytes().unwrap();
        assert_eq!(bytes.len(), 10);
        assert_eq!(chromaticity.block_size(), 10);
        // red_x 0.672 -> round(688.128) = 688 = 0b10_1011_0000
        assert_eq!(bytes[2], (688u16 >> 2) as u8);
        assert_eq!(bytes[0] >> 6, (688u16 & 3) as u8);
    }

    #[test]
    fn chromaticity_rejects_out_of_range() {
        assert!(ChromaticityCoordinates::new(1.5, 0.3, 0.2, 0.7, 0.1, 0.05, 0.3, 0.3).is_err());
    }

    #[test]
    fn standard_timing_bytes_match_reference() {
        let timing = StandardTiming::new(3840, AspectRatio::Wide16x9, 60).unwrap();
        assert_eq!(timing.to_bytes().unwrap(), vec![0xC1, 0xC0]);
        assert_eq!(timing.block_size(), 2);
    }

    #[test]
    fn empty_standard_timing_sentinel() {
        assert_eq!(StandardTiming::empty().to_bytes().unwrap(), vec![0x01, 0x01]);
    }

    #[test]
    fn standard_timing_rejects_bad_input() {
        assert!(StandardTiming::new(200, AspectRatio::Wide16x9, 60).is_err());
        assert!(StandardTiming::new(3840, AspectRatio::Wide16x9, 59).is_err());
    }

    #[test]
    fn detailed_timing_bytes_match_reference() {
        let descriptor = DetailedTimingDescriptor::new(DetailedTiming::default()).unwrap();
        let bytes = descriptor.to_bytes().unwrap();
        assert_eq!(bytes.len(), 18);
        assert_eq!(descriptor.block_size(), 18);
        // 594 MHz -> 59400 -> little endian.
        assert_eq!(&bytes[0..2], &[0x08, 0xE8]);
        // 3840 active / 560 blank: low bytes then shared high nibbles.
        assert_eq!(&bytes[2..5], &[0x00, 0x30, 0xF2]);
        // 2160 active / 90 blank.
        assert_eq!(&bytes[5..8], &[0x70, 0x5A, 0x80]);
        // Digital separate sync, both polarities positive.
        assert_eq!(bytes[17], 0x1E);
    }

    #[test]
    fn detailed_timing_rejects_thirteen_bit_pixels() {
        let timing = DetailedTiming { hor_pixels: 4096, ..DetailedTiming::default() };
        assert!(DetailedTimingDescriptor::new(timing).is_err());
    }

    #[test]
    fn monitor_name_is_newline_terminated_and_space_filled() {
        let name = MonitorName::new("XV273K").unwrap();
        let bytes = name.to_bytes().unwrap();
        assert_eq!(bytes.len(), 18);
        assert_eq!(name.block_size(), 18);
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x00, 0xFC]);
        assert_eq!(&bytes[5..18], b"XV273K\n      ");
    }

    #[test]
    fn thirteen_character_name_has_no_terminator() {
        let name = MonitorName::new("ABCDEFGHIJKLM").unwrap();
        let bytes = name.to_bytes().unwrap();
        assert_eq!(&bytes[5..18], b"ABCDEFGHIJKLM");
        assert!(MonitorName::new("ABCDEFGHIJKLMN").is_err());
    }

    #[test]
    fn range_limits_use_offset_flags_above_255() {
        let limits =
            MonitorRangeLimits::new(24, 144, 10, 510, 1070, ExtendedTimingInfoType::None).unwrap();
        let bytes = limits.to_bytes().unwrap();
        assert_eq!(bytes.len(), 18);
        assert_eq!(bytes[3], 0xFD);
        // Horizontal max is 510: flag 0b10 in bits 3:2, stored byte 255.
        assert_eq!(bytes[4], 0b0000_1000);
        assert_eq!(&bytes[5..10], &[24, 144, 10, 255, 107]);
        assert_eq!(bytes[10], 0x01);
        assert_eq!(bytes[11], 0x0A);
        assert_eq!(&bytes[12..18], &[0x20; 6]);
    }

    #[test]
    fn base_edid_is_128_bytes_and_sums_to_zero() {
        let edid = sample_edid(Vec::new());
        let bytes = edid.to_bytes().unwrap();
        assert_eq!(bytes.len(), BASE_EDID_LENGTH);
        assert_eq!(edid.block_size(), BASE_EDID_LENGTH);
        assert_eq!(bytes[126], 0);
        let sum: u32 = bytes.iter().map(|byte| u32::from(*byte)).sum();
        assert_eq!(sum % 256, 0);
    }

    #[test]
    fn checksum_is_sensitive_to_every_byte() {
        let edid = sample_edid(Vec::new());
        let mut bytes = edid.to_bytes().unwrap();
        bytes[40] = bytes[40].wrapping_add(1);
        let sum: u32 = bytes.iter().map(|byte| u32::from(*byte)).sum();
        assert_ne!(sum % 256, 0);
    }

    #[test]
    fn serialization_is_idempotent() {
        let edid = sample_edid(Vec::new());
        assert_eq!(edid.to_bytes().unwrap(), edid.to_bytes().unwrap());
    }

    #[test]
    fn short_standard_timing_list_is_padded_with_sentinels() {
        let edid = sample_edid(Vec::new());
        let bytes = edid.to_bytes().unwrap();
        assert_eq!(&bytes[38..40], &[0xC1, 0xC0]);
        for slot in 1..8 {
            assert_eq!(&bytes[38 + slot * 2..40 + slot * 2], &[0x01, 0x01]);
        }
    }

    #[test]
    fn locate_resolves_nested_paths() {
        let edid = sample_edid(Vec::new());
        let hit = edid.locate(8).unwrap();
        assert_eq!(hit.path, "header.manufacturer_id");
        assert_eq!(hit.value, "LNX");
        assert_eq!(hit.range, ByteRange::span(8, 10));

        let hit = edid.locate(54 + 18 * 2 + 3).unwrap();
        assert_eq!(hit.path, "descriptors2.descriptor_type");
        assert_eq!(hit.range, ByteRange::at(54 + 18 * 2 + 3));

        let hit = edid.locate(39).unwrap();
        assert_eq!(hit.path, "standard_timings0.vertical_timing");
        assert_eq!(hit.value, "16:9, 60 Hz");
    }

    #[test]
    fn locate_covers_every_base_block_byte() {
        let edid = sample_edid(Vec::new());
        for offset in 0..BASE_EDID_LENGTH {
            let hit = edid.locate(offset).unwrap();
            assert!(hit.range.contains(offset), "offset {} path {}", offset, hit.path);
        }
        assert!(edid.locate(BASE_EDID_LENGTH).is_none());
    }

    #[test]
    fn descriptor_count_and_order_are_validated() {
        let result = BaseEdid::new(
            linux_header(),
            digital_parameters(),
            acer_chromaticity(),
            "000000",
            vec![StandardTiming::new(3840, AspectRatio::Wide16x9, 60).unwrap()],
            vec![Descriptor::Dummy(DummyDescriptor)],
            Vec::new(),
        );
        assert!(result.is_err());

        let result = BaseEdid::new(
            linux_header(),
            digital_parameters(),
            acer_chromaticity(),
            "000000",
            vec![StandardTiming::new(3840, AspectRatio::Wide16x9, 60).unwrap()],
            vec![
                Descriptor::Dummy(DummyDescriptor),
                Descriptor::Dummy(DummyDescriptor),
                Descriptor::Dummy(DummyDescriptor),
                Descriptor::Dummy(DummyDescriptor),
            ],
            Vec::new(),
        );
        assert_eq!(
            result.err(),
            Some(Error::Validation {
                field: "descriptors",
                constraint: "descriptor 1 must be a detailed timing descriptor",
            })
        );
    }

    #[test]
    fn extension_blocks_are_appended_after_the_base_block() {
        use crate::displayid::DataBlock;
        use crate::displayid::ProductType;
        use crate::displayid::TypeViiTimingBlock;

        let block = DisplayIdExtensionBlock::new(
            "1.2",
            ProductType::ExtensionSection,
            vec![DataBlock::TypeViiTimings(
                TypeViiTimingBlock::new(0, false, Vec::new()).unwrap(),
            )],
        )
        .unwrap();
        let edid = sample_edid(vec![block]);
        let bytes = edid.to_bytes().unwrap();
        assert_eq!(bytes.len(), 2 * BASE_EDID_LENGTH);
        assert_eq!(edid.block_size(), 2 * BASE_EDID_LENGTH);
        assert_eq!(bytes[126], 1);
        assert_eq!(bytes[128], 0x70);
        // The base checksum still covers only the first block.
        let sum: u32 = bytes[..BASE_EDID_LENGTH].iter().map(|byte| u32::from(*byte)).sum();
        assert_eq!(sum % 256, 0);

        let hit = edid.locate(129).unwrap();
        assert_eq!(hit.path, "extension_blocks0.revision");
    }
}
