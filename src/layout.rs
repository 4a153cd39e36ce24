// The field/layout engine.  A structure is an ordered table of named fields,
// each bound to a byte range; serialization, total-size computation and the
// reverse byte-offset lookup are all derived from that table.

use crate::types::Error;
use crate::types::Result;

/// Half-open `[start, end)` span of bytes inside the owning structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// A single byte at `offset`.
    pub const fn at(offset: usize) -> Self {
        Self { start: offset, end: offset + 1 }
    }

    pub const fn span(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn shifted(&self, base: usize) -> Self {
        Self { start: self.start + base, end: self.end + base }
    }
}

/// What a field holds once its accessor has run: raw encoded bytes, one
/// nested structure, or a homogeneous list of nested structures.  Traversal
/// matches on this exhaustively; nothing is probed at runtime.
pub enum Payload<'a> {
    Leaf {
        bytes: Vec<u8>,
        /// Semantic value rendered for diagnostics.
        value: String,
    },
    Block(&'a dyn ByteBlock),
    List(Vec<&'a dyn ByteBlock>),
}

/// One named field of a structure, materialized against a concrete instance:
/// the resolved byte range plus the current payload.
pub struct FieldValue<'a> {
    pub name: &'static str,
    pub range: ByteRange,
    pub payload: Payload<'a>,
}

impl<'a> FieldValue<'a> {
    pub fn leaf(name: &'static str, range: ByteRange, bytes: Vec<u8>, value: impl ToString) -> Self {
        Self { name, range, payload: Payload::Leaf { bytes, value: value.to_string() } }
    }

    pub fn block(name: &'static str, range: ByteRange, block: &'a dyn ByteBlock) -> Self {
        Self { name, range, payload: Payload::Block(block) }
    }

    pub fn list<B: ByteBlock>(name: &'static str, range: ByteRange, items: &'a [B]) -> Self {
        let items = items.iter().map(|item| item as &dyn ByteBlock).collect();
        Self { name, range, payload: Payload::List(items) }
    }

    /// Byte footprint of the whole field within the owning structure.
    pub fn size(&self) -> usize {
        match &self.payload {
            Payload::Block(block) => block.block_size(),
            _ => self.range.width(),
        }
    }

    /// Per-element slot width of a list field.  The range must divide evenly
    /// into the elements; anything else is a schema bug, not caller input.
    pub fn element_size(&self) -> Result<usize> {
        let count = match &self.payload {
            Payload::List(items) => items.len(),
            _ => return Ok(self.range.width()),
        };
        if count == 0 {
            return Ok(0);
        }
        let width = self.range.width();
        if width % count != 0 {
            return Err(Error::ListBlockSize { field: self.name.to_string(), width, count });
        }
        Ok(width / count)
    }
}

/// Result of a reverse byte-offset lookup: the deepest field owning the
/// queried byte, with its range rebased to the structure the query ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub offset: usize,
    pub path: String,
    pub value: String,
    pub range: ByteRange,
}

impl Located {
    fn nested(self, parent: &str, base: usize, offset: usize) -> Self {
        Self {
            offset,
            path: format!("{}.{}", parent, self.path),
            value: self.value,
            range: self.range.shifted(base),
        }
    }
}

/// Capability interface of every encodable structure.  Implementors supply
/// the field table; serialization, sizing and reverse lookup are derived.
pub trait ByteBlock {
    /// The ordered field table for this instance.  Ranges are resolved at
    /// call time, so ranges that depend on sibling content stay current.
    fn field_values(&self) -> Vec<FieldValue<'_>>;

    /// Serializes the structure.  Fields are emitted in ascending range
    /// order; gaps are zero-filled and every field is padded out to its
    /// declared width so that under-length encodings never shift neighbors.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut fields = self.field_values();
        fields.sort_by_key(|field| field.range.start);

        let mut out = Vec::new();
        for field in &fields {
            if field.range.start < out.len() {
                return Err(Error::FieldOverlap { field: field.name.to_string() });
            }
            out.resize(field.range.start, 0);

            match &field.payload {
                Payload::Leaf { bytes, .. } => {
                    emit_padded(&mut out, bytes, field.range.width(), field.name)?;
                }
                Payload::Block(block) => {
                    let bytes = block.to_bytes()?;
                    emit_padded(&mut out, &bytes, field.range.width(), field.name)?;
                }
                Payload::List(items) => {
                    let slot = field.element_size()?;
                    for (index, item) in items.iter().enumerate() {
                        let bytes = item.to_bytes()?;
                        let name = format!("{}{}", field.name, index);
                        if bytes.len() > slot {
                            return Err(Error::EncodingOverflow {
                                field: name,
                                width: slot,
                                actual: bytes.len(),
                            });
                        }
                        out.extend_from_slice(&bytes);
                        out.resize(out.len() + slot - bytes.len(), 0);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Total serialized size: the sum of all field footprints.  For a tightly
    /// packed schema this equals the `to_bytes` length; a mismatch between
    /// the two indicates a padding or overlap bug in the field table.
    fn block_size(&self) -> usize {
        self.field_values().iter().map(FieldValue::size).sum()
    }

    /// Maps an absolute byte offset to the deepest field that owns it,
    /// recursing through nested and repeated sub-structures.  `None` means
    /// the offset falls outside every field: either out of bounds or inside
    /// an unfilled structural gap.
    fn locate(&self, offset: usize) -> Option<Located> {
        for field in self.field_values() {
            if !field.range.contains(offset) {
                continue;
            }
            return match &field.payload {
                Payload::Leaf { value, .. } => Some(Located {
                    offset,
                    path: field.name.to_string(),
                    value: value.clone(),
                    range: field.range,
                }),
                Payload::Block(block) => block
                    .locate(offset - field.range.start)
                    .map(|inner| inner.nested(field.name, field.range.start, offset)),
                Payload::List(items) => {
                    let slot = field.element_size().ok()?;
                    if slot == 0 {
                        return None;
                    }
                    let index = (offset - field.range.start) / slot;
                    let base = field.range.start + index * slot;
                    let name = format!("{}{}", field.name, index);
                    items
                        .get(index)?
                        .locate(offset - base)
                        .map(|inner| inner.nested(&name, base, offset))
                }
            };
        }
        None
    }
}

fn emit_padded(out: &mut Vec<u8>, bytes: &[u8], width: usize, name: &str) -> Result<()> {
    if bytes.len() > width {
        return Err(Error::EncodingOverflow {
            field: name.to_string(),
            width,
            actual: bytes.len(),
        });
    }
    out.extend_from_slice(bytes);
    out.resize(out.len() + width - bytes.len(), 0);
    Ok(())
}

/// The byte that brings the sum of `bytes` plus itself to 0 mod 256.
pub fn checksum_byte(bytes: &[u8]) -> u8 {
    let sum: u32 = bytes.iter().map(|byte| u32::from(*byte)).sum();
    ((256 - sum % 256) % 256) as u8
}

/// Renders bytes as space-separated uppercase hex, wrapped at `width` bytes
/// per line.  Diagnostic output only; not part of any wire format.
pub fn hex_block(bytes: &[u8], width: usize) -> String {
    bytes
        .chunks(width.max(1))
        .map(|line| {
            line.iter().map(|byte| format!("{:02X}", byte)).collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
