mod displayid;
mod edid;
mod layout;
mod types;
pub use types::Result;
pub use types::Error;
pub use crate::layout::checksum_byte;
pub use crate::layout::hex_block;
pub use crate::layout::ByteBlock;
pub use crate::layout::ByteRange;
pub use crate::layout::FieldValue;
pub use crate::layout::Located;
pub use crate::layout::Payload;
pub use edid::*;
pub use displayid::*;
