#![doc = include_str!("../README.md")]

pub mod clean;
pub mod decode;
pub mod encode;
pub mod error;
pub mod locate;
mod number;
pub mod options;
#[cfg(feature = "serde")]
mod ser;
pub mod value;

pub use crate::clean::{clean, is_sentinel, sanitize_string};
pub use crate::decode::{invalid_body_report, parse, parse_with_options};
pub use crate::encode::{Serialized, encode, safe_serialize, safe_serialize_with};
pub use crate::error::{Error, Result};
pub use crate::locate::{FieldPath, Segment, locate_first_unserializable_string};
pub use crate::options::{Charset, Options};
pub use crate::value::{Number, Value};
