use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("syntax at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("non-finite number {0} has no JSON representation")]
    NonFinite(f64),

    #[error("character U+{code:04X} cannot be written as literal text")]
    Unencodable { code: u32 },

    #[error("nesting exceeds {0} levels")]
    DepthLimit(usize),
}

impl Error {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset into the parsed input, for syntax errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
