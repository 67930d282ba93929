//! Error types for the persistence layer.

use std::error::Error;
use std::fmt;
use std::io;

use ranged_core::{ArrayError, ArrayKind, IndexPath};
use tracing::debug;

use crate::storage::Storage;

/// Name and index path of one element, used to caption read failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementPath {
    /// Name of the container being read.
    pub name: String,
    /// Index of the element, outermost dimension first.
    pub index: IndexPath,
}

impl ElementPath {
    /// Create a path for `index` inside the container called `name`.
    pub fn new(name: &str, index: IndexPath) -> Self {
        Self {
            name: name.to_owned(),
            index,
        }
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for i in &self.index {
            write!(f, " [{i}]")?;
        }
        Ok(())
    }
}

/// Why a single value could not be read.
#[derive(Debug)]
pub enum ValueError {
    /// The source reported an I/O error.
    Io(io::Error),
    /// The source ended before the value.
    UnexpectedEof,
    /// The text token is not a value of the expected encoding.
    Malformed {
        /// The offending text.
        token: String,
        /// The encoding that was expected.
        storage: Storage,
        /// 1-based source line of the token.
        line: usize,
    },
    /// The value is well-formed but does not fit the in-memory type.
    OutOfRange {
        /// The offending value as text.
        token: String,
        /// The encoding that was expected.
        storage: Storage,
        /// 1-based source line, for text sources.
        line: Option<usize>,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::Malformed {
                token,
                storage,
                line,
            } => write!(f, "line {line}: {token:?} is not a valid {storage} value"),
            Self::OutOfRange {
                token,
                storage,
                line: Some(line),
            } => write!(f, "line {line}: {token} is out of range for {storage}"),
            Self::OutOfRange {
                token,
                storage,
                line: None,
            } => write!(f, "{token} is out of range for {storage}"),
        }
    }
}

impl Error for ValueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ValueError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(e)
        }
    }
}

/// Errors that can occur while persisting or restoring a container.
#[derive(Debug)]
pub enum PersistError {
    /// The container for a read could not be allocated.
    Allocation(ArrayError),
    /// The sink reported an error or refused further bytes.
    Write(io::Error),
    /// A value could not be read; the partial container has been freed.
    Read {
        /// The element that failed, for text reads.
        at: Option<ElementPath>,
        /// What went wrong.
        cause: ValueError,
    },
}

impl PersistError {
    /// Build a read failure after discarding the partially read `kind`.
    pub(crate) fn aborted(kind: ArrayKind, at: Option<ElementPath>, cause: ValueError) -> Self {
        match &at {
            Some(path) => debug!(%kind, %path, %cause, "read aborted, partial container freed"),
            None => debug!(%kind, %cause, "read aborted, partial container freed"),
        }
        Self::Read { at, cause }
    }

    /// The element a text read failed at, if any.
    pub fn read_location(&self) -> Option<&ElementPath> {
        match self {
            Self::Read { at, .. } => at.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(e) => write!(f, "{e}"),
            Self::Write(e) => write!(f, "write error: {e}"),
            Self::Read {
                at: Some(path),
                cause,
            } => write!(f, "could not read {path}: {cause}"),
            Self::Read { at: None, cause } => write!(f, "read error: {cause}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(e) => Some(e),
            Self::Write(e) => Some(e),
            Self::Read { cause, .. } => Some(cause),
        }
    }
}

impl From<ArrayError> for PersistError {
    fn from(e: ArrayError) -> Self {
        Self::Allocation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn element_path_renders_every_index() {
        let p = ElementPath::new("m", smallvec![3, -1]);
        assert_eq!(p.to_string(), "m [3] [-1]");
    }

    #[test]
    fn eof_io_error_becomes_unexpected_eof() {
        let e = ValueError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short"));
        assert!(matches!(e, ValueError::UnexpectedEof));
        let e = ValueError::from(io::Error::other("disk"));
        assert!(matches!(e, ValueError::Io(_)));
    }

    #[test]
    fn read_failure_is_captioned_with_the_element() {
        let e = PersistError::Read {
            at: Some(ElementPath::new("v", smallvec![2])),
            cause: ValueError::Malformed {
                token: "abc".into(),
                storage: Storage::R64,
                line: 4,
            },
        };
        assert_eq!(
            e.to_string(),
            "could not read v [2]: line 4: \"abc\" is not a valid r64 value"
        );
        assert_eq!(e.read_location().unwrap().index.as_slice(), &[2]);
    }

    #[test]
    fn allocation_failure_keeps_its_caption() {
        let e: PersistError = ArrayError::AllocationFailed {
            kind: ArrayKind::Matrix,
            operation: ranged_core::Operation::Create,
            bytes: 8,
        }
        .into();
        assert_eq!(e.to_string(), "matrix not created: could not allocate 8 bytes");
        assert!(e.source().is_some());
    }
}
