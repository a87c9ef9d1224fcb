//! The library's error type.
//! The type comprises the ways acquiring a vector-aligned buffer can fail; summation itself
//! has no error conditions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// The error type for buffer acquisition.
/// All variants are fatal to a benchmark run, since without both buffers there is nothing to
/// measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator returned a null pointer for the requested layout.
    AllocationFailed {
        /// Size of the rejected request in bytes.
        bytes: usize,
    },

    /// The requested element count does not fit into a valid allocation layout on this target.
    LayoutOverflow {
        /// The requested number of f64 elements.
        elements: usize,
    },

    /// The allocator returned an address that does not satisfy the requested alignment.
    /// This indicates a broken allocator and must not be ignored, because aligned vector
    /// loads from such a buffer would fault.
    Misaligned {
        /// The address the allocator returned.
        addr: usize,
        /// The alignment that was requested.
        align: usize,
    },
}

impl Display for BufferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {} bytes", bytes)
            }
            BufferError::LayoutOverflow { elements } => {
                write!(f, "buffer of {} elements exceeds the addressable range", elements)
            }
            BufferError::Misaligned { addr, align } => {
                write!(f, "allocator returned {:#x}, which is not {}-byte aligned", addr, align)
            }
        }
    }
}

impl Error for BufferError {}
