//! Owned f64 buffers with controlled base address alignment.
//!
//! [`AlignedBuffer`] guarantees its base address is a multiple of [`VECTOR_ALIGN`], so the
//! aligned vector load path may be used on it. [`MisalignedBuffer`] holds the same kind of
//! allocation but exposes its elements through a view shifted by one element, which breaks
//! the vector alignment on purpose while keeping the view inside the allocated extent.

use crate::VECTOR_ALIGN;
use crate::error::BufferError;
use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::mem::size_of;
use std::ptr::NonNull;
use std::slice;

/// A heap allocation of `len` f64 values whose base address is a multiple of
/// [`VECTOR_ALIGN`]. The memory is zero-initialized.
///
/// The buffer owns its allocation exclusively and releases it on drop with the same layout
/// it was acquired with. A zero-length buffer performs no allocation.
#[derive(Debug)]
pub struct AlignedBuffer {
    ptr: NonNull<f64>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocate a zeroed buffer of `len` f64 values at a [`VECTOR_ALIGN`]-byte boundary.
    ///
    /// # Parameters
    /// - `len` the number of elements to allocate
    ///
    /// # Errors
    /// Returns [`BufferError::LayoutOverflow`] if `len` elements exceed the addressable
    /// range, [`BufferError::AllocationFailed`] if the allocator rejects the request, and
    /// [`BufferError::Misaligned`] if the allocator returns an address that violates the
    /// requested alignment.
    pub fn new(len: usize) -> Result<Self, BufferError> {
        let bytes = len
            .checked_mul(size_of::<f64>())
            .ok_or(BufferError::LayoutOverflow { elements: len })?;
        let layout = Layout::from_size_align(bytes, VECTOR_ALIGN)
            .map_err(|_| BufferError::LayoutOverflow { elements: len })?;

        if len == 0 {
            // dangling but well-aligned, never dereferenced and never freed
            let ptr = unsafe { NonNull::new_unchecked(VECTOR_ALIGN as *mut f64) };
            return Ok(Self { ptr, len, layout });
        }

        // SAFETY: the layout has nonzero size
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<f64>())
            .ok_or(BufferError::AllocationFailed { bytes })?;

        let addr = ptr.as_ptr() as usize;
        if addr % VECTOR_ALIGN != 0 {
            // SAFETY: the allocation was just obtained with this exact layout
            unsafe { dealloc(raw, layout) };
            return Err(BufferError::Misaligned {
                addr,
                align: VECTOR_ALIGN,
            });
        }

        Ok(Self { ptr, len, layout })
    }

    /// The number of f64 elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        // SAFETY: the pointer is valid for `len` initialized (zeroed or written) elements
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        // SAFETY: the pointer is valid for `len` elements and exclusively owned
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            // SAFETY: ptr was obtained from alloc_zeroed with this layout
            unsafe { dealloc(self.ptr.as_ptr().cast(), self.layout) };
        }
    }
}

/// A buffer whose element view is deliberately not [`VECTOR_ALIGN`]-byte aligned.
///
/// The backing allocation holds `len + 1` elements at a vector-aligned base; the view skips
/// the first element, so its base sits `size_of::<f64>()` bytes past an aligned boundary.
/// That keeps the view valid for f64 access while guaranteeing it never satisfies the
/// vector alignment. Dropping the buffer releases the backing allocation, the shifted view
/// is only ever borrowed from it.
#[derive(Debug)]
pub struct MisalignedBuffer {
    storage: AlignedBuffer,
    len: usize,
}

impl MisalignedBuffer {
    /// Create a misaligned copy of `source`: same values, element-wise, at a base address
    /// that breaks vector alignment.
    ///
    /// # Errors
    /// Propagates the [`BufferError`] of the backing allocation, which is one element
    /// larger than `source`.
    pub fn copy_of(source: &AlignedBuffer) -> Result<Self, BufferError> {
        let len = source.len();
        let mut storage = AlignedBuffer::new(len + 1)?;
        storage.as_mut_slice()[1..].copy_from_slice(source.as_slice());
        Ok(Self { storage, len })
    }

    /// The number of f64 elements visible through the view.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The shifted view. Its base address is congruent to `size_of::<f64>()` modulo
    /// [`VECTOR_ALIGN`], so it must only be summed with the unaligned load path.
    pub fn as_slice(&self) -> &[f64] {
        &self.storage.as_slice()[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_alignment_across_sizes() {
        for len in [1, 3, 4, 7, 32, 1000] {
            let buffer = AlignedBuffer::new(len).expect("allocation failed");
            let addr = buffer.as_slice().as_ptr() as usize;
            assert_eq!(
                addr % VECTOR_ALIGN,
                0,
                "base {:#x} not {}-byte aligned for len {}",
                addr,
                VECTOR_ALIGN,
                len
            );
            assert_eq!(buffer.len(), len);
        }
    }

    #[test]
    fn test_zero_initialized() {
        let buffer = AlignedBuffer::new(64).expect("allocation failed");
        assert!(buffer.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedBuffer::new(0).expect("allocation failed");
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_slice(), &[] as &[f64]);
    }

    #[test]
    fn test_layout_overflow_reported() {
        let result = AlignedBuffer::new(usize::MAX / 2);
        assert_eq!(
            result.unwrap_err(),
            BufferError::LayoutOverflow {
                elements: usize::MAX / 2
            }
        );
    }

    #[test]
    fn test_misaligned_copy_base_address() {
        let mut source = AlignedBuffer::new(16).expect("allocation failed");
        source
            .as_mut_slice()
            .iter_mut()
            .enumerate()
            .for_each(|(i, v)| *v = i as f64);

        let copy = MisalignedBuffer::copy_of(&source).expect("allocation failed");
        let addr = copy.as_slice().as_ptr() as usize;
        assert_eq!(addr % size_of::<f64>(), 0, "view must stay valid for f64 access");
        assert_eq!(
            addr % VECTOR_ALIGN,
            size_of::<f64>(),
            "view base {:#x} unexpectedly satisfies vector alignment",
            addr
        );
    }

    #[test]
    fn test_misaligned_copy_values_equal() {
        // for reproducibility of the test, we fix the seed
        let mut rng = ChaCha8Rng::seed_from_u64(37);
        let mut source = AlignedBuffer::new(37).expect("allocation failed");
        source
            .as_mut_slice()
            .iter_mut()
            .for_each(|v| *v = rng.random());

        let copy = MisalignedBuffer::copy_of(&source).expect("allocation failed");
        assert_eq!(copy.len(), source.len());
        assert_eq!(copy.as_slice(), source.as_slice());
    }

    #[test]
    fn test_misaligned_copy_of_empty() {
        let source = AlignedBuffer::new(0).expect("allocation failed");
        let copy = MisalignedBuffer::copy_of(&source).expect("allocation failed");
        assert!(copy.is_empty());
    }
}
