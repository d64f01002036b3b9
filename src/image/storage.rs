use std::ptr::NonNull;

/// Who owns the pixels behind an [`crate::Image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Allocated by the image and released when it is disposed or dropped.
    Exclusive,
    /// Caller-supplied slice; the image never frees it.
    BorrowedArray,
    /// Caller-supplied raw pointer and length; the image never frees it.
    BorrowedPointer,
}

/// Backing storage. Disposal is a transition to [`Storage::Disposed`], which drops an owned
/// allocation exactly once and leaves borrowed memory alone.
pub(crate) enum Storage<'a, T> {
    Owned(Box<[T]>),
    BorrowedSlice(&'a mut [T]),
    BorrowedRaw { ptr: NonNull<T>, len: usize },
    Disposed,
}

// SAFETY: `BorrowedRaw` is only built by `Image::from_raw`, whose contract hands the image
// exclusive access to the memory for its whole lifetime. The storage then behaves like the
// `&'a mut [T]` of `BorrowedSlice`, which is `Send` and `Sync` under the same bounds.
unsafe impl<T: Send> Send for Storage<'_, T> {}
// SAFETY: see `Send`; shared access only hands out `&[T]`.
unsafe impl<T: Sync> Sync for Storage<'_, T> {}

impl<'a, T> Storage<'a, T> {
    pub(crate) fn ownership(&self) -> Option<Ownership> {
        match self {
            Storage::Owned(_) => Some(Ownership::Exclusive),
            Storage::BorrowedSlice(_) => Some(Ownership::BorrowedArray),
            Storage::BorrowedRaw { .. } => Some(Ownership::BorrowedPointer),
            Storage::Disposed => None,
        }
    }

    pub(crate) fn as_slice(&self) -> Option<&[T]> {
        match self {
            Storage::Owned(data) => Some(data),
            Storage::BorrowedSlice(data) => Some(data),
            // SAFETY: `Image::from_raw` requires `ptr` to be valid, aligned and exclusively lent to
            // the image for `len` elements until the image is disposed or dropped.
            Storage::BorrowedRaw { ptr, len } => {
                Some(unsafe { std::slice::from_raw_parts(ptr.as_ptr(), *len) })
            }
            Storage::Disposed => None,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        match self {
            Storage::Owned(data) => Some(data),
            Storage::BorrowedSlice(data) => Some(data),
            // SAFETY: see `as_slice`; `&mut self` guarantees no other view exists.
            Storage::BorrowedRaw { ptr, len } => {
                Some(unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), *len) })
            }
            Storage::Disposed => None,
        }
    }

    /// Returns `true` when this call performed the transition.
    pub(crate) fn release(&mut self) -> bool {
        match std::mem::replace(self, Storage::Disposed) {
            Storage::Disposed => false,
            Storage::Owned(data) => {
                drop(data);
                true
            }
            Storage::BorrowedSlice(_) | Storage::BorrowedRaw { .. } => true,
        }
    }
}
