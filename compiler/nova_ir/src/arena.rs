//! Bump allocation for compilation-scoped storage.
//!
//! One [`Arena`] is created per compilation unit and dropped (or reset for
//! reuse) once every token, node, and buffer derived from it is no longer
//! needed. Allocation is a pointer bump in the common case; when the
//! current block runs out a new block at least twice the size of the last
//! is acquired, amortizing cost across many small allocations.
//!
//! Nothing is freed individually. `reset` discards all allocations
//! logically while retaining the largest block; dropping the arena releases
//! every block. Holding a reference across `reset` is rejected at compile
//! time because `reset` takes `&mut self` while every allocation borrows
//! `&self`.
#![allow(
    unsafe_code,
    reason = "bump allocation requires raw block management; every unsafe \
              operation is justified at the call site"
)]

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ptr::NonNull;

/// Default size of the first block.
const MIN_BLOCK: usize = 4096;

/// Alignment of every block; covers all layouts the toolchain allocates.
const BLOCK_ALIGN: usize = 16;

/// One contiguous block of arena storage.
struct Block {
    ptr: NonNull<u8>,
    size: usize,
}

impl Block {
    fn layout(size: usize) -> Layout {
        match Layout::from_size_align(size, BLOCK_ALIGN) {
            Ok(layout) => layout,
            // Only reachable if a single request approaches isize::MAX.
            Err(_) => panic!("arena block of {size} bytes exceeds the address space"),
        }
    }
}

/// A bump allocator over a chain of growable memory blocks.
///
/// Every returned address stays valid and non-aliasing until [`reset`]
/// or drop. Zero-size requests reserve one byte so that every returned
/// address is distinct from all live allocations.
///
/// Exhaustion of the underlying system allocator is fatal for the current
/// compilation ([`handle_alloc_error`]); it is never silently truncated.
///
/// An `Arena` is confined to one thread (interior mutability makes it
/// neither `Send` nor `Sync`); prefer one arena per concurrent compilation.
///
/// [`reset`]: Arena::reset
pub struct Arena {
    /// Next free byte of the current block.
    cursor: Cell<*mut u8>,
    /// One past the last usable byte of the current block.
    end: Cell<*mut u8>,
    /// All blocks, oldest first. The current block is the last entry.
    blocks: RefCell<Vec<Block>>,
    /// Total bytes handed out since creation or the last reset.
    allocated: Cell<usize>,
}

impl Arena {
    /// Create an empty arena. The first block is acquired lazily.
    pub fn new() -> Self {
        Arena {
            cursor: Cell::new(std::ptr::null_mut()),
            end: Cell::new(std::ptr::null_mut()),
            blocks: RefCell::new(Vec::new()),
            allocated: Cell::new(0),
        }
    }

    /// Allocate `layout.size()` bytes aligned to `layout.align()`.
    ///
    /// The returned region is valid until `reset` or drop, never aliases a
    /// live allocation, and is at least the requested size. A zero-size
    /// layout reserves one byte so the address is still distinct.
    pub fn alloc_raw(&self, layout: Layout) -> NonNull<u8> {
        let size = layout.size().max(1);
        let align = layout.align();

        let mut cursor = self.cursor.get();
        let mut pad = padding_for(cursor, align);
        // `end` is null before the first block, making every request miss.
        let room = (self.end.get() as usize).saturating_sub(cursor as usize);
        if room < pad + size {
            self.grow(size + align);
            cursor = self.cursor.get();
            pad = padding_for(cursor, align);
        }

        // SAFETY: `grow` guarantees `cursor + pad + size <= end`, so both
        // offsets stay within the current block.
        let start = unsafe { cursor.add(pad) };
        // SAFETY: see above; `start + size` is in bounds.
        self.cursor.set(unsafe { start.add(size) });
        self.allocated.set(self.allocated.get() + size);

        // SAFETY: `start` points into a successfully allocated block and is
        // therefore non-null.
        unsafe { NonNull::new_unchecked(start) }
    }

    /// Copy `bytes` into arena-owned storage.
    ///
    /// The empty slice is returned as-is without reserving storage.
    pub fn alloc_bytes(&self, bytes: &[u8]) -> &[u8] {
        if bytes.is_empty() {
            return &[];
        }
        let layout = Layout::from_size_align(bytes.len(), 1)
            .unwrap_or_else(|_| panic!("arena request of {} bytes is invalid", bytes.len()));
        let dst = self.alloc_raw(layout);
        // SAFETY: `dst` is a fresh region of at least `bytes.len()` bytes
        // that cannot overlap `bytes` (it was just carved out of an arena
        // block). The region lives as long as `&self` is borrowed.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), dst.as_ptr(), bytes.len());
            std::slice::from_raw_parts(dst.as_ptr(), bytes.len())
        }
    }

    /// Duplicate a string into arena-owned storage.
    pub fn alloc_str(&self, s: &str) -> &str {
        let bytes = self.alloc_bytes(s.as_bytes());
        // SAFETY: `bytes` is a byte-for-byte copy of a valid `&str`.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Discard all allocations, retaining the largest block for reuse.
    ///
    /// Taking `&mut self` guarantees no allocation reference survives the
    /// reset; releasing one early is a borrow-check error, not a runtime
    /// hazard.
    pub fn reset(&mut self) {
        let blocks = self.blocks.get_mut();
        if let Some(keep) = blocks.pop() {
            for block in blocks.drain(..) {
                // SAFETY: `block.ptr` was returned by `alloc` with exactly
                // this layout and is freed exactly once.
                unsafe { dealloc(block.ptr.as_ptr(), Block::layout(block.size)) };
            }
            self.cursor.set(keep.ptr.as_ptr());
            // SAFETY: one past the end of an allocation is a valid address
            // to compute.
            self.end.set(unsafe { keep.ptr.as_ptr().add(keep.size) });
            blocks.push(keep);
        }
        self.allocated.set(0);
    }

    /// Total bytes handed out since creation or the last reset.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated.get()
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> usize {
        self.blocks.borrow().len()
    }

    /// Acquire a new block with room for at least `min` bytes.
    ///
    /// The new block is sized `max(min, 2 x previous block, MIN_BLOCK)`.
    #[cold]
    fn grow(&self, min: usize) {
        let mut blocks = self.blocks.borrow_mut();
        let last_size = blocks.last().map_or(0, |b| b.size);
        let size = min.max(last_size.saturating_mul(2)).max(MIN_BLOCK);
        let layout = Block::layout(size);

        // SAFETY: `layout` has non-zero size (size >= MIN_BLOCK).
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            // Out of memory: fatal for this compilation.
            handle_alloc_error(layout);
        };

        self.cursor.set(ptr.as_ptr());
        // SAFETY: one past the end of the fresh allocation.
        self.end.set(unsafe { ptr.as_ptr().add(size) });
        blocks.push(Block { ptr, size });
    }
}

/// Bytes of padding needed to bring `ptr` up to `align`.
fn padding_for(ptr: *mut u8, align: usize) -> usize {
    let addr = ptr as usize;
    addr.wrapping_neg() & (align - 1)
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for block in self.blocks.get_mut().drain(..) {
            // SAFETY: `block.ptr` was returned by `alloc` with exactly this
            // layout and is freed exactly once.
            unsafe { dealloc(block.ptr.as_ptr(), Block::layout(block.size)) };
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arena {{ {} bytes in {} blocks }}",
            self.allocated.get(),
            self.blocks.borrow().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_str_copies_content() {
        let arena = Arena::new();
        let original = String::from("let x = 42");
        let copy = arena.alloc_str(&original);
        assert_eq!(copy, "let x = 42");
        // distinct storage, not a view of the input
        assert_ne!(copy.as_ptr(), original.as_ptr());
    }

    #[test]
    fn alloc_bytes_at_least_requested_size() {
        let arena = Arena::new();
        for len in [1, 7, 64, 1000] {
            let src = vec![0xAB; len];
            let out = arena.alloc_bytes(&src);
            assert_eq!(out.len(), len);
            assert_eq!(out, &src[..]);
        }
    }

    #[test]
    fn empty_slice_needs_no_storage() {
        let arena = Arena::new();
        let out = arena.alloc_bytes(&[]);
        assert!(out.is_empty());
        assert_eq!(arena.allocated_bytes(), 0);
    }

    #[test]
    fn zero_size_requests_get_distinct_addresses() {
        let arena = Arena::new();
        let layout = Layout::new::<()>();
        let a = arena.alloc_raw(layout);
        let b = arena.alloc_raw(layout);
        assert_ne!(a, b);
    }

    #[test]
    fn alignment_is_respected() {
        let arena = Arena::new();
        // Perturb the cursor with an odd-sized allocation first.
        arena.alloc_bytes(&[1, 2, 3]);
        for align in [1usize, 2, 4, 8, 16] {
            let layout = Layout::from_size_align(align, align)
                .unwrap_or_else(|_| panic!("bad layout in test"));
            let ptr = arena.alloc_raw(layout);
            assert_eq!(
                ptr.as_ptr() as usize % align,
                0,
                "allocation not aligned to {align}"
            );
        }
    }

    #[test]
    fn regions_never_overlap() {
        let arena = Arena::new();
        let mut regions: Vec<(usize, usize)> = Vec::new();
        for len in [1usize, 3, 8, 17, 100, 5, 64, 2] {
            let out = arena.alloc_bytes(&vec![0u8; len]);
            regions.push((out.as_ptr() as usize, len));
        }
        regions.sort_unstable();
        for pair in regions.windows(2) {
            let (start_a, len_a) = pair[0];
            let (start_b, _) = pair[1];
            assert!(
                start_a + len_a <= start_b,
                "regions overlap: {pair:?}"
            );
        }
    }

    #[test]
    fn grows_past_first_block() {
        let arena = Arena::new();
        // Larger than the initial block: forces dedicated growth.
        let big = vec![7u8; 3 * MIN_BLOCK];
        let out = arena.alloc_bytes(&big);
        assert_eq!(out.len(), big.len());
        // Earlier small allocation plus the big one should span blocks.
        arena.alloc_bytes(&[1; 100]);
        assert!(arena.block_count() >= 1);
    }

    #[test]
    fn many_small_allocations() {
        let arena = Arena::new();
        let mut total = 0usize;
        for i in 0..10_000usize {
            let len = i % 13 + 1;
            let out = arena.alloc_bytes(&vec![0xCD; len]);
            assert_eq!(out.len(), len);
            total += len;
        }
        assert_eq!(arena.allocated_bytes(), total);
    }

    #[test]
    fn reset_retains_storage_and_allows_reuse() {
        let mut arena = Arena::new();
        arena.alloc_bytes(&[0u8; 2 * MIN_BLOCK]);
        arena.alloc_bytes(&[0u8; 64]);
        assert!(arena.allocated_bytes() > 0);

        arena.reset();
        assert_eq!(arena.allocated_bytes(), 0);
        // the largest block is kept for reuse
        assert_eq!(arena.block_count(), 1);

        let again = arena.alloc_str("after reset");
        assert_eq!(again, "after reset");
    }

    #[test]
    fn reset_on_fresh_arena_is_a_no_op() {
        let mut arena = Arena::new();
        arena.reset();
        assert_eq!(arena.block_count(), 0);
        assert_eq!(arena.alloc_str("still works"), "still works");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_allocations_are_pairwise_disjoint(
                sizes in proptest::collection::vec(1usize..512, 1..64)
            ) {
                let arena = Arena::new();
                let mut regions: Vec<(usize, usize)> = Vec::new();
                for &len in &sizes {
                    let out = arena.alloc_bytes(&vec![0u8; len]);
                    prop_assert_eq!(out.len(), len);
                    regions.push((out.as_ptr() as usize, len));
                }
                regions.sort_unstable();
                for pair in regions.windows(2) {
                    let (start_a, len_a) = pair[0];
                    let (start_b, _) = pair[1];
                    prop_assert!(start_a + len_a <= start_b);
                }
            }

            #[test]
            fn strings_round_trip(texts in proptest::collection::vec(".*", 0..32)) {
                let arena = Arena::new();
                let copies: Vec<&str> = texts.iter().map(|t| arena.alloc_str(t)).collect();
                for (copy, original) in copies.iter().zip(&texts) {
                    prop_assert_eq!(*copy, original.as_str());
                }
            }
        }
    }
}
