//! Bump allocator owning all reconstruction state.
//!
//! Memory is carved out of fixed-capacity blocks; requests larger than one
//! block get a dedicated block. There is no per-object reclaim: `reset`
//! empties every block for reuse, `Drop` releases them. Allocation failure
//! aborts the process.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::cell::RefCell;
use std::ptr::NonNull;

pub const BLOCK_SIZE: usize = 16 * 1024;

// Covers every type the reconstruction stores (f32 and small Copy structs)
const BLOCK_ALIGN: usize = 16;

struct Block {
    ptr: NonNull<u8>,
    capacity: usize,
    used: usize,
}

impl Block {
    fn new(capacity: usize) -> Self {
        let layout = Self::layout(capacity);
        let ptr = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(ptr) else { handle_alloc_error(layout) };
        Block { ptr, capacity, used: 0 }
    }

    fn layout(capacity: usize) -> Layout {
        Layout::from_size_align(capacity, BLOCK_ALIGN).expect("arena block size overflows")
    }

    fn try_bump(&mut self, size: usize, align: usize) -> Option<*mut u8> {
        let start = (self.used + align - 1) & !(align - 1);
        if start > self.capacity || size > self.capacity - start {
            return None;
        }
        self.used = start + size;
        Some(unsafe { self.ptr.as_ptr().add(start) })
    }
}

pub struct Arena {
    blocks: RefCell<Vec<Block>>,
}

impl Arena {

    pub fn new() -> Self {
        Self { blocks: RefCell::new(Vec::new()) }
    }

    /// Allocate a slice of `len` copies of `fill`, stable for the arena's
    /// lifetime: block storage is never moved, freed or compacted while the
    /// arena lives, and each call hands out a region no other call can reach.
    pub fn alloc_slice<T: Copy>(&self, len: usize, fill: T) -> &mut [T] {
        if len == 0 {
            return unsafe { std::slice::from_raw_parts_mut(NonNull::<T>::dangling().as_ptr(), 0) };
        }
        let layout = Layout::array::<T>(len).expect("arena request overflows");
        assert!(layout.align() <= BLOCK_ALIGN, "over-aligned type in arena");
        let ptr = self.bump(layout.size(), layout.align()) as *mut T;
        unsafe {
            for i in 0..len {
                ptr.add(i).write(fill);
            }
            std::slice::from_raw_parts_mut(ptr, len)
        }
    }

    fn bump(&self, size: usize, align: usize) -> *mut u8 {
        let mut blocks = self.blocks.borrow_mut();
        match blocks.last_mut().and_then(|b| b.try_bump(size, align)) {
            Some(ptr) => ptr,
            None => {
                // Oversized requests get a block of their own
                let mut block = Block::new(size.max(BLOCK_SIZE));
                let ptr = block.try_bump(size, align).expect("fresh arena block too small");
                blocks.push(block);
                ptr
            }
        }
    }

    /// Mark every block as empty, keeping them chained for reuse. Taking
    /// `&mut self` ends all outstanding loans, so no slice handed out before
    /// the reset can observe its contents being recycled.
    pub fn reset(&mut self) {
        for block in self.blocks.get_mut() {
            block.used = 0;
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.borrow().len()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.blocks.borrow().iter().map(|b| b.capacity).sum()
    }
}

impl Default for Arena {
    fn default() -> Self { Self::new() }
}

impl Drop for Arena {
    fn drop(&mut self) {
        for block in self.blocks.get_mut() {
            unsafe { dealloc(block.ptr.as_ptr(), Block::layout(block.capacity)) }
        }
    }
}
