// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{buffer::Buffer, err::StripSolutionError, sol::Solution};
use tensor_alloc_core::space::{Offset, SpaceLength};

/// A static allocation problem: buffers to place and the capacity of the
/// linear address space they must be packed within.
///
/// The solver consumes problems read-only; no buffer may be assigned an
/// offset such that `offset + size > capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Problem {
    buffers: Vec<Buffer>,
    capacity: SpaceLength,
}

impl Problem {
    #[inline]
    pub fn new(buffers: Vec<Buffer>, capacity: SpaceLength) -> Self {
        Self { buffers, capacity }
    }

    #[inline]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    #[inline]
    pub fn capacity(&self) -> SpaceLength {
        self.capacity
    }

    /// Replaces the capacity, keeping the buffers. Used by the front end
    /// (the CSV format carries no capacity) and by capacity minimization.
    #[inline]
    pub fn with_capacity(mut self, capacity: SpaceLength) -> Self {
        self.capacity = capacity;
        self
    }

    /// Extracts a solution from the fixed offset of each buffer, clearing
    /// them in the process.
    ///
    /// This is how a previously-solved CSV (whose `offset` column was read
    /// back as fixed offsets) is turned into a [`Solution`] again. Fails if
    /// any buffer has no offset.
    pub fn strip_solution(&mut self) -> Result<Solution, StripSolutionError> {
        let mut offsets = Vec::with_capacity(self.buffers.len());
        let mut height = Offset::zero();
        for buffer in &self.buffers {
            let offset = buffer
                .fixed_offset()
                .ok_or_else(|| StripSolutionError::new(buffer.id().clone()))?;
            height = height.max(offset + buffer.size());
            offsets.push(offset);
        }
        for buffer in &mut self.buffers {
            buffer.clear_fixed_offset();
        }
        Ok(Solution::new(offsets, height))
    }
}
