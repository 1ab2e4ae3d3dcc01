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

use crate::id::BufferIdx;
use tensor_alloc_core::space::Offset;

/// A feasible assignment: one base offset per buffer, in problem order,
/// together with the peak address the assignment reaches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    offsets: Vec<Offset>,
    height: Offset,
}

impl Solution {
    #[inline]
    pub fn new(offsets: Vec<Offset>, height: Offset) -> Self {
        Self { offsets, height }
    }

    #[inline]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    #[inline]
    pub fn offset(&self, buffer_idx: BufferIdx) -> Offset {
        self.offsets[buffer_idx]
    }

    /// The maximum of `offset + size` over all buffers.
    #[inline]
    pub fn height(&self) -> Offset {
        self.height
    }
}
