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

use std::cmp::Ordering;
use std::fmt::Display;
use tensor_alloc_model::{Area, BufferIdx};
use tensor_alloc_core::{
    space::SpaceLength,
    time::{TimeDelta, TimePoint},
};

/// Per-buffer keys used to establish a static preordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreorderData {
    /// The total area (space x time) consumed by this buffer.
    pub area: Area,
    /// When the buffer starts.
    pub lower: TimePoint,
    /// The number of pairwise overlaps with other buffers.
    pub overlaps: usize,
    /// The number of sections spanned by this buffer.
    pub sections: usize,
    /// The size of the buffer.
    pub size: SpaceLength,
    /// The maximum section total among this buffer's sections.
    pub total: SpaceLength,
    /// When the buffer ends.
    pub upper: TimePoint,
    /// The width of this buffer's lifespan.
    pub width: TimeDelta,
    /// An index into the problem's buffer list; the final tie-break.
    pub buffer_idx: BufferIdx,
}

/// A total order over [`PreorderData`] driven by a short heuristic string.
///
/// Each character selects the next key in the priority chain, compared
/// descending (larger first); ties fall through to the next character and
/// finally to `buffer_idx` ascending. Unknown characters are skipped.
///
/// | Code | Key |
/// |------|-------------------|
/// | `A`  | area              |
/// | `C`  | sections spanned  |
/// | `L`  | lifespan lower    |
/// | `O`  | overlap count     |
/// | `T`  | max section total |
/// | `U`  | lifespan upper    |
/// | `W`  | lifespan width    |
/// | `Z`  | size              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreorderingComparator {
    heuristic: String,
}

impl PreorderingComparator {
    #[inline]
    pub fn new(heuristic: impl Into<String>) -> Self {
        Self {
            heuristic: heuristic.into(),
        }
    }

    pub fn cmp(&self, a: &PreorderData, b: &PreorderData) -> Ordering {
        for key in self.heuristic.chars() {
            let ordering = match key {
                'A' => b.area.cmp(&a.area),
                'C' => b.sections.cmp(&a.sections),
                'L' => b.lower.cmp(&a.lower),
                'O' => b.overlaps.cmp(&a.overlaps),
                'T' => b.total.cmp(&a.total),
                'U' => b.upper.cmp(&a.upper),
                'W' => b.width.cmp(&a.width),
                'Z' => b.size.cmp(&a.size),
                _ => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.buffer_idx.cmp(&b.buffer_idx)
    }
}

impl Display for PreorderingComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "preorder heuristic {}", self.heuristic)
    }
}
