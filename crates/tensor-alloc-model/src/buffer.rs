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

use crate::id::BufferId;
use tensor_alloc_core::{
    space::{Offset, SpaceLength, Window},
    time::{Lifespan, TimePoint},
};

/// The unitless product of a buffer's size and lifespan width.
pub type Area = i64;

/// A sub-interval of a buffer's lifespan during which the buffer is either
/// entirely inactive (no window) or restricted to a narrower vertical slice
/// (a window relative to the buffer's base offset).
///
/// Windowed gaps are what make "tetris" and staircase-shaped buffers
/// expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gap {
    lifespan: Lifespan,
    window: Option<Window>,
}

impl Gap {
    /// A gap during which the buffer occupies no space at all.
    #[inline]
    pub fn new(lifespan: Lifespan) -> Self {
        Self {
            lifespan,
            window: None,
        }
    }

    /// A gap during which the buffer occupies only `window`.
    #[inline]
    pub fn windowed(lifespan: Lifespan, window: Window) -> Self {
        Self {
            lifespan,
            window: Some(window),
        }
    }

    #[inline]
    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    #[inline]
    pub fn window(&self) -> Option<Window> {
        self.window
    }
}

/// A buffer requesting a base offset: a rectangle (or, with windowed gaps, a
/// staircase) in time x address space.
///
/// Gaps must lie inside the lifespan, be mutually disjoint and ordered by
/// time; enforcing this is the producer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buffer {
    id: BufferId,
    lifespan: Lifespan,
    size: SpaceLength,
    alignment: i64,
    gaps: Vec<Gap>,
    offset: Option<Offset>,
    hint: Option<Offset>,
}

impl Buffer {
    #[inline]
    pub fn new(id: impl Into<BufferId>, lifespan: Lifespan, size: SpaceLength) -> Self {
        Self {
            id: id.into(),
            lifespan,
            size,
            alignment: 1,
            gaps: Vec::new(),
            offset: None,
            hint: None,
        }
    }

    #[inline]
    pub fn with_alignment(mut self, alignment: i64) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub fn with_gaps(mut self, gaps: Vec<Gap>) -> Self {
        self.gaps = gaps;
        self
    }

    /// Pins this buffer to a fixed offset; any feasible assignment must
    /// place it exactly there.
    #[inline]
    pub fn with_fixed_offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attaches a preferred offset. Advisory only: it survives CSV
    /// round-trips but the solver never reads it.
    #[inline]
    pub fn with_hint(mut self, hint: Offset) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Clears a previously set fixed offset.
    #[inline]
    pub fn clear_fixed_offset(&mut self) {
        self.offset = None;
    }

    #[inline]
    pub fn id(&self) -> &BufferId {
        &self.id
    }

    #[inline]
    pub fn lifespan(&self) -> Lifespan {
        self.lifespan
    }

    #[inline]
    pub fn size(&self) -> SpaceLength {
        self.size
    }

    #[inline]
    pub fn alignment(&self) -> i64 {
        self.alignment
    }

    #[inline]
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    #[inline]
    pub fn fixed_offset(&self) -> Option<Offset> {
        self.offset
    }

    #[inline]
    pub fn hint(&self) -> Option<Offset> {
        self.hint
    }

    /// The window occupied outside of any gap: the full `[0, size)` slice.
    #[inline]
    pub fn active_window(&self) -> Window {
        Window::new(Offset::zero(), Offset::zero() + self.size)
    }

    /// The product of this buffer's size and lifespan width.
    #[inline]
    pub fn area(&self) -> Area {
        self.size.value() * self.lifespan.measure().value()
    }

    /// The vertical slice occupied at time `t`, or `None` when the buffer is
    /// inactive there (outside its lifespan or inside a plain gap).
    pub fn window_at(&self, t: TimePoint) -> Option<Window> {
        if !self.lifespan.contains(t) {
            return None;
        }
        for gap in &self.gaps {
            if gap.lifespan.contains(t) {
                return gap.window;
            }
        }
        Some(self.active_window())
    }

    /// The size this buffer assumes when `other` must be placed directly
    /// above it: the supremum of `self.window.upper - other.window.lower`
    /// over every moment both buffers are active.
    ///
    /// Might be smaller than `size` when the gap windows line up
    /// favorably, and is absent entirely when the two buffers never share a
    /// moment of liveness.
    pub fn effective_size(&self, other: &Buffer) -> Option<SpaceLength> {
        if !self.lifespan.intersects(&other.lifespan) {
            return None;
        }
        // Activity only changes at lifespan and gap boundaries, so it is
        // enough to probe each maximal constant-activity sub-interval once.
        let mut points: Vec<TimePoint> = Vec::with_capacity(4 + 2 * (self.gaps.len() + other.gaps.len()));
        for buffer in [self, other] {
            points.push(buffer.lifespan.lower());
            points.push(buffer.lifespan.upper());
            for gap in &buffer.gaps {
                points.push(gap.lifespan.lower());
                points.push(gap.lifespan.upper());
            }
        }
        points.sort_unstable();
        points.dedup();
        let mut result: Option<SpaceLength> = None;
        for pair in points.windows(2) {
            let t = pair[0];
            if let (Some(window), Some(other_window)) = (self.window_at(t), other.window_at(t)) {
                let candidate = window.upper() - other_window.lower();
                result = Some(match result {
                    Some(best) => best.max(candidate),
                    None => candidate,
                });
            }
        }
        result
    }
}
