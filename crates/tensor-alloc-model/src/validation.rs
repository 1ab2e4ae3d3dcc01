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

use crate::{problem::Problem, sol::Solution};
use std::fmt::Display;
use tensor_alloc_core::space::Offset;

/// The verdict of checking a solution against its problem.
///
/// An independent checker: it shares no code with the solver beyond
/// `effective_size`, so a solver bug cannot vouch for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Good,
    /// Solution structure is incorrect, e.g. wrong number of offsets.
    BadSolution,
    /// A buffer with a fixed offset was assigned somewhere else.
    BadFixed,
    /// An offset is out of bounds: negative or beyond the capacity.
    BadOffset,
    /// At least one pair of buffers overlaps in both space and time.
    BadOverlap,
    /// A buffer was not placed at a multiple of its alignment.
    BadAlignment,
    /// The solution height is not the buffers' maximum height.
    BadHeight,
}

impl ValidationResult {
    #[inline]
    pub fn is_good(self) -> bool {
        self == ValidationResult::Good
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ValidationResult::Good => "good",
            ValidationResult::BadSolution => "bad solution structure",
            ValidationResult::BadFixed => "fixed offset not honored",
            ValidationResult::BadOffset => "offset out of bounds",
            ValidationResult::BadOverlap => "overlapping buffers",
            ValidationResult::BadAlignment => "misaligned offset",
            ValidationResult::BadHeight => "incorrect solution height",
        };
        write!(f, "{}", text)
    }
}

/// Checks a solution for structural integrity, range/alignment/fixed-offset
/// conformance, height consistency and pairwise overlaps (the O(n^2) way).
pub fn validate(problem: &Problem, solution: &Solution) -> ValidationResult {
    if problem.buffers().len() != solution.offsets().len() {
        return ValidationResult::BadSolution;
    }
    let capacity_limit = Offset::zero() + problem.capacity();
    let mut max_height = Offset::zero();
    for (buffer, &offset) in problem.buffers().iter().zip(solution.offsets()) {
        let height = offset + buffer.size();
        max_height = max_height.max(height);
        if buffer.fixed_offset().is_some_and(|fixed| fixed != offset) {
            return ValidationResult::BadFixed;
        }
        if offset.is_negative() || height > capacity_limit {
            return ValidationResult::BadOffset;
        }
        if height > solution.height() {
            return ValidationResult::BadHeight;
        }
        if !offset.is_aligned_to(buffer.alignment()) {
            return ValidationResult::BadAlignment;
        }
    }
    if max_height != solution.height() {
        return ValidationResult::BadHeight;
    }
    let buffers = problem.buffers();
    for i in 0..buffers.len() {
        for j in (i + 1)..buffers.len() {
            let offset_i = solution.offset(i);
            let offset_j = solution.offset(j);
            let i_clears_j = match buffers[i].effective_size(&buffers[j]) {
                None => true,
                Some(effective) => offset_i + effective <= offset_j,
            };
            if i_clears_j {
                continue;
            }
            let j_clears_i = match buffers[j].effective_size(&buffers[i]) {
                None => true,
                Some(effective) => offset_j + effective <= offset_i,
            };
            if !j_clears_i {
                return ValidationResult::BadOverlap;
            }
        }
    }
    ValidationResult::Good
}
