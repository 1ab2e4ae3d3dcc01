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

use std::time::Duration;

/// Settings that enable or disable the solver's search and inference
/// techniques (kept individually togglable for benchmarking). Unless
/// directed otherwise, stick with the defaults: everything on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverParams {
    /// Wall-clock budget before the solver gives up; `None` means no limit.
    pub timeout: Option<Duration>,

    /// Requires partial assignments to conform to a canonical (i.e.
    /// non-redundant) solution structure: chosen offsets are nondecreasing,
    /// with the preorder index as a stable tie-break.
    ///
    /// Note: combined with `monotonic_floor`, adversarial problems exist
    /// where only non-canonical completions of a partially-fixed offset set
    /// are feasible; disable one of the two when pinning many offsets.
    pub canonical_only: bool,

    /// Prunes partial solutions in which the lower bound of some section
    /// height eclipses the capacity.
    pub section_inference: bool,

    /// Prefers buffers with smaller viable offset values, using the
    /// preorder index to break ties.
    pub dynamic_ordering: bool,

    /// Prunes dominated partial solutions that would leave a gap below the
    /// minimum attainable upper edge of the unplaced buffers.
    pub check_dominance: bool,

    /// Uses the minimum offset of unallocated buffers to establish
    /// stronger lower bounds on each section's floor.
    pub unallocated_floor: bool,

    /// Sorts each partition's buffers by the configured heuristic before
    /// searching.
    pub static_preordering: bool,

    /// Splits the remaining buffers into independent subproblems whenever
    /// a placement drives a section boundary's cut count to zero.
    pub dynamic_decomposition: bool,

    /// Requires the floor of the entire partition to increase
    /// monotonically. Safe only alongside canonical exploration; see
    /// `canonical_only`.
    pub monotonic_floor: bool,

    /// Abandons the remaining offsets for a buffer whose trial placement
    /// had no overlapping unassigned buffer above it.
    pub hatless_pruning: bool,

    /// Binary-searches the smallest feasible capacity instead of accepting
    /// the problem's.
    pub minimize_capacity: bool,

    /// The static preordering heuristics to attempt; more than one
    /// triggers the node-budgeted round robin.
    pub preordering_heuristics: Vec<String>,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            timeout: None,
            canonical_only: true,
            section_inference: true,
            dynamic_ordering: true,
            check_dominance: true,
            unallocated_floor: true,
            static_preordering: true,
            dynamic_decomposition: true,
            monotonic_floor: true,
            hatless_pruning: true,
            minimize_capacity: false,
            preordering_heuristics: vec!["WAT".into(), "TAW".into(), "TWA".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_all_techniques() {
        let params = SolverParams::default();
        assert!(params.canonical_only);
        assert!(params.section_inference);
        assert!(params.dynamic_ordering);
        assert!(params.check_dominance);
        assert!(params.unallocated_floor);
        assert!(params.static_preordering);
        assert!(params.dynamic_decomposition);
        assert!(params.monotonic_floor);
        assert!(params.hatless_pruning);
        assert!(!params.minimize_capacity);
        assert_eq!(params.timeout, None);
        assert_eq!(params.preordering_heuristics, vec!["WAT", "TAW", "TWA"]);
    }
}
