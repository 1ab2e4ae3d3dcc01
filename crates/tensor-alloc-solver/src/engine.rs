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

//! The depth-first branch-and-bound engine.
//!
//! Each partition is searched independently, placing one buffer per frame.
//! A frame records every scalar it changes (section floors and totals,
//! per-buffer minimum offsets, cut counts) in explicit journals and unwinds
//! them LIFO on backtrack; no state is cloned along the way.

use crate::{
    params::SolverParams,
    preorder::{PreorderData, PreorderingComparator},
    sweep::{CutCount, Partition, SectionIdx, SectionRange, SweepResult, sweep},
};
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering as AtomicOrdering},
};
use std::time::Instant;
use tensor_alloc_model::{BufferIdx, Problem, Solution};
use tensor_alloc_core::space::{Offset, SpaceLength};
use tracing::{debug, trace};

/// The failure half of a solve.
///
/// Node-budget exhaustion (used internally by the round-robin heuristic
/// schedule) never surfaces here; it is always converted into another
/// attempt or subsumed by a successful one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// Exhaustive search proved the problem infeasible.
    NotFound,
    /// The wall-clock budget or external cancellation fired.
    DeadlineExceeded,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::NotFound => write!(f, "no feasible assignment exists"),
            SolveError::DeadlineExceeded => {
                write!(f, "deadline exceeded before the search completed")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Outcome of one recursive search, including the internal budget signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStatus {
    Ok,
    NotFound,
    DeadlineExceeded,
    /// The round-robin node budget ran out; try the next heuristic.
    Aborted,
}

/// A cloneable handle that cancels a running solve from another thread.
///
/// Cancellation is cooperative: the search notices the flag at its next
/// frame entry and returns [`SolveError::DeadlineExceeded`]. It is not
/// retroactive and does not disturb already-produced solutions.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }
}

/// The reusable solver front. Owns the parameters, the backtrack counter
/// (reset at every [`solve`](Solver::solve) entry) and the cancellation
/// flag. A single instance must not be used from multiple threads at once;
/// distinct instances are independent.
#[derive(Debug)]
pub struct Solver {
    params: SolverParams,
    backtracks: u64,
    cancelled: Arc<AtomicBool>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    #[inline]
    pub fn new() -> Self {
        Self::with_params(SolverParams::default())
    }

    #[inline]
    pub fn with_params(params: SolverParams) -> Self {
        Self {
            params,
            backtracks: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// The number of backtracks in the latest invocation.
    #[inline]
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Returns a handle that can cancel this solver's current (or next)
    /// solve from another thread.
    #[inline]
    pub fn cancellation_token(&self) -> CancellationToken {
        CancellationToken {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Sweeps the problem, then solves each partition independently. With
    /// `minimize_capacity` set, binary-searches the smallest feasible
    /// capacity instead, reusing the sweep across iterations.
    pub fn solve(&mut self, problem: &Problem) -> Result<Solution, SolveError> {
        self.backtracks = 0;
        self.cancelled.store(false, AtomicOrdering::Relaxed);
        self.solve_with_start_time(problem, Instant::now())
    }

    /// Computes an irreducible infeasible subset of buffers by deletion
    /// filtering: drop each buffer in turn, keeping it only if the
    /// remainder turns feasible without it. All sub-solves share one start
    /// time so the configured timeout bounds the whole procedure.
    pub fn compute_irreducible_infeasible_subset(
        &mut self,
        problem: &Problem,
    ) -> Result<Vec<BufferIdx>, SolveError> {
        self.backtracks = 0;
        self.cancelled.store(false, AtomicOrdering::Relaxed);
        let start_time = Instant::now();
        let mut include = vec![true; problem.buffers().len()];
        let mut subset = Vec::new();
        for buffer_idx in 0..problem.buffers().len() {
            // Tentatively drop this buffer from the problem.
            include[buffer_idx] = false;
            let subproblem = Problem::new(
                problem
                    .buffers()
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| include[*idx])
                    .map(|(_, buffer)| buffer.clone())
                    .collect(),
                problem.capacity(),
            );
            let outcome = self.solve_with_start_time(&subproblem, start_time);
            if outcome == Err(SolveError::DeadlineExceeded) {
                return Err(SolveError::DeadlineExceeded);
            }
            if outcome.is_ok() {
                // Feasible without it: the buffer is essential to
                // infeasibility.
                include[buffer_idx] = true;
                subset.push(buffer_idx);
            }
        }
        Ok(subset)
    }

    fn solve_with_start_time(
        &mut self,
        problem: &Problem,
        start_time: Instant,
    ) -> Result<Solution, SolveError> {
        let sweep_result = sweep(problem);
        if !self.params.minimize_capacity {
            return SolverImpl::new(
                &self.params,
                start_time,
                problem,
                problem.capacity(),
                &sweep_result,
                &mut self.backtracks,
                self.cancelled.as_ref(),
            )
            .solve();
        }
        // Binary search for the minimum viable capacity; any failure
        // (including a timeout) raises the lower bound, so a late timeout
        // degrades to the best solution found so far.
        let mut result = Err(SolveError::NotFound);
        let mut lo: i64 = 0;
        let mut hi: i64 = problem.capacity().value();
        while lo <= hi {
            let mid = (lo + hi) / 2;
            let attempt = SolverImpl::new(
                &self.params,
                start_time,
                problem,
                SpaceLength::new(mid),
                &sweep_result,
                &mut self.backtracks,
                self.cancelled.as_ref(),
            )
            .solve();
            match attempt {
                Ok(solution) => {
                    hi = solution.height().value() - 1;
                    result = Ok(solution);
                    debug!(capacity = mid, "capacity minimization: feasible");
                }
                Err(error) => {
                    lo = mid + 1;
                    debug!(capacity = mid, %error, "capacity minimization: failed");
                }
            }
        }
        result
    }
}

/// A record of a buffer's minimum offset prior to a change.
#[derive(Debug, Clone, Copy)]
struct OffsetChange {
    buffer_idx: BufferIdx,
    min_offset: Offset,
}

/// A record of a section's floor prior to a change.
#[derive(Debug, Clone, Copy)]
struct SectionChange {
    section_idx: SectionIdx,
    floor: Offset,
}

/// Incrementally maintained facts about one section.
#[derive(Debug, Clone, Copy, Default)]
struct SectionData {
    /// The lowest viable offset for any new buffer in this section.
    floor: Offset,
    /// The sum of window heights of the still-unassigned buffers here.
    total: SpaceLength,
}

/// One entry of the (dynamic) candidate ordering: the buffer's current
/// minimum offset paired with its preorder index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrderData {
    offset: Offset,
    preorder_idx: usize,
}

/// Search state for one solve at one capacity. Borrows the problem and the
/// sweep result; owns the mutable per-search bookkeeping.
struct SolverImpl<'a> {
    params: &'a SolverParams,
    start_time: Instant,
    problem: &'a Problem,
    capacity_limit: Offset,
    sweep_result: &'a SweepResult,
    backtracks: &'a mut u64,
    cancelled: &'a AtomicBool,

    assignment: Vec<Option<Offset>>,
    solution_offsets: Vec<Offset>,
    min_offsets: Vec<Offset>,
    section_data: Vec<SectionData>,
    cuts: Vec<CutCount>,
    nodes_remaining: i64,
    depth: usize,
}

impl<'a> SolverImpl<'a> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        params: &'a SolverParams,
        start_time: Instant,
        problem: &'a Problem,
        capacity: SpaceLength,
        sweep_result: &'a SweepResult,
        backtracks: &'a mut u64,
        cancelled: &'a AtomicBool,
    ) -> Self {
        Self {
            params,
            start_time,
            problem,
            capacity_limit: Offset::zero() + capacity,
            sweep_result,
            backtracks,
            cancelled,
            assignment: Vec::new(),
            solution_offsets: Vec::new(),
            min_offsets: Vec::new(),
            section_data: Vec::new(),
            cuts: Vec::new(),
            nodes_remaining: i64::MAX,
            depth: 0,
        }
    }

    fn solve(mut self) -> Result<Solution, SolveError> {
        let problem = self.problem;
        let sweep_result = self.sweep_result;
        if problem.buffers().is_empty() {
            return Ok(Solution::default());
        }
        let num_buffers = problem.buffers().len();
        self.assignment = vec![None; num_buffers];
        self.solution_offsets = vec![Offset::zero(); num_buffers];
        self.min_offsets = vec![Offset::zero(); num_buffers];
        self.section_data = vec![SectionData::default(); sweep_result.sections.len()];
        for (buffer_idx, buffer_data) in sweep_result.buffer_data.iter().enumerate() {
            for section_span in &buffer_data.section_spans {
                let height = section_span.window.height();
                for section_idx in
                    section_span.section_range.lower()..section_span.section_range.upper()
                {
                    self.section_data[section_idx].total += height;
                }
            }
            if let Some(fixed) = problem.buffers()[buffer_idx].fixed_offset() {
                self.min_offsets[buffer_idx] = fixed;
            }
        }
        self.cuts = sweep_result.calculate_cuts();
        // With several heuristics configured, rotate through them under a
        // doubling node budget.
        if self.params.preordering_heuristics.len() > 1 {
            return self.round_robin();
        }
        let comparator = PreorderingComparator::new(
            self.params
                .preordering_heuristics
                .last()
                .map(String::as_str)
                .unwrap_or(""),
        );
        debug!(%comparator, "search start");
        for partition in &sweep_result.partitions {
            let status = self.sub_solve(partition, &comparator);
            if status != SearchStatus::Ok {
                debug!(%comparator, ?status, "search end");
                return Err(match status {
                    SearchStatus::DeadlineExceeded => SolveError::DeadlineExceeded,
                    _ => SolveError::NotFound,
                });
            }
        }
        debug!(%comparator, "search end: feasible");
        Ok(self.build_solution())
    }

    fn round_robin(&mut self) -> Result<Solution, SolveError> {
        let params = self.params;
        let sweep_result = self.sweep_result;
        // Start with a conservative node limit in the hope that one
        // heuristic finishes quickly, then progressively raise the bar.
        let mut node_limit = self.problem.buffers().len() as i64;
        loop {
            node_limit = node_limit.saturating_mul(2);
            let mut round_status = SearchStatus::Ok;
            for heuristic in &params.preordering_heuristics {
                let comparator = PreorderingComparator::new(heuristic.as_str());
                self.nodes_remaining = node_limit;
                round_status = SearchStatus::Ok;
                debug!(%comparator, node_limit, "round robin attempt");
                for partition in &sweep_result.partitions {
                    round_status = self.sub_solve(partition, &comparator);
                    if round_status != SearchStatus::Ok {
                        break;
                    }
                }
                match round_status {
                    SearchStatus::Ok => break,
                    // Budget exhausted: rotate to the next heuristic.
                    SearchStatus::Aborted => continue,
                    SearchStatus::DeadlineExceeded => {
                        return Err(SolveError::DeadlineExceeded);
                    }
                    SearchStatus::NotFound => return Err(SolveError::NotFound),
                }
            }
            if round_status == SearchStatus::Ok {
                return Ok(self.build_solution());
            }
        }
    }

    /// Prepares the preordering for one partition, then recurses.
    fn sub_solve(
        &mut self,
        partition: &Partition,
        comparator: &PreorderingComparator,
    ) -> SearchStatus {
        let problem = self.problem;
        let sweep_result = self.sweep_result;
        let mut preordering = Vec::with_capacity(partition.buffer_idxs.len());
        for &buffer_idx in &partition.buffer_idxs {
            let buffer = &problem.buffers()[buffer_idx];
            let buffer_data = &sweep_result.buffer_data[buffer_idx];
            let mut total = SpaceLength::new(0);
            for section_span in &buffer_data.section_spans {
                for section_idx in
                    section_span.section_range.lower()..section_span.section_range.upper()
                {
                    total = total.max(self.section_data[section_idx].total);
                }
            }
            preordering.push(PreorderData {
                area: buffer.area(),
                lower: buffer.lifespan().lower(),
                overlaps: buffer_data.overlaps.len(),
                sections: buffer_data.overall_range().measure(),
                size: buffer.size(),
                total,
                upper: buffer.lifespan().upper(),
                width: buffer.lifespan().measure(),
                buffer_idx,
            });
        }
        if self.params.static_preordering {
            preordering.sort_by(|a, b| comparator.cmp(a, b));
        }
        let ordering: Vec<OrderData> = (0..preordering.len())
            .map(|preorder_idx| OrderData {
                offset: Offset::zero(),
                preorder_idx,
            })
            .collect();
        self.search(partition, comparator, &preordering, &ordering, Offset::zero(), 0)
    }

    /// One DFS frame: pick the next buffer and offset, propagate, check,
    /// recurse, undo.
    fn search(
        &mut self,
        partition: &Partition,
        comparator: &PreorderingComparator,
        preordering: &[PreorderData],
        orig_ordering: &[OrderData],
        min_offset: Offset,
        min_preorder_idx: usize,
    ) -> SearchStatus {
        if self.nodes_remaining <= 0 {
            return SearchStatus::Aborted;
        }
        self.nodes_remaining -= 1;
        if self.deadline_exceeded() {
            return SearchStatus::DeadlineExceeded;
        }
        let problem = self.problem;
        let ordering = self.compute_ordering(preordering, orig_ordering);
        if ordering.is_empty() {
            // A leaf: record the offsets of this partition's buffers.
            for &buffer_idx in &partition.buffer_idxs {
                debug_assert!(self.assignment[buffer_idx].is_some());
                if let Some(offset) = self.assignment[buffer_idx] {
                    self.solution_offsets[buffer_idx] = offset;
                }
            }
            return SearchStatus::Ok;
        }
        // No buffer may be placed at or above the smallest upper edge any
        // unplaced buffer could reach; that would leave an unfillable gap.
        let min_height = ordering
            .iter()
            .map(|order| {
                let buffer = &problem.buffers()[preordering[order.preorder_idx].buffer_idx];
                order.offset + buffer.size()
            })
            .fold(Offset::new(i64::MAX), Offset::min);
        for &OrderData {
            offset,
            preorder_idx,
        } in &ordering
        {
            let buffer_idx = preordering[preorder_idx].buffer_idx;
            if self.params.canonical_only
                && (offset < min_offset || (offset == min_offset && preorder_idx < min_preorder_idx))
            {
                continue;
            }
            if self.params.check_dominance && offset >= min_height {
                continue;
            }
            let buffer = &problem.buffers()[buffer_idx];
            if buffer.fixed_offset().is_some_and(|fixed| offset > fixed) {
                continue;
            }
            self.assignment[buffer_idx] = Some(offset);
            let mut affected_sections: HashSet<SectionIdx> = HashSet::new();
            let mut fixed_offset_failure = false;
            let offset_changes = self.update_min_offsets(
                buffer_idx,
                offset,
                &mut affected_sections,
                &mut fixed_offset_failure,
            );
            let section_changes = self.update_section_data(&affected_sections, buffer_idx, offset);
            let mut status = SearchStatus::NotFound;
            if !fixed_offset_failure && self.check(partition, offset) {
                trace!(depth = self.depth, buffer_idx, %offset, "descend");
                self.depth += 1;
                status = if self.params.dynamic_decomposition {
                    self.dynamically_decompose(
                        partition,
                        comparator,
                        preordering,
                        &ordering,
                        offset,
                        preorder_idx,
                        buffer_idx,
                    )
                } else {
                    self.search(partition, comparator, preordering, &ordering, offset, preorder_idx)
                };
                self.depth -= 1;
                trace!(depth = self.depth, buffer_idx, ?status, "return");
            }
            self.restore_section_data(&section_changes, buffer_idx);
            if let Some(changes) = &offset_changes {
                self.restore_min_offsets(changes);
            }
            self.assignment[buffer_idx] = None;
            // A feasible solution, timeout or abort all end this frame.
            if status != SearchStatus::NotFound {
                return status;
            }
            // Nothing overlapped this buffer from above: any later offset
            // in this frame would only widen the same gap.
            if offset_changes.is_none() && self.params.hatless_pruning {
                break;
            }
        }
        *self.backtracks += 1;
        SearchStatus::NotFound
    }

    /// Raises the minimum offsets of every unassigned buffer overlapping
    /// the one just placed. Returns `None` when there was no such buffer
    /// (a hatless placement), otherwise the change journal for undo.
    fn update_min_offsets(
        &mut self,
        buffer_idx: BufferIdx,
        offset: Offset,
        affected_sections: &mut HashSet<SectionIdx>,
        fixed_offset_failure: &mut bool,
    ) -> Option<Vec<OffsetChange>> {
        let problem = self.problem;
        let sweep_result = self.sweep_result;
        let mut hatless = true;
        let mut offset_changes = Vec::new();
        for overlap in &sweep_result.buffer_data[buffer_idx].overlaps {
            let other_idx = overlap.buffer_idx;
            if self.assignment[other_idx].is_some() {
                continue;
            }
            hatless = false;
            let height = offset + overlap.effective_size;
            if self.min_offsets[other_idx] >= height {
                continue;
            }
            offset_changes.push(OffsetChange {
                buffer_idx: other_idx,
                min_offset: self.min_offsets[other_idx],
            });
            let other_buffer = &problem.buffers()[other_idx];
            self.min_offsets[other_idx] = height.align_up(other_buffer.alignment());
            if other_buffer
                .fixed_offset()
                .is_some_and(|fixed| self.min_offsets[other_idx] > fixed)
            {
                *fixed_offset_failure = true;
            }
            if !self.params.unallocated_floor {
                continue;
            }
            for section_span in &sweep_result.buffer_data[other_idx].section_spans {
                for section_idx in
                    section_span.section_range.lower()..section_span.section_range.upper()
                {
                    affected_sections.insert(section_idx);
                }
            }
        }
        if hatless { None } else { Some(offset_changes) }
    }

    fn restore_min_offsets(&mut self, offset_changes: &[OffsetChange]) {
        for change in offset_changes.iter().rev() {
            self.min_offsets[change.buffer_idx] = change.min_offset;
        }
    }

    /// Raises floors and drops totals for the sections the placed buffer
    /// spans, then lifts floors of affected sections to the minimum offset
    /// of their unassigned buffers.
    fn update_section_data(
        &mut self,
        affected_sections: &HashSet<SectionIdx>,
        buffer_idx: BufferIdx,
        offset: Offset,
    ) -> Vec<SectionChange> {
        let sweep_result = self.sweep_result;
        let mut section_changes = Vec::new();
        for section_span in &sweep_result.buffer_data[buffer_idx].section_spans {
            let top = offset + (section_span.window.upper() - Offset::zero());
            let height = section_span.window.height();
            for section_idx in
                section_span.section_range.lower()..section_span.section_range.upper()
            {
                section_changes.push(SectionChange {
                    section_idx,
                    floor: self.section_data[section_idx].floor,
                });
                self.section_data[section_idx].floor = top;
                self.section_data[section_idx].total -= height;
            }
        }
        // A section's floor can never be lower than the smallest minimum
        // offset among its unassigned buffers.
        for &section_idx in affected_sections {
            let mut min_offset: Option<Offset> = None;
            for &other_idx in &sweep_result.sections[section_idx] {
                if self.assignment[other_idx].is_none() {
                    let candidate = self.min_offsets[other_idx];
                    min_offset = Some(match min_offset {
                        Some(current) => current.min(candidate),
                        None => candidate,
                    });
                }
            }
            if let Some(min_offset) = min_offset
                && self.section_data[section_idx].floor < min_offset
            {
                section_changes.push(SectionChange {
                    section_idx,
                    floor: self.section_data[section_idx].floor,
                });
                self.section_data[section_idx].floor = min_offset;
            }
        }
        section_changes
    }

    fn restore_section_data(&mut self, section_changes: &[SectionChange], buffer_idx: BufferIdx) {
        for change in section_changes.iter().rev() {
            self.section_data[change.section_idx].floor = change.floor;
        }
        for section_span in &self.sweep_result.buffer_data[buffer_idx].section_spans {
            let height = section_span.window.height();
            for section_idx in
                section_span.section_range.lower()..section_span.section_range.upper()
            {
                self.section_data[section_idx].total += height;
            }
        }
    }

    /// Consistency and inference checks over the partition's sections.
    fn check(&self, partition: &Partition, offset: Offset) -> bool {
        for section_idx in partition.section_range.lower()..partition.section_range.upper() {
            let SectionData { mut floor, total } = self.section_data[section_idx];
            if self.params.monotonic_floor {
                floor = floor.max(offset);
            }
            if self.params.section_inference {
                // The cheapest packing of the remaining buffers in this
                // section stacks flat on the floor.
                floor = floor + total;
            }
            if floor > self.capacity_limit {
                return false;
            }
        }
        true
    }

    /// The still-unassigned buffers paired with their current minimum
    /// offsets, sorted by `(offset, preorder_idx)` under dynamic ordering.
    fn compute_ordering(
        &self,
        preordering: &[PreorderData],
        orig_ordering: &[OrderData],
    ) -> Vec<OrderData> {
        let mut ordering = Vec::with_capacity(orig_ordering.len());
        for order in orig_ordering {
            let buffer_idx = preordering[order.preorder_idx].buffer_idx;
            if self.assignment[buffer_idx].is_some() {
                continue;
            }
            ordering.push(OrderData {
                offset: self.min_offsets[buffer_idx],
                preorder_idx: order.preorder_idx,
            });
        }
        if self.params.dynamic_ordering {
            ordering.sort_by_key(|order| (order.offset, order.preorder_idx));
        }
        ordering
    }

    /// After placing `buffer_idx`, decrement the cut counts it spans; any
    /// boundary reaching zero splits the unassigned remainder into
    /// independent sub-partitions, each solved on its own. Falls through to
    /// a plain search when no new cutpoint appeared.
    #[allow(clippy::too_many_arguments)]
    fn dynamically_decompose(
        &mut self,
        partition: &Partition,
        comparator: &PreorderingComparator,
        preordering: &[PreorderData],
        orig_ordering: &[OrderData],
        min_offset: Offset,
        min_preorder_idx: usize,
        buffer_idx: BufferIdx,
    ) -> SearchStatus {
        // The placed buffer belongs to no sub-partition; record it now.
        self.solution_offsets[buffer_idx] = min_offset;
        let sweep_result = self.sweep_result;
        let range = sweep_result.buffer_data[buffer_idx].overall_range();
        let mut cutpoints: Vec<SectionIdx> = vec![partition.section_range.lower()];
        for section_idx in range.lower()..range.upper().saturating_sub(1) {
            self.cuts[section_idx] -= 1;
            if self.cuts[section_idx] == 0 {
                cutpoints.push(section_idx + 1);
            }
        }
        let status = if cutpoints.len() == 1 {
            self.search(
                partition,
                comparator,
                preordering,
                orig_ordering,
                min_offset,
                min_preorder_idx,
            )
        } else {
            trace!(cutpoints = cutpoints.len() - 1, "dynamic decomposition");
            cutpoints.push(partition.section_range.upper());
            let mut status = SearchStatus::Ok;
            for cut_idx in 1..cutpoints.len() {
                let section_range = SectionRange::new(cutpoints[cut_idx - 1], cutpoints[cut_idx]);
                let mut buffer_idxs = Vec::new();
                for &other_idx in &partition.buffer_idxs {
                    if self.assignment[other_idx].is_some() {
                        continue;
                    }
                    let other_range = sweep_result.buffer_data[other_idx].overall_range();
                    if !(other_range.upper() <= section_range.lower()
                        || section_range.upper() <= other_range.lower())
                    {
                        buffer_idxs.push(other_idx);
                    }
                }
                if buffer_idxs.is_empty() {
                    continue;
                }
                let sub_partition = Partition {
                    buffer_idxs,
                    section_range,
                };
                let sub_status = self.sub_solve(&sub_partition, comparator);
                if sub_status != SearchStatus::Ok {
                    status = sub_status;
                    break;
                }
            }
            status
        };
        for section_idx in range.lower()..range.upper().saturating_sub(1) {
            self.cuts[section_idx] += 1;
        }
        status
    }

    fn deadline_exceeded(&self) -> bool {
        if self.cancelled.load(AtomicOrdering::Relaxed) {
            return true;
        }
        self.params
            .timeout
            .is_some_and(|timeout| self.start_time.elapsed() > timeout)
    }

    fn build_solution(&self) -> Solution {
        let mut height = Offset::zero();
        for (buffer_idx, buffer) in self.problem.buffers().iter().enumerate() {
            height = height.max(self.solution_offsets[buffer_idx] + buffer.size());
        }
        Solution::new(self.solution_offsets.clone(), height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tensor_alloc_model::{Buffer, Gap, validate};
    use tensor_alloc_core::{
        space::Window,
        time::{Lifespan, TimePoint},
    };

    fn lifespan(lower: i64, upper: i64) -> Lifespan {
        Lifespan::new(TimePoint::new(lower), TimePoint::new(upper))
    }

    fn window(lower: i64, upper: i64) -> Window {
        Window::new(Offset::new(lower), Offset::new(upper))
    }

    fn buffer(lower: i64, upper: i64, size: i64) -> Buffer {
        Buffer::new("b", lifespan(lower, upper), SpaceLength::new(size))
    }

    fn problem(buffers: Vec<Buffer>, capacity: i64) -> Problem {
        Problem::new(buffers, SpaceLength::new(capacity))
    }

    fn disabled_params() -> SolverParams {
        SolverParams {
            timeout: None,
            canonical_only: false,
            section_inference: false,
            dynamic_ordering: false,
            check_dominance: false,
            unallocated_floor: false,
            static_preordering: false,
            dynamic_decomposition: false,
            monotonic_floor: false,
            hatless_pruning: false,
            minimize_capacity: false,
            preordering_heuristics: vec!["TWA".into()],
        }
    }

    /// Runs `check` under every combination of the nine technique/driver
    /// toggles the way the original regression suite sweeps them (hatless
    /// pruning stays off so backtrack counts remain comparable).
    fn for_each_param_combination(check: impl Fn(SolverParams)) {
        for mask in 0u32..512 {
            let bit = |idx: u32| mask & (1 << idx) != 0;
            let params = SolverParams {
                timeout: None,
                canonical_only: bit(0),
                section_inference: bit(1),
                dynamic_ordering: bit(2),
                check_dominance: bit(3),
                unallocated_floor: bit(4),
                static_preordering: bit(5),
                dynamic_decomposition: bit(6),
                monotonic_floor: bit(7),
                hatless_pruning: false,
                minimize_capacity: bit(8),
                ..SolverParams::default()
            };
            check(params);
        }
    }

    fn expect_feasible(problem: &Problem, params: SolverParams) {
        let mut solver = Solver::with_params(params.clone());
        let solution = solver
            .solve(problem)
            .unwrap_or_else(|error| panic!("expected feasible ({:?}): {}", params, error));
        assert!(
            validate(problem, &solution).is_good(),
            "invalid solution under {:?}",
            params
        );
    }

    fn expect_infeasible(problem: &Problem, params: SolverParams) {
        let mut solver = Solver::with_params(params);
        assert_eq!(solver.solve(problem), Err(SolveError::NotFound));
        assert!(solver.backtracks() > 0);
    }

    #[test]
    fn test_infeasible_buffer_too_big() {
        let problem = problem(vec![buffer(0, 2, 3)], 2);
        for_each_param_combination(|params| expect_infeasible(&problem, params));
    }

    #[test]
    fn test_infeasible_trivial() {
        let problem = problem(vec![buffer(0, 2, 2), buffer(0, 2, 2)], 3);
        for_each_param_combination(|params| expect_infeasible(&problem, params));
    }

    #[test]
    fn test_infeasible_tricky() {
        let problem = problem(
            vec![
                buffer(0, 1, 3),
                buffer(0, 3, 1),
                buffer(4, 5, 3),
                buffer(2, 5, 1),
                buffer(1, 2, 2),
                buffer(3, 4, 2),
                buffer(1, 4, 1),
            ],
            4,
        );
        for_each_param_combination(|params| expect_infeasible(&problem, params));
    }

    #[test]
    fn test_empty_problem() {
        let problem = problem(vec![], 0);
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_single_buffer() {
        let problem = problem(vec![buffer(0, 2, 2)], 2);
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_two_buffers() {
        let problem = problem(vec![buffer(0, 2, 2), buffer(1, 3, 2)], 4);
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_five_buffers() {
        let problem = problem(
            vec![
                buffer(1, 2, 1),
                buffer(0, 2, 1),
                buffer(2, 3, 2),
                buffer(1, 3, 1),
                buffer(0, 1, 2),
            ],
            3,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_fixed_buffer_feasible() {
        let problem = problem(
            vec![
                buffer(1, 2, 1),
                buffer(0, 2, 1),
                buffer(2, 3, 2).with_fixed_offset(Offset::new(1)),
                buffer(1, 3, 1),
                buffer(0, 1, 2),
            ],
            3,
        );
        for_each_param_combination(|params| {
            let mut solver = Solver::with_params(params);
            let solution = solver.solve(&problem).expect("feasible");
            assert_eq!(solution.offset(2), Offset::new(1));
        });
    }

    #[test]
    fn test_fixed_buffer_infeasible() {
        let problem = problem(
            vec![
                buffer(1, 2, 1).with_fixed_offset(Offset::new(0)),
                buffer(0, 2, 1),
                buffer(2, 3, 2),
                buffer(1, 3, 1),
                buffer(0, 1, 2),
            ],
            3,
        );
        for_each_param_combination(|params| expect_infeasible(&problem, params));
    }

    #[test]
    fn test_two_partitions() {
        let problem = problem(
            vec![
                buffer(0, 2, 2),
                buffer(1, 3, 2),
                buffer(3, 5, 2),
                buffer(4, 6, 2),
            ],
            4,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_even_alignment() {
        let problem = problem(
            vec![
                buffer(0, 2, 1).with_alignment(2),
                buffer(0, 2, 1).with_alignment(2),
            ],
            4,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_buffers_with_gaps() {
        let problem = problem(
            vec![
                buffer(0, 4, 2).with_gaps(vec![Gap::new(lifespan(1, 3))]),
                buffer(1, 3, 2),
            ],
            2,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_tetris() {
        let problem = problem(
            vec![
                buffer(0, 10, 2).with_gaps(vec![Gap::windowed(lifespan(0, 5), window(0, 1))]),
                buffer(0, 10, 2).with_gaps(vec![Gap::windowed(lifespan(5, 10), window(1, 2))]),
            ],
            3,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_stairs() {
        let problem = problem(
            vec![
                buffer(0, 108, 30).with_gaps(vec![
                    Gap::windowed(lifespan(36, 72), window(10, 30)),
                    Gap::windowed(lifespan(72, 108), window(20, 30)),
                ]),
                buffer(36, 144, 50).with_gaps(vec![
                    Gap::windowed(lifespan(36, 72), window(20, 30)),
                    Gap::windowed(lifespan(72, 108), window(10, 40)),
                ]),
                buffer(84, 144, 42).with_gaps(vec![
                    Gap::windowed(lifespan(114, 129), window(0, 28)),
                    Gap::windowed(lifespan(129, 144), window(0, 14)),
                ]),
                buffer(84, 129, 42).with_gaps(vec![
                    Gap::windowed(lifespan(99, 114), window(14, 42)),
                    Gap::windowed(lifespan(114, 129), window(28, 42)),
                ]),
                buffer(99, 144, 70).with_gaps(vec![
                    Gap::windowed(lifespan(99, 114), window(28, 42)),
                    Gap::windowed(lifespan(114, 129), window(14, 56)),
                ]),
                buffer(0, 144, 30).with_gaps(vec![
                    Gap::windowed(lifespan(72, 108), window(0, 20)),
                    Gap::windowed(lifespan(108, 144), window(0, 10)),
                ]),
            ],
            144,
        );
        for_each_param_combination(|params| expect_feasible(&problem, params));
    }

    #[test]
    fn test_counts_backtracks_and_resets() {
        let problem = problem(vec![buffer(0, 2, 2), buffer(0, 2, 2)], 3);
        let mut solver = Solver::with_params(disabled_params());
        assert_eq!(solver.solve(&problem), Err(SolveError::NotFound));
        assert_eq!(solver.backtracks(), 3);
        // Solving again must reset the counter, not accumulate.
        assert_eq!(solver.solve(&problem), Err(SolveError::NotFound));
        assert_eq!(solver.backtracks(), 3);
    }

    fn reduces_backtracks(enable: impl Fn(&mut SolverParams)) {
        let problem = problem(
            vec![
                buffer(2, 3, 2),
                buffer(0, 1, 2),
                buffer(1, 2, 1),
                buffer(0, 2, 1),
                buffer(1, 3, 1),
            ],
            3,
        );
        let mut params = disabled_params();
        enable(&mut params);
        let mut solver = Solver::with_params(params);
        assert!(solver.solve(&problem).is_ok());

        let mut baseline_solver = Solver::with_params(disabled_params());
        assert!(baseline_solver.solve(&problem).is_ok());
        assert!(baseline_solver.backtracks() > solver.backtracks());
    }

    #[test]
    fn test_canonical_only_reduces_backtracks() {
        reduces_backtracks(|params| params.canonical_only = true);
    }

    #[test]
    fn test_section_inference_reduces_backtracks() {
        reduces_backtracks(|params| params.section_inference = true);
    }

    #[test]
    fn test_dynamic_ordering_reduces_backtracks() {
        reduces_backtracks(|params| params.dynamic_ordering = true);
    }

    #[test]
    fn test_check_dominance_reduces_backtracks() {
        reduces_backtracks(|params| params.check_dominance = true);
    }

    #[test]
    fn test_static_preordering_reduces_backtracks() {
        reduces_backtracks(|params| params.static_preordering = true);
    }

    #[test]
    fn test_dynamic_decomposition_reduces_backtracks() {
        reduces_backtracks(|params| params.dynamic_decomposition = true);
    }

    #[test]
    fn test_compute_irreducible_infeasible_subset() {
        let problem = problem(
            vec![
                buffer(0, 2, 2), // Not part of the IIS.
                buffer(0, 2, 2), // Not part of the IIS.
                buffer(2, 5, 2), // Part of the IIS.
                buffer(3, 6, 2), // Part of the IIS.
                buffer(4, 7, 2), // Part of the IIS.
            ],
            4,
        );
        let mut solver = Solver::new();
        let subset = solver
            .compute_irreducible_infeasible_subset(&problem)
            .unwrap();
        assert_eq!(subset, vec![2, 3, 4]);
    }

    #[test]
    fn test_minimize_capacity_finds_peak() {
        let problem = problem(vec![buffer(0, 2, 2), buffer(1, 3, 2)], 10);
        let params = SolverParams {
            minimize_capacity: true,
            ..SolverParams::default()
        };
        let mut solver = Solver::with_params(params);
        let solution = solver.solve(&problem).expect("feasible");
        assert_eq!(solution.height(), Offset::new(4));
        assert!(validate(&problem, &solution).is_good());
    }

    #[test]
    fn test_timeout_reports_deadline_exceeded() {
        let problem = problem(
            (0..24).map(|_| buffer(0, 2, 1)).collect(),
            23, // infeasible by pigeonhole, enormous search space
        );
        let params = SolverParams {
            timeout: Some(Duration::ZERO),
            ..disabled_params()
        };
        let mut solver = Solver::with_params(params);
        assert_eq!(solver.solve(&problem), Err(SolveError::DeadlineExceeded));
    }

    #[test]
    fn test_cancellation_interrupts_search() {
        let problem = problem(
            (0..40).map(|_| buffer(0, 2, 1)).collect(),
            39, // infeasible by pigeonhole, enormous search space
        );
        let mut solver = Solver::with_params(disabled_params());
        let token = solver.cancellation_token();
        let handle = std::thread::spawn(move || solver.solve(&problem));
        std::thread::sleep(Duration::from_millis(50));
        token.cancel();
        assert_eq!(handle.join().unwrap(), Err(SolveError::DeadlineExceeded));
    }

    #[test]
    fn test_round_robin_solves_with_default_heuristics() {
        // Defaults carry three heuristics, exercising the round robin.
        let problem = problem(
            vec![
                buffer(1, 2, 1),
                buffer(0, 2, 1),
                buffer(2, 3, 2),
                buffer(1, 3, 1),
                buffer(0, 1, 2),
            ],
            3,
        );
        let mut solver = Solver::new();
        let solution = solver.solve(&problem).expect("feasible");
        assert!(validate(&problem, &solution).is_good());
    }

    #[test]
    fn test_solver_is_deterministic() {
        let problem = problem(
            vec![
                buffer(0, 4, 3),
                buffer(2, 6, 2),
                buffer(4, 8, 4),
                buffer(1, 7, 1),
                buffer(3, 5, 2),
            ],
            10,
        );
        let mut first_solver = Solver::new();
        let first = first_solver.solve(&problem).expect("feasible");
        let mut second_solver = Solver::new();
        let second = second_solver.solve(&problem).expect("feasible");
        assert_eq!(first, second);
        assert_eq!(first_solver.backtracks(), second_solver.backtracks());
    }

    #[test]
    fn test_canonical_solutions_have_nondecreasing_offsets() {
        // With static preordering off and dynamic ordering off, the
        // preorder index equals the input index, so canonical exploration
        // must yield nondecreasing offsets in input order per partition.
        let problem = problem(
            vec![buffer(0, 4, 2), buffer(0, 4, 2), buffer(0, 4, 2)],
            6,
        );
        let params = SolverParams {
            canonical_only: true,
            ..disabled_params()
        };
        let mut solver = Solver::with_params(params);
        let solution = solver.solve(&problem).expect("feasible");
        let offsets = solution.offsets();
        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_infeasibility_is_stable_under_permutation() {
        let buffers = vec![
            buffer(0, 1, 3),
            buffer(0, 3, 1),
            buffer(4, 5, 3),
            buffer(2, 5, 1),
            buffer(1, 2, 2),
            buffer(3, 4, 2),
            buffer(1, 4, 1),
        ];
        for rotation in 0..buffers.len() {
            let mut rotated = buffers.clone();
            rotated.rotate_left(rotation);
            let problem = Problem::new(rotated, SpaceLength::new(4));
            let mut solver = Solver::new();
            assert_eq!(solver.solve(&problem), Err(SolveError::NotFound));
        }
    }

    #[test]
    fn test_hint_does_not_affect_search() {
        let plain = problem(vec![buffer(0, 2, 2), buffer(1, 3, 2)], 4);
        let hinted = Problem::new(
            vec![
                buffer(0, 2, 2).with_hint(Offset::new(2)),
                buffer(1, 3, 2).with_hint(Offset::new(0)),
            ],
            SpaceLength::new(4),
        );
        let mut plain_solver = Solver::new();
        let plain_solution = plain_solver.solve(&plain).expect("feasible");
        let mut hinted_solver = Solver::new();
        let hinted_solution = hinted_solver.solve(&hinted).expect("feasible");
        assert_eq!(plain_solution.offsets(), hinted_solution.offsets());
        assert_eq!(plain_solver.backtracks(), hinted_solver.backtracks());
    }
}
