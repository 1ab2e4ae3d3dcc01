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

//! The sweeper: one pass over time-ordered endpoints that exposes the
//! structure the search exploits.
//!
//! Consider four buffers:
//!
//! ```text
//!            t=0    t=1    t=2    t=3    t=4    t=5    t=6    t=7    t=8    t=9
//!             |======|======|======|======|======|======|======|======|======|
//!    offset=3 |XXXXXX|  b0  |XXXXXX|XXXXXX|XXXXXX|XXXXXX|XXXXXX|XXXXXX|XXXXXX|
//!             |------|------|------|------|------|------|------|------|------|
//!    offset=2 |XXXXXX|XXXXXX|      b1     |XXXXXX|XXXXXX|XXXXXX|XXXXXX|XXXXXX|
//!             |------|------|------|------|------|------|------|------|------|
//!    offset=1 |                b2                |XXXXXX|XXXXXX|XXXXXX|XXXXXX|
//!             |------|------|------|------|------|------|------|------|------|
//!    offset=0 |XXXXXX|XXXXXX|XXXXXX|XXXXXX|XXXXXX|             b3            |
//!             |======|======|======|======|======|======|======|======|======|
//! ```
//!
//! Buffers 0 and 2 interact from t=0 to t=2, forming the first cross
//! [`Section`]; buffers 1 and 2 interact from t=2 to t=4, and so on, for
//! four sections in total. Buffer 3 never interacts with the others, so two
//! temporally-disjoint [`Partition`]s result, to be solved independently:
//!
//! ```text
//!             |======|======|======|======|======|======|======|======|======|
//!   sections: |     sec0    |     sec1    | sec2 |            sec3           |
//!             |------|------|------|------|------|------|------|------|------|
//! partitions: |                p0                |             p1            |
//!             |======|======|======|======|======|======|======|======|======|
//! ```

use std::collections::{BTreeSet, HashSet, VecDeque};
use tensor_alloc_model::{BufferIdx, Problem};
use tensor_alloc_core::{
    primitives::Interval,
    space::{SpaceLength, Window},
    time::TimePoint,
};

/// An index into the list of schedule cross sections.
pub type SectionIdx = usize;

/// A count of buffers crossing between adjacent sections.
pub type CutCount = u32;

/// A half-open range of section indices.
pub type SectionRange = Interval<SectionIdx>;

/// The set of buffers simultaneously active during one cross section.
pub type Section = HashSet<BufferIdx>;

/// A contiguous run of sections during which a buffer actively occupies
/// space, together with the vertical slice it occupies there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section_range: SectionRange,
    pub window: Window,
}

/// A subset of a problem's buffers that never interacts with the rest.
///
/// Partitions are mutually exclusive and temporally disjoint, so each is
/// solved independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Indices into the problem's buffer list, in order of first activity.
    pub buffer_idxs: Vec<BufferIdx>,
    /// The contiguous block of sections this partition occupies.
    pub section_range: SectionRange,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sections {}, {} buffers",
            self.section_range,
            self.buffer_idxs.len()
        )
    }
}

/// One directional pairwise overlap: the other buffer, and the vertical
/// extent this buffer reserves beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Overlap {
    pub buffer_idx: BufferIdx,
    pub effective_size: SpaceLength,
}

impl Overlap {
    #[inline]
    pub fn new(buffer_idx: BufferIdx, effective_size: SpaceLength) -> Self {
        Self {
            buffer_idx,
            effective_size,
        }
    }
}

/// Preprocessed per-buffer facts: the sections it occupies (with windows)
/// and every buffer it shares a moment of liveness with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferData {
    /// Exhaustive, time-ordered list of active runs. Plain gaps produce
    /// holes between spans; windowed gaps produce spans with a narrower
    /// window.
    pub section_spans: Vec<SectionSpan>,
    pub overlaps: BTreeSet<Overlap>,
}

impl BufferData {
    /// The overall section range from first activity to last, holes
    /// included.
    ///
    /// A buffer still couples the two sides of a hole through its single
    /// offset, which is why cut accounting uses this range rather than the
    /// individual spans.
    #[inline]
    pub fn overall_range(&self) -> SectionRange {
        match (self.section_spans.first(), self.section_spans.last()) {
            (Some(first), Some(last)) => {
                SectionRange::new(first.section_range.lower(), last.section_range.upper())
            }
            _ => SectionRange::new(0, 0),
        }
    }
}

/// Everything the search needs to know about a problem's temporal
/// structure. Produced once per solve by [`sweep`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepResult {
    pub sections: Vec<Section>,
    pub partitions: Vec<Partition>,
    /// Indexed by [`BufferIdx`], parallel to the problem's buffer list.
    pub buffer_data: Vec<BufferData>,
}

impl SweepResult {
    /// Returns, for each adjacent section pair `(k, k + 1)`, the number of
    /// buffers active on both sides of the boundary. A zero cut means the
    /// two sides can be solved independently.
    pub fn calculate_cuts(&self) -> Vec<CutCount> {
        let mut cuts = vec![0; self.sections.len().saturating_sub(1)];
        for buffer_data in &self.buffer_data {
            let range = buffer_data.overall_range();
            for cut in cuts
                .iter_mut()
                .take(range.upper().saturating_sub(1))
                .skip(range.lower())
            {
                *cut += 1;
            }
        }
        cuts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SweepPointType {
    /// A buffer stops occupying space. Sorted before left points at the
    /// same time so that a departing buffer never shares a section with an
    /// arriving one.
    Right,
    /// A buffer starts occupying space.
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SweepPoint {
    buffer_idx: BufferIdx,
    time_value: TimePoint,
    point_type: SweepPointType,
    window: Window,
    /// True for the very first and very last point of a buffer: these are
    /// the points that open and close its liveness (as opposed to gap
    /// boundaries).
    endpoint: bool,
}

/// Emits the time-ordered activity-change points for every buffer.
///
/// For a buffer with a gap there are up to six points of interest:
///
/// ```text
///   A        BC       DE        F
///             |-------|
///   |--------||  gap  ||--------|
///             |-------|
/// ```
///
/// Point 'A' is not created when it coincides with point 'B' (a gap
/// starting exactly at the buffer's start collapses the left endpoint),
/// points 'C'/'D' only matter when the gap carries a window, and so on;
/// per-buffer time sets suppress the duplicates.
fn create_points(problem: &Problem) -> Vec<SweepPoint> {
    let mut all_points = Vec::with_capacity(problem.buffers().len() * 2);
    for (buffer_idx, buffer) in problem.buffers().iter().enumerate() {
        let lifespan = buffer.lifespan();
        let window = buffer.active_window();
        let mut points: VecDeque<SweepPoint> = VecDeque::new();
        let mut left_times: HashSet<TimePoint> = HashSet::new();
        let mut right_times: HashSet<TimePoint> = HashSet::new();
        // Left & right points for all *windowed* gaps.
        for gap in buffer.gaps() {
            let Some(gap_window) = gap.window() else {
                continue;
            };
            points.push_back(SweepPoint {
                buffer_idx,
                time_value: gap.lifespan().lower(),
                point_type: SweepPointType::Left,
                window: gap_window,
                endpoint: false,
            });
            points.push_back(SweepPoint {
                buffer_idx,
                time_value: gap.lifespan().upper(),
                point_type: SweepPointType::Right,
                window: gap_window,
                endpoint: false,
            });
            left_times.insert(gap.lifespan().lower());
            right_times.insert(gap.lifespan().upper());
        }
        // If needed, points for the buffer's own start & end times.
        if points
            .front()
            .is_none_or(|point| point.time_value != lifespan.lower())
        {
            points.push_front(SweepPoint {
                buffer_idx,
                time_value: lifespan.lower(),
                point_type: SweepPointType::Left,
                window,
                endpoint: false,
            });
        }
        if points
            .back()
            .is_none_or(|point| point.time_value != lifespan.upper())
        {
            points.push_back(SweepPoint {
                buffer_idx,
                time_value: lifespan.upper(),
                point_type: SweepPointType::Right,
                window,
                endpoint: false,
            });
        }
        if let Some(front) = points.front_mut() {
            front.endpoint = true;
        }
        if let Some(back) = points.back_mut() {
            back.endpoint = true;
        }
        right_times.insert(lifespan.lower());
        left_times.insert(lifespan.upper());
        // Left & right points for all *plain* gaps.
        for gap in buffer.gaps() {
            if gap.window().is_some() {
                continue;
            }
            if !right_times.contains(&gap.lifespan().lower()) {
                points.push_back(SweepPoint {
                    buffer_idx,
                    time_value: gap.lifespan().lower(),
                    point_type: SweepPointType::Right,
                    window,
                    endpoint: false,
                });
                right_times.insert(gap.lifespan().lower());
            }
            if !left_times.contains(&gap.lifespan().upper()) {
                points.push_back(SweepPoint {
                    buffer_idx,
                    time_value: gap.lifespan().upper(),
                    point_type: SweepPointType::Left,
                    window,
                    endpoint: false,
                });
                left_times.insert(gap.lifespan().upper());
            }
            left_times.insert(gap.lifespan().lower());
            right_times.insert(gap.lifespan().upper());
        }
        // Close/reopen the implicitly active runs around windowed gaps.
        for gap in buffer.gaps() {
            if !right_times.contains(&gap.lifespan().lower()) {
                points.push_back(SweepPoint {
                    buffer_idx,
                    time_value: gap.lifespan().lower(),
                    point_type: SweepPointType::Right,
                    window,
                    endpoint: false,
                });
            }
            if !left_times.contains(&gap.lifespan().upper()) {
                points.push_back(SweepPoint {
                    buffer_idx,
                    time_value: gap.lifespan().upper(),
                    point_type: SweepPointType::Left,
                    window,
                    endpoint: false,
                });
            }
        }
        all_points.extend(points);
    }
    all_points
        .sort_unstable_by_key(|point| (point.time_value, point.point_type, point.buffer_idx));
    all_points
}

/// Sweeps a problem into sections, partitions and per-buffer data.
///
/// Never fails; malformed input (overlapping gaps, reversed intervals) is
/// the caller's responsibility.
pub fn sweep(problem: &Problem) -> SweepResult {
    let num_buffers = problem.buffers().len();
    let points = create_points(problem);
    let mut result = SweepResult {
        sections: Vec::new(),
        partitions: Vec::new(),
        buffer_data: vec![BufferData::default(); num_buffers],
    };
    // `actives` tracks who contributes to the current section; `alive`
    // tracks whose lifespan (not just a gap) is open and delimits
    // partitions.
    let mut actives: Section = Section::new();
    let mut alive: Section = Section::new();
    let mut last_section_time: Option<TimePoint> = None;
    let mut last_section_idx: SectionIdx = 0;
    let mut span_start: Vec<SectionIdx> = vec![0; num_buffers];
    for point in &points {
        let buffer_idx = point.buffer_idx;
        if last_section_time.is_none() {
            last_section_time = Some(point.time_value);
        }
        match point.point_type {
            SweepPointType::Right => {
                // Time advanced since the previous section: snapshot a new
                // cross section before anyone leaves.
                if last_section_time.is_some_and(|time| time < point.time_value) {
                    last_section_time = Some(point.time_value);
                    result.sections.push(actives.clone());
                }
                actives.remove(&buffer_idx);
                if point.endpoint {
                    alive.remove(&buffer_idx);
                }
                let section_range =
                    SectionRange::new(span_start[buffer_idx], result.sections.len());
                result.buffer_data[buffer_idx].section_spans.push(SectionSpan {
                    section_range,
                    window: point.window,
                });
                // Once nothing is alive, the open partition's span is known.
                if alive.is_empty() {
                    if let Some(partition) = result.partitions.last_mut() {
                        partition.section_range =
                            SectionRange::new(last_section_idx, result.sections.len());
                    }
                    last_section_idx = result.sections.len();
                }
            }
            SweepPointType::Left => {
                if alive.is_empty() {
                    result.partitions.push(Partition::default());
                }
                if point.endpoint {
                    if let Some(partition) = result.partitions.last_mut() {
                        partition.buffer_idxs.push(buffer_idx);
                    }
                    let buffer = &problem.buffers()[buffer_idx];
                    for &alive_idx in &alive {
                        let alive_buffer = &problem.buffers()[alive_idx];
                        if let Some(effective_size) = alive_buffer.effective_size(buffer) {
                            result.buffer_data[alive_idx]
                                .overlaps
                                .insert(Overlap::new(buffer_idx, effective_size));
                        }
                        if let Some(effective_size) = buffer.effective_size(alive_buffer) {
                            result.buffer_data[buffer_idx]
                                .overlaps
                                .insert(Overlap::new(alive_idx, effective_size));
                        }
                    }
                    alive.insert(buffer_idx);
                }
                actives.insert(buffer_idx);
                span_start[buffer_idx] = result.sections.len();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_alloc_model::{Buffer, Gap};
    use tensor_alloc_core::{space::Offset, time::Lifespan};

    fn lifespan(lower: i64, upper: i64) -> Lifespan {
        Lifespan::new(TimePoint::new(lower), TimePoint::new(upper))
    }

    fn window(lower: i64, upper: i64) -> Window {
        Window::new(Offset::new(lower), Offset::new(upper))
    }

    fn buffer(lower: i64, upper: i64, size: i64) -> Buffer {
        Buffer::new("b", lifespan(lower, upper), SpaceLength::new(size))
    }

    fn problem(buffers: Vec<Buffer>) -> Problem {
        Problem::new(buffers, SpaceLength::new(0))
    }

    fn span(lower: SectionIdx, upper: SectionIdx, window_lower: i64, window_upper: i64) -> SectionSpan {
        SectionSpan {
            section_range: SectionRange::new(lower, upper),
            window: window(window_lower, window_upper),
        }
    }

    fn overlaps(entries: &[(BufferIdx, i64)]) -> BTreeSet<Overlap> {
        entries
            .iter()
            .map(|&(buffer_idx, effective_size)| {
                Overlap::new(buffer_idx, SpaceLength::new(effective_size))
            })
            .collect()
    }

    #[test]
    fn test_sweep_no_overlap() {
        let result = sweep(&problem(vec![
            buffer(0, 1, 2),
            buffer(1, 2, 1),
            buffer(2, 3, 1),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![
                    Section::from([0]),
                    Section::from([1]),
                    Section::from([2]),
                ],
                partitions: vec![
                    Partition {
                        buffer_idxs: vec![0],
                        section_range: SectionRange::new(0, 1),
                    },
                    Partition {
                        buffer_idxs: vec![1],
                        section_range: SectionRange::new(1, 2),
                    },
                    Partition {
                        buffer_idxs: vec![2],
                        section_range: SectionRange::new(2, 3),
                    },
                ],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2)],
                        overlaps: BTreeSet::new(),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: BTreeSet::new(),
                    },
                    BufferData {
                        section_spans: vec![span(2, 3, 0, 1)],
                        overlaps: BTreeSet::new(),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![0, 0]);
    }

    #[test]
    fn test_sweep_with_overlap() {
        let result = sweep(&problem(vec![
            buffer(0, 1, 2),
            buffer(1, 3, 1),
            buffer(2, 4, 1),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![
                    Section::from([0]),
                    Section::from([1, 2]),
                    Section::from([2]),
                ],
                partitions: vec![
                    Partition {
                        buffer_idxs: vec![0],
                        section_range: SectionRange::new(0, 1),
                    },
                    Partition {
                        buffer_idxs: vec![1, 2],
                        section_range: SectionRange::new(1, 3),
                    },
                ],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2)],
                        overlaps: BTreeSet::new(),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(2, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 3, 0, 1)],
                        overlaps: overlaps(&[(1, 1)]),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![0, 1]);
    }

    #[test]
    fn test_sweep_two_buffers_end_at_same_time() {
        let result = sweep(&problem(vec![
            buffer(0, 1, 2),
            buffer(1, 3, 1),
            buffer(2, 3, 1),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![Section::from([0]), Section::from([1, 2])],
                partitions: vec![
                    Partition {
                        buffer_idxs: vec![0],
                        section_range: SectionRange::new(0, 1),
                    },
                    Partition {
                        buffer_idxs: vec![1, 2],
                        section_range: SectionRange::new(1, 2),
                    },
                ],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2)],
                        overlaps: BTreeSet::new(),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(2, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(1, 1)]),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![0]);
    }

    #[test]
    fn test_sweep_long_buffer_prevents_partitioning() {
        let result = sweep(&problem(vec![
            buffer(0, 1, 2),
            buffer(1, 3, 1),
            buffer(2, 4, 1),
            buffer(0, 4, 1),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![
                    Section::from([0, 3]),
                    Section::from([1, 3, 2]),
                    Section::from([3, 2]),
                ],
                partitions: vec![Partition {
                    buffer_idxs: vec![0, 3, 1, 2],
                    section_range: SectionRange::new(0, 3),
                }],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2)],
                        overlaps: overlaps(&[(3, 2)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(2, 1), (3, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 3, 0, 1)],
                        overlaps: overlaps(&[(1, 1), (3, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(0, 3, 0, 1)],
                        overlaps: overlaps(&[(0, 1), (1, 1), (2, 1)]),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![1, 2]);
    }

    #[test]
    fn test_sweep_buffers_out_of_order() {
        let result = sweep(&problem(vec![
            buffer(2, 3, 1),
            buffer(1, 3, 1),
            buffer(0, 1, 2),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![Section::from([2]), Section::from([1, 0])],
                partitions: vec![
                    Partition {
                        buffer_idxs: vec![2],
                        section_range: SectionRange::new(0, 1),
                    },
                    Partition {
                        buffer_idxs: vec![1, 0],
                        section_range: SectionRange::new(1, 2),
                    },
                ],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(1, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1)],
                        overlaps: overlaps(&[(0, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2)],
                        overlaps: BTreeSet::new(),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![0]);
    }

    #[test]
    fn test_sweep_with_gaps() {
        let result = sweep(&problem(vec![
            buffer(4, 7, 1).with_gaps(vec![Gap::new(lifespan(5, 6))]),
            buffer(5, 8, 1).with_gaps(vec![Gap::new(lifespan(6, 7))]),
            buffer(4, 8, 1).with_gaps(vec![Gap::new(lifespan(5, 7))]),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![
                    Section::from([0, 2]),
                    Section::from([1]),
                    Section::from([0]),
                    Section::from([1, 2]),
                ],
                partitions: vec![Partition {
                    buffer_idxs: vec![0, 2, 1],
                    section_range: SectionRange::new(0, 4),
                }],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 1), span(2, 3, 0, 1)],
                        overlaps: overlaps(&[(2, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(1, 2, 0, 1), span(3, 4, 0, 1)],
                        overlaps: overlaps(&[(2, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 1), span(3, 4, 0, 1)],
                        overlaps: overlaps(&[(0, 1), (1, 1)]),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![2, 3, 2]);
    }

    #[test]
    fn test_sweep_tetris() {
        let result = sweep(&problem(vec![
            buffer(4, 8, 2).with_gaps(vec![Gap::windowed(lifespan(4, 6), window(0, 1))]),
            buffer(4, 8, 2).with_gaps(vec![Gap::windowed(lifespan(6, 8), window(1, 2))]),
        ]));
        assert_eq!(
            result,
            SweepResult {
                sections: vec![Section::from([0, 1]), Section::from([0, 1])],
                partitions: vec![Partition {
                    buffer_idxs: vec![0, 1],
                    section_range: SectionRange::new(0, 2),
                }],
                buffer_data: vec![
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 1), span(1, 2, 0, 2)],
                        overlaps: overlaps(&[(1, 1)]),
                    },
                    BufferData {
                        section_spans: vec![span(0, 1, 0, 2), span(1, 2, 1, 2)],
                        overlaps: overlaps(&[(0, 2)]),
                    },
                ],
            }
        );
        assert_eq!(result.calculate_cuts(), vec![2]);
    }

    #[test]
    fn test_sweep_empty_problem() {
        let result = sweep(&problem(vec![]));
        assert_eq!(result, SweepResult::default());
        assert!(result.calculate_cuts().is_empty());
    }
}
