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

//! CSV interchange for problems and solutions.
//!
//! Reading recognizes these columns (order unrestricted, case-sensitive):
//! `id`/`buffer`/`buffer_id`, `lower`/`start`/`begin`, `upper` (exclusive) or
//! `end` (inclusive; one is added on read and subtracted on write), `size`,
//! and optionally `alignment`, `offset` (read back as a fixed offset),
//! `hint` (-1 means absent) and `gaps` (space-separated `LO-HI` tokens,
//! each optionally `@WLO:WHI` to attach a window).

use crate::{
    buffer::{Buffer, Gap},
    err::CsvError,
    problem::Problem,
    sol::Solution,
};
use std::collections::HashMap;
use std::fmt::Write as _;
use tensor_alloc_core::{
    space::{Offset, SpaceLength, Window},
    time::{Lifespan, TimePoint},
};

const ALIGNMENT: &str = "alignment";
const BEGIN: &str = "begin";
const BUFFER: &str = "buffer";
const BUFFER_ID: &str = "buffer_id";
const END: &str = "end";
const GAPS: &str = "gaps";
const HINT: &str = "hint";
const ID: &str = "id";
const LOWER: &str = "lower";
const OFFSET: &str = "offset";
const SIZE: &str = "size";
const START: &str = "start";
const UPPER: &str = "upper";

fn parse_i64(column: &'static str, value: &str) -> Result<i64, CsvError> {
    value.trim().parse::<i64>().map_err(|_| CsvError::MalformedField {
        column,
        value: value.to_owned(),
    })
}

fn parse_gap(token: &str, addend: i64) -> Result<Gap, CsvError> {
    let malformed = || CsvError::MalformedField {
        column: GAPS,
        value: token.to_owned(),
    };
    let at_parts: Vec<&str> = token.split('@').collect();
    let bounds: Vec<&str> = at_parts[0].split('-').collect();
    if bounds.len() != 2 {
        return Err(malformed());
    }
    let gap_lower = bounds[0].parse::<i64>().map_err(|_| malformed())?;
    let gap_upper = bounds[1].parse::<i64>().map_err(|_| malformed())?;
    let gap_lifespan = Lifespan::new(
        TimePoint::new(gap_lower),
        TimePoint::new(gap_upper + addend),
    );
    if at_parts.len() > 1 {
        let window_parts: Vec<&str> = at_parts[1].split(':').collect();
        if window_parts.len() != 2 {
            return Err(malformed());
        }
        let window_lower = window_parts[0].parse::<i64>().map_err(|_| malformed())?;
        let window_upper = window_parts[1].parse::<i64>().map_err(|_| malformed())?;
        let window = Window::new(Offset::new(window_lower), Offset::new(window_upper));
        Ok(Gap::windowed(gap_lifespan, window))
    } else {
        Ok(Gap::new(gap_lifespan))
    }
}

/// Reads a problem from CSV text. The capacity is not part of the format
/// and is left at zero for the caller to fill in.
///
/// Buffers may be listed in any order; an `offset` column is read back into
/// each buffer's fixed offset.
pub fn from_csv(input: &str) -> Result<Problem, CsvError> {
    let mut addend: i64 = 0;
    let mut buffers = Vec::new();
    let mut col_map: HashMap<&str, usize> = HashMap::new();
    for record in input.split('\n') {
        if record.is_empty() {
            break;
        }
        let fields: Vec<&str> = record.split(',').collect();
        if col_map.is_empty() {
            // Header row: canonicalize the column aliases.
            for (field_idx, &column) in fields.iter().enumerate() {
                let col_name = match column {
                    BEGIN | START => LOWER,
                    BUFFER | BUFFER_ID => ID,
                    END => {
                        // Values of an 'end' column are off by one.
                        addend = 1;
                        UPPER
                    }
                    other => other,
                };
                col_map.insert(col_name, field_idx);
            }
            if col_map.len() != fields.len() {
                return Err(CsvError::DuplicateColumn);
            }
            for required in [ID, LOWER, UPPER, SIZE] {
                if !col_map.contains_key(required) {
                    return Err(CsvError::MissingColumn(required));
                }
            }
            continue;
        }
        if fields.len() != col_map.len() {
            return Err(CsvError::FieldCount {
                expected: col_map.len(),
                actual: fields.len(),
            });
        }
        let id = fields[col_map[ID]];
        let lower = parse_i64(LOWER, fields[col_map[LOWER]])?;
        let upper = parse_i64(UPPER, fields[col_map[UPPER]])?;
        let size = parse_i64(SIZE, fields[col_map[SIZE]])?;
        let lifespan = Lifespan::new(TimePoint::new(lower), TimePoint::new(upper + addend));
        let mut buffer = Buffer::new(id, lifespan, SpaceLength::new(size));
        if let Some(&field_idx) = col_map.get(ALIGNMENT) {
            buffer = buffer.with_alignment(parse_i64(ALIGNMENT, fields[field_idx])?);
        }
        if let Some(&field_idx) = col_map.get(HINT) {
            let hint = parse_i64(HINT, fields[field_idx])?;
            if hint >= 0 {
                buffer = buffer.with_hint(Offset::new(hint));
            }
        }
        if let Some(&field_idx) = col_map.get(GAPS) {
            let gaps = fields[field_idx]
                .split(' ')
                .filter(|token| !token.is_empty())
                .map(|token| parse_gap(token, addend))
                .collect::<Result<Vec<_>, _>>()?;
            buffer = buffer.with_gaps(gaps);
        }
        if let Some(&field_idx) = col_map.get(OFFSET) {
            buffer = buffer.with_fixed_offset(Offset::new(parse_i64(OFFSET, fields[field_idx])?));
        }
        buffers.push(buffer);
    }
    Ok(Problem::new(buffers, SpaceLength::new(0)))
}

/// Serializes a problem (and optionally a solution's offsets) as CSV.
///
/// Optional columns are emitted only when some buffer needs them. With
/// `old_format` the lifespan columns are named `start`/`end` and upper
/// bounds (including gap bounds) are written inclusively.
pub fn to_csv(problem: &Problem, solution: Option<&Solution>, old_format: bool) -> String {
    let include_alignment = problem.buffers().iter().any(|b| b.alignment() != 1);
    let include_hint = problem.buffers().iter().any(|b| b.hint().is_some());
    let include_gaps = problem.buffers().iter().any(|b| !b.gaps().is_empty());
    let addend: i64 = if old_format { -1 } else { 0 };

    let mut header = vec![
        ID,
        if old_format { START } else { LOWER },
        if old_format { END } else { UPPER },
        SIZE,
    ];
    if include_alignment {
        header.push(ALIGNMENT);
    }
    if include_hint {
        header.push(HINT);
    }
    if include_gaps {
        header.push(GAPS);
    }
    if solution.is_some() {
        header.push(OFFSET);
    }

    let mut output = String::new();
    output.push_str(&header.join(","));
    output.push('\n');
    for (buffer_idx, buffer) in problem.buffers().iter().enumerate() {
        let lifespan = buffer.lifespan();
        let mut record = vec![
            buffer.id().to_string(),
            lifespan.lower().value().to_string(),
            (lifespan.upper().value() + addend).to_string(),
            buffer.size().value().to_string(),
        ];
        if include_alignment {
            record.push(buffer.alignment().to_string());
        }
        if include_hint {
            record.push(buffer.hint().map_or(-1, Offset::value).to_string());
        }
        if include_gaps {
            let gaps: Vec<String> = buffer
                .gaps()
                .iter()
                .map(|gap| {
                    let mut token = format!(
                        "{}-{}",
                        gap.lifespan().lower().value(),
                        gap.lifespan().upper().value() + addend
                    );
                    if let Some(window) = gap.window() {
                        let _ = write!(
                            token,
                            "@{}:{}",
                            window.lower().value(),
                            window.upper().value()
                        );
                    }
                    token
                })
                .collect();
            record.push(gaps.join(" "));
        }
        if let Some(solution) = solution {
            record.push(solution.offset(buffer_idx).value().to_string());
        }
        output.push_str(&record.join(","));
        output.push('\n');
    }
    output
}
