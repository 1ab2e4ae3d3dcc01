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
use std::fmt::Display;

/// Errors produced while reading a problem from CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// Two header columns resolved to the same canonical name.
    DuplicateColumn,
    /// One of the required columns (`id`, `lower`, `upper`, `size`) is
    /// absent.
    MissingColumn(&'static str),
    /// A field failed to parse; carries the column name and the offending
    /// text.
    MalformedField { column: &'static str, value: String },
    /// A data row has a different number of fields than the header.
    FieldCount { expected: usize, actual: usize },
}

impl Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvError::DuplicateColumn => write!(f, "duplicate column names"),
            CsvError::MissingColumn(name) => {
                write!(f, "required column '{}' is missing", name)
            }
            CsvError::MalformedField { column, value } => {
                write!(f, "improperly formed {}: '{}'", column, value)
            }
            CsvError::FieldCount { expected, actual } => {
                write!(f, "expected {} fields per record, found {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for CsvError {}

/// Returned by [`Problem::strip_solution`](crate::Problem::strip_solution)
/// when a buffer carries no offset to strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripSolutionError {
    buffer_id: BufferId,
}

impl StripSolutionError {
    #[inline]
    pub fn new(buffer_id: BufferId) -> Self {
        Self { buffer_id }
    }

    #[inline]
    pub fn buffer_id(&self) -> &BufferId {
        &self.buffer_id
    }
}

impl Display for StripSolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "buffer '{}' has no offset to strip", self.buffer_id)
    }
}

impl std::error::Error for StripSolutionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_error_display() {
        assert_eq!(
            format!("{}", CsvError::MissingColumn("size")),
            "required column 'size' is missing"
        );
        assert_eq!(
            format!(
                "{}",
                CsvError::MalformedField {
                    column: "gaps",
                    value: "3~4".into()
                }
            ),
            "improperly formed gaps: '3~4'"
        );
    }

    #[test]
    fn test_strip_solution_error_display() {
        let err = StripSolutionError::new(BufferId::new("b3"));
        assert_eq!(format!("{}", err), "buffer 'b3' has no offset to strip");
    }
}
