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

//! # Constraint-Search Engine
//!
//! The solver half of the workspace: a preprocessing sweep that turns a
//! [`Problem`](tensor_alloc_model::Problem) into cross sections, temporal
//! partitions and pairwise overlap data, followed by a recursive
//! depth-first branch-and-bound search over buffer offsets.
//!
//! The search maintains incremental bounds (section floors, per-buffer
//! minimum offsets, cut counts) through explicit change journals that are
//! unwound on backtrack; no state is cloned speculatively. Pruning and
//! inference techniques are individually togglable through
//! [`SolverParams`](params::SolverParams).

pub mod engine;
pub mod params;
pub mod preorder;
pub mod sweep;

pub use engine::{CancellationToken, SolveError, Solver};
pub use params::SolverParams;
pub use sweep::{SweepResult, sweep};
