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

//! # Domain Model
//!
//! The static memory allocation problem solved by this workspace: a set of
//! [`Buffer`]s, each with a fixed [`Lifespan`](tensor_alloc_core::time::Lifespan)
//! and size (possibly with inactive or window-restricted [`Gap`]s), must be
//! assigned base offsets in a linear address space of bounded capacity such
//! that no two simultaneously-live buffers overlap.
//!
//! This crate holds the problem/solution value types, CSV interchange,
//! solution validation and a seeded random instance generator. The search
//! engine itself lives in `tensor-alloc-solver`.

pub mod buffer;
pub mod csv;
pub mod err;
pub mod generator;
pub mod id;
pub mod problem;
pub mod sol;
pub mod validation;

pub use buffer::{Area, Buffer, Gap};
pub use id::{BufferId, BufferIdx};
pub use problem::Problem;
pub use sol::Solution;
pub use validation::{ValidationResult, validate};
