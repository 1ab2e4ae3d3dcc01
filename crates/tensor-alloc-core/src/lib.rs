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

//! # Core Primitives
//!
//! Foundational data types for the tensor-alloc offset assignment engine.
//! Two domains are modeled with distinct newtypes so that the compiler keeps
//! them apart:
//!
//! - **Time**: [`time::TimePoint`], [`time::TimeDelta`] and the half-open
//!   [`time::Lifespan`] interval.
//! - **Space**: [`space::Offset`] (an address in the linear address space),
//!   [`space::SpaceLength`] (a vertical extent) and the half-open
//!   [`space::Window`] interval.
//!
//! Both interval aliases are instances of the generic
//! [`primitives::Interval`].

pub mod primitives;
pub mod space;
pub mod time;
