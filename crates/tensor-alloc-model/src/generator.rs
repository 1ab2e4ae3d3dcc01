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

//! Seeded random problem generation for stress tests and benchmarks.

use crate::{
    buffer::{Buffer, Gap},
    problem::Problem,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tensor_alloc_core::{
    space::SpaceLength,
    time::{Lifespan, TimePoint},
};

/// Configuration for [`ProblemGenerator`].
///
/// The default capacity is the sum of all generated (alignment-padded)
/// sizes, which makes every generated problem trivially feasible; tighten it
/// afterwards with [`Problem::with_capacity`] to produce hard instances.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    buffer_count: usize,
    horizon: i64,
    mean_size: f64,
    size_std_dev: f64,
    size_range: (i64, i64),
    width_range: (i64, i64),
    alignments: Vec<i64>,
    gap_probability: f64,
    seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            buffer_count: 64,
            horizon: 128,
            mean_size: 64.0,
            size_std_dev: 32.0,
            size_range: (1, 256),
            width_range: (1, 32),
            alignments: vec![1],
            gap_probability: 0.0,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    #[inline]
    pub fn new(buffer_count: usize) -> Self {
        Self {
            buffer_count,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    #[inline]
    pub fn with_sizes(mut self, mean: f64, std_dev: f64, range: (i64, i64)) -> Self {
        self.mean_size = mean;
        self.size_std_dev = std_dev;
        self.size_range = range;
        self
    }

    #[inline]
    pub fn with_width_range(mut self, range: (i64, i64)) -> Self {
        self.width_range = range;
        self
    }

    #[inline]
    pub fn with_alignments(mut self, alignments: Vec<i64>) -> Self {
        self.alignments = alignments;
        self
    }

    #[inline]
    pub fn with_gap_probability(mut self, probability: f64) -> Self {
        self.gap_probability = probability;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generates reproducible random problems from a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct ProblemGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl ProblemGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn generate(&mut self) -> Problem {
        let config = self.config.clone();
        let size_distribution = Normal::new(config.mean_size, config.size_std_dev)
            .expect("generator size distribution");
        let mut buffers = Vec::with_capacity(config.buffer_count);
        let mut capacity = SpaceLength::new(0);
        for idx in 0..config.buffer_count {
            let width = self
                .rng
                .random_range(config.width_range.0..=config.width_range.1)
                .min(config.horizon);
            let start = self.rng.random_range(0..=config.horizon - width);
            let size = (size_distribution.sample(&mut self.rng).round() as i64)
                .clamp(config.size_range.0, config.size_range.1);
            let alignment = config.alignments[self.rng.random_range(0..config.alignments.len())];
            let lifespan = Lifespan::new(TimePoint::new(start), TimePoint::new(start + width));
            let mut buffer =
                Buffer::new(idx.to_string(), lifespan, SpaceLength::new(size))
                    .with_alignment(alignment);
            if width >= 3 && self.rng.random_bool(config.gap_probability) {
                // Carve an inactive middle third.
                let gap_lower = start + width / 3;
                let gap_upper = start + (2 * width) / 3;
                buffer = buffer.with_gaps(vec![Gap::new(Lifespan::new(
                    TimePoint::new(gap_lower),
                    TimePoint::new(gap_upper),
                ))]);
            }
            capacity += SpaceLength::new(size + alignment - 1);
            buffers.push(buffer);
        }
        Problem::new(buffers, capacity)
    }
}
