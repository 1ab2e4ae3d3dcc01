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

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::BufWriter;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tensor_alloc_model::csv::{from_csv, to_csv};
use tensor_alloc_model::{Problem, Solution, validate};
use tensor_alloc_solver::{SolveError, Solver, SolverParams};
use tensor_alloc_core::{space::SpaceLength, time::TimePoint};
use tracing_subscriber::EnvFilter;

const KNOWN_FLAGS: &[&str] = &[
    "capacity",
    "input",
    "output",
    "timeout",
    "validate",
    "canonical_only",
    "section_inference",
    "dynamic_ordering",
    "check_dominance",
    "unallocated_floor",
    "static_preordering",
    "dynamic_decomposition",
    "monotonic_floor",
    "hatless_pruning",
    "minimize_capacity",
    "preordering_heuristics",
    "print_solution",
    "old_format",
    "report",
];

fn usage() -> String {
    let mut text = String::from("usage: tensor-alloc-main [--flag[=value] ...]\n\nflags:\n");
    for flag in KNOWN_FLAGS {
        text.push_str("  --");
        text.push_str(flag);
        text.push('\n');
    }
    text
}

/// Parsed `--flag[=value]` command-line arguments.
struct CliArgs {
    values: HashMap<String, Option<String>>,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut values = HashMap::new();
        for arg in args {
            let Some(body) = arg.strip_prefix("--") else {
                return Err(format!("unexpected argument '{}'", arg));
            };
            let (name, value) = match body.split_once('=') {
                Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
                None => (body.to_owned(), None),
            };
            if !KNOWN_FLAGS.contains(&name.as_str()) {
                return Err(format!("unknown flag '--{}'", name));
            }
            values.insert(name, value);
        }
        Ok(Self { values })
    }

    fn get_bool(&self, name: &str, default: bool) -> Result<bool, String> {
        match self.values.get(name) {
            None => Ok(default),
            Some(None) => Ok(true),
            Some(Some(value)) => match value.as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                other => Err(format!("invalid boolean for --{}: '{}'", name, other)),
            },
        }
    }

    fn get_i64(&self, name: &str, default: i64) -> Result<i64, String> {
        match self.values.get(name) {
            None => Ok(default),
            Some(Some(value)) => value
                .parse::<i64>()
                .map_err(|_| format!("invalid integer for --{}: '{}'", name, value)),
            Some(None) => Err(format!("--{} requires a value", name)),
        }
    }

    fn get_string(&self, name: &str) -> Result<Option<String>, String> {
        match self.values.get(name) {
            None => Ok(None),
            Some(Some(value)) => Ok(Some(value.clone())),
            Some(None) => Err(format!("--{} requires a value", name)),
        }
    }

    /// Wall-clock budget in (possibly fractional) seconds.
    fn get_timeout(&self) -> Result<Option<Duration>, String> {
        match self.get_string("timeout")? {
            None => Ok(None),
            Some(value) => {
                let seconds = value
                    .parse::<f64>()
                    .map_err(|_| format!("invalid timeout: '{}'", value))?;
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(format!("invalid timeout: '{}'", value));
                }
                Ok(Some(Duration::from_secs_f64(seconds)))
            }
        }
    }
}

fn solver_params(args: &CliArgs) -> Result<SolverParams, String> {
    let defaults = SolverParams::default();
    let heuristics = match args.get_string("preordering_heuristics")? {
        None => defaults.preordering_heuristics.clone(),
        Some(list) => list
            .split(',')
            .filter(|heuristic| !heuristic.is_empty())
            .map(str::to_owned)
            .collect(),
    };
    Ok(SolverParams {
        timeout: args.get_timeout()?,
        canonical_only: args.get_bool("canonical_only", defaults.canonical_only)?,
        section_inference: args.get_bool("section_inference", defaults.section_inference)?,
        dynamic_ordering: args.get_bool("dynamic_ordering", defaults.dynamic_ordering)?,
        check_dominance: args.get_bool("check_dominance", defaults.check_dominance)?,
        unallocated_floor: args.get_bool("unallocated_floor", defaults.unallocated_floor)?,
        static_preordering: args.get_bool("static_preordering", defaults.static_preordering)?,
        dynamic_decomposition: args
            .get_bool("dynamic_decomposition", defaults.dynamic_decomposition)?,
        monotonic_floor: args.get_bool("monotonic_floor", defaults.monotonic_floor)?,
        hatless_pruning: args.get_bool("hatless_pruning", defaults.hatless_pruning)?,
        minimize_capacity: args.get_bool("minimize_capacity", defaults.minimize_capacity)?,
        preordering_heuristics: heuristics,
    })
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Machine-readable record of one run, for benchmark harnesses.
#[derive(Debug, Serialize)]
struct RunRecord {
    input: String,
    buffer_count: usize,
    capacity: i64,
    status: String,
    backtracks: u64,
    elapsed_ms: u128,
    height: Option<i64>,
}

/// A plain-text picture of the assignment: address rows (top first) by
/// time columns, one symbol per buffer, honoring gap windows.
fn render_solution(problem: &Problem, solution: &Solution) -> String {
    const SYMBOLS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let buffers = problem.buffers();
    let Some(time_lower) = buffers.iter().map(|b| b.lifespan().lower().value()).min() else {
        return String::new();
    };
    let time_upper = buffers
        .iter()
        .map(|b| b.lifespan().upper().value())
        .max()
        .unwrap_or(time_lower);
    let height = solution.height().value();
    let mut out = String::new();
    for row in (0..height).rev() {
        for time in time_lower..time_upper {
            let mut cell = '.';
            for (buffer_idx, buffer) in buffers.iter().enumerate() {
                if let Some(window) = buffer.window_at(TimePoint::new(time)) {
                    let base = solution.offset(buffer_idx).value();
                    let lower = base + window.lower().value();
                    let upper = base + window.upper().value();
                    if (lower..upper).contains(&row) {
                        cell = SYMBOLS[buffer_idx % SYMBOLS.len()] as char;
                        break;
                    }
                }
            }
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

fn run() -> Result<ExitCode, String> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    enable_tracing();

    let Some(input_path) = args.get_string("input")? else {
        return Err("--input is required".into());
    };
    let params = solver_params(&args)?;
    let capacity = args.get_i64("capacity", 0)?;
    let validate_solution = args.get_bool("validate", false)?;
    let print_solution = args.get_bool("print_solution", false)?;
    let old_format = args.get_bool("old_format", false)?;
    let output_path = args.get_string("output")?;
    let report_path = args.get_string("report")?;

    let csv_text = match fs::read_to_string(&input_path) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("failed to read {}: {}", input_path, error);
            return Ok(ExitCode::from(1));
        }
    };
    let problem = match from_csv(&csv_text) {
        Ok(problem) => problem.with_capacity(SpaceLength::new(capacity)),
        Err(error) => {
            eprintln!("failed to parse {}: {}", input_path, error);
            return Ok(ExitCode::from(1));
        }
    };

    let mut solver = Solver::with_params(params);
    let start_time = Instant::now();
    let outcome = solver.solve(&problem);
    let elapsed = start_time.elapsed();
    eprintln!("{:.3}", elapsed.as_secs_f64());

    if let Some(report_path) = &report_path {
        let record = RunRecord {
            input: input_path.clone(),
            buffer_count: problem.buffers().len(),
            capacity,
            status: match &outcome {
                Ok(_) => "ok".into(),
                Err(error) => error.to_string(),
            },
            backtracks: solver.backtracks(),
            elapsed_ms: elapsed.as_millis(),
            height: outcome.as_ref().ok().map(|s| s.height().value()),
        };
        let file = fs::File::create(report_path)
            .map_err(|error| format!("failed to create {}: {}", report_path, error))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &record)
            .map_err(|error| format!("failed to write {}: {}", report_path, error))?;
    }

    let solution = match outcome {
        Ok(solution) => solution,
        Err(SolveError::NotFound) => {
            eprintln!("infeasible");
            return Ok(ExitCode::from(1));
        }
        Err(SolveError::DeadlineExceeded) => {
            eprintln!("timed out");
            return Ok(ExitCode::from(1));
        }
    };

    if validate_solution {
        let verdict = validate(&problem, &solution);
        eprintln!("{}", if verdict.is_good() { "PASS" } else { "FAIL" });
    }
    if print_solution {
        print!("{}", render_solution(&problem, &solution));
    }
    if let Some(output_path) = &output_path {
        let contents = to_csv(&problem, Some(&solution), old_format);
        fs::write(output_path, contents)
            .map_err(|error| format!("failed to write {}: {}", output_path, error))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(message) => {
            eprintln!("{}", message);
            eprint!("{}", usage());
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_alloc_model::{Buffer, Gap};
    use tensor_alloc_core::{
        space::{Offset, Window},
        time::Lifespan,
    };

    fn args(list: &[&str]) -> CliArgs {
        CliArgs::parse(list.iter().map(|s| s.to_string())).expect("parse")
    }

    #[test]
    fn test_parses_flags_with_and_without_values() {
        let args = args(&[
            "--capacity=100",
            "--validate",
            "--canonical_only=false",
            "--timeout=1.5",
        ]);
        assert_eq!(args.get_i64("capacity", 0).unwrap(), 100);
        assert!(args.get_bool("validate", false).unwrap());
        assert!(!args.get_bool("canonical_only", true).unwrap());
        assert_eq!(
            args.get_timeout().unwrap(),
            Some(Duration::from_secs_f64(1.5))
        );
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(CliArgs::parse(["--bogus".to_string()]).is_err());
        assert!(CliArgs::parse(["positional".to_string()]).is_err());
    }

    #[test]
    fn test_solver_params_from_flags() {
        let args = args(&[
            "--section_inference=false",
            "--preordering_heuristics=TWA,WAT",
        ]);
        let params = solver_params(&args).unwrap();
        assert!(!params.section_inference);
        assert!(params.canonical_only);
        assert_eq!(params.preordering_heuristics, vec!["TWA", "WAT"]);
    }

    #[test]
    fn test_render_solution() {
        let problem = Problem::new(
            vec![
                Buffer::new(
                    "a",
                    Lifespan::new(TimePoint::new(0), TimePoint::new(2)),
                    SpaceLength::new(2),
                ),
                Buffer::new(
                    "b",
                    Lifespan::new(TimePoint::new(1), TimePoint::new(3)),
                    SpaceLength::new(2),
                ),
            ],
            SpaceLength::new(4),
        );
        let solution = Solution::new(vec![Offset::new(0), Offset::new(2)], Offset::new(4));
        assert_eq!(render_solution(&problem, &solution), ".11\n.11\n00.\n00.\n");
    }

    #[test]
    fn test_render_solution_honors_windows() {
        let problem = Problem::new(
            vec![
                Buffer::new(
                    "a",
                    Lifespan::new(TimePoint::new(0), TimePoint::new(2)),
                    SpaceLength::new(2),
                )
                .with_gaps(vec![Gap::windowed(
                    Lifespan::new(TimePoint::new(0), TimePoint::new(1)),
                    Window::new(Offset::new(0), Offset::new(1)),
                )]),
            ],
            SpaceLength::new(2),
        );
        let solution = Solution::new(vec![Offset::new(0)], Offset::new(2));
        assert_eq!(render_solution(&problem, &solution), ".0\n00\n");
    }
}
