//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Prints answers to stdout and failures to stderr
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_line(result)),
            (Err(_), _) => eprintln!("{}", format_line(result)),
        }
    }

    /// Totals after all results. Shows summed compute time next to
    /// wall-clock time so the gain from parallelism is visible.
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::of(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.successes, summary.failures
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if !elapsed.is_zero() {
            let compute_secs = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

struct Summary {
    successes: usize,
    failures: usize,
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn of(results: &[SolverResult]) -> Self {
        let solved = || results.iter().filter(|r| r.answer.is_ok());
        let successes = solved().count();
        Self {
            successes,
            failures: results.len() - successes,
            parse_time: solved().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved().map(|r| r.solve_duration).sum(),
        }
    }
}

/// `YYYY/DD Part P: answer (parse: .., solve: ..)` or `YYYY/DD Part P: Error - ..`
fn format_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{prefix}: {answer} ({parse_timing}solve: {})",
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Wall-clock counterpart of [`format_duration`]
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};

    fn ok(part: u8, answer: &str, parse_ms: Option<i64>, solve_ms: i64) -> SolverResult {
        SolverResult {
            year: 2023,
            day: 7,
            part,
            answer: Ok(answer.to_string()),
            parse_duration: parse_ms.map(TimeDelta::milliseconds),
            solve_duration: TimeDelta::milliseconds(solve_ms),
        }
    }

    #[test]
    fn durations_pick_a_readable_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(1500)),
            "1.50ms"
        );
    }

    #[test]
    fn full_line_shows_parse_time_only_when_known() {
        assert_eq!(
            format_line(&ok(1, "6440", Some(2), 3)),
            "2023/07 Part 1: 6440 (parse: 2.00ms, solve: 3.00ms)"
        );
        assert_eq!(
            format_line(&ok(2, "5905", None, 1)),
            "2023/07 Part 2: 5905 (solve: 1.00ms)"
        );
    }

    #[test]
    fn summary_counts_only_successful_timings() {
        let failed = SolverResult {
            year: 2023,
            day: 8,
            part: 1,
            answer: Err(ArcExecutorError::from(ExecutorError::ChannelSend)),
            parse_duration: Some(TimeDelta::seconds(100)),
            solve_duration: TimeDelta::seconds(100),
        };
        assert_eq!(format_line(&failed), "2023/08 Part 1: Error - Result channel closed");
        let results = [ok(1, "a", Some(5), 10), ok(2, "b", None, 20), failed];

        let summary = Summary::of(&results);
        assert_eq!((summary.successes, summary.failures), (2, 1));
        assert_eq!(summary.parse_time, TimeDelta::milliseconds(5));
        assert_eq!(summary.solve_time, TimeDelta::milliseconds(30));
    }
}
