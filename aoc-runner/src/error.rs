//! Error types for the runner

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Top-level error, printed by `main` before exiting with status 1
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_fetch::FetchError),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_core::RegistrationError),

    #[error("User ID mismatch: expected {expected}, got {actual}")]
    UserIdMismatch { expected: u64, actual: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read input {}: {source}", path.display())]
    InputFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Errors raised while executing work items
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Neither the cache nor the network could provide the input
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    InputFetch {
        year: u16,
        day: u8,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Solver(#[from] aoc_core::SolverError),

    /// The result receiver went away before all results were sent
    #[error("Result channel closed")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Several workers failed
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested `Multiple`s
    /// and keeping `first`'s errors ahead of `second`'s.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for error in [first, second] {
            match error.inner() {
                ExecutorError::Multiple(inner) => errors.extend(inner.iter().cloned()),
                _ => errors.push(error),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(existing: Option<ArcExecutorError>, new: ArcExecutorError) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache directory creation failed: {0}")]
    DirCreation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(day: u8) -> ArcExecutorError {
        ExecutorError::InputFetch {
            year: 2020,
            day,
            source: "offline".into(),
        }
        .into()
    }

    fn days(error: &ArcExecutorError) -> Vec<u8> {
        match error.inner() {
            ExecutorError::Multiple(errors) => errors.iter().flat_map(days).collect(),
            ExecutorError::InputFetch { day, .. } => vec![*day],
            _ => vec![],
        }
    }

    #[test]
    fn combine_flattens_and_keeps_order() {
        let left = ArcExecutorError::combine(leaf(1), leaf(2));
        let right = ArcExecutorError::combine(leaf(3), leaf(4));
        let all = ArcExecutorError::combine(left, right);

        assert_eq!(days(&all), vec![1, 2, 3, 4]);
        match all.inner() {
            ExecutorError::Multiple(errors) => assert_eq!(errors.len(), 4),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn combine_opt_without_existing_is_identity() {
        let combined = ArcExecutorError::combine_opt(None, leaf(9));
        assert_eq!(days(&combined), vec![9]);
        assert!(matches!(combined.inner(), ExecutorError::InputFetch { .. }));
    }

    #[test]
    fn input_file_message_names_the_path() {
        let error = CliError::InputFile {
            path: "puzzles/day_7.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.to_string().starts_with("Cannot read input puzzles/day_7.txt: "));
    }

    #[test]
    fn input_fetch_message_names_the_day() {
        assert_eq!(
            leaf(5).to_string(),
            "Input unavailable for 2020/05: offline"
        );
    }
}
