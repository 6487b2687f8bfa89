//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    /// A solver must carry all of these tags
    pub tags: Vec<String>,
    /// Local input file (`-` for stdin) replacing the cache and downloads
    pub input: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    /// Cache owner; 0 when `--input` makes the cache irrelevant
    pub user_id: u64,
    /// Whether the user id came from the user rather than from the session
    pub user_id_provided: bool,
    /// Empty until one is needed
    pub session: Zeroizing<String>,
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, resolving session and user id.
    ///
    /// With `--input` nothing is downloaded, so neither is resolved.
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let cache_dir = expand_tilde(&args.cache_dir);
        let thread_count = args.threads.unwrap_or_else(num_cpus);
        let user_id_provided = args.user_id.is_some();

        let (session, user_id) = if args.input.is_some() {
            (Zeroizing::new(String::new()), args.user_id.unwrap_or_default())
        } else {
            resolve_session_and_user_id(args.user_id)?
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input: args.input,
            cache_dir,
            thread_count,
            parallelize_by: args.parallelize_by,
            user_id,
            user_id_provided,
            session,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn prompt_user_id() -> Result<u64, CliError> {
    use std::io::Write;
    println!("No user ID provided. Enter your AoC user ID (shown on the settings page).");
    print!("User ID: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::Config(format!("Failed to read user ID: {e}")))?;

    input
        .trim()
        .parse()
        .map_err(|_| CliError::Config("Invalid user ID: must be a number".to_string()))
}

/// Prompt for a session token without echoing it
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{reason}");
    let session = Zeroizing::new(
        rpassword::prompt_password("Enter AoC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {e}")))?,
    );
    if session.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(session)
}

/// Resolve the session's user id and check it against `expected_user_id`.
pub fn verify_session(session: &str, expected_user_id: Option<u64>) -> Result<u64, CliError> {
    let client = aoc_fetch::PuzzleClient::new()?;
    let info = client.verify_session(session)?;
    let actual = info
        .user_id
        .ok_or_else(|| CliError::Config("Invalid session: could not fetch user ID".to_string()))?;
    check_user_id(expected_user_id, actual)
}

fn check_user_id(expected: Option<u64>, actual: u64) -> Result<u64, CliError> {
    match expected {
        Some(expected) if expected != actual => Err(CliError::UserIdMismatch { expected, actual }),
        _ => Ok(actual),
    }
}

/// User id from `--user-id`, the session in the environment, or a prompt.
/// The session stays empty when the environment has none; it is only
/// prompted for once an input is actually missing.
fn resolve_session_and_user_id(
    provided_user_id: Option<u64>,
) -> Result<(Zeroizing<String>, u64), CliError> {
    let env_session = std::env::var(SESSION_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Zeroizing::new);

    match (env_session, provided_user_id) {
        (Some(session), expected) => {
            let user_id = verify_session(&session, expected)?;
            tracing::debug!(user_id, "session verified");
            Ok((session, user_id))
        }
        (None, Some(user_id)) => Ok((Zeroizing::new(String::new()), user_id)),
        (None, None) => Ok((Zeroizing::new(String::new()), prompt_user_id()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn tilde_is_expanded_only_at_the_start() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            expand_tilde(Path::new("~/.cache/aoc_solver")),
            home.join(".cache/aoc_solver")
        );
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(
            expand_tilde(Path::new("/tmp/~/x")),
            PathBuf::from("/tmp/~/x")
        );
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn explicit_user_id_must_match_session() {
        assert_eq!(check_user_id(None, 5).unwrap(), 5);
        assert_eq!(check_user_id(Some(5), 5).unwrap(), 5);
        assert!(matches!(
            check_user_id(Some(4), 5),
            Err(CliError::UserIdMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn literal_input_needs_no_session() {
        let args = Args::try_parse_from([
            "aoc", "-y", "2020", "-d", "1", "-i", "input.txt", "--threads", "3",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();

        assert!(config.session.is_empty());
        assert_eq!(config.user_id, 0);
        assert_eq!(config.thread_count, 3);
        assert_eq!(config.input, Some(PathBuf::from("input.txt")));
    }
}
