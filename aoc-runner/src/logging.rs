use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Log lines go to stderr so stdout only
/// ever carries answers.
pub fn init(verbose: bool) {
    // "aoc" prefixes every workspace target (aoc, aoc_fetch, aoc_puzzles, ...)
    let default = if verbose { "aoc=debug,warn" } else { "aoc=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
