//! Where puzzle text comes from

use crate::cache::InputCache;
use crate::error::ExecutorError;
use aoc_fetch::PuzzleClient;
use std::borrow::Cow;
use zeroize::Zeroizing;

/// Source of puzzle input for every work item in a run
pub enum InputSource {
    /// Text given on the command line (`--input FILE` or stdin)
    Literal(String),
    /// Per-user cache, falling back to the puzzle site
    Remote(RemoteInput),
}

pub struct RemoteInput {
    cache: InputCache,
    client: PuzzleClient,
    session: Zeroizing<String>,
}

impl RemoteInput {
    pub fn new(cache: InputCache, client: PuzzleClient, session: Zeroizing<String>) -> Self {
        Self {
            cache,
            client,
            session,
        }
    }

    /// Year/days not in the cache yet
    pub fn missing(&self, wanted: impl IntoIterator<Item = (u16, u8)>) -> Vec<(u16, u8)> {
        wanted
            .into_iter()
            .filter(|&(year, day)| !self.cache.contains(year, day))
            .collect()
    }

    /// Replace the session used for downloads, e.g. after prompting for one.
    pub fn set_session(&mut self, session: Zeroizing<String>, cache: InputCache) {
        self.session = session;
        self.cache = cache;
    }

    fn load(&self, year: u16, day: u8) -> Result<String, ExecutorError> {
        let fetch_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            ExecutorError::InputFetch { year, day, source }
        };

        if let Some(input) = self
            .cache
            .get(year, day)
            .map_err(|e| fetch_error(Box::new(e)))?
        {
            tracing::debug!(year, day, "cache hit");
            return Ok(input);
        }

        if self.session.is_empty() {
            return Err(fetch_error("not cached and no session available".into()));
        }

        tracing::info!(year, day, "fetching input");
        let input = self
            .client
            .fetch_input(year, day, &self.session)
            .map_err(|e| fetch_error(Box::new(e)))?;

        if let Err(e) = self.cache.put(year, day, &input) {
            tracing::warn!(year, day, error = %e, "could not cache input");
        }
        Ok(input)
    }
}

impl InputSource {
    /// Input text for `year`/`day`.
    ///
    /// A literal source answers every request with the same text; the CLI
    /// only allows it together with a single year and day.
    pub fn load(&self, year: u16, day: u8) -> Result<Cow<'_, str>, ExecutorError> {
        match self {
            InputSource::Literal(text) => Ok(Cow::Borrowed(text)),
            InputSource::Remote(remote) => remote.load(year, day).map(Cow::Owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache(dir: &TempDir) -> InputCache {
        InputCache::new(dir.path().to_path_buf(), 42)
    }

    fn remote(dir: &TempDir, session: &str) -> RemoteInput {
        RemoteInput::new(
            cache(dir),
            PuzzleClient::new().unwrap(),
            Zeroizing::new(session.to_string()),
        )
    }

    #[test]
    fn literal_is_returned_for_any_day() {
        let source = InputSource::Literal("1721\n979\n".to_string());
        assert_eq!(source.load(2020, 1).unwrap(), "1721\n979\n");
        assert_eq!(source.load(2023, 25).unwrap(), "1721\n979\n");
    }

    #[test]
    fn cached_input_is_served_without_session() {
        let dir = TempDir::new().unwrap();
        cache(&dir).put(2023, 9, "0 3 6 9 12 15\n").unwrap();
        let remote = remote(&dir, "");
        assert_eq!(remote.missing([(2023, 9), (2023, 10)]), vec![(2023, 10)]);

        let source = InputSource::Remote(remote);
        assert_eq!(source.load(2023, 9).unwrap(), "0 3 6 9 12 15\n");
    }

    #[test]
    fn miss_without_session_is_an_input_error() {
        let dir = TempDir::new().unwrap();
        let source = InputSource::Remote(remote(&dir, ""));

        match source.load(2020, 4) {
            Err(ExecutorError::InputFetch { year, day, .. }) => assert_eq!((year, day), (2020, 4)),
            other => panic!("expected InputFetch, got {other:?}"),
        }
    }

    #[test]
    fn download_is_written_through_to_cache() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2020/day/6/input")
            .match_header("cookie", "session=feed")
            .with_status(200)
            .with_body("abc\n\na\nb\nc\n")
            .expect(1)
            .create();

        let dir = TempDir::new().unwrap();
        let client = PuzzleClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();
        let source = InputSource::Remote(RemoteInput::new(
            cache(&dir),
            client,
            Zeroizing::new("feed".to_string()),
        ));

        assert_eq!(source.load(2020, 6).unwrap(), "abc\n\na\nb\nc\n");
        // second load is a cache hit; the mock only allows one request
        assert_eq!(source.load(2020, 6).unwrap(), "abc\n\na\nb\nc\n");
        mock.assert();
        assert!(cache(&dir).contains(2020, 6));
    }
}
