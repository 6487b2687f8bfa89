//! Blocking HTTP client for the puzzle site

use crate::error::FetchError;
use regex::Regex;
use reqwest::Url;
use reqwest::header::{COOKIE, HeaderValue};
use std::sync::LazyLock;
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(anonymous user #(\d+)\)").expect("valid regex"));

/// Outcome of a session check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Numeric user id when the session is valid, `None` otherwise
    pub user_id: Option<u64>,
}

/// Client for fetching puzzle inputs.
///
/// ```no_run
/// use aoc_fetch::PuzzleClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PuzzleClient::new()?;
/// let input = client.fetch_input(2023, 1, "session-cookie")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl PuzzleClient {
    /// Client for the real puzzle site.
    ///
    /// # Errors
    ///
    /// `FetchError::ClientInit` if the TLS backend cannot be set up.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    pub fn builder() -> PuzzleClientBuilder {
        PuzzleClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `session=<token>` marked sensitive so it never shows up in debug output
    fn session_cookie(session: &str) -> Result<HeaderValue, FetchError> {
        let cookie = Zeroizing::new(format!("session={session}"));
        let mut value =
            HeaderValue::from_str(&cookie).map_err(|_| FetchError::SessionFormat)?;
        value.set_sensitive(true);
        Ok(value)
    }

    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::ClientInit("base URL cannot carry a path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url, session: &str) -> Result<reqwest::blocking::Response, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(COOKIE, Self::session_cookie(session)?)
            .send()?;
        tracing::debug!(status = %response.status(), "response");
        Ok(response)
    }

    /// Check a session cookie against the settings page.
    ///
    /// The settings page only renders for logged-in users; anything other
    /// than a success status (typically a redirect to the front page) means
    /// the session is invalid or expired.
    ///
    /// # Errors
    ///
    /// Network failures, or a body that is not UTF-8. An invalid session is
    /// not an error.
    pub fn verify_session(&self, session: &str) -> Result<SessionInfo, FetchError> {
        let response = self.get(self.endpoint(["settings"])?, session)?;
        if !response.status().is_success() {
            return Ok(SessionInfo { user_id: None });
        }

        let html = response.text().map_err(|_| FetchError::Encoding)?;
        Ok(SessionInfo {
            user_id: extract_user_id(&html),
        })
    }

    /// Download the personal input for `year`/`day`, verbatim.
    ///
    /// # Errors
    ///
    /// * `FetchError::Request` - network failure
    /// * `FetchError::InvalidStatus` - e.g. 404 before the puzzle unlocks,
    ///   400 for a bad session
    /// * `FetchError::Encoding` - body is not UTF-8
    pub fn fetch_input(&self, year: u16, day: u8, session: &str) -> Result<String, FetchError> {
        let year = year.to_string();
        let day = day.to_string();
        let url = self.endpoint([year.as_str(), "day", day.as_str(), "input"])?;

        let response = self.get(url, session)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::InvalidStatus { status });
        }
        response.text().map_err(|_| FetchError::Encoding)
    }
}

/// User id from the settings page, shown as `(anonymous user #12345)`
fn extract_user_id(html: &str) -> Option<u64> {
    USER_ID.captures(html)?.get(1)?.as_str().parse().ok()
}

/// Configures a [`PuzzleClient`].
///
/// Redirects are always disabled, whatever `client_builder` says, because
/// session checks rely on seeing the redirect itself.
///
/// ```no_run
/// use aoc_fetch::PuzzleClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PuzzleClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(reqwest::blocking::Client::builder().timeout(Duration::from_secs(10)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PuzzleClientBuilder {
    base_url: Option<Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl PuzzleClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client somewhere else, e.g. a mock server in tests.
    ///
    /// # Errors
    ///
    /// Fails if `url` does not parse.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, FetchError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Use a custom reqwest builder for timeouts, proxies and so on.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    pub fn build(self) -> Result<PuzzleClient, FetchError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| FetchError::ClientInit(e.to_string()))?,
        };

        let client = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::ClientInit(e.to_string()))?;

        Ok(PuzzleClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn client_for(server: &mockito::Server) -> PuzzleClient {
        PuzzleClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn default_base_url_is_the_puzzle_site() {
        let client = PuzzleClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(PuzzleClient::builder().base_url("not a valid url").is_err());
    }

    #[test]
    fn session_with_newline_is_rejected_before_sending() {
        let client = PuzzleClient::new().unwrap();
        let result = client.fetch_input(2020, 1, "abc\ndef");
        assert!(matches!(result, Err(FetchError::SessionFormat)));
    }

    #[test]
    fn user_id_is_extracted_from_settings_page() {
        assert_eq!(
            extract_user_id("<p>Settings for (anonymous user #271828)</p>"),
            Some(271828)
        );
        assert_eq!(extract_user_id("<p>[Log In]</p>"), None);
    }

    #[test]
    fn redirects_are_not_followed() {
        let mut server = mockito::Server::new();
        let home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("home")
            .expect(0)
            .create();
        let settings = server
            .mock("GET", "/settings")
            .with_status(303)
            .with_header("location", "/")
            .expect(1)
            .create();

        let info = client_for(&server).verify_session("expired").unwrap();
        assert_eq!(info.user_id, None);

        home.assert();
        settings.assert();
    }

    #[test]
    fn input_is_returned_verbatim_with_cookie() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2020/day/7/input")
            .match_header("cookie", "session=cafe")
            .with_status(200)
            .with_body("1721\n979\n")
            .expect(1)
            .create();

        let input = client_for(&server).fetch_input(2020, 7, "cafe").unwrap();
        assert_eq!(input, "1721\n979\n");
        mock.assert();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn valid_session_yields_user_id(
            session in "[a-f0-9]{32,96}",
            user_id in 1000u64..9_999_999u64,
        ) {
            let mut server = mockito::Server::new();
            let body = format!("<html><body>(anonymous user #{user_id})</body></html>");
            let mock = server
                .mock("GET", "/settings")
                .with_status(200)
                .with_body(&body)
                .expect(1)
                .create();

            let info = client_for(&server).verify_session(&session).unwrap();
            prop_assert_eq!(info.user_id, Some(user_id));
            mock.assert();
        }

        #[test]
        fn non_success_status_is_an_error(
            year in 2015u16..2035u16,
            day in 1u8..=25u8,
            status in prop::sample::select(vec![400usize, 401, 403, 404, 500, 502, 503]),
        ) {
            let mut server = mockito::Server::new();
            let path = format!("/{year}/day/{day}/input");
            let mock = server
                .mock("GET", path.as_str())
                .with_status(status)
                .expect(1)
                .create();

            match client_for(&server).fetch_input(year, day, "s") {
                Err(FetchError::InvalidStatus { status: got }) => {
                    prop_assert_eq!(got.as_u16() as usize, status)
                }
                other => prop_assert!(false, "expected InvalidStatus, got {:?}", other),
            }
            mock.assert();
        }
    }
}
