use crate::UrlError;
use url::Url;

/// The validated seed of a crawl and the boundary of the site it defines
///
/// A `SiteBase` keeps two forms of the seed:
///
/// - `seed`: the seed exactly as crawled (trailing slashes stripped)
/// - `root`: the directory form of the seed, always ending in `/`, which
///   relative identifiers are joined onto
///
/// A URL belongs to the site when it shares the seed's scheme, host and
/// port, and its path is either the seed path or lies below `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBase {
    seed: Url,
    root: Url,
}

impl SiteBase {
    /// Validates a seed URL and builds the site boundary from it
    ///
    /// # Arguments
    ///
    /// * `input` - The seed URL as given by the user
    ///
    /// # Returns
    ///
    /// * `Ok(SiteBase)` - The seed is absolute, uses HTTP(S) and has a host
    /// * `Err(UrlError)` - The seed is relative, malformed or unsupported
    ///
    /// # Examples
    ///
    /// ```
    /// use site_harvest::url::SiteBase;
    ///
    /// let base = SiteBase::parse("https://example.com/docs/").unwrap();
    /// assert_eq!(base.seed().as_str(), "https://example.com/docs");
    /// assert_eq!(base.root().as_str(), "https://example.com/docs/");
    ///
    /// assert!(SiteBase::parse("example.com").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let trimmed = input.trim().trim_end_matches('/');

        let seed =
            Url::parse(trimmed).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                seed.scheme()
            )));
        }

        if seed.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost(input.to_string()));
        }

        let mut root = seed.clone();
        root.set_query(None);
        root.set_fragment(None);
        if !root.path().ends_with('/') {
            let directory = format!("{}/", root.path());
            root.set_path(&directory);
        }

        Ok(Self { seed, root })
    }

    /// The seed URL the crawl starts from
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The directory form of the seed that identifiers are joined onto
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Returns true if `url` belongs to this site
    ///
    /// The comparison is structural: scheme and host are compared after
    /// parsing (so case differences and default ports do not matter), and
    /// the path must be the seed path or lie below the seed directory.
    pub fn contains(&self, url: &Url) -> bool {
        if url.origin() != self.seed.origin() {
            return false;
        }

        url.path() == self.seed.path() || url.path().starts_with(self.root.path())
    }

    /// Returns what is left of `url` once the site base is removed
    ///
    /// The remainder is the path below the base followed by the query and
    /// fragment, exactly as `url` serializes them. Returns `None` when the
    /// URL is not part of the site.
    pub(crate) fn remainder(&self, url: &Url) -> Option<String> {
        if !self.contains(url) {
            return None;
        }

        let path = if url.path() == self.seed.path() {
            ""
        } else {
            &url.path()[self.root.path().len()..]
        };

        let mut remainder = path.to_string();
        if let Some(query) = url.query() {
            remainder.push('?');
            remainder.push_str(query);
        }
        if let Some(fragment) = url.fragment() {
            remainder.push('#');
            remainder.push_str(fragment);
        }

        Some(remainder)
    }
}

impl std::fmt::Display for SiteBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seed)
    }
}
