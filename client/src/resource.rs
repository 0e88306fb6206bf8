extern crate url;

use self::url::Url;
use core::fmt;

const SEP: char = '/';

/// Endpoint URL builder.
#[derive(Clone)]
pub struct Resource {
    url: Url,
}

impl Resource {
    #[must_use]
    pub fn new(uri: &str) -> Option<Resource> {
        let base = Url::parse(uri).ok()?;
        if base.cannot_be_a_base() {
            return None;
        }
        Some(Resource { url: base })
    }

    /// Appends `path` segments, keeping a trailing separator only when `path` has one.
    pub fn append_path(&mut self, path: &str) -> &mut Self {
        let segments: Vec<String> = self
            .url
            .path_segments()
            .into_iter()
            .flatten()
            .chain(path.split(SEP))
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        let mut joined = segments.join("/");
        if path.ends_with(SEP) {
            joined.push(SEP);
        }
        self.url.set_path(&joined);
        self
    }

    /// Appends a query pair, percent-encoding both parts.
    pub fn append_query(&mut self, key: &str, value: &str) -> &mut Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
