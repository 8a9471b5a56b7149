//! URL generation against the host instance.
//!
//! App routes live behind the `index.php` front controller unless the
//! instance rewrites URLs; WebDAV and other remote services live under
//! `remote.php`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use super::uri::encode_uri_component;
use crate::Result;

/// `{name}` placeholders in route templates.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"));

/// Builds absolute URLs for app routes and remote services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    base_url: String,
    pretty_urls: bool,
}

impl Router {
    /// Create a router for the instance at `base_url`.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when `base_url`
    /// is not an absolute URL.
    pub fn new(base_url: &str, pretty_urls: bool) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(crate::Error::Config(format!(
                "Base URL cannot hold paths: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            pretty_urls,
        })
    }

    /// URL of an app route such as `/apps/text/attachments`.
    ///
    /// Each `{name}` in `template` is replaced by the matching parameter,
    /// percent-encoded. Placeholders without a parameter are kept, encoded
    /// as a whole (`{token}` becomes `%7Btoken%7D`).
    pub fn generate_url(&self, template: &str, params: &[(&str, &str)]) -> String {
        let path = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            match params.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => encode_uri_component(value).into_owned(),
                None => encode_uri_component(&caps[0]).into_owned(),
            }
        });

        if self.pretty_urls {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/index.php{}", self.base_url, path)
        }
    }

    /// URL of a remote service, e.g. `dav/files/alice/doc.md`.
    ///
    /// `service` is appended verbatim; callers encode what needs encoding.
    pub fn generate_remote_url(&self, service: &str) -> String {
        format!(
            "{}/remote.php/{}",
            self.base_url,
            service.trim_start_matches('/')
        )
    }
}
