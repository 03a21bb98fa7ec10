use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{MacroError, Result};

lazy_static! {
    /// Matches urls that start with a scheme like `https:`, `mailto:` or `data:`.
    pub static ref RE_URL_SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap();
}

/// Names a host may expose its url normalizer under, in probing order.
pub const NORMALIZER_NAMES: [&str; 2] = ["fix_url", "normalize_url"];

/// Rewrites urls found in templates so they resolve regardless of the depth
/// of the page they end up on.
pub trait UrlNormalizer: Send + Sync {
    fn fix_url(&self, url: &str) -> String;
}

impl<F> UrlNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn fix_url(&self, url: &str) -> String {
        self(url)
    }
}

/// A normalizer shared between all registered macros.
pub type SharedNormalizer = Arc<dyn UrlNormalizer>;

/// Whether the url already points somewhere that does not depend on the page
/// it is used on.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with('/') || url.starts_with('#') || RE_URL_SCHEME.is_match(url)
}

/// The default normalizer: resolves relative urls against the site's base
/// path and returns the root-relative result.
///
/// `../img/x.png` and `img/x.png` both become `/img/x.png` with the default
/// base path. Absolute urls, root-relative paths and fragments are left as is.
/// Only `.` and `..` segments are resolved, every other character is kept
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRelative {
    /// Always starts and ends with `/`.
    base: String,
}

impl RootRelative {
    pub fn new(base_path: &str) -> Self {
        let mut base = String::with_capacity(base_path.len() + 2);
        if !base_path.starts_with('/') {
            base.push('/');
        }
        base.push_str(base_path);
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    /// The path relative urls are resolved against.
    #[inline]
    pub fn base_path(&self) -> &str {
        &self.base
    }
}

impl Default for RootRelative {
    fn default() -> Self {
        RootRelative::new("/")
    }
}

impl UrlNormalizer for RootRelative {
    fn fix_url(&self, url: &str) -> String {
        if url.is_empty() || is_absolute(url) {
            return url.to_string();
        }
        let (path, suffix) = match url.find(|c: char| c == '?' || c == '#') {
            Some(idx) => url.split_at(idx),
            None => (url, ""),
        };

        let mut segments: Vec<&str> = self.base.split('/').filter(|s| !s.is_empty()).collect();
        // whether the resolved path names a directory
        let mut dir = true;
        for segment in path.split('/') {
            match segment {
                "." => dir = true,
                ".." => {
                    segments.pop();
                    dir = true;
                }
                _ => {
                    segments.push(segment);
                    dir = segment.is_empty();
                }
            }
        }

        let mut fixed = String::with_capacity(self.base.len() + url.len());
        fixed.push('/');
        fixed.push_str(&segments.join("/"));
        if dir && segments.last().map_or(false, |s| !s.is_empty()) {
            fixed.push('/');
        }
        fixed.push_str(suffix);
        fixed
    }
}

/// Something that exposes named url normalizers, usually the host
/// environment.
pub trait NormalizerLookup {
    fn normalizer(&self, name: &str) -> Option<SharedNormalizer>;
}

impl NormalizerLookup for HashMap<String, SharedNormalizer> {
    fn normalizer(&self, name: &str) -> Option<SharedNormalizer> {
        self.get(name).cloned()
    }
}

/// Probes the host for a normalizer under each of [`NORMALIZER_NAMES`] and
/// returns the first one found.
pub fn resolve_normalizer<L: NormalizerLookup + ?Sized>(host: &L) -> Result<SharedNormalizer> {
    for name in NORMALIZER_NAMES.iter() {
        if let Some(normalizer) = host.normalizer(name) {
            log::debug!("Using url normalizer `{}`", name);
            return Ok(normalizer);
        }
    }
    Err(MacroError::MissingNormalizer {
        probed: NORMALIZER_NAMES.to_vec(),
    })
}
