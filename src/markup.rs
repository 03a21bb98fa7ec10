//! Html markup for images and captioned figures.
//!
//! Inputs are embedded exactly as given. Nothing is escaped or validated, so
//! malformed input results in malformed markup, never in an error.

use std::borrow::Cow;
use std::sync::Arc;

use crate::image::ImageDescriptor;
use crate::trace::{LogTracer, Tracer};
use crate::url_fix::{RootRelative, SharedNormalizer};

/// Renders [`ImageDescriptor`]s into html, fixing urls on request.
#[derive(Clone)]
pub struct MarkupFormatter {
    normalizer: SharedNormalizer,
    tracer: Arc<dyn Tracer>,
}

impl MarkupFormatter {
    pub fn new(normalizer: SharedNormalizer, tracer: Arc<dyn Tracer>) -> Self {
        Self { normalizer, tracer }
    }

    /// Resolves `url` through the normalizer if `fix_url` is set.
    ///
    /// The pair is handed to the tracer before the fixed url is used.
    pub fn resolve_url<'a>(&self, url: &'a str, fix_url: bool) -> Cow<'a, str> {
        if !fix_url {
            return Cow::Borrowed(url);
        }
        let fixed = self.normalizer.fix_url(url);
        self.tracer.url_fixed(url, &fixed);
        Cow::Owned(fixed)
    }

    /// A bare `<img>` element. `width` and `caption` are ignored.
    pub fn render_image(&self, image: &ImageDescriptor) -> String {
        let src = self.resolve_url(&image.url, image.fix_url);
        format!(r#"<img src="{}", alt="{}">"#, src, image.alt)
    }

    /// An `<img>` wrapped in a `<figure>` followed by its caption.
    pub fn render_image_with_caption(&self, image: &ImageDescriptor) -> String {
        let src = self.resolve_url(&image.url, image.fix_url);
        format!(
            r#"<figure> <img src="{}", alt="{}", width="{}"> <figcaption>{}<figcaption> </figure>"#,
            src, image.alt, image.width, image.caption
        )
    }
}

impl Default for MarkupFormatter {
    fn default() -> Self {
        MarkupFormatter::new(
            Arc::new(RootRelative::default()),
            Arc::new(LogTracer::default()),
        )
    }
}

impl std::fmt::Debug for MarkupFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupFormatter").finish()
    }
}
