/// Default log target of [`LogTracer`].
pub const DEFAULT_TARGET: &str = "figmacros";

/// Diagnostic channel the macros report url rewrites to.
pub trait Tracer: Send + Sync {
    /// Called with the url before and after normalization, before the fixed
    /// url is substituted into the markup.
    fn url_fixed(&self, before: &str, after: &str);
}

/// A [`Tracer`] that writes to the `log` facade under a fixed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTracer {
    target: String,
}

impl LogTracer {
    pub fn new<T: ToString>(target: T) -> Self {
        Self {
            target: target.to_string(),
        }
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogTracer {
    fn default() -> Self {
        LogTracer::new(DEFAULT_TARGET)
    }
}

impl Tracer for LogTracer {
    fn url_fixed(&self, before: &str, after: &str) {
        log::debug!(target: self.target.as_str(), "fix_url: {} -> {}", before, after);
    }
}
