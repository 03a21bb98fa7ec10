use crate::image::{Width, DEFAULT_WIDTH};
use crate::trace::DEFAULT_TARGET;

/// Defaults the registered macros fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Width of captioned images when the template omits it.
    default_width: u32,
    /// Whether urls are fixed when the template omits the flag.
    fix_url: bool,
    /// Log target of the default tracer.
    trace_target: String,
    /// Path relative urls are resolved against by the default normalizer.
    base_path: String,
}

impl Config {
    /// Convenience method to create a [`ConfigBuilder`]
    #[inline]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    #[inline]
    pub fn default_width(&self) -> Width {
        Width::Pixels(self.default_width)
    }

    #[inline]
    pub fn fix_url(&self) -> bool {
        self.fix_url
    }

    #[inline]
    pub fn trace_target(&self) -> &str {
        &self.trace_target
    }

    #[inline]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    /// Width of captioned images when the template omits it.
    default_width: Option<u32>,
    /// Whether urls are fixed when the template omits the flag.
    fix_url: Option<bool>,
    /// Log target of the default tracer.
    trace_target: Option<String>,
    /// Path relative urls are resolved against.
    base_path: Option<String>,
}

impl ConfigBuilder {
    pub fn default_width(mut self, default_width: u32) -> Self {
        self.default_width = Some(default_width);
        self
    }

    pub fn fix_url(mut self, fix_url: bool) -> Self {
        self.fix_url = Some(fix_url);
        self
    }

    pub fn trace_target<T: ToString>(mut self, trace_target: T) -> Self {
        self.trace_target = Some(trace_target.to_string());
        self
    }

    pub fn base_path<T: ToString>(mut self, base_path: T) -> Self {
        self.base_path = Some(base_path.to_string());
        self
    }

    pub fn build(self) -> Config {
        Config {
            default_width: self.default_width.unwrap_or(DEFAULT_WIDTH),
            fix_url: self.fix_url.unwrap_or(true),
            trace_target: self
                .trace_target
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            base_path: self.base_path.unwrap_or_else(|| "/".to_string()),
        }
    }
}
