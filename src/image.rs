use std::fmt;

/// Default width in pixels of a captioned image.
pub const DEFAULT_WIDTH: u32 = 400;

/// The `width` attribute of a captioned image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Width {
    /// Width in pixels.
    Pixels(u32),
    /// Whatever the caller supplied, embedded as is.
    Raw(String),
}

impl Default for Width {
    fn default() -> Self {
        Width::Pixels(DEFAULT_WIDTH)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Pixels(px) => write!(f, "{}", px),
            Width::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Width {
    /// Reads a width given on the command line. Plain pixel counts become
    /// [`Width::Pixels`], anything else is kept raw so it renders unchanged.
    pub fn from_arg(arg: &str) -> Self {
        match arg.parse::<u32>() {
            Ok(px) if px.to_string() == arg => Width::Pixels(px),
            _ => Width::Raw(arg.to_string()),
        }
    }
}

impl From<u32> for Width {
    fn from(px: u32) -> Self {
        Width::Pixels(px)
    }
}

impl From<&str> for Width {
    fn from(raw: &str) -> Self {
        Width::Raw(raw.to_string())
    }
}

impl From<String> for Width {
    fn from(raw: String) -> Self {
        Width::Raw(raw)
    }
}

/// Everything needed to render a single image or figure.
///
/// `width` and `caption` only affect the captioned variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub url: String,
    pub alt: String,
    pub width: Width,
    pub caption: String,
    /// Whether the url is sent through the url normalizer first.
    pub fix_url: bool,
}

impl ImageDescriptor {
    pub fn new<T: ToString>(url: T) -> Self {
        Self {
            url: url.to_string(),
            alt: String::new(),
            width: Width::default(),
            caption: String::new(),
            fix_url: true,
        }
    }

    pub fn alt<T: ToString>(mut self, alt: T) -> Self {
        self.alt = alt.to_string();
        self
    }

    pub fn width<T: Into<Width>>(mut self, width: T) -> Self {
        self.width = width.into();
        self
    }

    pub fn caption<T: ToString>(mut self, caption: T) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn fix_url(mut self, fix_url: bool) -> Self {
        self.fix_url = fix_url;
        self
    }
}
