//! Image and figure macros for documentation sites built with [`tera`].
//!
//! ```
//! use figmacros::{Config, MacroSet, SiteEnvironment};
//! use figmacros::tera::{Context, Tera};
//!
//! let macros = MacroSet::with_defaults(SiteEnvironment::new("Docs"), Config::default());
//! let mut tera = Tera::default();
//! macros.register(&mut tera);
//!
//! let html = tera
//!     .render_str(r#"{{ render_image(url="../img/x.png", alt="x") }}"#, &Context::new())
//!     .unwrap();
//! assert_eq!(html, r#"<img src="/img/x.png", alt="x">"#);
//! ```

pub use config::{Config, ConfigBuilder};
pub use environment::{describe_environment, SiteEnvironment};
pub use error::{MacroError, Result};
pub use image::{ImageDescriptor, Width};
pub use macros::MacroSet;
pub use markup::MarkupFormatter;
pub use trace::{LogTracer, Tracer};
pub use url_fix::{resolve_normalizer, NormalizerLookup, RootRelative, UrlNormalizer};

pub mod config;
pub mod environment;
mod error;
pub mod image;
pub mod macros;
pub mod markup;
pub mod trace;
pub mod url_fix;

/// Rexported so hosts don't need to depend on it separately.
pub use tera;
