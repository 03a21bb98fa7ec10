//! Registers the markup helpers as functions of a [`tera::Tera`] instance.
//!
//! Once registered, templates call them by name:
//!
//! ```text
//! {{ render_image(url="img/x.png", alt="x") }}
//! {{ render_image_with_caption(url="img/x.png", caption="An x", width=200) }}
//! {{ describe_environment() | json_encode(pretty=true) }}
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Function, Tera, Value};

use crate::config::Config;
use crate::environment::{describe_environment, SiteEnvironment};
use crate::error::{MacroError, Result};
use crate::image::{ImageDescriptor, Width};
use crate::markup::MarkupFormatter;
use crate::trace::{LogTracer, Tracer};
use crate::url_fix::{resolve_normalizer, NormalizerLookup, RootRelative, SharedNormalizer};

pub const RENDER_IMAGE: &str = "render_image";
pub const RENDER_IMAGE_WITH_CAPTION: &str = "render_image_with_caption";
pub const DESCRIBE_ENVIRONMENT: &str = "describe_environment";

/// Names of all functions [`MacroSet::register`] adds.
pub const MACRO_NAMES: [&str; 3] = [RENDER_IMAGE, RENDER_IMAGE_WITH_CAPTION, DESCRIBE_ENVIRONMENT];

/// Everything the macros need, resolved once at setup.
#[derive(Debug, Clone)]
pub struct MacroSet {
    formatter: MarkupFormatter,
    env: Arc<SiteEnvironment>,
    config: Arc<Config>,
}

impl MacroSet {
    pub fn new(formatter: MarkupFormatter, env: SiteEnvironment, config: Config) -> Self {
        Self {
            formatter,
            env: Arc::new(env),
            config: Arc::new(config),
        }
    }

    /// Uses the [`RootRelative`] normalizer for the configured base path and
    /// a [`LogTracer`] on the configured target.
    pub fn with_defaults(env: SiteEnvironment, config: Config) -> Self {
        let formatter = MarkupFormatter::new(
            Arc::new(RootRelative::new(config.base_path())),
            Arc::new(LogTracer::new(config.trace_target())),
        );
        Self::new(formatter, env, config)
    }

    /// Looks up the host's url normalizer, see [`resolve_normalizer`].
    ///
    /// Fails if the host exposes none.
    pub fn from_host<L: NormalizerLookup + ?Sized>(
        host: &L,
        tracer: Arc<dyn Tracer>,
        env: SiteEnvironment,
        config: Config,
    ) -> Result<Self> {
        let normalizer: SharedNormalizer = resolve_normalizer(host)?;
        Ok(Self::new(MarkupFormatter::new(normalizer, tracer), env, config))
    }

    #[inline]
    pub fn formatter(&self) -> &MarkupFormatter {
        &self.formatter
    }

    #[inline]
    pub fn environment(&self) -> &SiteEnvironment {
        &self.env
    }

    /// Adds all macros to `tera`, replacing functions of the same name.
    pub fn register(&self, tera: &mut Tera) {
        tera.register_function(
            RENDER_IMAGE,
            RenderImage {
                formatter: self.formatter.clone(),
                config: self.config.clone(),
            },
        );
        tera.register_function(
            RENDER_IMAGE_WITH_CAPTION,
            RenderImageWithCaption {
                formatter: self.formatter.clone(),
                config: self.config.clone(),
            },
        );
        tera.register_function(
            DESCRIBE_ENVIRONMENT,
            DescribeEnvironment {
                env: self.env.clone(),
            },
        );
        log::debug!("Registered macros: {}", MACRO_NAMES.join(", "));
    }
}

struct RenderImage {
    formatter: MarkupFormatter,
    config: Arc<Config>,
}

impl Function for RenderImage {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let image = Args::new(RENDER_IMAGE, args).image(&self.config)?;
        Ok(Value::String(self.formatter.render_image(&image)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

struct RenderImageWithCaption {
    formatter: MarkupFormatter,
    config: Arc<Config>,
}

impl Function for RenderImageWithCaption {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let image = Args::new(RENDER_IMAGE_WITH_CAPTION, args).image(&self.config)?;
        Ok(Value::String(
            self.formatter.render_image_with_caption(&image),
        ))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

struct DescribeEnvironment {
    env: Arc<SiteEnvironment>,
}

impl Function for DescribeEnvironment {
    fn call(&self, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let description = describe_environment(&self.env, &MACRO_NAMES)?;
        Ok(Value::Object(description.into_iter().collect()))
    }
}

/// Named arguments of a single macro call.
struct Args<'a> {
    name: &'static str,
    args: &'a HashMap<String, Value>,
}

impl<'a> Args<'a> {
    fn new(name: &'static str, args: &'a HashMap<String, Value>) -> Self {
        Self { name, args }
    }

    fn get(&self, arg: &str) -> Option<&'a Value> {
        self.args.get(arg).filter(|v| !v.is_null())
    }

    /// Strings are taken as is, anything else in its json form.
    fn text(&self, arg: &'static str) -> Option<String> {
        self.get(arg).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn width(&self, default: Width) -> Width {
        match self.get("width") {
            Some(Value::Number(n)) => n
                .as_u64()
                .filter(|px| *px <= u64::from(u32::MAX))
                .map(|px| Width::Pixels(px as u32))
                .unwrap_or_else(|| Width::Raw(n.to_string())),
            Some(_) => Width::Raw(self.text("width").unwrap_or_default()),
            None => default,
        }
    }

    /// `fixUrl` is accepted as well for templates written against older hosts.
    fn fix_url(&self, default: bool) -> Result<bool> {
        match self.get("fix_url").or_else(|| self.get("fixUrl")) {
            Some(Value::Bool(fix)) => Ok(*fix),
            Some(_) => Err(MacroError::InvalidArgument {
                name: self.name,
                arg: "fix_url",
                expected: "a boolean",
            }),
            None => Ok(default),
        }
    }

    fn image(&self, config: &Config) -> Result<ImageDescriptor> {
        let url = self.text("url").ok_or(MacroError::MissingArgument {
            name: self.name,
            arg: "url",
        })?;
        Ok(ImageDescriptor::new(url)
            .alt(self.text("alt").unwrap_or_default())
            .width(self.width(config.default_width()))
            .caption(self.text("caption").unwrap_or_default())
            .fix_url(self.fix_url(config.fix_url())?))
    }
}

#[cfg(test)]
mod tests {
    use tera::Context;

    use super::*;

    fn render(template: &str) -> tera::Result<String> {
        let config = Config::builder().fix_url(false).build();
        let macros = MacroSet::with_defaults(SiteEnvironment::new("Docs"), config);
        let mut tera = Tera::default();
        macros.register(&mut tera);
        tera.render_str(template, &Context::new())
    }

    #[test]
    fn figure_from_template() {
        let html = render(
            r#"{{ render_image_with_caption(url="pic.png", alt="cat", width=200, caption="A cat") }}"#,
        )
        .unwrap();
        assert_eq!(
            html,
            r#"<figure> <img src="pic.png", alt="cat", width="200"> <figcaption>A cat<figcaption> </figure>"#
        );
    }

    #[test]
    fn defaults_from_config() {
        let html = render(r#"{{ render_image_with_caption(url="pic.png") }}"#).unwrap();
        assert_eq!(
            html,
            r#"<figure> <img src="pic.png", alt="", width="400"> <figcaption><figcaption> </figure>"#
        );
    }

    #[test]
    fn fix_url_aliases() {
        let html = render(r#"{{ render_image(url="../img/x.png", fixUrl=true) }}"#).unwrap();
        assert_eq!(html, r#"<img src="/img/x.png", alt="">"#);
        let html = render(r#"{{ render_image(url="../img/x.png", fix_url=true) }}"#).unwrap();
        assert_eq!(html, r#"<img src="/img/x.png", alt="">"#);
    }

    #[test]
    fn odd_values_are_verbatim() {
        let html =
            render(r#"{{ render_image_with_caption(url="a.png", width="50%", alt=3) }}"#).unwrap();
        assert_eq!(
            html,
            r#"<figure> <img src="a.png", alt="3", width="50%"> <figcaption><figcaption> </figure>"#
        );
    }

    #[test]
    fn missing_url_fails() {
        assert!(render(r#"{{ render_image(alt="x") }}"#).is_err());
    }

    #[test]
    fn non_boolean_flag_fails() {
        assert!(render(r#"{{ render_image(url="x.png", fix_url="yes") }}"#).is_err());
    }

    #[test]
    fn args_width() {
        let mut map = HashMap::new();
        map.insert("width".to_string(), Value::from(-5));
        assert_eq!(
            Args::new(RENDER_IMAGE, &map).width(Width::Pixels(1)),
            Width::Raw("-5".to_string())
        );
        map.insert("width".to_string(), Value::from(12.5));
        assert_eq!(
            Args::new(RENDER_IMAGE, &map).width(Width::Pixels(1)),
            Width::Raw("12.5".to_string())
        );
        map.insert("width".to_string(), Value::Null);
        assert_eq!(
            Args::new(RENDER_IMAGE, &map).width(Width::Pixels(1)),
            Width::Pixels(1)
        );
    }
}
