use std::path::{Path, PathBuf};

use anyhow::Context as _;
use structopt::StructOpt;
use tera::{Context, Tera};

use figmacros::environment::describe_environment;
use figmacros::macros::MACRO_NAMES;
use figmacros::{Config, ImageDescriptor, MacroSet, SiteEnvironment, Width};

#[allow(missing_docs)]
#[derive(Debug, StructOpt)]
#[structopt(name = "figmacros", about = "Image and figure markup for documentation templates.")]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
enum App {
    #[structopt(name = "image", about = "Print the markup of a bare image.")]
    Image {
        #[structopt(name = "url", help = "The url of the image.")]
        url: String,
        #[structopt(long = "alt", default_value = "", help = "The alt text.")]
        alt: String,
        #[structopt(flatten)]
        opts: Opts,
    },
    #[structopt(name = "figure", about = "Print the markup of a captioned figure.")]
    Figure {
        #[structopt(name = "url", help = "The url of the image.")]
        url: String,
        #[structopt(long = "alt", default_value = "", help = "The alt text.")]
        alt: String,
        #[structopt(
            long = "width",
            help = "The width of the image, 400 if omitted.",
            parse(from_str = Width::from_arg)
        )]
        width: Option<Width>,
        #[structopt(long = "caption", default_value = "", help = "The caption text.")]
        caption: String,
        #[structopt(flatten)]
        opts: Opts,
    },
    #[structopt(name = "render", about = "Render a template with the macros registered.")]
    Render {
        #[structopt(name = "template", help = "The template file.", parse(from_os_str))]
        template: PathBuf,
        #[structopt(flatten)]
        opts: Opts,
    },
    #[structopt(name = "env", about = "Print the public site environment as json.")]
    Env {
        #[structopt(flatten)]
        opts: Opts,
    },
}

impl App {
    fn run(self) -> anyhow::Result<()> {
        match self {
            App::Image { url, alt, opts } => {
                let image = ImageDescriptor::new(url)
                    .alt(alt)
                    .fix_url(!opts.no_fix_url);
                println!("{}", opts.macros()?.formatter().render_image(&image));
            }
            App::Figure {
                url,
                alt,
                width,
                caption,
                opts,
            } => {
                let mut image = ImageDescriptor::new(url)
                    .alt(alt)
                    .caption(caption)
                    .fix_url(!opts.no_fix_url);
                if let Some(width) = width {
                    image = image.width(width);
                }
                println!(
                    "{}",
                    opts.macros()?.formatter().render_image_with_caption(&image)
                );
            }
            App::Render { template, opts } => {
                let input = std::fs::read_to_string(&template)
                    .with_context(|| format!("Failed to read template {}", template.display()))?;
                let mut tera = Tera::default();
                opts.macros()?.register(&mut tera);
                let output = tera
                    .render_str(&input, &Context::new())
                    .with_context(|| format!("Failed to render {}", template.display()))?;
                print!("{}", output);
            }
            App::Env { opts } => {
                let env = opts.environment()?;
                let description = describe_environment(&env, &MACRO_NAMES)?;
                println!("{}", serde_json::to_string_pretty(&description)?);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, StructOpt)]
pub struct Opts {
    #[structopt(
        long = "env",
        help = "Json file with the site environment.",
        parse(from_os_str)
    )]
    env: Option<PathBuf>,
    #[structopt(long = "base-path", help = "Path relative urls are resolved against.")]
    base_path: Option<String>,
    #[structopt(long = "no-fix-url", help = "Keep urls exactly as given.")]
    no_fix_url: bool,
}

impl Opts {
    fn as_config(&self) -> Config {
        let mut config = Config::builder().fix_url(!self.no_fix_url);
        if let Some(base_path) = self.base_path.clone() {
            config = config.base_path(base_path);
        }
        config.build()
    }

    fn environment(&self) -> anyhow::Result<SiteEnvironment> {
        match &self.env {
            Some(path) => read_environment(path),
            None => Ok(SiteEnvironment::default()),
        }
    }

    fn macros(&self) -> anyhow::Result<MacroSet> {
        Ok(MacroSet::with_defaults(self.environment()?, self.as_config()))
    }
}

fn read_environment(path: &Path) -> anyhow::Result<SiteEnvironment> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read site environment {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid site environment in {}", path.display()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    Ok(App::from_args().run()?)
}
