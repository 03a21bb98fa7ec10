use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use figmacros::tera::{Context, Tera};
use figmacros::url_fix::SharedNormalizer;
use figmacros::{Config, MacroError, MacroSet, SiteEnvironment, Tracer};

#[derive(Default)]
struct Recorder(Mutex<Vec<(String, String)>>);

impl Tracer for Recorder {
    fn url_fixed(&self, before: &str, after: &str) {
        self.0
            .lock()
            .unwrap()
            .push((before.to_string(), after.to_string()));
    }
}

fn host() -> HashMap<String, SharedNormalizer> {
    let mut host: HashMap<String, SharedNormalizer> = HashMap::new();
    host.insert(
        "normalize_url".to_string(),
        Arc::new(|url: &str| url.replacen("../", "/", 1)),
    );
    host
}

fn tera(macros: &MacroSet) -> Tera {
    let mut tera = Tera::default();
    macros.register(&mut tera);
    tera
}

#[test]
fn host_normalizer_and_tracer() -> Result<(), Box<dyn std::error::Error>> {
    let recorder = Arc::new(Recorder::default());
    let macros = MacroSet::from_host(
        &host(),
        recorder.clone(),
        SiteEnvironment::new("GeoModel"),
        Config::default(),
    )?;

    let html = tera(&macros).render_str(
        r#"{{ render_image_with_caption(url="../img/x.png", alt="x", caption="An x") }}"#,
        &Context::new(),
    )?;
    assert_eq!(
        html,
        r#"<figure> <img src="/img/x.png", alt="x", width="400"> <figcaption>An x<figcaption> </figure>"#
    );
    assert_eq!(
        *recorder.0.lock().unwrap(),
        vec![("../img/x.png".to_string(), "/img/x.png".to_string())]
    );
    Ok(())
}

#[test]
fn setup_fails_without_normalizer() {
    let host: HashMap<String, SharedNormalizer> = HashMap::new();
    let res = MacroSet::from_host(
        &host,
        Arc::new(Recorder::default()),
        SiteEnvironment::default(),
        Config::default(),
    );
    assert!(matches!(res, Err(MacroError::MissingNormalizer { .. })));
}

#[test]
fn autoescaped_templates_keep_markup() -> Result<(), Box<dyn std::error::Error>> {
    let macros = MacroSet::with_defaults(SiteEnvironment::new("Docs"), Config::default());
    let mut tera = tera(&macros);
    tera.add_raw_template(
        "page.html",
        r#"<p>{{ render_image(url="img/a.png", alt="a", fix_url=false) }}</p>"#,
    )?;
    let html = tera.render("page.html", &Context::new())?;
    assert_eq!(html, r#"<p><img src="img/a.png", alt="a"></p>"#);
    Ok(())
}

#[test]
fn describe_environment_from_template() -> Result<(), Box<dyn std::error::Error>> {
    let env = SiteEnvironment::new("Docs")
        .variable("version", "1.0")
        .variable("_internal", true);
    let macros = MacroSet::with_defaults(env, Config::default());
    let json = tera(&macros).render_str(
        "{{ describe_environment() | json_encode() | safe }}",
        &Context::new(),
    )?;
    let description: HashMap<String, serde_json::Value> = serde_json::from_str(&json)?;

    assert!(description.keys().all(|name| !name.starts_with('_')));
    assert_eq!(description["site_name"], "Docs");
    assert_eq!(description["version"], "1.0");
    assert_eq!(
        description["macros"],
        serde_json::json!([
            "describe_environment",
            "render_image",
            "render_image_with_caption"
        ])
    );
    Ok(())
}

#[test]
fn rendering_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let macros = MacroSet::with_defaults(
        SiteEnvironment::default(),
        Config::builder().base_path("/docs/").build(),
    );
    let template = r#"{{ render_image(url="img/a.png") }}|{{ render_image(url="img/a.png") }}"#;
    let html = tera(&macros).render_str(template, &Context::new())?;
    assert_eq!(
        html,
        r#"<img src="/docs/img/a.png", alt="">|<img src="/docs/img/a.png", alt="">"#
    );
    Ok(())
}
