#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use formkit::{
    config::ConfigManager,
    domain::{Form, LookupRecord},
    errors::RenderError,
    form::{FormBuilder, Screen},
    render::TemplateEngine,
    screens::{PersoonDto, PersoonScreen},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Config path inside a fresh temporary directory; the file does not exist yet.
pub fn temp_config_path() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("formkit").join("render.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn temp_config_manager() -> ConfigManager {
    ConfigManager::with_path(temp_config_path())
}

/// Engine that always reports a template failure.
pub struct FailingEngine;

impl TemplateEngine for FailingEngine {
    fn process(&self, _view: &str, _context: &Value) -> Result<String, RenderError> {
        Err(RenderError::Unavailable("template missing".into()))
    }
}

/// Engine that panics while rendering.
pub struct PanickingEngine;

impl TemplateEngine for PanickingEngine {
    fn process(&self, view: &str, _context: &Value) -> Result<String, RenderError> {
        panic!("engine crashed rendering {view}")
    }
}

/// Engine that echoes the view name and title.
pub struct StaticEngine;

impl TemplateEngine for StaticEngine {
    fn process(&self, view: &str, context: &Value) -> Result<String, RenderError> {
        Ok(format!(
            "<templated view=\"{view}\">{}</templated>",
            context["title"].as_str().unwrap_or_default()
        ))
    }
}

pub fn persoon_screen() -> PersoonScreen {
    PersoonScreen::new(PersoonDto {
        naam: Some("Peeters".into()),
        voornaam: Some("An".into()),
        leeftijd: Some(0),
        geslacht: Some("V".into()),
        postcode: Some(LookupRecord::new("8500", "8500", "Kortrijk")),
        ..PersoonDto::default()
    })
}

pub fn persoon_form() -> Form {
    let screen = persoon_screen();
    screen
        .create_form(&mut FormBuilder::new(), screen.dto())
        .expect("persoon form builds")
}

/// Values of every `name="..."` attribute on inputs and selects, in document order.
pub fn control_names(html: &str) -> Vec<String> {
    let re = Regex::new(r#"<(?:input|select)\b[^>]*\bname="([^"]*)""#).expect("valid regex");
    re.captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}
