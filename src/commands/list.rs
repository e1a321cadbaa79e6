//! `--list-addons`: print the add-on catalog.

use std::path::Path;

use anyhow::Result;
use console::style;

use scaffolder::config::Settings;
use scaffolder::output::OutputConfig;

use super::load_settings;

pub fn execute(config: Option<&Path>, output: &OutputConfig) -> Result<()> {
    let settings = load_settings(config)?;
    print!("{}", render(&settings, output));
    Ok(())
}

fn render(settings: &Settings, output: &OutputConfig) -> String {
    if settings.addons.is_empty() {
        return "No add-ons configured.\n".to_string();
    }

    let width = settings
        .addons
        .iter()
        .map(|addon| addon.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Available add-ons:\n");
    for addon in &settings.addons {
        let padded = format!("{:width$}", addon.name, width = width);
        let name = if output.use_color {
            style(padded).bold().to_string()
        } else {
            padded
        };
        out.push_str(&format!("  {}  {}", name, addon.directory));
        if !addon.description.is_empty() {
            out.push_str(&format!("  {}", addon.description));
        }
        out.push('\n');
    }
    out
}
