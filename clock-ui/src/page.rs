//! The clock page, rendered from an auto-escaped minijinja template.

use anyhow::{Context, Result};
use clock::core::types::Tick;
use clock::io::config::DisplayConfig;
use minijinja::{Environment, context};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Render the page with the first tick already filled in.
pub fn render_index(display: &DisplayConfig, tick: &Tick) -> Result<String> {
    let mut env = Environment::new();
    // `.html` names get HTML auto-escaping.
    env.add_template("index.html", INDEX_TEMPLATE)
        .context("load index template")?;
    let template = env.get_template("index.html").context("get index template")?;
    template
        .render(context! {
            page_title => &display.page_title,
            heading => &display.heading,
            description => &display.description,
            color => &display.color,
            font_size_px => display.font_size_px,
            time => &tick.time,
            commit => tick.commit.as_ref().map(|c| c.as_str()),
        })
        .context("render index template")
}
