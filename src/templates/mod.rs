//! Page and index templates using the Tera template engine
//!
//! Templates are read from the site's template directory. Every variable is
//! HTML-escaped on output; rendered markdown is trusted and templates inject
//! it with `{{ content | safe }}`.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};

use crate::content::PostSummary;
use crate::helpers::format_date;

/// Data for a single page: `{ title, content }`
#[derive(Debug, Clone, Serialize)]
pub struct PageData<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Data for the index page: `{ title, posts }`
#[derive(Debug, Clone, Serialize)]
pub struct IndexData<'a> {
    pub title: &'a str,
    pub posts: &'a [PostSummary],
}

/// Template renderer holding the page and index templates
pub struct TemplateRenderer {
    tera: Tera,
    page_template: String,
    index_template: String,
}

impl TemplateRenderer {
    /// Load templates from `template_dir`.
    ///
    /// Every `*.html` file in the directory is registered so the two entry
    /// templates can extend or include shared layouts. A missing page or
    /// index template is an error.
    pub fn load(template_dir: &Path, page_template: &str, index_template: &str) -> Result<Self> {
        let pattern = template_dir.join("**").join("*.html");
        let mut tera = Tera::new(&pattern.to_string_lossy())
            .with_context(|| format!("Failed to parse templates in {:?}", template_dir))?;

        tera.add_template_files(vec![
            (template_dir.join(page_template), Some(page_template)),
            (template_dir.join(index_template), Some(index_template)),
        ])
        .with_context(|| format!("Failed to load templates from {:?}", template_dir))?;

        // Escape every template regardless of its file extension
        tera.autoescape_on(vec![""]);

        tera.register_filter("date_format", date_format_filter);

        Ok(Self {
            tera,
            page_template: page_template.to_string(),
            index_template: index_template.to_string(),
        })
    }

    /// Render the single-page template
    pub fn render_page(&self, page: &PageData) -> tera::Result<String> {
        self.render(&self.page_template, page)
    }

    /// Render the index template
    pub fn render_index(&self, index: &IndexData) -> tera::Result<String> {
        self.render(&self.index_template, index)
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> tera::Result<String> {
        let context = Context::from_serialize(data)?;
        self.tera.render(template_name, &context)
    }
}

/// Tera filter: format a `YYYY-MM-DD` date with a Moment-style format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    let date = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| tera::Error::msg(format!("date_format: {:?} is not a date: {}", s, e)))?;

    format_date(&date, &format)
        .map(tera::Value::String)
        .ok_or_else(|| tera::Error::msg(format!("date_format: unsupported format {:?}", format)))
}
