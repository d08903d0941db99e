//! Generator module - turns the content tree into HTML files

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::IndexOrder;
use crate::content::loader::ContentLoader;
use crate::content::{
    parse_post, ContentFile, ConvertError, MarkdownRenderer, PostSummary, POSTS_OUTPUT_DIR,
};
use crate::helpers::derive_title;
use crate::templates::{IndexData, PageData, TemplateRenderer};
use crate::Site;

/// A file that could not be turned into a page. The run carries on without it.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Error reading {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Error converting {path:?}: {source}")]
    Convert { path: PathBuf, source: ConvertError },

    #[error("Error executing template for {path:?}: {source}")]
    Render { path: PathBuf, source: tera::Error },

    #[error("Error writing {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Pages written, in traversal order
    pub pages: Vec<PathBuf>,
    /// Posts listed on the index, in index order
    pub posts: Vec<PostSummary>,
    /// Files skipped because of per-file errors
    pub skipped: Vec<PageError>,
    /// Path of the index page
    pub index: PathBuf,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    markdown: MarkdownRenderer,
    renderer: TemplateRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator. Fails if the templates cannot be loaded.
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::load(
            &site.template_dir,
            &site.config.post_template,
            &site.config.index_template,
        )?;
        let markdown = MarkdownRenderer::with_options(&site.config.markdown);

        Ok(Self {
            site,
            markdown,
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateReport> {
        let posts_out = self.site.public_dir.join(POSTS_OUTPUT_DIR);
        fs::create_dir_all(&posts_out)
            .with_context(|| format!("Failed to create {:?}", posts_out))?;

        let files = ContentLoader::new(self.site).load()?;
        tracing::debug!("Found {} markdown files", files.len());

        let mut report = GenerateReport::default();

        for file in &files {
            if file.stem == "index" {
                tracing::debug!("Skipping {:?}", file.path);
                continue;
            }

            match self.generate_page(file) {
                Ok(dest) => {
                    tracing::info!("Converted {:?} to {:?}", file.path, dest);
                    report.pages.push(dest);

                    if file.is_post {
                        if let Some(post) = parse_post(&file.stem) {
                            report.posts.push(post);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.skipped.push(e);
                }
            }
        }

        sort_posts(&mut report.posts, self.site.config.index.order_by);

        report.index = self.write_index(&report.posts)?;
        tracing::info!("Generated {:?}", report.index);

        Ok(report)
    }

    /// Convert, render and write a single markdown file
    fn generate_page(&self, file: &ContentFile) -> Result<PathBuf, PageError> {
        let source = fs::read(&file.path).map_err(|source| PageError::Read {
            path: file.path.clone(),
            source,
        })?;

        let content = self
            .markdown
            .render_bytes(&source)
            .map_err(|source| PageError::Convert {
                path: file.path.clone(),
                source,
            })?;

        let dest = self.output_path(file);
        let title = derive_title(&file.stem);

        let html = self
            .renderer
            .render_page(&PageData {
                title: &title,
                content: &content,
            })
            .map_err(|source| PageError::Render {
                path: dest.clone(),
                source,
            })?;

        fs::write(&dest, html).map_err(|source| PageError::Write {
            path: dest.clone(),
            source,
        })?;

        Ok(dest)
    }

    /// Posts go to `<public>/posts/`, everything else to `<public>/`
    fn output_path(&self, file: &ContentFile) -> PathBuf {
        let dir = if file.is_post {
            self.site.public_dir.join(POSTS_OUTPUT_DIR)
        } else {
            self.site.public_dir.clone()
        };
        dir.join(file.html_name())
    }

    fn write_index(&self, posts: &[PostSummary]) -> Result<PathBuf> {
        let html = self
            .renderer
            .render_index(&IndexData {
                title: &self.site.config.index.title,
                posts,
            })
            .context("Failed to render index page")?;

        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        Ok(output_path)
    }
}

/// Order index entries. The sort is stable, so posts sharing a date stay in
/// traversal order.
pub fn sort_posts(posts: &mut [PostSummary], order: IndexOrder) {
    match order {
        IndexOrder::DateDesc => posts.sort_by(|a, b| b.date.cmp(&a.date)),
        IndexOrder::Walk => {}
    }
}
