//! Generate static files

use anyhow::Result;

use crate::generator::{GenerateReport, Generator};
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<GenerateReport> {
    let start = std::time::Instant::now();

    let generator = Generator::new(site)?;
    let report = generator.generate()?;

    if !report.skipped.is_empty() {
        tracing::warn!("Skipped {} file(s) with errors", report.skipped.len());
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages ({} posts indexed) in {:.2}s",
        report.pages.len(),
        report.posts.len(),
        duration.as_secs_f64()
    );

    Ok(report)
}
