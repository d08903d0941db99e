//! Content models and dated-post parsing

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use crate::helpers::derive_title;

/// Output subdirectory for posts, also the first segment of post links
pub const POSTS_OUTPUT_DIR: &str = "posts";

/// A markdown file discovered under the content root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Full path to the source file
    pub path: PathBuf,

    /// File name without the `.md` extension
    pub stem: String,

    /// Whether the file lives under the posts subtree
    pub is_post: bool,
}

impl ContentFile {
    /// Output file name (`<stem>.html`)
    pub fn html_name(&self) -> String {
        format!("{}.html", self.stem)
    }
}

/// A dated post as listed on the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    /// Title derived from the slug
    pub title: String,

    /// Publication date, taken from the file name
    pub date: NaiveDate,

    /// Everything after the date in the file name
    pub slug: String,

    /// Site-relative URL of the rendered post
    pub link: String,
}

/// Parse a post file stem of the form `YYYY-MM-DD-slug`.
///
/// Returns `None` for anything that is not a dated post, including stems
/// whose date part is not a real calendar date.
pub fn parse_post(stem: &str) -> Option<PostSummary> {
    let mut parts = stem.splitn(4, '-');
    let (year, month, day, slug) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);

    let date = parse_date(year, month, day)?;

    Some(PostSummary {
        title: derive_title(slug),
        date,
        slug: slug.to_string(),
        link: format!("/{}/{}.html", POSTS_OUTPUT_DIR, stem),
    })
}

/// Strict `YYYY-MM-DD`: zero padded, digits only, valid on the calendar
fn parse_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let well_formed = [(year, 4), (month, 2), (day, 2)]
        .iter()
        .all(|(part, len)| part.len() == *len && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(&format!("{}-{}-{}", year, month, day), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post() {
        let post = parse_post("2024-03-01-hello-world").unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.link, "/posts/2024-03-01-hello-world.html");
    }

    #[test]
    fn test_parse_post_single_word_slug() {
        let post = parse_post("1999-12-31-party").unwrap();
        assert_eq!(post.slug, "party");
        assert_eq!(post.title, "Party");
    }

    #[test]
    fn test_parse_post_rejects_bad_dates() {
        assert_eq!(parse_post("2024-13-99-oops"), None);
        assert_eq!(parse_post("2023-02-29-not-leap"), None);
        assert_eq!(parse_post("2024-3-1-unpadded"), None);
        assert_eq!(parse_post("24-03-01-short-year"), None);
        assert_eq!(parse_post("2024-+3-01-sign"), None);
    }

    #[test]
    fn test_parse_post_requires_four_segments() {
        assert_eq!(parse_post("about"), None);
        assert_eq!(parse_post("2024-03-01"), None);
        assert_eq!(parse_post("hello-world"), None);
    }

    #[test]
    fn test_parse_post_leap_day() {
        assert!(parse_post("2024-02-29-leap").is_some());
    }

    #[test]
    fn test_summary_serializes_date_as_iso() {
        let post = parse_post("2024-03-01-hello-world").unwrap();
        let value = serde_yaml::to_value(&post).unwrap();
        assert_eq!(value["date"].as_str(), Some("2024-03-01"));
        assert_eq!(value["slug"].as_str(), Some("hello-world"));
    }

    #[test]
    fn test_html_name() {
        let file = ContentFile {
            path: PathBuf::from("blog/about.md"),
            stem: "about".to_string(),
            is_post: false,
        };
        assert_eq!(file.html_name(), "about.html");
    }
}
