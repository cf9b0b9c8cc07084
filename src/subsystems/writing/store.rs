//! Post index built once from the content directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ContentError;
use super::front_matter;
use super::render;

const EXTENSIONS: &[&str] = &["md", "mdx"];
const UNTITLED: &str = "Untitled";

/// One rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub tagline: Option<String>,
    pub body_html: String,
}

impl Post {
    /// Heading shown on the post page.
    pub fn page_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Label shown in the writing list.
    pub fn list_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    pub fn entry(&self) -> WritingEntry {
        WritingEntry {
            slug: self.slug.clone(),
            title: self.list_title().to_string(),
            date: self.date.clone().unwrap_or_default(),
            tagline: self.tagline.clone().unwrap_or_default(),
        }
    }
}

/// Row of the writing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritingEntry {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub tagline: String,
}

#[derive(Debug, Default)]
pub struct WritingStore {
    posts: Vec<Post>,
}

impl WritingStore {
    /// Index and render every post under `dir`.
    ///
    /// A missing directory yields an empty store. A file that cannot be read,
    /// parsed or rendered is skipped with a warning; only a failure to list
    /// an existing directory is an error.
    pub fn open(dir: &Path) -> Result<Self, ContentError> {
        if !dir.is_dir() {
            info!(dir = %dir.display(), "writing directory not found; no posts");
            return Ok(Self { posts: Vec::new() });
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_post_extension(p))
            .collect();
        paths.sort();

        let mut seen = HashSet::new();
        let mut posts = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(slug) = slug_of(&path) else {
                warn!(path = %path.display(), "skipping post with unusable file name");
                continue;
            };
            if !seen.insert(slug.clone()) {
                warn!(path = %path.display(), %slug, "duplicate slug; keeping the first file");
                continue;
            }
            match load_post(&path, slug) {
                Ok(post) => {
                    debug!(slug = %post.slug, "post indexed");
                    posts.push(post);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping post"),
            }
        }

        sort_posts(&mut posts);
        info!(dir = %dir.display(), count = posts.len(), "writing indexed");
        Ok(Self { posts })
    }

    pub fn entries(&self) -> Vec<WritingEntry> {
        self.posts.iter().map(Post::entry).collect()
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        if !is_valid_slug(slug) {
            return None;
        }
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Like [`get`](Self::get) but reports the missing slug.
    pub fn post(&self, slug: &str) -> Result<&Post, ContentError> {
        self.get(slug).ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn load_post(path: &Path, slug: String) -> Result<Post, ContentError> {
    let text = fs::read_to_string(path)?;
    let (fm, body) = front_matter::split(&text)?;
    let body_html = render::to_html(body)?;
    Ok(Post { slug, title: fm.title, date: fm.date, tagline: fm.tagline, body_html })
}

/// Newest date first, undated posts last, ties by slug.
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(x), Some(y)) => y.cmp(x).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

fn has_post_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn slug_of(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    is_valid_slug(stem).then(|| stem.to_string())
}

/// Slugs are single path segments of `[A-Za-z0-9._-]`, never `.`-led.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
