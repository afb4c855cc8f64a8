//! Post drafts and slug generation.

use slug::slugify;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::RichText;

/// Message returned when a required draft field is blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title, author, body, and excerpt are required.";

/// A validated post ready to be created and published.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub excerpt: String,
    pub body: RichText,
}

impl PostDraft {
    /// Build a draft from form input. The body text becomes a single
    /// paragraph.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        excerpt: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let body = normalize(body.into());
        if body.is_empty() {
            return Err(Error::InvalidDraft(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        Self::with_document(title, author, excerpt, RichText::from_plain_text(body))
    }

    /// Build a draft whose body is an already structured document.
    pub fn with_document(
        title: impl Into<String>,
        author: impl Into<String>,
        excerpt: impl Into<String>,
        body: RichText,
    ) -> Result<Self> {
        let title = normalize(title.into());
        let author = normalize(author.into());
        let excerpt = normalize(excerpt.into());

        if title.is_empty() || author.is_empty() || excerpt.is_empty() || body.is_empty() {
            return Err(Error::InvalidDraft(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let slug = derive_slug(&title)?;
        Ok(Self {
            title,
            slug,
            author,
            excerpt,
            body,
        })
    }
}

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Derive a URL slug from a title.
///
/// Apostrophes are dropped so contractions stay whole. Otherwise non-ASCII
/// text is transliterated, letters are lower-cased, and every run of other
/// characters becomes a single `-`.
pub fn derive_slug(title: &str) -> Result<String> {
    let title: String = title
        .chars()
        .filter(|c| !APOSTROPHES.contains(c))
        .collect();
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(Error::InvalidDraft(
            "Title must contain at least one letter or digit.".to_string(),
        ));
    }
    Ok(slug)
}

/// Trim and compose to NFC so equal-looking input compares equal.
fn normalize(field: String) -> String {
    field.trim().nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_slug_basic() {
        assert_eq!(derive_slug("Hello World").unwrap(), "hello-world");
        assert_eq!(derive_slug("  Rust   in 2024  ").unwrap(), "rust-in-2024");
    }

    #[test]
    fn test_derive_slug_punctuation_separates() {
        assert_eq!(derive_slug("Hello, World!").unwrap(), "hello-world");
        assert_eq!(derive_slug("a - b -- c").unwrap(), "a-b-c");
        assert_eq!(
            derive_slug("-leading and trailing-").unwrap(),
            "leading-and-trailing"
        );
    }

    #[test]
    fn test_derive_slug_keeps_contractions() {
        assert_eq!(derive_slug("Don't stop").unwrap(), "dont-stop");
        assert_eq!(derive_slug("It\u{2019}s here").unwrap(), "its-here");
        assert!(derive_slug("''").is_err());
    }

    #[test]
    fn test_derive_slug_transliterates_accents() {
        assert_eq!(derive_slug("Café Crème").unwrap(), "cafe-creme");
    }

    #[test]
    fn test_derive_slug_empty() {
        assert!(matches!(derive_slug("!!!"), Err(Error::InvalidDraft(_))));
        assert!(derive_slug("").is_err());
    }

    #[test]
    fn test_normalize_composes() {
        let decomposed = "Cafe\u{301} ".to_string();
        assert_eq!(normalize(decomposed), "Caf\u{e9}");
    }

    #[test]
    fn test_draft_new() {
        let draft = PostDraft::new(" My First Post ", "Sam", "Intro", "Body text").unwrap();
        assert_eq!(draft.title, "My First Post");
        assert_eq!(draft.slug, "my-first-post");
        assert_eq!(draft.body.children.len(), 1);
        assert_eq!(draft.body.plain_text(), "Body text");
    }

    #[test]
    fn test_draft_requires_all_fields() {
        for (title, author, excerpt, body) in [
            ("", "a", "e", "b"),
            ("t", "  ", "e", "b"),
            ("t", "a", "", "b"),
            ("t", "a", "e", "\n"),
        ] {
            let err = PostDraft::new(title, author, excerpt, body).unwrap_err();
            assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn test_draft_rejects_empty_slug() {
        let err = PostDraft::new("!!!", "a", "e", "b").unwrap_err();
        assert!(matches!(err, Error::InvalidDraft(_)));
    }

    #[test]
    fn test_draft_with_empty_document() {
        let err = PostDraft::with_document("t", "a", "e", RichText::default()).unwrap_err();
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);
    }
}
