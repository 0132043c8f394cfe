//! # Song Sheets
//!
//! A song sheet is chord/lyric text with an optional YAML frontmatter block:
//!
//! ```text
//! ---
//! title: De Música Ligera
//! artist: Soda Stereo
//! key: Bm
//! ---
//! Bm          G
//! Ella durmió al calor de las masas
//! ```
//!
//! The frontmatter must be the first thing in the file. The body after the
//! closing `---` line is kept byte for byte.

use crate::error::TransposeError;
use crate::pitch;
use crate::scanner::parse_chord;
use crate::transpose::transpose;
use serde::{Deserialize, Serialize};
use tracing::debug;

const FRONTMATTER_MARKER: &str = "---";

/// Frontmatter fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Key the chords are written in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SheetMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.key.is_none()
    }
}

/// A parsed song sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongSheet {
    pub metadata: SheetMetadata,
    pub body: String,
}

fn is_marker_line(line: &str) -> bool {
    line.trim() == FRONTMATTER_MARKER
}

/// Split a sheet key such as "Bm" into its root spelling and mode suffix.
/// Spellings that aren't chord-shaped come back whole, so the transposer
/// reports them as invalid keys.
fn split_key(key: &str) -> (&str, &str) {
    if pitch::normalize(key).is_ok() {
        return (key, "");
    }
    match parse_chord(key) {
        Some(token) => (token.root_spelling, token.suffix),
        None => (key, ""),
    }
}

/// Split a leading frontmatter block off `source`.
/// Returns (frontmatter content, body).
fn split_frontmatter(source: &str) -> Result<(Option<&str>, &str), TransposeError> {
    let mut lines = source.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_marker_line(first) => {}
        _ => return Ok((None, source)),
    }

    let content_start = source.len() - lines.clone().map(str::len).sum::<usize>();
    let mut offset = content_start;
    for line in lines {
        if is_marker_line(line) {
            return Ok((Some(&source[content_start..offset]), &source[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(TransposeError::MetadataError(
        "frontmatter is missing its closing '---'".to_string(),
    ))
}

/// Parse a song sheet.
///
/// # Examples
/// ```
/// use chordshift::sheet::parse_sheet;
///
/// let sheet = parse_sheet("---\ntitle: Test\nkey: G\n---\nG  Em\nla la\n").unwrap();
/// assert_eq!(sheet.metadata.title.as_deref(), Some("Test"));
/// assert_eq!(sheet.metadata.key.as_deref(), Some("G"));
/// assert_eq!(sheet.body, "G  Em\nla la\n");
/// ```
///
/// # Errors
/// Returns [`TransposeError::MetadataError`] for malformed or unterminated
/// frontmatter.
pub fn parse_sheet(source: &str) -> Result<SongSheet, TransposeError> {
    let (frontmatter, body) = split_frontmatter(source)?;

    let metadata = match frontmatter {
        Some(content) if !content.trim().is_empty() => serde_yaml::from_str(content)
            .map_err(|e| TransposeError::MetadataError(e.to_string()))?,
        _ => SheetMetadata::default(),
    };

    Ok(SongSheet {
        metadata,
        body: body.to_string(),
    })
}

impl SongSheet {
    /// Transpose the sheet's chords into `target_key`.
    ///
    /// The original key is `original_key` if given, otherwise the `key` from
    /// the frontmatter. Keys may carry a mode suffix (`Bm`); only the root
    /// decides the interval. The returned sheet's `key` is `target_key` as
    /// spelled by the caller, taking the original key's suffix when the
    /// target has none (`Bm` to `C#` gives `C#m`).
    pub fn transpose(&self, target_key: &str, original_key: Option<&str>) -> Result<SongSheet, TransposeError> {
        let original_key = original_key
            .or(self.metadata.key.as_deref())
            .ok_or_else(|| {
                TransposeError::MetadataError(
                    "no original key: set `key` in the frontmatter or pass one explicitly".to_string(),
                )
            })?;

        let (from_root, from_suffix) = split_key(original_key);
        let (to_root, to_suffix) = split_key(target_key);

        let body = transpose(&self.body, from_root, to_root)?;
        debug!(title = ?self.metadata.title, original_key, target_key, "transposed sheet");

        let key = if to_suffix.is_empty() {
            format!("{}{}", to_root, from_suffix)
        } else {
            target_key.to_string()
        };

        Ok(SongSheet {
            metadata: SheetMetadata {
                key: Some(key),
                ..self.metadata.clone()
            },
            body,
        })
    }

    /// Serialize back to sheet text. Frontmatter is written only when some
    /// field is set.
    pub fn render(&self) -> Result<String, TransposeError> {
        if self.metadata.is_empty() {
            return Ok(self.body.clone());
        }
        let yaml = serde_yaml::to_string(&self.metadata)
            .map_err(|e| TransposeError::MetadataError(e.to_string()))?;

        let mut out = String::with_capacity(yaml.len() + self.body.len() + 8);
        out.push_str(FRONTMATTER_MARKER);
        out.push('\n');
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(FRONTMATTER_MARKER);
        out.push('\n');
        out.push_str(&self.body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEET: &str = "---
title: De Música Ligera
artist: Soda Stereo
key: Bm
---
Bm          G
Ella durmió al calor de las masas
D           A
";

    #[test]
    fn test_parse_with_frontmatter() {
        let sheet = parse_sheet(SHEET).unwrap();
        assert_eq!(sheet.metadata.title.as_deref(), Some("De Música Ligera"));
        assert_eq!(sheet.metadata.artist.as_deref(), Some("Soda Stereo"));
        assert_eq!(sheet.metadata.key.as_deref(), Some("Bm"));
        assert_eq!(sheet.body, "Bm          G\nElla durmió al calor de las masas\nD           A\n");
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let source = "C  G\nhola\n";
        let sheet = parse_sheet(source).unwrap();
        assert!(sheet.metadata.is_empty());
        assert_eq!(sheet.body, source);
    }

    #[test]
    fn test_dashes_later_in_body_are_not_frontmatter() {
        let source = "C\n---\nG\n---\n";
        let sheet = parse_sheet(source).unwrap();
        assert_eq!(sheet.body, source);
    }

    #[test]
    fn test_empty_frontmatter() {
        let sheet = parse_sheet("---\n---\nAm\n").unwrap();
        assert!(sheet.metadata.is_empty());
        assert_eq!(sheet.body, "Am\n");
    }

    #[test]
    fn test_crlf_markers() {
        let sheet = parse_sheet("---\r\nkey: D\r\n---\r\nD  G\r\n").unwrap();
        assert_eq!(sheet.metadata.key.as_deref(), Some("D"));
        assert_eq!(sheet.body, "D  G\r\n");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let err = parse_sheet("---\ntitle: x\nC G\n").unwrap_err();
        assert!(matches!(err, TransposeError::MetadataError(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_sheet("---\ntempo: 120\n---\nC\n").unwrap_err();
        assert!(matches!(err, TransposeError::MetadataError(_)));
    }

    #[test]
    fn test_transpose_uses_frontmatter_key() {
        let sheet = parse_sheet("---\nkey: B\n---\nBm G\n").unwrap();
        let moved = sheet.transpose("C#", None).unwrap();
        assert_eq!(moved.body, "C#m A\n");
        assert_eq!(moved.metadata.key.as_deref(), Some("C#"));
    }

    #[test]
    fn test_transpose_minor_frontmatter_key() {
        let sheet = parse_sheet(SHEET).unwrap();
        let moved = sheet.transpose("C#", None).unwrap();
        assert_eq!(moved.body, "C#m          A\nElla durmió al calor de las masas\nE           B\n");
        assert_eq!(moved.metadata.key.as_deref(), Some("C#m"));
    }

    #[test]
    fn test_transpose_target_with_own_suffix() {
        let sheet = parse_sheet(SHEET).unwrap();
        let moved = sheet.transpose("Am", None).unwrap();
        assert_eq!(moved.body, "Am          F\nElla durmió al calor de las masas\nC           G\n");
        assert_eq!(moved.metadata.key.as_deref(), Some("Am"));
    }

    #[test]
    fn test_transpose_bad_minor_key() {
        let sheet = parse_sheet("---\nkey: Hm\n---\nC\n").unwrap();
        let err = sheet.transpose("D", None).unwrap_err();
        assert_eq!(err.key_role(), Some(crate::KeyRole::Original));
        assert_eq!(err.to_string(), "Invalid original key: 'Hm' is not a pitch name");
    }

    #[test]
    fn test_transpose_explicit_key_wins() {
        let sheet = parse_sheet(SHEET).unwrap();
        let moved = sheet.transpose("A", Some("B")).unwrap();
        assert_eq!(moved.body, "Am          F\nElla durmió al calor de las masas\nC           G\n");
        assert_eq!(moved.metadata.title, sheet.metadata.title);
        assert_eq!(moved.metadata.key.as_deref(), Some("A"));
    }

    #[test]
    fn test_transpose_without_any_key() {
        let sheet = parse_sheet("C G\n").unwrap();
        let err = sheet.transpose("D", None).unwrap_err();
        assert!(matches!(err, TransposeError::MetadataError(_)));
    }

    #[test]
    fn test_render_round_trip() {
        let sheet = parse_sheet("---\ntitle: Test\nkey: Bb\n---\nBb F\n").unwrap();
        let rendered = sheet.render().unwrap();
        assert_eq!(rendered, "---\ntitle: Test\nkey: Bb\n---\nBb F\n");
        assert_eq!(parse_sheet(&rendered).unwrap(), sheet);
    }

    #[test]
    fn test_render_without_metadata() {
        let sheet = parse_sheet("Am\n").unwrap();
        assert_eq!(sheet.render().unwrap(), "Am\n");
    }
}
