use crate::error::{KeyRole, TransposeError};
use crate::pitch::{self, Interval, Pitch};
use crate::scanner::{parse_chord, scan, Span};
use tracing::{debug, trace};

/// Normalize a request key, tagging failures with the key's role.
fn resolve_key(spelling: &str, key: KeyRole) -> Result<Pitch, TransposeError> {
    pitch::normalize(spelling).map_err(|source| TransposeError::InvalidPitch { key, source })
}

/// Interval between two key spellings. The original key is checked first.
///
/// # Examples
/// ```
/// use chordshift::transpose::key_interval;
///
/// assert_eq!(key_interval("C", "D").unwrap().semitones(), 2);
/// assert_eq!(key_interval("Bb", "A#").unwrap().semitones(), 0);
/// assert!(key_interval("C", "H").is_err());
/// ```
pub fn key_interval(original_key: &str, target_key: &str) -> Result<Interval, TransposeError> {
    let from = resolve_key(original_key, KeyRole::Original)?;
    let to = resolve_key(target_key, KeyRole::Target)?;
    Ok(pitch::interval(from, to))
}

/// Transpose every chord in `text` from `original_key` to `target_key`.
///
/// Chord roots are rewritten with sharp spellings; chord suffixes, lyrics,
/// whitespace and line breaks are copied unchanged. When both keys name the
/// same pitch the text is returned exactly as given, flats included.
///
/// # Examples
/// ```
/// use chordshift::transpose;
///
/// let text = "C        Am\nEsta es mi canción\nF         G\n";
/// assert_eq!(
///     transpose(text, "C", "D").unwrap(),
///     "D        Bm\nEsta es mi canción\nG         A\n"
/// );
/// assert_eq!(transpose("Gm7 to Dsus4", "G", "A").unwrap(), "Am7 to Esus4");
/// ```
///
/// # Errors
/// Returns [`TransposeError::InvalidPitch`] if either key isn't a pitch
/// spelling. The text itself never causes an error.
pub fn transpose(text: &str, original_key: &str, target_key: &str) -> Result<String, TransposeError> {
    let interval = key_interval(original_key, target_key)?;
    debug!(
        original_key,
        target_key,
        semitones = interval.semitones(),
        "transposing {} bytes",
        text.len()
    );
    Ok(transpose_by(text, interval))
}

/// Rewrite every chord root in `text` by `interval`.
pub fn transpose_by(text: &str, interval: Interval) -> String {
    if interval.is_unison() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for span in scan(text) {
        match span {
            Span::Chord(token) => {
                let rewritten = token.transposed(interval);
                trace!(offset = token.offset, from = token.text, to = %rewritten, "chord");
                out.push_str(&rewritten);
            }
            Span::Literal(literal) => out.push_str(literal),
        }
    }
    out
}

/// Transpose a single chord symbol by a signed number of semitones.
///
/// Anything that isn't exactly one chord comes back unchanged.
///
/// # Examples
/// ```
/// use chordshift::transpose_chord;
///
/// assert_eq!(transpose_chord("Am7", 3), "Cm7");
/// assert_eq!(transpose_chord("Bb", -1), "A");
/// assert_eq!(transpose_chord("C", 13), "C#");
/// assert_eq!(transpose_chord("hello", 2), "hello");
/// ```
pub fn transpose_chord(chord: &str, semitones: i32) -> String {
    let interval = Interval::from_semitones(semitones);
    match parse_chord(chord) {
        Some(token) if !interval.is_unison() => token.transposed(interval),
        _ => chord.to_string(),
    }
}

/// Number of chords recognized in `text`.
pub fn chord_count(text: &str) -> usize {
    scan(text)
        .filter(|span| matches!(span, Span::Chord(_)))
        .count()
}
