//! Chord scanner: splits free-form text into chord tokens and literal text.
//!
//! A chord token starts at a word boundary with a root letter `A`-`G`, an
//! optional accidental (`#` or `b`), then any number of quality markers
//! (`m`, `maj`, `min`, `dim`, `aug`, `sus`, `add`, digits), and must end at a
//! word boundary. Everything else is literal text.
//!
//! The scanner is purely lexical. Short words that happen to be spelled like
//! a chord, such as the English article "A" or the Spanish "Em", are reported
//! as chords; there is no attempt to tell lyrics from chords by context.

use crate::pitch::{self, Interval, Pitch};

/// Quality markers, longest first so `maj`/`min` win over `m`.
const QUALITY_MARKERS: [&str; 7] = ["maj", "min", "dim", "aug", "sus", "add", "m"];

/// Longest run of quality markers accepted after a root. Longer runs are
/// treated as ordinary words.
pub const MAX_QUALITY_MARKERS: usize = 16;

/// A chord recognized in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordToken<'a> {
    /// The whole token as it appears in the source
    pub text: &'a str,
    /// Byte offset of the token in the source
    pub offset: usize,
    pub root: Pitch,
    /// Root as spelled in the source, e.g. "Bb"
    pub root_spelling: &'a str,
    /// Quality and extensions, carried through unchanged
    pub suffix: &'a str,
}

impl<'a> ChordToken<'a> {
    /// Rebuild the token with its root moved by `interval`, spelled with sharps.
    pub fn transposed(&self, interval: Interval) -> String {
        let root = self.root.transpose(interval);
        let mut out = String::with_capacity(root.name().len() + self.suffix.len());
        out.push_str(root.name());
        out.push_str(self.suffix);
        out
    }
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Chord(ChordToken<'a>),
    Literal(&'a str),
}

impl<'a> Span<'a> {
    /// The source text this span covers.
    pub fn as_str(&self) -> &'a str {
        match self {
            Span::Chord(token) => token.text,
            Span::Literal(text) => *text,
        }
    }
}

/// Lazy iterator over the spans of a text.
///
/// Concatenating the spans reproduces the input exactly. The scanner is
/// `Clone`, so a scan can be restarted from any point by cloning it.
#[derive(Debug, Clone)]
pub struct ChordScanner<'a> {
    input: &'a str,
    position: usize,
    pending: Option<ChordToken<'a>>,
}

/// Scan `text` into chord and literal spans.
///
/// # Examples
/// ```
/// use chordshift::scanner::{scan, Span};
///
/// let spans: Vec<&str> = scan("Am  la la G7").map(|s| s.as_str()).collect();
/// assert_eq!(spans, vec!["Am", "  la la ", "G7"]);
///
/// let chords = scan("Am  la la G7")
///     .filter(|s| matches!(s, Span::Chord(_)))
///     .count();
/// assert_eq!(chords, 2);
/// ```
pub fn scan(text: &str) -> ChordScanner<'_> {
    ChordScanner::new(text)
}

impl<'a> ChordScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            pending: None,
        }
    }

    /// Find the next chord at or after `from`.
    fn find_chord(&self, from: usize) -> Option<ChordToken<'a>> {
        let mut prev = self.input[..from].chars().next_back();
        for (i, c) in self.input[from..].char_indices() {
            let start = from + i;
            if is_root_letter(c) && !prev.is_some_and(is_word_char) {
                if let Some(token) = match_chord_at(self.input, start) {
                    return Some(token);
                }
            }
            prev = Some(c);
        }
        None
    }
}

impl<'a> Iterator for ChordScanner<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            self.position = token.offset + token.text.len();
            return Some(Span::Chord(token));
        }
        if self.position >= self.input.len() {
            return None;
        }

        match self.find_chord(self.position) {
            Some(token) if token.offset == self.position => {
                self.position += token.text.len();
                Some(Span::Chord(token))
            }
            Some(token) => {
                let literal = &self.input[self.position..token.offset];
                self.position = token.offset;
                self.pending = Some(token);
                Some(Span::Literal(literal))
            }
            None => {
                let literal = &self.input[self.position..];
                self.position = self.input.len();
                Some(Span::Literal(literal))
            }
        }
    }
}

/// Parse `text` as exactly one chord token, with nothing before or after it.
///
/// # Examples
/// ```
/// use chordshift::pitch::Pitch;
/// use chordshift::scanner::parse_chord;
///
/// let chord = parse_chord("Bbmaj7").unwrap();
/// assert_eq!(chord.root, Pitch::ASharp);
/// assert_eq!(chord.suffix, "maj7");
///
/// assert!(parse_chord("Bbmaj7 ").is_none());
/// assert!(parse_chord("Hm").is_none());
/// ```
pub fn parse_chord(text: &str) -> Option<ChordToken<'_>> {
    if !text.chars().next().is_some_and(is_root_letter) {
        return None;
    }
    match_chord_at(text, 0).filter(|token| token.text.len() == text.len())
}

/// Match a chord starting at `start`, which must hold a root letter preceded
/// by a word boundary.
fn match_chord_at(input: &str, start: usize) -> Option<ChordToken<'_>> {
    let rest = &input[start..];
    let root_len = match rest.as_bytes().get(1) {
        Some(b'#') | Some(b'b') => 2,
        _ => 1,
    };

    let mut end = root_len;
    let mut markers = 0;
    while let Some(len) = quality_marker_len(&rest[end..]) {
        markers += 1;
        if markers > MAX_QUALITY_MARKERS {
            return None;
        }
        end += len;
    }

    // Must end at a word boundary. A '#' right after an accidental would be a
    // second accidental; after a marker it starts an alteration like "7#9".
    let bare_accidental = end == root_len && root_len == 2;
    if let Some(next) = rest[end..].chars().next() {
        if is_word_char(next) || (next == '#' && bare_accidental) {
            return None;
        }
    }

    let root_spelling = &rest[..root_len];
    // Cb, Fb and friends look like chords but aren't in the pitch table
    let root = pitch::normalize(root_spelling).ok()?;

    Some(ChordToken {
        text: &rest[..end],
        offset: start,
        root,
        root_spelling,
        suffix: &rest[root_len..end],
    })
}

fn quality_marker_len(s: &str) -> Option<usize> {
    if s.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return Some(1);
    }
    QUALITY_MARKERS
        .iter()
        .find(|marker| s.starts_with(*marker))
        .map(|marker| marker.len())
}

fn is_root_letter(c: char) -> bool {
    matches!(c, 'A'..='G')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
