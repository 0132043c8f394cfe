//! # chordshift
//!
//! Transpose the chords in a lyric sheet to another key, leaving lyrics,
//! spacing and line breaks exactly as they were.
//!
//! ## Modules
//! - `pitch` - The 12 pitch classes, flat aliases and intervals
//! - `scanner` - Splits text into chord tokens and literal text
//! - `transpose` - Rewrites chord roots by an interval
//! - `sheet` - Song sheets with YAML frontmatter
//! - `api` - JSON request/response types for services
//! - `error` - Error types
//!
//! ## Example
//! ```rust
//! let text = "G        Em\nMi corazón\nC         D\n";
//! let moved = chordshift::transpose(text, "G", "A")?;
//! assert_eq!(moved, "A        F#m\nMi corazón\nD         E\n");
//! # Ok::<(), chordshift::TransposeError>(())
//! ```

pub mod api;
pub mod error;
pub mod pitch;
pub mod scanner;
pub mod sheet;
pub mod transpose;

pub use error::*;
pub use pitch::{Interval, Pitch};
pub use sheet::{parse_sheet, SheetMetadata, SongSheet};
pub use transpose::{chord_count, transpose, transpose_by, transpose_chord};
