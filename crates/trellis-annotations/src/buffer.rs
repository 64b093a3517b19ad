//! Text buffer abstraction for editor storage.
//!
//! The `TextBuffer` trait provides a common interface for text storage,
//! allowing the annotation document to work with different backends.
//!
//! All offsets are in Unicode scalar values (chars), not bytes or UTF-16.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;
use web_time::Instant;

use crate::types::EditInfo;

/// A text buffer that supports efficient editing and offset conversion.
pub trait TextBuffer {
    /// Total length in bytes (UTF-8).
    fn len_bytes(&self) -> usize;

    /// Total length in chars (Unicode scalar values).
    fn len_chars(&self) -> usize;

    /// Check if empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Insert text at char offset.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// Delete char range.
    fn delete(&mut self, char_range: Range<usize>);

    /// Replace char range with text.
    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    /// Get character at offset. Returns None if out of bounds.
    fn char_at(&self, char_offset: usize) -> Option<char>;

    /// Convert entire buffer to String.
    fn to_string(&self) -> String;

    /// Convert char offset to byte offset.
    fn char_to_byte(&self, char_offset: usize) -> usize;

    /// Convert byte offset to char offset.
    fn byte_to_char(&self, byte_offset: usize) -> usize;

    /// Get info about the last edit operation, if any.
    fn last_edit(&self) -> Option<EditInfo>;
}

/// Ropey-backed text buffer.
///
/// Provides O(log n) editing operations and offset conversions.
#[derive(Clone, Default)]
pub struct NoteRope {
    rope: ropey::Rope,
    last_edit: Option<EditInfo>,
}

impl NoteRope {
    /// Create a new empty rope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
            last_edit: None,
        }
    }

    /// Get a reference to the underlying rope (for advanced operations).
    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

impl TextBuffer for NoteRope {
    fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);

        self.last_edit = Some(EditInfo {
            edit_char_pos: char_offset,
            inserted_len: text.chars().count(),
            deleted_len: 0,
            contains_newline: text.contains('\n'),
            doc_len_after: self.rope.len_chars(),
            timestamp: Instant::now(),
        });
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let contains_newline = self
            .slice(char_range.clone())
            .map(|s| s.contains('\n'))
            .unwrap_or(false);
        let deleted_len = char_range.len();

        self.rope.remove(char_range.clone());

        self.last_edit = Some(EditInfo {
            edit_char_pos: char_range.start,
            inserted_len: 0,
            deleted_len,
            contains_newline,
            doc_len_after: self.rope.len_chars(),
            timestamp: Instant::now(),
        });
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.end > self.len_chars() || char_range.start > char_range.end {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope.char_to_byte(char_offset)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset)
    }

    fn last_edit(&self) -> Option<EditInfo> {
        self.last_edit.clone()
    }
}

impl From<&str> for NoteRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for NoteRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}
