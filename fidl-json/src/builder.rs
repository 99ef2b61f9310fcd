//! JSON structure: objects, arrays, separators and indentation

use crate::emit::JsonWriter;
use crate::generate::Generate;

/// Whether an object member is the first one actually written.
///
/// Callers that skip optional members must pass `First` only for the member
/// that really opens the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Subsequent,
}

impl Position {
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Position::First
        } else {
            Position::Subsequent
        }
    }
}

impl JsonWriter {
    /// Writes `{`, lets `members` add members, then closes the object.
    ///
    /// An object that received no members stays on one line as `{}`.
    pub fn generate_object<F>(&mut self, members: F)
    where
        F: FnOnce(&mut Self),
    {
        let original_indent_level = self.indent_level;

        self.emit_object_begin();
        members(self);

        debug_assert!(
            self.indent_level <= original_indent_level + 1,
            "Position::First used more than once in one object"
        );
        if self.indent_level > original_indent_level {
            self.indent_level -= 1;
            self.emit_newline_indent(self.indent_level);
        }

        self.emit_object_end();
    }

    /// Writes `"key": value` inside an object opened by [`generate_object`].
    ///
    /// [`generate_object`]: JsonWriter::generate_object
    pub fn object_member<T>(&mut self, key: &str, value: &T, position: Position)
    where
        T: Generate + ?Sized,
    {
        self.object_key(key, position);
        value.generate(self);
    }

    /// Separator and key only; the caller writes the value itself.
    pub fn object_key(&mut self, key: &str, position: Position) {
        match position {
            Position::First => {
                self.indent_level += 1;
                self.emit_newline_indent(self.indent_level);
            }
            Position::Subsequent => self.emit_separator(self.indent_level),
        }
        self.emit_object_key(key);
    }

    /// Writes `items` as an array, one element per line. Empty is `[]`.
    pub fn generate_array<T>(&mut self, items: &[T])
    where
        T: Generate,
    {
        self.emit_array_begin();

        if items.is_empty() {
            self.emit_array_end();
            return;
        }

        self.indent_level += 1;
        self.emit_newline_indent(self.indent_level);

        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.emit_separator(self.indent_level);
            }
            item.generate(self);
        }

        self.indent_level -= 1;
        self.emit_newline_indent(self.indent_level);
        self.emit_array_end();
    }
}
