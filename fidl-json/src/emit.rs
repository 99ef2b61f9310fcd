//! Primitive JSON token emission
//!
//! Every byte of the IR goes through one of the `emit_*` methods here. Higher
//! layers decide *what* to write; these methods only decide *how* a token is
//! spelled.

const INDENT: &str = "  ";

/// Emission context for one serialization: the output buffer plus the current
/// indent level.
#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    pub(crate) indent_level: usize,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn emit_boolean(&mut self, value: bool) {
        self.out.push_str(if value { "true" } else { "false" });
    }

    /// Quotes `value`, escaping only `"` and `\`. Control characters are
    /// copied through untouched.
    pub fn emit_string(&mut self, value: &str) {
        self.out.reserve(value.len() + 2);
        self.out.push('"');
        for c in value.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                _ => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    /// Writes already-lexed text verbatim.
    pub fn emit_raw(&mut self, value: &str) {
        self.out.push_str(value);
    }

    pub fn emit_uint(&mut self, value: u64) {
        self.out.push_str(&value.to_string());
    }

    pub fn emit_newline(&mut self) {
        self.out.push('\n');
    }

    pub fn emit_newline_indent(&mut self, level: usize) {
        self.out.push('\n');
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    pub fn emit_object_begin(&mut self) {
        self.out.push('{');
    }

    pub fn emit_object_end(&mut self) {
        self.out.push('}');
    }

    pub fn emit_array_begin(&mut self) {
        self.out.push('[');
    }

    pub fn emit_array_end(&mut self) {
        self.out.push(']');
    }

    /// `,` followed by a newline at `level`. Shared by objects and arrays.
    pub fn emit_separator(&mut self, level: usize) {
        self.out.push(',');
        self.emit_newline_indent(level);
    }

    pub fn emit_object_key(&mut self, key: &str) {
        self.emit_string(key);
        self.out.push_str(": ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(f: impl FnOnce(&mut JsonWriter)) -> String {
        let mut writer = JsonWriter::new();
        f(&mut writer);
        writer.into_string()
    }

    #[test]
    fn test_emit_boolean() {
        assert_eq!(emitted(|w| w.emit_boolean(true)), "true");
        assert_eq!(emitted(|w| w.emit_boolean(false)), "false");
    }

    #[test]
    fn test_emit_string_escapes_quotes_and_backslashes() {
        assert_eq!(
            emitted(|w| w.emit_string(r#""a\"b""#)),
            r#""\"a\\\"b\"""#
        );
    }

    #[test]
    fn test_emit_string_passes_control_characters_through() {
        assert_eq!(emitted(|w| w.emit_string("a\tb\nc")), "\"a\tb\nc\"");
        assert_eq!(emitted(|w| w.emit_string("héllo")), "\"héllo\"");
    }

    #[test]
    fn test_emit_raw_and_uint() {
        assert_eq!(emitted(|w| w.emit_raw("0x1F")), "0x1F");
        assert_eq!(emitted(|w| w.emit_uint(u64::MAX)), "18446744073709551615");
        assert_eq!(emitted(|w| w.emit_uint(0)), "0");
    }

    #[test]
    fn test_emit_newline_indent() {
        assert_eq!(emitted(|w| w.emit_newline_indent(0)), "\n");
        assert_eq!(emitted(|w| w.emit_newline_indent(3)), "\n      ");
    }

    #[test]
    fn test_emit_separator_and_key() {
        let out = emitted(|w| {
            w.emit_separator(1);
            w.emit_object_key("name");
        });
        assert_eq!(out, ",\n  \"name\": ");
    }
}
