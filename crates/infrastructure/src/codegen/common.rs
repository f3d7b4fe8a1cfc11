//! Helpers shared by the converters: escaping, body field extraction and
//! indentation.

use std::fmt::Write;

use serde_json::{Map, Value, json};
use snipgen_domain::{FormDataParam, FormDataValue, FormParam};

/// Path used for file fields that have no source selected.
pub const PLACEHOLDER_FILE: &str = "/path/to/file";

/// Escapes text for a double-quoted C-family string literal (C#, Go).
///
/// Control characters and the Unicode line separators are written as
/// `\uXXXX`, which both languages accept.
pub fn escape_double_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_unicode_escape(c) => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes text for a single-quoted Dart string.
///
/// `multiline` is for `'''` literals, where line breaks may stay as they are.
pub fn escape_dart(input: &str, multiline: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' if multiline => out.push('\n'),
            '\r' if multiline => out.push('\r'),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_unicode_escape(c) => {
                let _ = write!(out, "\\u{{{:x}}}", u32::from(c));
            }
            _ => out.push(ch),
        }
    }
    out
}

/// True for characters that may not appear raw inside a string literal.
fn needs_unicode_escape(ch: char) -> bool {
    ch.is_control() || matches!(ch, '\u{2028}' | '\u{2029}')
}

/// Escapes text for a Go raw (backtick) string literal.
///
/// Raw strings cannot hold a backtick or most control characters, so each one
/// is spliced in as an interpreted string.
pub fn escape_go_backtick(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '`' => out.push_str("` + \"`\" + `"),
            '\n' | '\t' => out.push(ch),
            c if needs_unicode_escape(c) => {
                let mut buf = [0u8; 4];
                let escaped = escape_double_quoted(c.encode_utf8(&mut buf));
                let _ = write!(out, "` + \"{escaped}\" + `");
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Trims `input` when `trim` is set.
pub fn trimmed(input: &str, trim: bool) -> &str {
    if trim { input.trim() } else { input }
}

/// One multipart entry after disabled fields are dropped and file sources
/// are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField<'a> {
    /// Text entry.
    Text {
        /// Field name
        key: &'a str,
        /// Field value
        value: &'a str,
        /// Part content type
        content_type: Option<&'a str>,
    },
    /// File entry with exactly one source path.
    File {
        /// Field name
        key: &'a str,
        /// File path
        src: &'a str,
        /// Part content type
        content_type: Option<&'a str>,
    },
}

/// Flattens multipart params into entries, in order.
///
/// Disabled params are skipped. A file param yields one entry per source;
/// with no usable source it yields a single [`PLACEHOLDER_FILE`] entry.
/// Entries are never merged, so two file params sharing a key stay two.
/// With `trim` set, keys, values and sources are trimmed.
pub fn form_fields(params: &[FormDataParam], trim: bool) -> Vec<FormField<'_>> {
    let mut fields = Vec::new();
    for param in params.iter().filter(|p| p.enabled) {
        let key = trimmed(&param.key, trim);
        let content_type = param.content_type.as_deref().filter(|ct| !ct.is_empty());
        match &param.value {
            FormDataValue::Text(value) => fields.push(FormField::Text {
                key,
                value: trimmed(value, trim),
                content_type,
            }),
            FormDataValue::File(srcs) => {
                let mut any = false;
                for src in srcs.iter().map(|s| trimmed(s, trim)).filter(|s| !s.is_empty()) {
                    any = true;
                    fields.push(FormField::File {
                        key,
                        src,
                        content_type,
                    });
                }
                if !any {
                    fields.push(FormField::File {
                        key,
                        src: PLACEHOLDER_FILE,
                        content_type,
                    });
                }
            }
        }
    }
    fields
}

/// Returns the enabled url-encoded fields as `(key, value)` pairs.
pub fn urlencoded_pairs(fields: &[FormParam], trim: bool) -> Vec<(&str, &str)> {
    fields
        .iter()
        .filter(|f| f.enabled)
        .map(|f| (trimmed(&f.key, trim), trimmed(&f.value, trim)))
        .collect()
}

/// Form-encodes the enabled fields (`a=1&b=two+words`).
pub fn urlencoded_payload(fields: &[FormParam], trim: bool) -> String {
    serde_urlencoded::to_string(urlencoded_pairs(fields, trim)).unwrap_or_default()
}

/// Builds the JSON document sent for a GraphQL body.
///
/// `variables` is parsed as JSON; text that does not parse (including an
/// empty string) becomes `{}`.
pub fn graphql_payload(query: &str, variables: &str) -> String {
    let variables = serde_json::from_str::<Value>(variables).unwrap_or_else(|_| {
        if !variables.trim().is_empty() {
            tracing::debug!("graphql variables are not valid JSON, sending {{}}");
        }
        Value::Object(Map::new())
    });
    json!({ "query": query, "variables": variables }).to_string()
}

/// Percent-encodes characters that may not appear in a URL, like
/// JavaScript's `encodeURI`. Existing `%XX` escapes are kept.
pub fn encode_uri(raw: &str) -> String {
    const KEEP: &str = ";,/?:@&=+$-_.!~*'()#[]";
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    for (i, ch) in raw.char_indices() {
        let is_escape = ch == '%'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
        if ch.is_ascii_alphanumeric() || KEEP.contains(ch) || is_escape {
            out.push(ch);
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    out
}

/// Line-oriented output buffer with a current indentation depth.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    unit: String,
    depth: usize,
    out: String,
}

impl CodeWriter {
    /// Creates a writer indenting each level with `unit`.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            depth: 0,
            out: String::new(),
        }
    }

    /// Writes one line at the current depth. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(&self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Writes `text` and indents the following lines one level.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedents one level and writes `text`.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    /// Sets the current depth.
    pub const fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns the current depth.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the text written so far.
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_double_quoted() {
        assert_eq!(escape_double_quoted(r#"W/"1234""#), r#"W/\"1234\""#);
        assert_eq!(escape_double_quoted("a\\b\nc\td"), "a\\\\b\\nc\\td");
        assert_eq!(escape_double_quoted("W/'qw'"), "W/'qw'");
        assert_eq!(
            escape_double_quoted("a\u{2028}b\u{0}c\u{b}d\u{85}e\u{2029}"),
            "a\\u2028b\\u0000c\\u000bd\\u0085e\\u2029"
        );
        assert_eq!(escape_double_quoted("ü"), "ü");
    }

    #[test]
    fn test_escape_dart() {
        assert_eq!(escape_dart("it's $5", false), "it\\'s \\$5");
        assert_eq!(escape_dart("a\nb", false), "a\\nb");
        assert_eq!(escape_dart("a\nb", true), "a\nb");
        assert_eq!(escape_dart("a\u{0}b\u{2028}", true), "a\\u{0}b\\u{2028}");
    }

    #[test]
    fn test_escape_go_backtick() {
        assert_eq!(escape_go_backtick("a`b"), "a` + \"`\" + `b");
        assert_eq!(escape_go_backtick("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(escape_go_backtick("a\nb\u{0}"), "a\nb` + \"\\u0000\" + `");
        assert_eq!(escape_go_backtick("a\r\n"), "a` + \"\\r\" + `\n");
    }

    #[test]
    fn test_form_fields_trim_sources() {
        let params = vec![
            FormDataParam::text(" name ", " value "),
            FormDataParam::file(" doc ", " /a.txt "),
            FormDataParam::file("blank", "   "),
        ];
        assert_eq!(
            form_fields(&params, true),
            vec![
                FormField::Text { key: "name", value: "value", content_type: None },
                FormField::File { key: "doc", src: "/a.txt", content_type: None },
                FormField::File { key: "blank", src: PLACEHOLDER_FILE, content_type: None },
            ]
        );
        assert_eq!(
            form_fields(&params, false)[1],
            FormField::File { key: " doc ", src: " /a.txt ", content_type: None }
        );
    }

    #[test]
    fn test_form_fields_split_and_skip() {
        let params = vec![
            FormDataParam::text("name", "value"),
            FormDataParam::text("hidden", "secret").into_disabled(),
            FormDataParam::files("docs", ["/a.txt".to_string(), "/b.txt".to_string()]),
            FormDataParam::files("empty", Vec::new()),
        ];
        let fields = form_fields(&params, false);
        assert_eq!(
            fields,
            vec![
                FormField::Text { key: "name", value: "value", content_type: None },
                FormField::File { key: "docs", src: "/a.txt", content_type: None },
                FormField::File { key: "docs", src: "/b.txt", content_type: None },
                FormField::File { key: "empty", src: PLACEHOLDER_FILE, content_type: None },
            ]
        );
    }

    #[test]
    fn test_same_key_files_are_not_merged() {
        let params = vec![
            FormDataParam::file("no file", "/test1.txt"),
            FormDataParam::file("no file", "/test2.txt"),
        ];
        assert_eq!(form_fields(&params, false).len(), 2);
    }

    #[test]
    fn test_urlencoded_payload() {
        let fields = vec![
            FormParam::new(" a ", " b c "),
            FormParam::disabled("skip", "me"),
            FormParam::new("x", "1&2"),
        ];
        assert_eq!(urlencoded_payload(&fields, true), "a=b+c&x=1%262");
    }

    #[test]
    fn test_graphql_payload_invalid_variables() {
        assert_eq!(
            graphql_payload("{ hero }", "{not json"),
            r#"{"query":"{ hero }","variables":{}}"#
        );
        assert_eq!(
            graphql_payload("{ hero }", r#"{"id": 1}"#),
            r#"{"query":"{ hero }","variables":{"id":1}}"#
        );
    }

    #[test]
    fn test_encode_uri() {
        assert_eq!(
            encode_uri("https://example.com/a b?q=ü&x=%20"),
            "https://example.com/a%20b?q=%C3%BC&x=%20"
        );
    }

    #[test]
    fn test_code_writer_nesting() {
        let mut w = CodeWriter::new("  ");
        w.open("func main() {");
        w.line("a()");
        w.blank();
        w.open("if x {");
        w.line("b()");
        w.close("}");
        w.close("}");
        assert_eq!(w.finish(), "func main() {\n  a()\n\n  if x {\n    b()\n  }\n}\n");
    }

}
