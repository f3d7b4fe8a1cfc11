//! Go generator using `net/http`. Always emits a complete `package main`.

use std::collections::BTreeSet;

use snipgen_application::Converter;
use snipgen_domain::options::ids;
use snipgen_domain::{CodegenTarget, OptionSpec, Request, RequestBody, ResolvedOptions};

use super::common::{
    CodeWriter, FormField, PLACEHOLDER_FILE, escape_double_quoted as esc, escape_go_backtick,
    form_fields, graphql_payload, trimmed, urlencoded_payload,
};

/// Converter for the `go-native` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoNativeConverter;

impl Converter for GoNativeConverter {
    fn target(&self) -> CodegenTarget {
        CodegenTarget::GoNative
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::enumeration(
                ids::INDENT_TYPE,
                "Set indentation type",
                &["Tab", "Space"],
                "Tab",
                "Select the character used to indent lines of code",
            ),
            OptionSpec::indent_count(1),
            OptionSpec::positive_integer(
                ids::REQUEST_TIMEOUT,
                "Set request timeout",
                0,
                "Set number of milliseconds the request should wait for a response before timing out (use 0 for infinity)",
            ),
            OptionSpec::boolean(
                ids::FOLLOW_REDIRECT,
                "Follow redirects",
                true,
                "Automatically follow HTTP redirects",
            ),
            OptionSpec::boolean(
                ids::TRIM_REQUEST_BODY,
                "Trim request body fields",
                false,
                "Remove white space and additional lines that may affect the server's response",
            ),
        ]
    }

    fn render(&self, request: &Request, options: &ResolvedOptions) -> String {
        let mut imports = BTreeSet::from(["fmt", "io", "net/http"]);
        let mut main = CodeWriter::new(options.indent_unit());
        main.set_depth(1);
        write_main_body(&mut main, request, options, &mut imports);

        let mut w = CodeWriter::new(options.indent_unit());
        w.line("package main");
        w.blank();
        w.open("import (");
        for import in &imports {
            w.line(format!("\"{import}\""));
        }
        w.close(")");
        w.blank();
        w.line("func main() {");
        w.blank();
        let mut out = w.finish();
        out.push_str(&main.finish());
        out.push_str("}\n");
        out
    }
}

fn write_error_check(w: &mut CodeWriter, err: &str) {
    w.open(format!("if {err} != nil {{"));
    w.line(format!("fmt.Println({err})"));
    w.line("return");
    w.close("}");
}

fn write_main_body(
    w: &mut CodeWriter,
    request: &Request,
    options: &ResolvedOptions,
    imports: &mut BTreeSet<&'static str>,
) {
    let trim = options.flag(ids::TRIM_REQUEST_BODY);
    let body = request.effective_body();

    w.line(format!("url := \"{}\"", esc(&request.url)));
    w.line(format!("method := \"{}\"", esc(request.method.as_str())));
    w.blank();

    let has_payload = match body {
        Some(body) => {
            write_payload(w, body, trim, imports);
            w.blank();
            true
        }
        None => false,
    };

    let timeout = options.number(ids::REQUEST_TIMEOUT);
    let follow = options.flag(ids::FOLLOW_REDIRECT);
    if timeout == 0 && follow {
        w.line("client := &http.Client{}");
    } else {
        w.open("client := &http.Client{");
        if timeout > 0 {
            imports.insert("time");
            w.line(format!("Timeout: time.Duration({timeout}) * time.Millisecond,"));
        }
        if !follow {
            w.open("CheckRedirect: func(req *http.Request, via []*http.Request) error {");
            w.line("return http.ErrUseLastResponse");
            w.close("},");
        }
        w.close("}");
    }

    let payload = if has_payload { "payload" } else { "nil" };
    w.line(format!("req, err := http.NewRequest(method, url, {payload})"));
    w.blank();
    write_error_check(w, "err");

    for header in request.headers.enabled_except_content_type() {
        w.line(format!(
            "req.Header.Add(\"{}\", \"{}\")",
            esc(&header.key),
            esc(&header.value)
        ));
    }
    if matches!(body, Some(RequestBody::FormData { .. })) {
        w.line("req.Header.Set(\"Content-Type\", writer.FormDataContentType())");
    } else if let Some(ct) = request.content_type() {
        w.line(format!("req.Header.Add(\"Content-Type\", \"{}\")", esc(ct)));
    }
    w.blank();

    w.line("res, err := client.Do(req)");
    write_error_check(w, "err");
    w.line("defer res.Body.Close()");
    w.blank();
    w.line("body, err := io.ReadAll(res.Body)");
    write_error_check(w, "err");
    w.line("fmt.Println(string(body))");
}

fn write_payload(
    w: &mut CodeWriter,
    body: &RequestBody,
    trim: bool,
    imports: &mut BTreeSet<&'static str>,
) {
    match body {
        RequestBody::Raw { content, .. } => {
            imports.insert("strings");
            w.line(format!(
                "payload := strings.NewReader(`{}`)",
                escape_go_backtick(trimmed(content, trim))
            ));
        }
        RequestBody::GraphQl { query, variables } => {
            imports.insert("strings");
            let payload = graphql_payload(trimmed(query, trim), variables);
            w.line(format!(
                "payload := strings.NewReader(`{}`)",
                escape_go_backtick(&payload)
            ));
        }
        RequestBody::UrlEncoded { fields } => {
            imports.insert("strings");
            w.line(format!(
                "payload := strings.NewReader(\"{}\")",
                esc(&urlencoded_payload(fields, trim))
            ));
        }
        RequestBody::FormData { fields } => {
            imports.extend(["bytes", "mime/multipart"]);
            w.line("payload := &bytes.Buffer{}");
            w.line("writer := multipart.NewWriter(payload)");
            let mut file_index = 0;
            for field in form_fields(fields, trim) {
                match field {
                    FormField::Text { key, value, .. } => w.line(format!(
                        "_ = writer.WriteField(\"{}\", \"{}\")",
                        esc(key),
                        esc(value)
                    )),
                    FormField::File { key, src, .. } => {
                        imports.extend(["os", "path/filepath"]);
                        file_index += 1;
                        let n = file_index;
                        let err = format!("errFile{n}");
                        w.line(format!("file{n}, {err} := os.Open(\"{}\")", esc(src)));
                        write_error_check(w, &err);
                        w.line(format!("defer file{n}.Close()"));
                        w.line(format!(
                            "part{n}, {err} := writer.CreateFormFile(\"{}\", filepath.Base(\"{}\"))",
                            esc(key),
                            esc(src)
                        ));
                        w.line(format!("_, {err} = io.Copy(part{n}, file{n})"));
                        write_error_check(w, &err);
                    }
                }
            }
            w.line("err := writer.Close()");
            write_error_check(w, "err");
        }
        RequestBody::File { src } => {
            imports.insert("os");
            w.line(format!(
                "payload, err := os.Open(\"{}\")",
                esc(src.as_deref().unwrap_or(PLACEHOLDER_FILE))
            ));
            write_error_check(w, "err");
            w.line("defer payload.Close()");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use snipgen_domain::{FormDataParam, Header, RawOptions};

    fn opts(value: serde_json::Value) -> RawOptions {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_request_without_body() {
        let request = Request::get("https://google.com");
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());

        assert_eq!(
            snippet,
            "package main\n\nimport (\n\t\"fmt\"\n\t\"io\"\n\t\"net/http\"\n)\n\nfunc main() {\n\n\
             \turl := \"https://google.com\"\n\
             \tmethod := \"GET\"\n\n\
             \tclient := &http.Client{}\n\
             \treq, err := http.NewRequest(method, url, nil)\n\n\
             \tif err != nil {\n\t\tfmt.Println(err)\n\t\treturn\n\t}\n\n\
             \tres, err := client.Do(req)\n\
             \tif err != nil {\n\t\tfmt.Println(err)\n\t\treturn\n\t}\n\
             \tdefer res.Body.Close()\n\n\
             \tbody, err := io.ReadAll(res.Body)\n\
             \tif err != nil {\n\t\tfmt.Println(err)\n\t\treturn\n\t}\n\
             \tfmt.Println(string(body))\n}\n"
        );
    }

    #[test]
    fn test_header_quotes_are_escaped() {
        let request = Request::get("https://example.com")
            .with_header(Header::new("foo", "W/\"1234\""))
            .with_header(Header::new("foz", "W/'qw'"))
            .with_header(Header::disabled("off", "x"));
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("req.Header.Add(\"foo\", \"W/\\\"1234\\\"\")"));
        assert!(snippet.contains("req.Header.Add(\"foz\", \"W/'qw'\")"));
        assert!(!snippet.contains("\"off\""));
    }

    #[test]
    fn test_client_configuration() {
        let request = Request::get("https://example.com");
        let snippet = GoNativeConverter.generate(
            &request,
            &opts(json!({"requestTimeout": 3000, "followRedirect": false, "indentType": "Space", "indentCount": 2})),
        );
        assert!(snippet.contains(
            "  client := &http.Client{\n    Timeout: time.Duration(3000) * time.Millisecond,\n    \
             CheckRedirect: func(req *http.Request, via []*http.Request) error {\n      \
             return http.ErrUseLastResponse\n    },\n  }\n"
        ));
        assert!(snippet.contains("  \"time\"\n"));
    }

    #[test]
    fn test_raw_body_with_backticks() {
        let request = Request::post("https://example.com")
            .with_body(RequestBody::json("{\"cmd\": \"`ls`\"}"));
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("payload := strings.NewReader(`{\"cmd\": \"` + \"`\" + `ls` + \"`\" + `\"}`)"));
        assert!(snippet.contains("req.Header.Add(\"Content-Type\", \"application/json\")"));
        assert!(snippet.contains("\t\"strings\"\n"));
    }

    #[test]
    fn test_multipart_imports_and_parts() {
        let request = Request::post("https://example.com").with_body(RequestBody::form_data([
            FormDataParam::text("name", "value"),
            FormDataParam::file("doc", "/a.txt"),
            FormDataParam::file("doc", "/b.txt"),
        ]));
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());

        assert!(snippet.contains(
            "import (\n\t\"bytes\"\n\t\"fmt\"\n\t\"io\"\n\t\"mime/multipart\"\n\t\"net/http\"\n\t\"os\"\n\t\"path/filepath\"\n)"
        ));
        assert!(snippet.contains("_ = writer.WriteField(\"name\", \"value\")"));
        assert!(snippet.contains("file1, errFile1 := os.Open(\"/a.txt\")"));
        assert!(snippet.contains("file2, errFile2 := os.Open(\"/b.txt\")"));
        assert!(snippet.contains("req.Header.Set(\"Content-Type\", writer.FormDataContentType())"));
    }

    #[test]
    fn test_option_order() {
        let ids: Vec<_> = GoNativeConverter.options().into_iter().map(|o| o.id).collect();
        assert_eq!(
            ids,
            ["indentType", "indentCount", "requestTimeout", "followRedirect", "trimRequestBody"]
        );
    }

    #[test]
    fn test_empty_body_sends_no_content_type() {
        let request = Request::post("https://example.com").with_body(RequestBody::raw(""));
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("http.NewRequest(method, url, nil)"));
        assert!(!snippet.contains("Content-Type"));
        assert!(!snippet.contains("strings"));
    }

    #[test]
    fn test_trim_applies_to_file_sources() {
        let request = Request::post("https://example.com").with_body(RequestBody::form_data([
            FormDataParam::file(" doc ", " /a.txt "),
        ]));
        let snippet = GoNativeConverter.generate(&request, &opts(json!({"trimRequestBody": true})));
        assert!(snippet.contains("file1, errFile1 := os.Open(\"/a.txt\")"));
        assert!(snippet.contains("writer.CreateFormFile(\"doc\", filepath.Base(\"/a.txt\"))"));
    }

    #[test]
    fn test_header_control_characters_escaped() {
        let request = Request::get("https://example.com")
            .with_header(Header::new("x", "a\u{2028}b\u{0}c"));
        let snippet = GoNativeConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains(r#"req.Header.Add("x", "a\u2028b\u0000c")"#));
    }
}
