//! Dart generator using `package:http`.

use snipgen_application::Converter;
use snipgen_domain::options::ids;
use snipgen_domain::{
    CodegenTarget, FormDataParam, HttpMethod, OptionSpec, Request, RequestBody, ResolvedOptions,
};

use super::common::{
    CodeWriter, FormField, PLACEHOLDER_FILE, encode_uri, escape_dart, form_fields,
    graphql_payload, trimmed, urlencoded_pairs,
};

/// Converter for the `dart-http` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DartHttpConverter;

impl Converter for DartHttpConverter {
    fn target(&self) -> CodegenTarget {
        CodegenTarget::DartHttp
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::indent_count(2),
            OptionSpec::enumeration(
                ids::INDENT_TYPE,
                "Set indentation type",
                &["Tab", "Space"],
                "Space",
                "Select the character used to indent lines of code",
            ),
            OptionSpec::positive_integer(
                ids::REQUEST_TIMEOUT,
                "Set request timeout",
                0,
                "Set number of milliseconds the request should wait for a response before timing out (use 0 for infinity)",
            ),
            OptionSpec::boolean(
                ids::TRIM_REQUEST_BODY,
                "Trim request body fields",
                false,
                "Remove white space and additional lines that may affect the server's response",
            ),
            OptionSpec::boolean(
                ids::INCLUDE_BOILERPLATE,
                "Include boilerplate",
                false,
                "Include class definition and import statements in snippet",
            ),
        ]
    }

    fn render(&self, request: &Request, options: &ResolvedOptions) -> String {
        let body = request.effective_body();
        let mut w = CodeWriter::new(options.indent_unit());

        let boilerplate = options.flag(ids::INCLUDE_BOILERPLATE);
        if boilerplate {
            if matches!(body, Some(RequestBody::File { .. })) {
                w.line("import 'dart:io';");
            }
            w.line("import 'package:http/http.dart' as http;");
            w.blank();
            w.open("void main() async {");
        }

        let has_headers = write_headers(&mut w, request);
        let timeout = options.number(ids::REQUEST_TIMEOUT);
        let trim = options.flag(ids::TRIM_REQUEST_BODY);
        let url = escape_dart(&encode_uri(&request.url), false);

        match body {
            Some(RequestBody::FormData { fields }) => {
                write_multipart(&mut w, request, &url, fields, has_headers, trim);
                write_streamed_send(&mut w, "request", timeout);
            }
            body => {
                let has_body = match body {
                    Some(body) => {
                        write_body(&mut w, body, trim);
                        true
                    }
                    None => false,
                };
                match shorthand(&request.method, has_body) {
                    Some(function) => {
                        let mut args = format!("Uri.parse('{url}')");
                        if has_headers {
                            args.push_str(", headers: headers");
                        }
                        if has_body {
                            args.push_str(", body: body");
                        }
                        write_shorthand_send(&mut w, function, &args, timeout);
                    }
                    None => {
                        w.line(format!(
                            "var request = http.Request('{}', Uri.parse('{url}'));",
                            escape_dart(request.method.as_str(), false)
                        ));
                        match body {
                            Some(RequestBody::File { .. }) => w.line("request.bodyBytes = body;"),
                            Some(RequestBody::UrlEncoded { .. }) => w.line("request.bodyFields = body;"),
                            Some(_) => w.line("request.body = body;"),
                            None => {}
                        }
                        if has_headers {
                            w.line("request.headers.addAll(headers);");
                        }
                        write_streamed_send(&mut w, "request", timeout);
                    }
                }
            }
        }

        if boilerplate {
            w.close("}");
        }
        w.finish()
    }
}

/// Returns the `http.<function>` helper for a method, if the package has one
/// that can carry the request.
const fn shorthand(method: &HttpMethod, has_body: bool) -> Option<&'static str> {
    match method {
        HttpMethod::Post => Some("post"),
        HttpMethod::Put => Some("put"),
        HttpMethod::Patch => Some("patch"),
        HttpMethod::Delete => Some("delete"),
        HttpMethod::Get if !has_body => Some("get"),
        HttpMethod::Head if !has_body => Some("head"),
        _ => None,
    }
}

fn write_headers(w: &mut CodeWriter, request: &Request) -> bool {
    let mut entries: Vec<String> = request
        .headers
        .enabled_except_content_type()
        .map(|h| format!("'{}': '{}'", escape_dart(&h.key, false), escape_dart(&h.value, false)))
        .collect();

    let multipart = matches!(request.effective_body(), Some(RequestBody::FormData { .. }));
    if let Some(ct) = request.content_type().filter(|_| !multipart) {
        entries.push(format!("'Content-Type': '{}'", escape_dart(ct, false)));
    }
    if entries.is_empty() {
        return false;
    }

    w.open("var headers = {");
    write_entries(w, &entries);
    w.close("};");
    true
}

/// Writes map literal entries, comma separated, one per line.
fn write_entries(w: &mut CodeWriter, entries: &[String]) {
    let last = entries.len().saturating_sub(1);
    for (i, entry) in entries.iter().enumerate() {
        if i == last {
            w.line(entry);
        } else {
            w.line(format!("{entry},"));
        }
    }
}

fn write_body(w: &mut CodeWriter, body: &RequestBody, trim: bool) {
    match body {
        RequestBody::Raw { content, .. } => {
            w.line(format!(
                "var body = '''{}''';",
                escape_dart(trimmed(content, trim), true)
            ));
        }
        RequestBody::GraphQl { query, variables } => {
            let payload = graphql_payload(trimmed(query, trim), variables);
            w.line(format!("var body = '''{}''';", escape_dart(&payload, true)));
        }
        RequestBody::UrlEncoded { fields } => {
            let entries: Vec<String> = urlencoded_pairs(fields, trim)
                .into_iter()
                .map(|(key, value)| {
                    format!("'{}': '{}'", escape_dart(key, false), escape_dart(value, false))
                })
                .collect();
            w.open("var body = {");
            write_entries(w, &entries);
            w.close("};");
        }
        RequestBody::File { src } => {
            w.line(format!(
                "var body = await File('{}').readAsBytes();",
                escape_dart(src.as_deref().unwrap_or(PLACEHOLDER_FILE), false)
            ));
        }
        RequestBody::FormData { .. } => {}
    }
}

fn write_multipart(
    w: &mut CodeWriter,
    request: &Request,
    url: &str,
    params: &[FormDataParam],
    has_headers: bool,
    trim: bool,
) {
    w.line(format!(
        "var request = http.MultipartRequest('{}', Uri.parse('{url}'));",
        escape_dart(request.method.as_str(), false)
    ));

    let fields = form_fields(params, trim);
    let texts: Vec<String> = fields
        .iter()
        .filter_map(|field| match field {
            FormField::Text { key, value, .. } => Some(format!(
                "'{}': '{}'",
                escape_dart(key, false),
                escape_dart(value, false)
            )),
            FormField::File { .. } => None,
        })
        .collect();
    if !texts.is_empty() {
        w.open("request.fields.addAll({");
        write_entries(w, &texts);
        w.close("});");
    }
    for field in &fields {
        if let FormField::File { key, src, .. } = field {
            w.line(format!(
                "request.files.add(await http.MultipartFile.fromPath('{}', '{}'));",
                escape_dart(key, false),
                escape_dart(src, false)
            ));
        }
    }
    if has_headers {
        w.line("request.headers.addAll(headers);");
    }
}

fn write_shorthand_send(w: &mut CodeWriter, function: &str, args: &str, timeout: u64) {
    if timeout > 0 {
        let depth = w.depth();
        w.line("final response = await http");
        w.set_depth(depth + 1);
        w.line(format!(".{function}({args})"));
        w.line(format!(".timeout(Duration(milliseconds: {timeout}));"));
        w.set_depth(depth);
    } else {
        w.line(format!("final response = await http.{function}({args});"));
    }
    write_status_check(w, "response.body");
}

fn write_streamed_send(w: &mut CodeWriter, request: &str, timeout: u64) {
    let timeout = if timeout > 0 {
        format!(".timeout(Duration(milliseconds: {timeout}))")
    } else {
        String::new()
    };
    w.line(format!(
        "http.StreamedResponse response = await {request}.send(){timeout};"
    ));
    write_status_check(w, "await response.stream.bytesToString()");
}

fn write_status_check(w: &mut CodeWriter, success: &str) {
    w.open("if (response.statusCode == 200) {");
    w.line(format!("print({success});"));
    w.close("}");
    w.open("else {");
    w.line("print(response.reasonPhrase);");
    w.close("}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use snipgen_domain::{FormParam, Header, RawOptions};

    fn opts(value: serde_json::Value) -> RawOptions {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_raw_post() {
        let request = Request::post("https://postman-echo.com/post")
            .with_header(Header::new("Content-Type", "text/plain"))
            .with_body(RequestBody::raw("hello"));
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());

        assert_eq!(
            snippet,
            "var headers = {\n  'Content-Type': 'text/plain'\n};\n\
             var body = '''hello''';\n\
             final response = await http.post(Uri.parse('https://postman-echo.com/post'), headers: headers, body: body);\n\
             if (response.statusCode == 200) {\n  print(response.body);\n}\n\
             else {\n  print(response.reasonPhrase);\n}\n"
        );
    }

    #[test]
    fn test_boilerplate_wraps_in_main() {
        let request = Request::get("https://example.com");
        let snippet = DartHttpConverter.generate(
            &request,
            &opts(json!({"includeBoilerplate": true, "indentType": "Tab", "indentCount": 1})),
        );
        assert!(snippet.starts_with(
            "import 'package:http/http.dart' as http;\n\nvoid main() async {\n\tfinal response = await http.get(Uri.parse('https://example.com'));\n"
        ));
        assert!(snippet.ends_with("\t}\n}\n"));
    }

    #[test]
    fn test_timeout_chain() {
        let request = Request::get("https://example.com");
        let snippet = DartHttpConverter.generate(&request, &opts(json!({"requestTimeout": 5000})));
        assert!(snippet.starts_with(
            "final response = await http\n  .get(Uri.parse('https://example.com'))\n  .timeout(Duration(milliseconds: 5000));\nif"
        ));
    }

    #[test]
    fn test_multipart_with_several_files() {
        let request = Request::post("https://example.com").with_body(RequestBody::form_data([
            FormDataParam::text("name", "it's"),
            FormDataParam::text("off", "x").into_disabled(),
            FormDataParam::files("docs", ["/a.txt".to_string(), "/b.txt".to_string()]),
            FormDataParam::files("missing", Vec::new()),
        ]));
        let snippet = DartHttpConverter.generate(&request, &opts(json!({"requestTimeout": 10})));

        assert!(snippet.contains("var request = http.MultipartRequest('POST', Uri.parse('https://example.com'));"));
        assert!(snippet.contains("request.fields.addAll({\n  'name': 'it\\'s'\n});"));
        assert!(!snippet.contains("'off'"));
        assert!(snippet.contains("http.MultipartFile.fromPath('docs', '/a.txt')"));
        assert!(snippet.contains("http.MultipartFile.fromPath('docs', '/b.txt')"));
        assert!(snippet.contains("http.MultipartFile.fromPath('missing', '/path/to/file')"));
        assert!(snippet.contains(
            "http.StreamedResponse response = await request.send().timeout(Duration(milliseconds: 10));"
        ));
    }

    #[test]
    fn test_urlencoded_trimmed() {
        let request = Request::post("https://example.com").with_body(RequestBody::urlencoded([
            FormParam::new(" a ", " 1 "),
            FormParam::new("b", "$2"),
        ]));
        let snippet = DartHttpConverter.generate(&request, &opts(json!({"trimRequestBody": true})));
        assert!(snippet.contains("var body = {\n  'a': '1',\n  'b': '\\$2'\n};"));
        assert!(snippet.contains("'Content-Type': 'application/x-www-form-urlencoded'"));
    }

    #[test]
    fn test_graphql_invalid_variables() {
        let request = Request::post("https://example.com")
            .with_body(RequestBody::graphql("{ hero { name } }", "{oops"));
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains(r#"var body = '''{"query":"{ hero { name } }","variables":{}}''';"#));
        assert!(snippet.contains("'Content-Type': 'application/json'"));
    }

    #[test]
    fn test_custom_method_uses_request_object() {
        let request = Request::new(HttpMethod::Custom("PROPFIND".to_string()), "https://example.com/a b");
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("var request = http.Request('PROPFIND', Uri.parse('https://example.com/a%20b'));"));
        assert!(snippet.contains("http.StreamedResponse response = await request.send();"));
    }

    #[test]
    fn test_get_with_urlencoded_body_sets_body_fields() {
        let request = Request::get("https://example.com")
            .with_body(RequestBody::urlencoded([FormParam::new("a", "1")]));
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("var body = {\n  'a': '1'\n};\nvar request = http.Request('GET', Uri.parse('https://example.com'));\nrequest.bodyFields = body;\n"));
        assert!(!snippet.contains("request.body = body;"));
    }

    #[test]
    fn test_get_with_raw_body_sets_body() {
        let request = Request::get("https://example.com").with_body(RequestBody::raw("hi"));
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());
        assert!(snippet.contains("request.body = body;"));
    }

    #[test]
    fn test_empty_raw_body_declares_no_content_type() {
        let request = Request::post("https://example.com").with_body(RequestBody::raw(""));
        let snippet = DartHttpConverter.generate(&request, &RawOptions::new());
        assert!(!snippet.contains("Content-Type"));
        assert!(snippet.starts_with("final response = await http.post(Uri.parse('https://example.com'));"));
    }
}
