//! C# generator for .NET Core, emitting the body of a `Request()` method.
//!
//! Statements always sit three levels deep (namespace, class, method) so the
//! snippet can be pasted into the scaffold whether or not it was generated
//! with boilerplate.

use snipgen_application::Converter;
use snipgen_domain::options::ids;
use snipgen_domain::{
    CodegenTarget, HttpMethod, OptionSpec, Request, RequestBody, ResolvedOptions,
};

use super::common::{
    CodeWriter, FormField, PLACEHOLDER_FILE, escape_double_quoted as esc, form_fields,
    graphql_payload, trimmed, urlencoded_payload,
};

const STATEMENT_DEPTH: usize = 3;

/// Converter for the `csharp-dotnetcore` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsharpDotNetCoreConverter;

impl Converter for CsharpDotNetCoreConverter {
    fn target(&self) -> CodegenTarget {
        CodegenTarget::CsharpDotnetcore
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::boolean(
                ids::INCLUDE_BOILERPLATE,
                "Include boilerplate",
                false,
                "Include class definition and import statements in snippet",
            ),
            OptionSpec::indent_count(2),
            OptionSpec::enumeration(
                ids::INDENT_TYPE,
                "Set indentation type",
                &["tab", "space"],
                "space",
                "Select the character used to indent lines of code",
            ),
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
        let boilerplate = options.flag(ids::INCLUDE_BOILERPLATE);
        let mut w = CodeWriter::new(options.indent_unit());

        if boilerplate {
            w.line("using System;");
            w.line("using System.Net.Http;");
            w.open("namespace HelloWorldApplication {");
            w.open("class Program {");
            w.open("static void Main(string[] args) {");
            w.line("Request().Wait();");
            w.close("}");
            w.open("static async System.Threading.Tasks.Task Request() {");
        } else {
            w.set_depth(STATEMENT_DEPTH);
        }

        write_statements(&mut w, request, options);

        if boilerplate {
            w.close("}");
            w.close("}");
            w.close("}");
        }
        w.finish()
    }
}

fn write_statements(w: &mut CodeWriter, request: &Request, options: &ResolvedOptions) {
    let trim = options.flag(ids::TRIM_REQUEST_BODY);

    w.line("var clientHandler = new HttpClientHandler();");
    if !options.flag(ids::FOLLOW_REDIRECT) {
        w.line("clientHandler.AllowAutoRedirect = false;");
    }
    w.line("var client = new HttpClient(clientHandler);");
    let timeout = options.number(ids::REQUEST_TIMEOUT);
    if timeout > 0 {
        w.line(format!("client.Timeout = TimeSpan.FromMilliseconds({timeout});"));
    }

    w.open("var request = new HttpRequestMessage {");
    w.line(format!("Method = {},", method_expr(&request.method)));
    w.line(format!("RequestUri = new Uri(\"{}\"),", esc(&request.url)));
    w.close("};");

    for header in request.headers.enabled_except_content_type() {
        w.line(format!(
            "request.Headers.Add(\"{}\", \"{}\");",
            esc(&header.key),
            esc(&header.value)
        ));
    }

    if let Some(body) = request.effective_body() {
        let content_type = request.content_type().unwrap_or("text/plain");
        write_body(w, body, content_type, trim);
    }

    w.line("var response = await client.SendAsync(request);");
    w.line("response.EnsureSuccessStatusCode();");
    w.line("Console.WriteLine(await response.Content.ReadAsStringAsync());");
}

fn method_expr(method: &HttpMethod) -> String {
    match method {
        HttpMethod::Custom(name) => format!("new HttpMethod(\"{}\")", esc(name)),
        standard => {
            let name = standard.as_str();
            let mut chars = name.chars();
            let pascal: String = chars
                .next()
                .into_iter()
                .chain(chars.flat_map(char::to_lowercase))
                .collect();
            format!("HttpMethod.{pascal}")
        }
    }
}

fn string_content(w: &mut CodeWriter, text: &str, content_type: &str) {
    w.line(format!(
        "request.Content = new StringContent(\"{}\", System.Text.Encoding.UTF8, \"{}\");",
        esc(text),
        esc(content_type)
    ));
}

fn write_body(w: &mut CodeWriter, body: &RequestBody, content_type: &str, trim: bool) {
    match body {
        RequestBody::Raw { content, .. } => string_content(w, trimmed(content, trim), content_type),
        RequestBody::UrlEncoded { fields } => {
            string_content(w, &urlencoded_payload(fields, trim), content_type);
        }
        RequestBody::GraphQl { query, variables } => {
            let payload = graphql_payload(trimmed(query, trim), variables);
            string_content(w, &payload, content_type);
        }
        RequestBody::FormData { fields } => {
            w.line("var content = new MultipartFormDataContent();");
            for field in form_fields(fields, trim) {
                match field {
                    FormField::Text { key, value, .. } => w.line(format!(
                        "content.Add(new StringContent(\"{}\"), \"{}\");",
                        esc(value),
                        esc(key)
                    )),
                    FormField::File { key, src, .. } => w.line(format!(
                        "content.Add(new StreamContent(System.IO.File.OpenRead(\"{src}\")), \"{key}\", \"{src}\");",
                        src = esc(src),
                        key = esc(key)
                    )),
                }
            }
            w.line("request.Content = content;");
        }
        RequestBody::File { src } => {
            w.line(format!(
                "request.Content = new StreamContent(System.IO.File.OpenRead(\"{}\"));",
                esc(src.as_deref().unwrap_or(PLACEHOLDER_FILE))
            ));
        }
    }
}
