//! C# generator using `System.Net.Http.HttpClient`.

use std::collections::BTreeSet;

use snipgen_application::Converter;
use snipgen_domain::options::ids;
use snipgen_domain::{
    CodegenTarget, HttpMethod, OptionSpec, Request, RequestBody, ResolvedOptions,
};

use super::common::{
    CodeWriter, FormField, PLACEHOLDER_FILE, escape_double_quoted as esc, form_fields,
    graphql_payload, urlencoded_pairs,
};

/// Converter for the `csharp-httpclient` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsharpHttpClientConverter;

impl Converter for CsharpHttpClientConverter {
    fn target(&self) -> CodegenTarget {
        CodegenTarget::CsharpHttpclient
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
                &["Tab", "Space"],
                "Space",
                "Select the character used to indent lines of code",
            ),
            OptionSpec::positive_integer(
                ids::REQUEST_TIMEOUT,
                "Set request timeout",
                0,
                "Set number of seconds the request should wait for a response before timing out (use 0 for infinity)",
            ),
            OptionSpec::boolean(
                ids::FOLLOW_REDIRECT,
                "Follow redirects",
                true,
                "Automatically follow HTTP redirects",
            ),
        ]
    }

    fn render(&self, request: &Request, options: &ResolvedOptions) -> String {
        let mut usings = Usings::default();
        let statements = statements(request, options, &mut usings);

        let mut w = CodeWriter::new(options.indent_unit());
        if options.flag(ids::INCLUDE_BOILERPLATE) {
            for namespace in &usings.0 {
                w.line(format!("using {namespace};"));
            }
            w.line("namespace HelloWorldApplication");
            w.open("{");
            w.line("public class Program");
            w.open("{");
            w.line("static async Task Main(string[] args)");
            w.open("{");
            for statement in &statements {
                w.line(statement);
            }
            w.close("}");
            w.close("}");
            w.close("}");
        } else {
            for statement in &statements {
                w.line(statement);
            }
        }
        w.finish()
    }
}

/// Namespaces the snippet needs, kept sorted and unique.
#[derive(Debug)]
struct Usings(BTreeSet<&'static str>);

impl Default for Usings {
    fn default() -> Self {
        Self(BTreeSet::from([
            "System",
            "System.Net.Http",
            "System.Threading.Tasks",
        ]))
    }
}

impl Usings {
    fn add(&mut self, namespace: &'static str) {
        self.0.insert(namespace);
    }
}

fn statements(request: &Request, options: &ResolvedOptions, usings: &mut Usings) -> Vec<String> {
    let mut lines = Vec::new();

    if options.flag(ids::FOLLOW_REDIRECT) {
        lines.push("var client = new HttpClient();".to_string());
    } else {
        lines.push("var handler = new HttpClientHandler();".to_string());
        lines.push("handler.AllowAutoRedirect = false;".to_string());
        lines.push("var client = new HttpClient(handler);".to_string());
    }
    let timeout = options.number(ids::REQUEST_TIMEOUT);
    if timeout > 0 {
        lines.push(format!("client.Timeout = TimeSpan.FromSeconds({timeout});"));
    }

    lines.push(format!(
        "var request = new HttpRequestMessage({}, \"{}\");",
        method_expr(&request.method),
        esc(&request.url)
    ));
    for header in request.headers.enabled_except_content_type() {
        lines.push(format!(
            "request.Headers.Add(\"{}\", \"{}\");",
            esc(&header.key),
            esc(&header.value)
        ));
    }

    let content_type = request.content_type();
    match request.effective_body() {
        Some(body) => body_statements(body, content_type, &mut lines, usings),
        None => {
            if let Some(ct) = request.headers.content_type() {
                usings.add("System.Net.Http.Headers");
                lines.push("var content = new StringContent(string.Empty);".to_string());
                lines.push(format!(
                    "content.Headers.ContentType = new MediaTypeHeaderValue(\"{}\");",
                    esc(ct)
                ));
                lines.push("request.Content = content;".to_string());
            }
        }
    }

    lines.push("var response = await client.SendAsync(request);".to_string());
    lines.push("response.EnsureSuccessStatusCode();".to_string());
    lines.push("Console.WriteLine(await response.Content.ReadAsStringAsync());".to_string());
    lines
}

fn method_expr(method: &HttpMethod) -> String {
    match method {
        HttpMethod::Get => "HttpMethod.Get".to_string(),
        HttpMethod::Post => "HttpMethod.Post".to_string(),
        HttpMethod::Put => "HttpMethod.Put".to_string(),
        HttpMethod::Patch => "HttpMethod.Patch".to_string(),
        HttpMethod::Delete => "HttpMethod.Delete".to_string(),
        HttpMethod::Head => "HttpMethod.Head".to_string(),
        HttpMethod::Options => "HttpMethod.Options".to_string(),
        HttpMethod::Custom(name) => format!("new HttpMethod(\"{}\")", esc(name)),
    }
}

fn string_content(text: &str, content_type: Option<&str>) -> String {
    match content_type {
        Some(ct) => format!(
            "var content = new StringContent(\"{}\", null, \"{}\");",
            esc(text),
            esc(ct)
        ),
        None => format!("var content = new StringContent(\"{}\");", esc(text)),
    }
}

fn body_statements(
    body: &RequestBody,
    content_type: Option<&str>,
    lines: &mut Vec<String>,
    usings: &mut Usings,
) {
    match body {
        RequestBody::Raw { content, .. } => {
            lines.push(string_content(content, content_type));
        }
        RequestBody::GraphQl { query, variables } => {
            lines.push(string_content(&graphql_payload(query, variables), content_type));
        }
        RequestBody::UrlEncoded { fields } => {
            usings.add("System.Collections.Generic");
            lines.push("var collection = new List<KeyValuePair<string, string>>();".to_string());
            for (key, value) in urlencoded_pairs(fields, false) {
                lines.push(format!("collection.Add(new(\"{}\", \"{}\"));", esc(key), esc(value)));
            }
            lines.push("var content = new FormUrlEncodedContent(collection);".to_string());
        }
        RequestBody::FormData { fields } => {
            lines.push("var content = new MultipartFormDataContent();".to_string());
            let mut file_parts = 0;
            for field in form_fields(fields, false) {
                match field {
                    FormField::Text {
                        key,
                        value,
                        content_type,
                    } => {
                        let part = match content_type {
                            Some(ct) => format!(
                                "new StringContent(\"{}\", null, \"{}\")",
                                esc(value),
                                esc(ct)
                            ),
                            None => format!("new StringContent(\"{}\")", esc(value)),
                        };
                        lines.push(format!("content.Add({part}, \"{}\");", esc(key)));
                    }
                    FormField::File {
                        key,
                        src,
                        content_type: None,
                    } => {
                        usings.add("System.IO");
                        lines.push(format!(
                            "content.Add(new StreamContent(File.OpenRead(\"{src}\")), \"{key}\", \"{src}\");",
                            src = esc(src),
                            key = esc(key)
                        ));
                    }
                    FormField::File {
                        key,
                        src,
                        content_type: Some(ct),
                    } => {
                        usings.add("System.IO");
                        usings.add("System.Net.Http.Headers");
                        file_parts += 1;
                        let part = format!("filePart{file_parts}");
                        lines.push(format!(
                            "var {part} = new StreamContent(File.OpenRead(\"{}\"));",
                            esc(src)
                        ));
                        lines.push(format!(
                            "{part}.Headers.ContentType = new MediaTypeHeaderValue(\"{}\");",
                            esc(ct)
                        ));
                        lines.push(format!(
                            "content.Add({part}, \"{}\", \"{}\");",
                            esc(key),
                            esc(src)
                        ));
                    }
                }
            }
        }
        RequestBody::File { src } => {
            usings.add("System.IO");
            usings.add("System.Net.Http.Headers");
            lines.push(format!(
                "var content = new StreamContent(File.OpenRead(\"{}\"));",
                esc(src.as_deref().unwrap_or(PLACEHOLDER_FILE))
            ));
            if let Some(ct) = content_type {
                lines.push(format!(
                    "content.Headers.ContentType = new MediaTypeHeaderValue(\"{}\");",
                    esc(ct)
                ));
            }
        }
    }
    lines.push("request.Content = content;".to_string());
}
