//! Postman to Snipgen Mapping Logic
//!
//! This module converts Postman Collection types to domain [`Request`]s.
//! Disabled entries are carried over with `enabled = false`; the converters
//! skip them when rendering.

use std::str::FromStr;

use serde::Serialize;
use snipgen_domain::{
    BodyMode, FormDataParam, FormParam, Header, HttpMethod, Request, RequestBody,
};

use super::types::{PostmanBody, PostmanCollection, PostmanHeader, PostmanItem, PostmanRequest};
use super::warning::ImportWarning;

/// A request taken from a collection, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedRequest {
    /// Item name
    pub name: String,
    /// Slash-separated folder path including the item name
    pub path: String,
    /// The mapped request
    pub request: Request,
}

/// Result of mapping a collection
#[derive(Debug, Clone, Default)]
pub struct MappedCollection {
    /// Collection name
    pub name: String,
    /// Requests in depth-first order
    pub requests: Vec<ImportedRequest>,
    /// Everything that could not be carried over
    pub warnings: Vec<ImportWarning>,
}

/// Map HTTP method, falling back to GET for tokens that are not methods
pub fn map_http_method(method: &str, path: &str, warnings: &mut Vec<ImportWarning>) -> HttpMethod {
    HttpMethod::from_str(method).unwrap_or_else(|e| {
        warnings.push(ImportWarning::warning(path, format!("{e}, using GET")));
        HttpMethod::Get
    })
}

/// Map headers from Postman format
pub fn map_headers(headers: &[PostmanHeader], path: &str, warnings: &mut Vec<ImportWarning>) -> Vec<Header> {
    let disabled_count = headers.iter().filter(|h| h.disabled).count();
    if disabled_count > 0 {
        warnings.push(ImportWarning::info(
            format!("{path}/headers"),
            format!("{disabled_count} disabled header(s) will not be rendered"),
        ));
    }

    headers
        .iter()
        .map(|h| {
            if h.disabled {
                Header::disabled(&h.key, &h.value)
            } else {
                Header::new(&h.key, &h.value)
            }
        })
        .collect()
}

/// Map request body
///
/// Unknown or missing modes yield no body and a warning.
pub fn map_body(body: Option<&PostmanBody>, path: &str, warnings: &mut Vec<ImportWarning>) -> Option<RequestBody> {
    let body = body?;
    let body_path = format!("{path}/body");
    if body.disabled {
        warnings.push(ImportWarning::info(&body_path, "Disabled body was skipped"));
        return None;
    }
    let mode = body.mode.as_deref()?;
    let mode = match BodyMode::from_str(mode) {
        Ok(mode) => mode,
        Err(_) => {
            warnings.push(ImportWarning::warning(
                &body_path,
                format!("Unknown body mode '{mode}' was skipped"),
            ));
            return None;
        }
    };

    let mapped = match mode {
        BodyMode::Raw => RequestBody::Raw {
            content: body.raw.clone().unwrap_or_default(),
            language: body.raw_language(),
        },
        BodyMode::UrlEncoded => RequestBody::urlencoded(body.urlencoded.iter().map(|p| {
            let value = p.value.clone().unwrap_or_default();
            if p.disabled {
                FormParam::disabled(&p.key, value)
            } else {
                FormParam::new(&p.key, value)
            }
        })),
        BodyMode::FormData => RequestBody::form_data(body.formdata.iter().map(|p| {
            let mut param = if p.param_type.as_deref() == Some("file") {
                FormDataParam::files(&p.key, p.src.paths())
            } else {
                FormDataParam::text(&p.key, p.value.clone().unwrap_or_default())
            };
            if let Some(ct) = p.content_type.as_deref().filter(|ct| !ct.is_empty()) {
                param = param.with_content_type(ct);
            }
            if p.disabled { param.into_disabled() } else { param }
        })),
        BodyMode::GraphQl => match &body.graphql {
            Some(gql) => RequestBody::graphql(&gql.query, gql.variables_text()),
            None => RequestBody::graphql("", ""),
        },
        BodyMode::File => RequestBody::File {
            src: body.file.as_ref().and_then(|f| f.src.clone()),
        },
    };
    Some(mapped)
}

/// Map a single Postman request
pub fn map_postman_request(request: &PostmanRequest, path: &str) -> (Request, Vec<ImportWarning>) {
    let mut warnings = Vec::new();

    if request.auth.is_some() {
        warnings.push(ImportWarning::info(
            path,
            "Request auth is not rendered into snippets and was skipped",
        ));
    }

    let mut mapped = Request::new(
        map_http_method(&request.method, path, &mut warnings),
        request.url.raw(),
    );
    if !mapped.has_variables()
        && let Err(e) = mapped.parse_url()
    {
        warnings.push(ImportWarning::info(path, e.to_string()));
    }
    for header in map_headers(&request.header, path, &mut warnings) {
        mapped.headers.add(header);
    }
    mapped.body = map_body(request.body.as_ref(), path, &mut warnings);

    (mapped, warnings)
}

/// Map a single Postman item (recursively handles folders)
fn map_postman_item(
    item: &PostmanItem,
    path: &str,
    depth: usize,
    max_depth: usize,
    out: &mut MappedCollection,
) {
    let current_path = if path.is_empty() {
        item.name.clone()
    } else {
        format!("{path}/{}", item.name)
    };

    if !item.event.is_empty() {
        out.warnings.push(ImportWarning::info(
            &current_path,
            "Scripts (pre-request/test) are not supported and were skipped",
        ));
    }

    if let Some(sub_items) = &item.item {
        if depth >= max_depth {
            out.warnings.push(ImportWarning::warning(
                &current_path,
                format!("Folder exceeds maximum depth of {max_depth} and was skipped"),
            ));
            return;
        }
        for sub_item in sub_items {
            map_postman_item(sub_item, &current_path, depth + 1, max_depth, out);
        }
        return;
    }

    if let Some(request) = &item.request {
        let (mapped, warnings) = map_postman_request(request, &current_path);
        out.warnings.extend(warnings);
        out.requests.push(ImportedRequest {
            name: item.name.clone(),
            path: current_path,
            request: mapped,
        });
        return;
    }

    out.warnings.push(ImportWarning::info(
        &current_path,
        "Item has no request or sub-items and was skipped",
    ));
}

/// Map a complete Postman collection
pub fn map_postman_collection(collection: &PostmanCollection, max_depth: usize) -> MappedCollection {
    let mut out = MappedCollection {
        name: collection.info.name.clone(),
        ..MappedCollection::default()
    };
    for item in &collection.item {
        map_postman_item(item, "", 0, max_depth, &mut out);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snipgen_domain::FormDataValue;

    fn body(json: &str) -> PostmanBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_map_http_method() {
        let mut warnings = Vec::new();
        assert_eq!(map_http_method("get", "r", &mut warnings), HttpMethod::Get);
        assert_eq!(
            map_http_method("notNormal", "r", &mut warnings),
            HttpMethod::Custom("NOTNORMAL".to_string())
        );
        assert!(warnings.is_empty());
        assert_eq!(map_http_method("BAD METHOD", "r", &mut warnings), HttpMethod::Get);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_map_headers_keeps_disabled() {
        let headers = vec![
            PostmanHeader {
                key: "Content-Type".to_string(),
                value: "application/json".to_string(),
                disabled: false,
            },
            PostmanHeader {
                key: "X-Debug".to_string(),
                value: "true".to_string(),
                disabled: true,
            },
        ];

        let mut warnings = Vec::new();
        let mapped = map_headers(&headers, "r", &mut warnings);
        assert_eq!(mapped.len(), 2);
        assert!(mapped[0].enabled);
        assert!(!mapped[1].enabled);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_map_body_raw_keeps_language() {
        let mut warnings = Vec::new();
        let mapped = map_body(
            Some(&body(r#"{"mode": "raw", "raw": "{}", "options": {"raw": {"language": "json"}}}"#)),
            "r",
            &mut warnings,
        );
        assert_eq!(mapped, Some(RequestBody::json("{}")));
    }

    #[test]
    fn test_map_body_formdata_sources() {
        let mut warnings = Vec::new();
        let mapped = map_body(
            Some(&body(
                r#"{"mode": "formdata", "formdata": [
                    {"key": "docs", "type": "file", "src": ["/a", "/b"]},
                    {"key": "name", "value": "x", "type": "text", "disabled": true}
                ]}"#,
            )),
            "r",
            &mut warnings,
        )
        .unwrap();

        let RequestBody::FormData { fields } = mapped else {
            panic!("expected formdata");
        };
        assert_eq!(fields[0].value, FormDataValue::File(vec!["/a".to_string(), "/b".to_string()]));
        assert!(!fields[1].enabled);
    }

    #[test]
    fn test_map_body_unknown_mode_warns() {
        let mut warnings = Vec::new();
        let mapped = map_body(Some(&body(r#"{"mode": "binary"}"#)), "api/upload", &mut warnings);
        assert_eq!(mapped, None);
        assert_eq!(warnings[0].path, "api/upload/body");
        assert!(warnings[0].message.contains("'binary'"));
    }

    #[test]
    fn test_map_body_graphql_object_variables() {
        let mut warnings = Vec::new();
        let mapped = map_body(
            Some(&body(r#"{"mode": "graphql", "graphql": {"query": "{ a }", "variables": {"id": 2}}}"#)),
            "r",
            &mut warnings,
        );
        assert_eq!(mapped, Some(RequestBody::graphql("{ a }", r#"{"id":2}"#)));
    }
}
