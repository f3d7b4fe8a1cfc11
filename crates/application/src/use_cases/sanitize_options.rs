//! Option sanitizing use case.

use snipgen_domain::{OptionSpec, RawOptions, ResolvedOptions};

/// Reconciles raw user options with a converter's option schema.
///
/// The result holds exactly the ids declared in `specs`, in schema order.
/// A value is kept when [`OptionSpec::accept`] takes it; a missing,
/// mistyped, out-of-range or unlisted value is replaced by the spec default.
/// Keys that no spec declares are dropped.
#[must_use]
pub fn sanitize_options(raw: &RawOptions, specs: &[OptionSpec]) -> ResolvedOptions {
    for key in raw.keys() {
        if !specs.iter().any(|spec| spec.id == *key) {
            tracing::debug!(option = %key, "dropping unknown option");
        }
    }

    specs
        .iter()
        .map(|spec| {
            let value = match raw.get(&spec.id) {
                None => spec.default.clone(),
                Some(value) => spec.accept(value).unwrap_or_else(|| {
                    tracing::debug!(
                        option = %spec.id,
                        given = %value,
                        "invalid option value, using default"
                    );
                    spec.default.clone()
                }),
            };
            (spec.id.clone(), value)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use snipgen_domain::OptionValue;
    use snipgen_domain::options::ids;

    fn specs() -> Vec<OptionSpec> {
        vec![
            OptionSpec::boolean(ids::INCLUDE_BOILERPLATE, "Include boilerplate", false, "d"),
            OptionSpec::positive_integer(ids::INDENT_COUNT, "Set indentation count", 2, "d"),
            OptionSpec::enumeration(ids::INDENT_TYPE, "Set indentation type", &["Tab", "Space"], "Space", "d"),
            OptionSpec::positive_integer(ids::REQUEST_TIMEOUT, "Set request timeout", 0, "d"),
            OptionSpec::boolean(ids::FOLLOW_REDIRECT, "Follow redirects", true, "d"),
            OptionSpec::string("clientName", "Client name", "client", "d"),
        ]
    }

    fn raw(value: Value) -> RawOptions {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let specs = specs();
        let resolved = sanitize_options(&RawOptions::new(), &specs);
        assert_eq!(resolved, ResolvedOptions::defaults(&specs));
        let ids: Vec<_> = resolved.ids().collect();
        assert_eq!(
            ids,
            [
                "includeBoilerplate",
                "indentCount",
                "indentType",
                "requestTimeout",
                "followRedirect",
                "clientName"
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let resolved = sanitize_options(&raw(json!({"randomName": "random value"})), &specs());
        assert!(resolved.get("randomName").is_none());
        assert_eq!(resolved.len(), specs().len());
    }

    #[test]
    fn test_type_mismatch_uses_defaults() {
        let resolved = sanitize_options(
            &raw(json!({
                "indentCount": "5",
                "indentType": "tabSpace",
                "includeBoilerplate": "true",
                "clientName": 7
            })),
            &specs(),
        );
        assert_eq!(resolved.number(ids::INDENT_COUNT), 2);
        assert_eq!(resolved.choice(ids::INDENT_TYPE), "Space");
        assert!(!resolved.flag(ids::INCLUDE_BOILERPLATE));
        assert_eq!(resolved.choice("clientName"), "client");
    }

    #[test]
    fn test_invalid_values_use_defaults() {
        let resolved = sanitize_options(
            &raw(json!({
                "indentCount": -1,
                "indentType": "spaceTab",
                "requestTimeout": -3000
            })),
            &specs(),
        );
        assert_eq!(resolved.number(ids::INDENT_COUNT), 2);
        assert_eq!(resolved.choice(ids::INDENT_TYPE), "Space");
        assert_eq!(resolved.number(ids::REQUEST_TIMEOUT), 0);
    }

    #[test]
    fn test_valid_values_round_trip() {
        let input = raw(json!({
            "includeBoilerplate": true,
            "indentCount": 3,
            "indentType": "Tab",
            "requestTimeout": 3000,
            "followRedirect": false,
            "clientName": "api"
        }));
        let resolved = sanitize_options(&input, &specs());
        assert_eq!(resolved.to_raw(), input);
        assert_eq!(resolved.get(ids::INDENT_TYPE), Some(&OptionValue::from("Tab")));
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let resolved = sanitize_options(&raw(json!({"indentType": "tab"})), &specs());
        assert_eq!(resolved.choice(ids::INDENT_TYPE), "Space");
    }
}
