//! Dotted-path lookup into a data-binding context.
//!
//! A binding context is any JSON document; `user.company` walks
//! `context["user"]["company"]`. Lookups never fail: a missing key or a
//! scalar in the middle of the path yields `None`.

use serde_json::Value;

/// Arbitrarily nested mapping of scalars addressed by binding paths.
pub type BindingContext = Value;

/// Resolve a dotted path against a context.
///
/// Returns `None` when the path is absent or empty, a key is missing, or an
/// intermediate value is not an object. Array segments accept decimal indices.
#[must_use]
pub fn resolve<'a>(path: Option<&str>, context: &'a BindingContext) -> Option<&'a Value> {
    let path = path.filter(|p| !p.is_empty())?;
    path.split('.').try_fold(context, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Resolve a path and render it as text if it is a string or a number.
///
/// Booleans, nulls, and containers resolve to `None` so callers fall through
/// to literal content.
#[must_use]
pub fn resolve_text(path: Option<&str>, context: &BindingContext) -> Option<String> {
    match resolve(path, context)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        _ => None,
    }
}

/// Format a JSON number the way a host would print it (`5.0` prints as `5`).
#[must_use]
pub fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(String::new, |f| f.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_path() {
        let ctx = json!({ "user": { "company": "Acme", "age": 41 } });
        assert_eq!(resolve(Some("user.company"), &ctx), Some(&json!("Acme")));
        assert_eq!(resolve(Some("user.age"), &ctx), Some(&json!(41)));
        assert_eq!(resolve(Some("user"), &ctx), Some(&ctx["user"]));
    }

    #[test]
    fn test_resolve_short_circuits() {
        let ctx = json!({ "user": { "name": "Alice" }, "flag": true });
        assert!(resolve(None, &ctx).is_none());
        assert!(resolve(Some(""), &ctx).is_none());
        assert!(resolve(Some("user.missing"), &ctx).is_none());
        assert!(resolve(Some("user.name.first"), &ctx).is_none());
        assert!(resolve(Some("flag.value"), &ctx).is_none());
        assert!(resolve(Some("user.name"), &json!(null)).is_none());
    }

    #[test]
    fn test_resolve_array_index() {
        let ctx = json!({ "phones": ["111", "222"] });
        assert_eq!(resolve(Some("phones.1"), &ctx), Some(&json!("222")));
        assert!(resolve(Some("phones.x"), &ctx).is_none());
        assert!(resolve(Some("phones.9"), &ctx).is_none());
    }

    #[test]
    fn test_resolve_text_scalars_only() {
        let ctx = json!({
            "name": "Alice",
            "count": 3,
            "ratio": 2.5,
            "whole": 4.0,
            "ok": true,
            "none": null,
            "nested": { "a": 1 }
        });
        assert_eq!(resolve_text(Some("name"), &ctx).as_deref(), Some("Alice"));
        assert_eq!(resolve_text(Some("count"), &ctx).as_deref(), Some("3"));
        assert_eq!(resolve_text(Some("ratio"), &ctx).as_deref(), Some("2.5"));
        assert_eq!(resolve_text(Some("whole"), &ctx).as_deref(), Some("4"));
        assert!(resolve_text(Some("ok"), &ctx).is_none());
        assert!(resolve_text(Some("none"), &ctx).is_none());
        assert!(resolve_text(Some("nested"), &ctx).is_none());
    }
}
