//! Storage keys for pods in the backing store.
//!
//! Keys are namespaced paths: `{prefix}/{namespace}/{name}`. List keys omit
//! the name and, when no namespace is given, the namespace segment too.

use crate::error::{CoreError, CoreResult};

/// Default path under which pod definitions live.
pub const POD_PATH: &str = "/pods";

/// Build the directory key for a resource type, scoped to `namespace` if set.
pub fn list_key(prefix: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{prefix}/{ns}"),
        _ => prefix.to_string(),
    }
}

/// Build the key of a single item. Both namespace and id are required.
pub fn item_key(prefix: &str, namespace: &str, id: &str) -> CoreResult<String> {
    if namespace.is_empty() {
        return Err(CoreError::MissingNamespace);
    }
    if id.is_empty() {
        return Err(CoreError::MissingName);
    }
    Ok(format!("{}/{id}", list_key(prefix, Some(namespace))))
}

/// Directory key for pods in `namespace`.
pub fn pod_list_key(namespace: Option<&str>) -> String {
    list_key(POD_PATH, namespace)
}

/// Key for a single pod under the default pod path.
pub fn pod_key(namespace: &str, name: &str) -> CoreResult<String> {
    item_key(POD_PATH, namespace, name)
}
