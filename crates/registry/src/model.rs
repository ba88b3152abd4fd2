use org_core_types::{Namespace, RequestContext};
#[cfg(test)]
use org_kv_store::Record;
use serde::{Deserialize, Deserializer, Serialize};

/// Value persisted per organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Seconds since the Unix epoch, decimal string.
    pub created_at: String,
}

impl OrganizationRecord {
    pub fn now() -> Self {
        Self {
            created_at: chrono::Utc::now().timestamp().to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn decode(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(&record.value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub namespace: Option<String>,
}

impl Options {
    /// The explicit namespace when one is given and non-empty, otherwise the
    /// ambient namespace of the request.
    pub fn effective_namespace(&self, ctx: &RequestContext) -> Namespace {
        match self.namespace.as_deref().map(str::trim) {
            Some(ns) if !ns.is_empty() => Namespace::new(ns),
            _ => ctx.namespace().clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Options,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl OrgRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::default(),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.options.namespace = Some(namespace.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
}

impl OrgResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created: String::new(),
        }
    }
}
