//! CustomResourceDefinition document shape
//!
//! Only the fields needed to locate embedded schemas are decoded. Unknown
//! fields are ignored, missing or null fields take their empty value, and
//! schema payloads are kept as generic YAML values.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_yaml::Value;

use crate::schema::text_form;

/// One decoded YAML document in the CRD shape
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CrdDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub spec: CrdSpec,
}

/// The `spec` section of a CRD
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CrdSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub names: CrdNames,

    /// API group, e.g. `stable.example.com`
    #[serde(default, deserialize_with = "scalar_string")]
    pub group: String,

    /// Legacy single-version field
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,

    /// Multi-version records, in input order
    #[serde(default, deserialize_with = "nullable")]
    pub versions: Vec<CrdVersion>,

    /// Legacy top-level schema
    #[serde(default, deserialize_with = "nullable")]
    pub validation: CustomResourceValidation,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CrdNames {
    #[serde(default, deserialize_with = "scalar_string")]
    pub kind: String,
}

/// One entry of `spec.versions`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CrdVersion {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub schema: CustomResourceValidation,
}

/// Container holding an `openAPIV3Schema` payload
///
/// Shared by `spec.validation` and `spec.versions[].schema`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CustomResourceValidation {
    #[serde(rename = "openAPIV3Schema", default)]
    pub open_api_v3_schema: Option<Value>,
}

/// A schema located in a document, ready to be normalized and written
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedSchema {
    pub kind: String,
    pub group: String,
    pub version: String,
    pub payload: Value,
}

impl CrdDocument {
    /// Collect the schemas this document should produce
    ///
    /// Version records take precedence: when any exist, the legacy schema is
    /// ignored and each record with a non-null schema yields one entry. With
    /// no version records, the legacy schema yields at most one entry.
    pub fn into_schemas(self) -> Vec<ExtractedSchema> {
        let CrdSpec {
            names,
            group,
            version,
            versions,
            validation,
        } = self.spec;

        if !versions.is_empty() {
            return versions
                .into_iter()
                .filter_map(|record| {
                    record.schema.open_api_v3_schema.map(|payload| ExtractedSchema {
                        kind: names.kind.clone(),
                        group: group.clone(),
                        version: record.name,
                        payload,
                    })
                })
                .collect();
        }

        validation
            .open_api_v3_schema
            .map(|payload| ExtractedSchema {
                kind: names.kind,
                group,
                version,
                payload,
            })
            .into_iter()
            .collect()
    }
}

/// Deserialize a value, treating an explicit null as the default
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize any YAML scalar into its text form (`version: 1` is `"1"`)
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let mut value = Value::deserialize(deserializer)?;
    while let Value::Tagged(tagged) = value {
        value = tagged.value;
    }
    match value {
        Value::Null => Ok(String::new()),
        Value::Sequence(_) | Value::Mapping(_) => {
            Err(D::Error::custom("expected a scalar, found a collection"))
        }
        scalar => Ok(text_form(&scalar)),
    }
}
