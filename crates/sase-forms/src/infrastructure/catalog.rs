//! Static schema catalog
//!
//! Holds schemas in memory and serves them through [`SchemaProvider`], with an
//! optional simulated latency. Schemas come from the built-in set or from a
//! JSON file keyed by form type, in file order:
//!
//! ```json
//! { "feedback": { "title": "Feedback", "fields": [ ... ] } }
//! ```
//!
//! A list form, `{ "forms": [ { "formType": "feedback", "fields": [ ... ] } ] }`,
//! is read as well.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use super::builtin;
use crate::domain::value_objects::{FieldSpec, FormSchema, FormType};
use crate::ports::outbound::SchemaProvider;
use crate::{FormsError, Result};

/// One form type the catalog can serve
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    pub form_type: FormType,
    pub title: String,
    pub schema: Arc<FormSchema>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Listed { forms: Vec<ListedForm> },
    Keyed(KeyedForms),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedForm {
    form_type: FormType,
    #[serde(default)]
    title: Option<String>,
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct KeyedForm {
    #[serde(default)]
    title: Option<String>,
    fields: Vec<FieldSpec>,
}

/// Form type -> definition, in document order
struct KeyedForms(Vec<(FormType, KeyedForm)>);

impl<'de> Deserialize<'de> for KeyedForms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyedVisitor;

        impl<'de> Visitor<'de> for KeyedVisitor {
            type Value = KeyedForms;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of form type to form definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<KeyedForms, A::Error> {
                let mut forms = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<FormType, KeyedForm>()? {
                    forms.push(entry);
                }
                Ok(KeyedForms(forms))
            }
        }

        deserializer.deserialize_map(KeyedVisitor)
    }
}

impl CatalogFile {
    fn into_forms(self) -> Vec<(FormType, Option<String>, Vec<FieldSpec>)> {
        match self {
            Self::Listed { forms } => forms
                .into_iter()
                .map(|f| (f.form_type, f.title, f.fields))
                .collect(),
            Self::Keyed(KeyedForms(forms)) => forms
                .into_iter()
                .map(|(form_type, f)| (form_type, f.title, f.fields))
                .collect(),
        }
    }
}

pub struct StaticSchemaCatalog {
    entries: Vec<CatalogEntry>,
    latency: Duration,
}

impl StaticSchemaCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            latency: Duration::ZERO,
        }
    }

    /// The six built-in forms, served without delay
    pub fn builtin() -> Self {
        let entries = builtin::definitions()
            .into_iter()
            .filter_map(|(key, title, fields)| match FormSchema::new(fields) {
                Ok(schema) => Some(CatalogEntry {
                    form_type: FormType::from(key),
                    title: title.to_string(),
                    schema: Arc::new(schema),
                }),
                Err(e) => {
                    tracing::error!(form_type = key, error = %e, "skipping built-in form");
                    None
                }
            })
            .collect();
        Self::new(entries)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| FormsError::InvalidSchema(e.to_string()))?;
        let forms = file.into_forms();

        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(forms.len());
        for (form_type, title, fields) in forms {
            if entries.iter().any(|e| e.form_type == form_type) {
                return Err(FormsError::InvalidSchema(format!(
                    "form type '{form_type}' defined twice"
                )));
            }
            let schema = FormSchema::new(fields)
                .map_err(|e| FormsError::InvalidSchema(format!("{form_type}: {e}")))?;
            entries.push(CatalogEntry {
                title: title.unwrap_or_else(|| form_type.humanize()),
                form_type,
                schema: Arc::new(schema),
            });
        }
        Ok(Self::new(entries))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), forms = catalog.len(), "loaded schema catalog");
        Ok(catalog)
    }

    /// Delay every lookup by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, form_type: &FormType) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.form_type == form_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SchemaProvider for StaticSchemaCatalog {
    async fn get_schema(&self, form_type: &FormType) -> Result<Arc<FormSchema>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.entry(form_type)
            .map(|e| Arc::clone(&e.schema))
            .ok_or_else(|| FormsError::SchemaNotFound(form_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    #[test]
    fn test_builtin_forms() {
        let catalog = StaticSchemaCatalog::builtin();
        let keys: Vec<&str> = catalog.entries().iter().map(|e| e.form_type.as_str()).collect();
        assert_eq!(
            keys,
            ["userInfo", "address", "payment", "jobApplication", "survey", "contactForm"]
        );

        let address = catalog.entry(&FormType::from("address")).unwrap();
        assert_eq!(address.title, "Address Information");
        assert_eq!(address.schema.field("state").unwrap().options().len(), 50);

        let attachments = catalog
            .entry(&FormType::from("contactForm"))
            .and_then(|e| e.schema.field("attachments").cloned())
            .unwrap();
        assert!(attachments.multiple);
        assert_eq!(attachments.field_type, FieldType::File);
    }

    #[tokio::test]
    async fn test_unknown_form_type() {
        let catalog = StaticSchemaCatalog::builtin();
        let result = catalog.get_schema(&FormType::from("taxReturn")).await;
        assert!(matches!(result, Err(FormsError::SchemaNotFound(t)) if t == "taxReturn"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency() {
        let catalog = StaticSchemaCatalog::builtin().with_latency(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        let schema = catalog.get_schema(&FormType::from("payment")).await.unwrap();
        assert_eq!(schema.len(), 7);
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_from_json() {
        let catalog = StaticSchemaCatalog::from_json_str(
            r#"{ "forms": [ { "formType": "feedback", "fields": [
                { "name": "rating", "type": "range", "label": "Rating", "min": "1", "max": "5" },
                { "name": "tone", "type": "radio", "label": "Tone", "options": ["Good", "Bad"], "required": true }
            ] } ] }"#,
        )
        .unwrap();
        let entry = catalog.entry(&FormType::from("feedback")).unwrap();
        assert_eq!(entry.title, "feedback");
        assert_eq!(entry.schema.len(), 2);
        assert!(entry.schema.field("tone").unwrap().required);
    }

    #[test]
    fn test_from_json_keyed_by_form_type() {
        let catalog = StaticSchemaCatalog::from_json_str(
            r#"{
                "userInfo": { "fields": [
                    { "name": "firstName", "type": "text", "label": "First Name", "required": true },
                    { "name": "age", "type": "number", "label": "Age" }
                ] },
                "address": { "title": "Where", "fields": [
                    { "name": "city", "type": "text", "label": "City" }
                ] }
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = catalog.entries().iter().map(|e| e.form_type.as_str()).collect();
        assert_eq!(keys, ["userInfo", "address"]);

        let user_info = catalog.entry(&FormType::from("userInfo")).unwrap();
        assert_eq!(user_info.title, "user info");
        assert!(user_info.schema.field("firstName").unwrap().required);
        assert_eq!(catalog.entry(&FormType::from("address")).unwrap().title, "Where");
    }

    #[test]
    fn test_from_json_rejects_duplicate_keys() {
        let result = StaticSchemaCatalog::from_json_str(
            r#"{ "survey": { "fields": [] }, "survey": { "fields": [] } }"#,
        );
        assert!(matches!(result, Err(FormsError::InvalidSchema(m)) if m.contains("twice")));
    }

    #[test]
    fn test_from_json_rejects_bad_schema() {
        let result = StaticSchemaCatalog::from_json_str(
            r#"{ "forms": [ { "formType": "x", "fields": [
                { "name": "pick", "type": "dropdown", "label": "Pick" }
            ] } ] }"#,
        );
        assert!(matches!(result, Err(FormsError::InvalidSchema(_))));
    }
}
