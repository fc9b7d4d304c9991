//! Read models handed to the presentation layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::controller::FormState;
use crate::domain::aggregates::Record;
use crate::domain::services::{render_field, Control};
use crate::domain::value_objects::{
    humanize_key, FieldType, FormSchema, FormType, FormValues, RecordId, ValidationErrors,
};

/// One rendered field
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub error: Option<String>,
    /// Spans the full row (textarea)
    pub wide: bool,
    pub control: Control,
}

/// Snapshot of the form being edited
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub state: FormState,
    pub form_type: FormType,
    /// Empty while loading or when no schema could be loaded
    pub fields: Vec<FieldView>,
    pub errors: ValidationErrors,
    pub progress: f64,
    pub editing_id: Option<RecordId>,
}

impl FormView {
    pub(crate) fn build(
        state: FormState,
        form_type: &FormType,
        schema: Option<&FormSchema>,
        values: &FormValues,
        errors: &ValidationErrors,
        progress: f64,
        editing_id: Option<&RecordId>,
    ) -> Self {
        let fields = match (state, schema) {
            (FormState::Loading, _) | (_, None) => Vec::new(),
            (_, Some(schema)) => schema
                .fields()
                .iter()
                .map(|spec| FieldView {
                    name: spec.name.clone(),
                    label: spec.label.clone(),
                    required: spec.required,
                    error: errors.get(&spec.name).map(str::to_string),
                    wide: spec.field_type == FieldType::Textarea,
                    control: render_field(spec, values.get(&spec.name)),
                })
                .collect(),
        };
        Self {
            state,
            form_type: form_type.clone(),
            fields,
            errors: errors.clone(),
            progress,
            editing_id: editing_id.cloned(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: String,
    pub heading: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    pub cells: Vec<String>,
}

/// Records of one form type laid out as a table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    /// Set when there are no rows
    pub empty_message: Option<String>,
}

impl TableView {
    /// Columns follow the schema's field order; keys the schema does not know
    /// come last, alphabetically.
    pub fn build(form_type: &FormType, records: &[Record], schema: Option<&FormSchema>) -> Self {
        let humanized = form_type.humanize();

        let mut keys: Vec<&str> = Vec::new();
        for record in records {
            for key in record.values().keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys.sort_by_key(|k| (schema.and_then(|s| s.position(k)).unwrap_or(usize::MAX), *k));

        let columns = keys
            .iter()
            .map(|k| Column {
                key: k.to_string(),
                heading: humanize_key(k),
            })
            .collect();
        let rows = records
            .iter()
            .map(|r| TableRow {
                id: r.id().clone(),
                timestamp: r.timestamp(),
                cells: keys.iter().map(|k| r.value(k).to_string()).collect(),
            })
            .collect();

        Self {
            title: format!("{humanized} Entries"),
            columns,
            rows,
            empty_message: records
                .is_empty()
                .then(|| format!("No entries found for {humanized}")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldSpec;

    #[test]
    fn test_empty_table() {
        let table = TableView::build(&FormType::from("contactForm"), &[], None);
        assert!(table.is_empty());
        assert_eq!(table.title, "contact form Entries");
        assert_eq!(table.empty_message.as_deref(), Some("No entries found for contact form"));
    }

    #[test]
    fn test_columns_follow_schema_order() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("lastName", FieldType::Text, "Last"),
            FieldSpec::new("firstName", FieldType::Text, "First"),
        ])
        .unwrap();
        let record = Record::create(
            FormType::from("userInfo"),
            [("firstName", "Jane"), ("lastName", "Doe"), ("legacy", "x")].into_iter().collect(),
        );

        let table = TableView::build(&FormType::from("userInfo"), &[record], Some(&schema));
        let headings: Vec<&str> = table.columns.iter().map(|c| c.heading.as_str()).collect();
        assert_eq!(headings, ["last name", "first name", "legacy"]);
        assert_eq!(table.rows[0].cells, ["Doe", "Jane", "x"]);
        assert_eq!(table.empty_message, None);
    }
}
