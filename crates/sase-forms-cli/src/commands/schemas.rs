//! Schema commands

use anyhow::{Context, Result};
use sase_forms::{FormType, FormsConfig};
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::output::{styled, OutputFormat};
use crate::SchemaCommands;

#[derive(Debug, Serialize, Tabled)]
pub struct FormSummary {
    #[tabled(rename = "Form Type")]
    pub form_type: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Fields")]
    pub fields: usize,
    #[tabled(rename = "Required")]
    pub required: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub field_type: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Required")]
    pub required: bool,
    #[tabled(rename = "Options")]
    pub options: String,
}

pub async fn handle(action: SchemaCommands, config: &FormsConfig, format: OutputFormat) -> Result<i32> {
    let catalog = config.catalog()?;
    match action {
        SchemaCommands::List => {
            let rows: Vec<FormSummary> = catalog
                .entries()
                .iter()
                .map(|e| FormSummary {
                    form_type: e.form_type.to_string(),
                    title: e.title.clone(),
                    fields: e.schema.len(),
                    required: e.schema.required_fields().count(),
                })
                .collect();
            format.emit(&rows, || styled(Table::new(&rows)));
        }
        SchemaCommands::Show { form_type } => {
            let entry = catalog
                .entry(&FormType::from(form_type.as_str()))
                .with_context(|| format!("Unknown form type '{form_type}'"))?;
            let rows: Vec<FieldRow> = entry
                .schema
                .fields()
                .iter()
                .map(|f| FieldRow {
                    name: f.name.clone(),
                    field_type: f.field_type.to_string(),
                    label: f.label.clone(),
                    required: f.required,
                    options: describe_options(f),
                })
                .collect();
            match format {
                OutputFormat::Table => {
                    println!("{}", entry.title);
                    println!("{}", styled(Table::new(&rows)));
                }
                _ => format.print(entry.schema.as_ref()),
            }
        }
    }
    Ok(0)
}

fn describe_options(field: &sase_forms::FieldSpec) -> String {
    if let Some(accept) = &field.accept {
        let suffix = if field.multiple { " (multiple)" } else { "" };
        return format!("{accept}{suffix}");
    }
    if let (Some(min), Some(max)) = (&field.min, &field.max) {
        return format!("{min}..{max}");
    }
    let options = field.options();
    if options.len() > 6 {
        format!("{}, ... ({} options)", options[..3].join(", "), options.len())
    } else {
        options.join(", ")
    }
}
