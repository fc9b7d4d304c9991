//! Validate command

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sase_forms::{calculate_progress, validate_form, FormType, FormValues, FormsConfig, SchemaProvider};
use serde::Serialize;
use tabled::builder::Builder;

use super::parse_assignment;
use crate::output::{progress_bar, styled, OutputFormat};

#[derive(Debug, Serialize)]
pub struct ValidationOutput {
    pub form_type: String,
    pub valid: bool,
    pub progress: f64,
    pub errors: BTreeMap<String, String>,
}

pub async fn handle(
    form_type: &str,
    assignments: &[String],
    config: &FormsConfig,
    format: OutputFormat,
) -> Result<i32> {
    let catalog = config.catalog()?.with_latency(std::time::Duration::ZERO);
    let schema = catalog
        .get_schema(&FormType::from(form_type))
        .await
        .with_context(|| format!("Unknown form type '{form_type}'"))?;

    let mut values = FormValues::new();
    for raw in assignments {
        let (name, value) = parse_assignment(raw)?;
        if schema.field(&name).is_none() {
            bail!("'{form_type}' has no field named '{name}'");
        }
        values.set(name, value);
    }

    let report = validate_form(&schema, &values);
    let output = ValidationOutput {
        form_type: form_type.to_string(),
        valid: report.is_valid(),
        progress: calculate_progress(Some(schema.as_ref()), &values),
        errors: report
            .errors
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };

    match format {
        OutputFormat::Table => {
            println!("{} {}", form_type.bold(), progress_bar(output.progress));
            if output.valid {
                println!("{}", "valid".green());
            } else {
                // schema declaration order
                let mut builder = Builder::default();
                builder.push_record(["Field", "Error"]);
                for field in schema.fields() {
                    if let Some(message) = report.errors.get(&field.name) {
                        builder.push_record([field.label.clone(), message.to_string()]);
                    }
                }
                println!("{}", styled(builder.build()));
            }
        }
        _ => format.print(&output),
    }

    Ok(if output.valid { 0 } else { 1 })
}
