//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use sase_forms::{Control, FormView, NotificationKind, TableView, Toast};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `data` serialized; the table format falls back to JSON
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }

    /// Print the table built by `table`, or `data` serialized
    pub fn emit<T: Serialize>(&self, data: &T, table: impl FnOnce() -> Table) {
        match self {
            OutputFormat::Table => println!("{}", table()),
            _ => self.print(data),
        }
    }
}

pub fn styled(mut table: Table) -> Table {
    table.with(Style::rounded());
    table
}

pub fn form_table(view: &FormView) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Type", "Value", "Error"]);
    for field in &view.fields {
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };
        builder.push_record([
            label,
            control_kind(&field.control).to_string(),
            control_summary(&field.control),
            field.error.clone().unwrap_or_default(),
        ]);
    }
    styled(builder.build())
}

pub fn records_table(view: &TableView) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["id".to_string()];
    header.extend(view.columns.iter().map(|c| c.heading.clone()));
    builder.push_record(header);
    for row in &view.rows {
        let mut record = vec![row.id.to_string()];
        record.extend(row.cells.iter().cloned());
        builder.push_record(record);
    }
    styled(builder.build())
}

fn control_kind(control: &Control) -> &'static str {
    match control {
        Control::Input { input_type, .. } => input_type.as_str(),
        Control::TextArea { .. } => "textarea",
        Control::Dropdown { .. } => "dropdown",
        Control::RadioGroup { .. } => "radio",
        Control::CheckboxGroup { .. } | Control::Checkbox { .. } => "checkbox",
        Control::Range { .. } => "range",
        Control::FileUpload { .. } => "file",
    }
}

/// One-line rendering of a control's current state
pub fn control_summary(control: &Control) -> String {
    match control {
        Control::Input { value, placeholder, .. } | Control::TextArea { value, placeholder } => {
            if value.is_empty() {
                placeholder.dimmed().to_string()
            } else {
                value.clone()
            }
        }
        Control::Dropdown { placeholder, options } => options
            .iter()
            .find(|c| c.selected)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| placeholder.dimmed().to_string()),
        Control::RadioGroup { options } | Control::CheckboxGroup { options } => options
            .iter()
            .map(|c| if c.selected { format!("[x] {}", c.label) } else { format!("[ ] {}", c.label) })
            .collect::<Vec<_>>()
            .join("  "),
        Control::Checkbox { checked, .. } => (if *checked { "[x]" } else { "[ ]" }).to_string(),
        Control::Range { min, max, display, .. } => format!("{display} ({min}..{max})"),
        Control::FileUpload { selected, prompt, hint, .. } => selected
            .clone()
            .unwrap_or_else(|| format!("{prompt} ({hint})").dimmed().to_string()),
    }
}

pub fn print_toast(toast: &Toast) {
    let line = match toast.kind {
        NotificationKind::Success => format!("✔ {}", toast.message).green(),
        NotificationKind::Error => format!("✖ {}", toast.message).red(),
        NotificationKind::Info => format!("ℹ {}", toast.message).cyan(),
    };
    println!("{line}");
}

pub fn progress_bar(progress: f64) -> String {
    let filled = (progress / 5.0).round() as usize;
    format!("[{}{}] {:.0}%", "#".repeat(filled), "-".repeat(20 - filled.min(20)), progress)
}
