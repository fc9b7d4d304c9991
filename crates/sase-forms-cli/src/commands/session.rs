//! Interactive form session
//!
//! One command per line:
//!
//! ```text
//! type <formType>            switch form
//! set <field> <value...>     set a text-like, dropdown or radio value
//! toggle <field> <option...> flip one option of a checkbox group
//! check <field> on|off       single checkbox
//! files <field> <name[:mime]>... pick files
//! range <field> <number>     move a slider
//! submit | cancel | show | list | quit
//! edit <id> | delete <id>
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sase_forms::{
    CommandOutcome, Control, FieldInput, FormCommand, FormController, FormSession, FormType,
    FormsConfig, InMemoryRecordStore, RecordId, SelectedFile, SessionHandle, SubmitOutcome,
    ToastNotifier,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use crate::output::{form_table, print_toast, progress_bar, records_table, OutputFormat};

/// One parsed input line
#[derive(Debug, PartialEq)]
pub enum Line {
    Command(FormCommand),
    /// Flip a checkbox-group option; the current state decides the direction
    Toggle { name: String, option: String },
    Show,
    List,
    Quit,
    Blank,
}

pub fn parse_line(line: &str) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let arg = arg.trim();

    let field = |input: FieldInput| -> Result<Line> {
        if name.is_empty() {
            bail!("'{verb}' needs a field name");
        }
        Ok(Line::Command(FormCommand::FieldChanged {
            name: name.to_string(),
            input,
        }))
    };

    match verb {
        "type" if !rest.is_empty() => Ok(Line::Command(FormCommand::FormTypeChanged {
            form_type: FormType::from(rest),
        })),
        "set" => field(FieldInput::text(arg)),
        "toggle" if !name.is_empty() && !arg.is_empty() => Ok(Line::Toggle {
            name: name.to_string(),
            option: arg.to_string(),
        }),
        "check" => match arg {
            "on" | "true" | "yes" => field(FieldInput::Checked { checked: true }),
            "off" | "false" | "no" => field(FieldInput::Checked { checked: false }),
            _ => bail!("usage: check <field> on|off"),
        },
        "files" => field(FieldInput::Files {
            files: arg.split_whitespace().map(parse_file).collect(),
        }),
        "range" => {
            let position: f64 = arg.parse().with_context(|| format!("'{arg}' is not a number"))?;
            field(FieldInput::Range { position })
        }
        "submit" => Ok(Line::Command(FormCommand::SubmitRequested)),
        "cancel" => Ok(Line::Command(FormCommand::EditCancelled)),
        "edit" if !rest.is_empty() => Ok(Line::Command(FormCommand::EditRequested {
            id: RecordId::from_string(rest),
        })),
        "delete" if !rest.is_empty() => Ok(Line::Command(FormCommand::DeleteRequested {
            id: RecordId::from_string(rest),
        })),
        "show" => Ok(Line::Show),
        "list" => Ok(Line::List),
        "quit" | "exit" => Ok(Line::Quit),
        _ => bail!("unrecognized command '{line}'"),
    }
}

/// `photo.png:image/png`, or a bare name with no MIME type
fn parse_file(token: &str) -> SelectedFile {
    match token.rsplit_once(':') {
        Some((name, mime)) if !name.is_empty() && mime.contains('/') => SelectedFile::new(name, mime),
        _ => SelectedFile::named(token),
    }
}

pub async fn handle(script: Option<&Path>, config: &FormsConfig, format: OutputFormat) -> Result<i32> {
    let toasts = Arc::new(ToastNotifier::with_ttl(config.toast_duration()));
    let feed = toasts.subscribe();
    let controller = FormController::new(
        Arc::new(config.catalog()?),
        Arc::new(InMemoryRecordStore::new()),
        toasts,
        config.initial_form_type(),
    );
    let session = FormSession::spawn(controller);

    match script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening script {}", path.display()))?;
            run(BufReader::new(file), &session, feed, format).await?;
        }
        None => run(BufReader::new(tokio::io::stdin()), &session, feed, format).await?,
    }
    Ok(0)
}

async fn run<R: AsyncBufRead + Unpin>(
    reader: R,
    session: &SessionHandle,
    mut feed: broadcast::Receiver<sase_forms::Toast>,
    format: OutputFormat,
) -> Result<()> {
    show(session, format).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                continue;
            }
        };
        match parsed {
            Line::Blank => continue,
            Line::Quit => break,
            Line::Show => show(session, format).await?,
            Line::List => list(session, format).await?,
            Line::Toggle { name, option } => {
                let checked = !is_checked(session, &name, &option).await?;
                let command = FormCommand::FieldChanged {
                    name,
                    input: FieldInput::Toggle { option, checked },
                };
                execute(session, command, format).await?;
            }
            Line::Command(command) => execute(session, command, format).await?,
        }

        while let Ok(toast) = feed.try_recv() {
            print_toast(&toast);
        }
    }
    Ok(())
}

async fn execute(session: &SessionHandle, command: FormCommand, format: OutputFormat) -> Result<()> {
    match session.send(command).await {
        Ok(CommandOutcome::Loading(ticket)) => {
            tracing::debug!(form_type = %ticket.form_type(), "waiting for schema");
            session.settled().await?;
            show(session, format).await?;
        }
        Ok(CommandOutcome::Submitted(SubmitOutcome::Created(id))) => {
            println!("created {}", id.to_string().bold());
        }
        Ok(CommandOutcome::Submitted(SubmitOutcome::Updated(id))) => {
            println!("updated {}", id.to_string().bold());
        }
        Ok(CommandOutcome::Submitted(SubmitOutcome::Invalid(_))) => show(session, format).await?,
        Ok(CommandOutcome::Deleted(id)) => println!("deleted {id}"),
        Ok(CommandOutcome::Applied) => {}
        Err(sase_forms::FormsError::SessionClosed) => bail!("form session closed"),
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
    Ok(())
}

async fn is_checked(session: &SessionHandle, name: &str, option: &str) -> Result<bool> {
    let view = session.view().await?;
    Ok(match view.field(name).map(|f| &f.control) {
        Some(Control::CheckboxGroup { options }) => {
            options.iter().any(|c| c.label == option && c.selected)
        }
        _ => false,
    })
}

async fn show(session: &SessionHandle, format: OutputFormat) -> Result<()> {
    let view = session.view().await?;
    if let OutputFormat::Table = format {
        let mode = match &view.editing_id {
            Some(id) => format!("editing {id}").yellow().to_string(),
            None => format!("{:?}", view.state).to_lowercase(),
        };
        println!("{} [{}] {}", view.form_type.as_str().bold(), mode, progress_bar(view.progress));
    }
    format.emit(&view, || form_table(&view));
    Ok(())
}

async fn list(session: &SessionHandle, format: OutputFormat) -> Result<()> {
    let table = session.table().await?;
    match (&table.empty_message, format) {
        (Some(message), OutputFormat::Table) => println!("{}", message.dimmed()),
        _ => {
            if let OutputFormat::Table = format {
                println!("{}", table.title.bold());
            }
            format.emit(&table, || records_table(&table));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_commands() {
        assert_eq!(
            parse_line("set firstName Mary Ann").unwrap(),
            Line::Command(FormCommand::FieldChanged {
                name: "firstName".into(),
                input: FieldInput::text("Mary Ann"),
            })
        );
        assert_eq!(
            parse_line("toggle interests Sports").unwrap(),
            Line::Toggle { name: "interests".into(), option: "Sports".into() }
        );
        assert_eq!(
            parse_line("range recommendationScore 7").unwrap(),
            Line::Command(FormCommand::FieldChanged {
                name: "recommendationScore".into(),
                input: FieldInput::Range { position: 7.0 },
            })
        );
        assert!(matches!(
            parse_line("files attachments a.pdf b.zip").unwrap(),
            Line::Command(FormCommand::FieldChanged { input: FieldInput::Files { files }, .. }) if files.len() == 2
        ));
    }

    #[test]
    fn test_parse_file_tokens() {
        let Line::Command(FormCommand::FieldChanged { input: FieldInput::Files { files }, .. }) =
            parse_line("files attachments shot.png:image/png notes.pdf c:stuff").unwrap()
        else {
            panic!("expected a file selection");
        };
        assert_eq!(
            files,
            [
                SelectedFile::new("shot.png", "image/png"),
                SelectedFile::named("notes.pdf"),
                SelectedFile::named("c:stuff"),
            ]
        );
    }

    #[test]
    fn test_parse_control_commands() {
        assert_eq!(parse_line("  ").unwrap(), Line::Blank);
        assert_eq!(parse_line("# comment").unwrap(), Line::Blank);
        assert_eq!(parse_line("submit").unwrap(), Line::Command(FormCommand::SubmitRequested));
        assert_eq!(
            parse_line("type survey").unwrap(),
            Line::Command(FormCommand::FormTypeChanged { form_type: FormType::from("survey") })
        );
        assert_eq!(parse_line("quit").unwrap(), Line::Quit);
        assert!(parse_line("type").is_err());
        assert!(parse_line("check newsletter maybe").is_err());
        assert!(parse_line("range score high").is_err());
        assert!(parse_line("dance").is_err());
    }
}
