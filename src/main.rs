use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use rowdesk::cli::{CliArgs, Command};
use rowdesk::messages::{AppMsg, Msg};
use rowdesk::model::{Row, TableModel};
use rowdesk::update::update;
use rowdesk::{AppConfig, FileStore, Notice, Runtime};

/// Widest a printed cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 32;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    rowdesk::tracing::init(args.verbose);

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let command = args.command.clone().unwrap_or_default();
    command.validate(&config).map_err(anyhow::Error::msg)?;

    let data_dir_override = args.data_dir.clone().or_else(|| config.data_dir.clone());
    let data_dir = rowdesk::config_paths::ensure_data_dir(data_dir_override.as_deref())
        .map_err(|e| anyhow!("could not prepare the data directory: {}", e))?;
    tracing::debug!("Using data directory {}", data_dir.display());

    let mut runtime = Runtime::start(&config, FileStore::new(data_dir));

    let notices = match &command {
        Command::Export { file } => {
            let path = file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.export_file_name));
            runtime.dispatch(Msg::App(AppMsg::ExportFile(path)))
        }
        other => {
            let msgs = other.clone().into_messages().map_err(anyhow::Error::msg)?;
            let mut notices = Vec::new();
            for msg in msgs {
                notices.extend(runtime.dispatch(msg));
            }
            notices
        }
    };

    let failed = print_notices(&notices);

    match command {
        Command::Show {
            search,
            page,
            page_size,
        } => {
            // Flags only affect this printout; the saved query is untouched
            let mut preview = runtime.model().clone();
            if let Some(text) = search {
                update(&mut preview, Msg::search(text));
            }
            if let Some(size) = page_size {
                update(&mut preview, Msg::page_size(size));
            }
            if let Some(page) = page {
                update(&mut preview, Msg::page(page.saturating_sub(1)));
            }
            print_table(&preview, &config);
        }
        Command::Columns => print_columns(runtime.model()),
        Command::Status => print_status(runtime.model()),
        Command::Export { .. } => {}
        Command::Delete { id, yes: false } => {
            if runtime.model().pending_delete.as_deref() == Some(id.as_str()) {
                println!("Delete row {}? Re-run with --yes to confirm.", id);
            } else {
                println!("No row with id {}", id);
            }
        }
        Command::Edit { .. } => print_status(runtime.model()),
        _ => print_table(runtime.model(), &config),
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print notices, returning true if any was an error
fn print_notices(notices: &[Notice]) -> bool {
    let mut failed = false;
    for notice in notices {
        if notice.is_error() {
            eprintln!("{}", notice);
            failed = true;
        } else {
            println!("{}", notice);
        }
    }
    failed
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    out.push('…');
    out
}

/// Print the current page of the table with visible columns
fn print_table(model: &TableModel, config: &AppConfig) {
    let view = model.view();
    let columns: Vec<_> = model.store.visible_columns().collect();

    let mut headers = vec!["id".to_string()];
    headers.extend(columns.iter().map(|c| c.header().to_string()));

    let cells: Vec<Vec<String>> = view
        .page_rows
        .iter()
        .map(|row| row_cells(model, row, &columns))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for line in &cells {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    print_line(&headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_line(&rule, &widths);
    for line in &cells {
        print_line(line, &widths);
    }

    if view.is_empty() {
        println!("(no rows)");
    }
    let choices: Vec<String> = config
        .page_size_options
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!(
        "Page {} of {} · {} row(s) · {} per page ({}){}",
        view.page + 1,
        view.page_count(),
        view.total_count,
        view.page_size,
        choices.join("/"),
        if model.query.search_is_blank() {
            String::new()
        } else {
            format!(" · search {:?}", model.query.search_text)
        }
    );
    if !model.edits.is_empty() {
        println!("{} row(s) with pending edits (*)", model.edits.len());
    }
}

fn row_cells(model: &TableModel, row: &Row, columns: &[&rowdesk::model::Column]) -> Vec<String> {
    let marker = if model.edits.is_editing(&row.id) { "*" } else { "" };
    let mut line = vec![format!("{}{}", row.id, marker)];
    line.extend(columns.iter().map(|c| truncate(&row.display(&c.key))));
    line
}

fn print_line(cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    println!("{}", padded.join("  ").trim_end());
}

fn print_columns(model: &TableModel) {
    for column in model.store.columns() {
        println!(
            "{:<16} {:<20} {}",
            column.key,
            column.header(),
            if column.visible { "visible" } else { "hidden" }
        );
    }
}

/// List rows with pending edits and the fields that differ from the table
fn print_status(model: &TableModel) {
    if model.edits.is_empty() {
        println!("No pending edits");
        return;
    }
    for id in model.edits.ids() {
        let Some(draft) = model.edits.draft(id) else {
            continue;
        };
        match model.store.row(id) {
            Some(committed) => {
                println!("Row {}:", id);
                for (key, value) in &draft.fields {
                    let before = committed.display(key);
                    let after = value.to_string();
                    if before != after {
                        println!("  {}: {:?} → {:?}", key, before, after);
                    }
                }
            }
            None => println!("Row {}: (row no longer exists)", id),
        }
    }
}
