//! # CLI Layer
//!
//! This module is **one possible UI client** for refdex; the library does not
//! depend on it.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Writes export files to disk
//! - Installs the logging subscriber
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the session
//! - `handle_*()`: Per-command handlers that call the session and print output

use super::logging::init_logging;
use super::render::{
    render_categories, render_config, render_groups, render_index_list, render_messages,
    render_summary,
};
use super::setup::{Cli, Commands, ExportFormat};
use clap::Parser;
use refdex::api::{ConfigAction, ExportDocument, Session};
use refdex::commands::{CmdResult, EntryInput};
use refdex::error::{RefdexError, Result};
use refdex::init::{initialize, resolve_root};
use refdex::store::fs::FileStore;
use std::io::Write;
use std::path::{Path, PathBuf};

struct AppContext {
    session: Session<FileStore>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Create {
            title,
            books,
            workbooks,
        }) => handle_create(&mut ctx, &title, books, workbooks),
        Some(Commands::Load { title }) => handle_load(&mut ctx, &title),
        Some(Commands::Add {
            term,
            book,
            page,
            category,
            desc,
        }) => {
            let mut input = EntryInput::new(term.join(" "), book).desc(desc);
            input.page = page;
            input.category = category;
            handle_add(&mut ctx, input)
        }
        Some(Commands::Show) => handle_show(&mut ctx),
        Some(Commands::Export { format, output }) => handle_export(&mut ctx, format, output),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = resolve_root(cli.root.as_deref())?;
    tracing::debug!(root = %root.display(), "using storage root");
    let session = initialize(&root, cli.index.as_deref())?;

    Ok(AppContext {
        session,
        use_color: console::colors_enabled(),
    })
}

fn print_messages(ctx: &AppContext, result: &CmdResult) {
    print!("{}", render_messages(&result.messages, ctx.use_color));
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.session.list_indexes()?;
    let active = ctx.session.active().ok().map(|index| index.title.clone());
    print!(
        "{}",
        render_index_list(&result.indexes, active.as_deref(), ctx.use_color)
    );
    print_messages(ctx, &result);
    Ok(())
}

fn handle_create(ctx: &mut AppContext, title: &str, books: u32, workbooks: u32) -> Result<()> {
    let result = ctx.session.create_index(title, books, workbooks)?;
    ctx.session.remember_active()?;
    print_messages(ctx, &result);
    Ok(())
}

fn handle_load(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.session.load_index(title)?;
    ctx.session.remember_active()?;
    if let Some(summary) = &result.index {
        print!("{}", render_summary(summary, ctx.use_color));
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, input: EntryInput) -> Result<()> {
    let result = ctx.session.add_entry(input)?;
    print_messages(ctx, &result);
    Ok(())
}

fn handle_show(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.session.show()?;
    if let Some(summary) = &result.index {
        print!("{}", render_summary(summary, ctx.use_color));
        println!();
    }
    print!("{}", render_groups(&result.groups, ctx.use_color));
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let result = match format {
        ExportFormat::Json => ctx.session.export_json()?,
        ExportFormat::Pdf => ctx.session.export_pdf()?,
    };
    let document = result
        .export
        .ok_or_else(|| RefdexError::Store("export produced no document".into()))?;

    // JSON goes to stdout unless a file is named; a PDF goes to its default name.
    let target = match (output, format) {
        (Some(path), _) if path == Path::new("-") => None,
        (Some(path), _) => Some(path),
        (None, ExportFormat::Json) => None,
        (None, ExportFormat::Pdf) => Some(PathBuf::from(&document.filename)),
    };

    match target {
        Some(path) => {
            write_document(&document, &path)?;
            eprintln!("Exported {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&document.bytes)?;
            if document.bytes.last() != Some(&b'\n') && format == ExportFormat::Json {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

fn write_document(document: &ExportDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &document.bytes)?;
    tracing::info!(
        path = %path.display(),
        content_type = document.content_type,
        bytes = document.bytes.len(),
        "wrote export"
    );
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    print!("{}", render_categories(ctx.use_color));
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.session.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(ctx, &result);
    Ok(())
}
