//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data root and open `DocfolioApi` on it
//! 3. **Session Gate**: Refuse document and category commands when logged out
//! 4. **API Dispatch**: Call the appropriate `DocfolioApi` method
//! 5. **Output Formatting**: Convert `CmdResult` into terminal output

use super::picker;
use super::print::{print_categories, print_config, print_documents, print_messages, print_views};
use super::setup::{
    get_grouped_help, print_help_for_command, CategoryCommands, Cli, Commands, DocumentCommands,
    MiscCommands, SessionCommands,
};
use clap::Parser;
use directories::ProjectDirs;
use docfolio::api::{ConfigAction, DocfolioApi, ListFilter};
use docfolio::error::{DocfolioError, Result};
use docfolio::store::fs_backend::FsBackend;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "DOCFOLIO_HOME";
const LOG_ENV: &str = "DOCFOLIO_LOG";

struct AppContext {
    api: DocfolioApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Help needs neither a data root nor a session
    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Session(cmd)) => match cmd {
            SessionCommands::Login { username, password } => {
                handle_login(&ctx, &username, password)
            }
            SessionCommands::Logout => handle_logout(&ctx),
            SessionCommands::Whoami => handle_whoami(&ctx),
        },
        Some(Commands::Document(cmd)) => {
            ctx.api.require_session()?;
            match cmd {
                DocumentCommands::Add {
                    path,
                    name,
                    category,
                    mime,
                } => handle_add(&mut ctx, &path, name, &category, mime.as_deref()),
                DocumentCommands::List { search, category } => {
                    handle_list(&ctx, ListFilter { search, category })
                }
                DocumentCommands::View { indexes, export } => handle_view(&ctx, indexes, export),
                DocumentCommands::Edit {
                    index,
                    name,
                    category,
                } => handle_edit(&mut ctx, &index, name, category),
                DocumentCommands::Delete { indexes } => handle_delete(&mut ctx, indexes),
            }
        }
        Some(Commands::Categories { action }) => {
            ctx.api.require_session()?;
            match action.unwrap_or(CategoryCommands::List) {
                CategoryCommands::List => handle_categories(&ctx),
                CategoryCommands::Add { name } => handle_category_add(&ctx, &name),
                CategoryCommands::Remove { name, force } => {
                    handle_category_remove(&ctx, &name, force)
                }
            }
        }
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Doctor => {
                ctx.api.require_session()?;
                handle_doctor(&ctx)
            }
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => {
            ctx.api.require_session()?;
            handle_list(&ctx, ListFilter::default())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_root() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "docfolio", "docfolio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DocfolioError::StorageInit("could not determine a data directory".into()))
}

fn init_context() -> Result<AppContext> {
    let root = data_root()?;
    debug!(root = %root.display(), "opening data root");
    Ok(AppContext {
        api: DocfolioApi::open(root)?,
    })
}

fn handle_login(ctx: &AppContext, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };
    let result = ctx.api.login(username, &password)?;
    print_messages(&result.messages);
    Ok(())
}

fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn handle_logout(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    path: &str,
    name: Option<String>,
    category: &str,
    mime: Option<&str>,
) -> Result<()> {
    let picked = picker::pick(path, mime);
    let name = name.unwrap_or_else(|| picker::default_name(&picked));
    let result = ctx.api.add_document(Some(&picked), &name, category)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, filter: ListFilter) -> Result<()> {
    let result = ctx.api.list_documents(&filter)?;
    print_documents(&result.listed_documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, indexes: Vec<String>, export: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.view_documents(&indexes)?;

    if let Some(target) = export {
        let [view] = result.viewed.as_slice() else {
            return Err(DocfolioError::Api(
                "--export needs exactly one document".into(),
            ));
        };
        std::fs::write(&target, &view.bytes)?;
        println!("Exported to {}", target.display());
        return Ok(());
    }

    print_views(&result.viewed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    index: &str,
    name: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .edit_document(index, name.as_deref(), category.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_documents(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_categories()?;
    print_categories(&result.categories);
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_add(ctx: &AppContext, name: &str) -> Result<()> {
    let result = ctx.api.add_category(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_remove(ctx: &AppContext, name: &str, force: bool) -> Result<()> {
    let result = ctx.api.remove_category(name, force)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(name) => print_help_for_command(name),
        None => print!("{}", get_grouped_help()),
    }
    Ok(())
}
