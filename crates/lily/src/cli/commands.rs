//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Picks a theme and formats output for humans (or JSON for scripts)
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments to typed commands via clap
//! 2. **Context Setup**: configuration and data directory via `lilyapp::init`. The
//!    backend is built only by commands that read or write entries, so `config` and
//!    `theme` keep working when it is misconfigured.
//! 3. **API Dispatch**: call the matching `LilyApi` method
//! 4. **Output Formatting**: `CmdResult` to terminal output through `render.rs`
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and exits 1
//!
//! Failures the command layer reports as messages (an unreachable store while
//! listing, a cover that could not be uploaded) are printed and do not change
//! the exit status.

use super::logging;
use super::render::{render_json, Output};
use super::setup::{
    build_command, Cli, Commands, CompletionShell, ConfigCommands, CoreCommands, DataCommands,
    MiscCommands, OutputMode, ThemeCommands,
};
use super::styles::detect_mode;
use anyhow::{Context, Result};
use clap::Parser;
use lilyapp::commands::config::ConfigAction;
use lilyapp::commands::theme::ThemeAction;
use lilyapp::commands::{CmdMessage, CmdResult};
use lilyapp::config::CONFIG_FILENAME;
use lilyapp::draft::{CoverSource, EntryDraft};
use lilyapp::filter::FilterCriteria;
use lilyapp::init::{has_config_file, LilyContext, Settings};
use lilyapp::model::{Category, Rating};
use lilyapp::prefs::{Preferences, ThemeMode};
use std::path::PathBuf;
use tracing::debug;

struct AppContext {
    settings: Settings,
    out: Output,
    mode: OutputMode,
    /// The theme in effect and whether it was chosen with `lily theme`.
    theme: (ThemeMode, bool),
}

/// Fields of `lily add`, in argument order.
struct AddArgs {
    title: String,
    author: String,
    category: Category,
    rating: Rating,
    note: Option<String>,
    tags: Option<String>,
    cover: Option<PathBuf>,
    cover_url: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Completions need no configuration or store
    if let Some(Commands::Misc(MiscCommands::Completions { shell })) = &cli.command {
        return handle_completions(*shell);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List {
                category,
                rating,
                search,
            } => handle_list(
                &ctx,
                FilterCriteria::new(
                    category.into(),
                    rating.into(),
                    search.unwrap_or_default(),
                ),
            ),
            CoreCommands::Search { term } => handle_list(
                &ctx,
                FilterCriteria::default().with_search(term.join(" ")),
            ),
            CoreCommands::Add {
                title,
                author,
                category,
                rating,
                note,
                tags,
                cover,
                cover_url,
            } => handle_add(
                &ctx,
                AddArgs {
                    title,
                    author,
                    category,
                    rating,
                    note,
                    tags,
                    cover,
                    cover_url,
                },
            ),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Stats => handle_stats(&ctx),
            DataCommands::Export { dir } => handle_export(&ctx, dir),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { action } => handle_config(&ctx, action),
            MiscCommands::Theme { action } => handle_theme(&ctx, action),
            MiscCommands::Completions { shell } => handle_completions(shell),
        },
        None => handle_list(&ctx, FilterCriteria::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let settings = Settings::load()?;

    let stored = Preferences::load(&settings.data_dir)
        .map(|p| p.theme)
        .unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable preferences: {}", e);
            None
        });
    let theme = match stored {
        Some(mode) => (mode, true),
        None => (detect_mode(), false),
    };
    debug!(theme = %theme.0, saved = theme.1, "resolved theme");

    let use_color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && console::colors_enabled();

    Ok(AppContext {
        out: Output::new(theme.0, use_color),
        mode: cli.output,
        theme,
        settings,
    })
}

impl AppContext {
    /// Builds the configured backend.
    fn connect(&self) -> Result<LilyContext> {
        Ok(self.settings.connect()?)
    }
}

fn handle_list(ctx: &AppContext, criteria: FilterCriteria) -> Result<()> {
    let result = ctx.connect()?.api.list(&criteria)?;
    if emit_json(ctx, &result)? {
        return Ok(());
    }

    print!(
        "{}",
        ctx.out.render_list(&result.listed_entries, result.summary.as_ref())
    );
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let cover = match (args.cover, args.cover_url) {
        (Some(path), _) => CoverSource::File(path),
        (None, Some(url)) => CoverSource::Url(url),
        (None, None) => CoverSource::None,
    };
    let draft = EntryDraft {
        category: args.category,
        rating: args.rating,
        note: args.note.unwrap_or_default(),
        tags: args.tags.unwrap_or_default(),
        cover,
        ..EntryDraft::new(args.title, args.author)
    };

    let mut lily = ctx.connect()?;
    let result = lily.api.create(draft)?;
    if emit_json(ctx, &result)? {
        return Ok(());
    }

    print!("{}", ctx.out.render_list(&result.affected_entries, None));
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.connect()?.api.stats()?;
    if emit_json(ctx, &result)? {
        return Ok(());
    }

    if let Some(summary) = &result.summary {
        print!("{}", ctx.out.render_stats(summary));
    }
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Could not determine the current directory")?,
    };
    let result = ctx.connect()?.api.export(&dir)?;
    if emit_json(ctx, &result)? {
        return Ok(());
    }
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, action: Option<ConfigCommands>) -> Result<()> {
    let action = match action {
        Some(ConfigCommands::Template) => ConfigAction::Template,
        Some(ConfigCommands::Show) | None => ConfigAction::Show,
    };
    let result = ctx.settings.config(action)?;

    if let Some(template) = &result.config_template {
        print!("{}", template);
        return Ok(());
    }
    if emit_json(ctx, &result)? {
        return Ok(());
    }

    if let Some(config) = &result.config {
        let file = has_config_file(&ctx.settings.config_dir)
            .then(|| ctx.settings.config_dir.join(CONFIG_FILENAME));
        print!("{}", ctx.out.render_config(config, file));
    }
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &AppContext, action: Option<ThemeCommands>) -> Result<()> {
    let (current, saved) = ctx.theme;
    let action = match action {
        Some(ThemeCommands::Show) | None => ThemeAction::Show,
        Some(ThemeCommands::Light) => ThemeAction::Set(ThemeMode::Light),
        Some(ThemeCommands::Dark) => ThemeAction::Set(ThemeMode::Dark),
        Some(ThemeCommands::Toggle) => ThemeAction::Toggle { current },
    };
    let is_show = matches!(action, ThemeAction::Show);
    let mut result = ctx.settings.theme(action)?;

    if is_show {
        let source = if saved { "saved" } else { "detected" };
        result.add_message(CmdMessage::info(format!("Theme: {} ({})", current, source)));
    }
    if emit_json(ctx, &result)? {
        return Ok(());
    }
    ctx.out.print_messages(&result.messages);
    Ok(())
}

fn handle_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = build_command();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut cmd,
        "lily",
        &mut std::io::stdout(),
    );
    Ok(())
}

/// Prints `result` as JSON when `--output json` is set. Returns whether it did.
fn emit_json(ctx: &AppContext, result: &CmdResult) -> Result<bool> {
    if ctx.mode != OutputMode::Json {
        return Ok(false);
    }
    println!("{}", render_json(result)?);
    Ok(true)
}
