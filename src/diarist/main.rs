use clap::Parser;
use diarist::api::{ConfigAction, DiaristPaths, DiaryApi, MessageLevel, ThemeAction};
use diarist::config::DiaristConfig;
use diarist::error::{DiaryError, Result};
use diarist::logging::{init_logging, Verbosity};
use diarist::model::{DiaryRecord, EntryKind, Theme};
use diarist::render::EntryOrder;
use diarist::store::fs::FileStore;
use directories::ProjectDirs;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

mod args;
mod print;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DiaryApi<FileStore>,
    theme: Theme,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Create { title, pin, color }) => handle_create(&mut ctx, title, pin, color),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Open {
            diary,
            pin,
            html,
            newest_first,
        }) => handle_open(&ctx, diary, pin, html, newest_first),
        Some(Commands::Write { diary, text, pin }) => handle_write(&mut ctx, diary, text, pin),
        Some(Commands::Draw {
            diary,
            script,
            display,
            pin,
        }) => handle_draw(&mut ctx, diary, script, display, pin),
        Some(Commands::Image { diary, files, pin }) => {
            handle_media(&mut ctx, diary, EntryKind::Image, files, pin)
        }
        Some(Commands::Audio { diary, files, pin }) => {
            handle_media(&mut ctx, diary, EntryKind::Audio, files, pin)
        }
        Some(Commands::Theme { action }) => handle_theme(&mut ctx, action),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("DIARIST_HOME") {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "diarist", "diarist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DiaryError::Store("Could not determine data directory".into()))
}

fn init_context() -> Result<AppContext> {
    let paths = DiaristPaths::new(data_dir()?);
    let config = DiaristConfig::load(paths.config_dir()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        DiaristConfig::default()
    });
    let store = FileStore::new(paths.storage_dir());
    let api = DiaryApi::new(store, paths, config);
    let theme = api.current_theme()?;

    Ok(AppContext { api, theme })
}

fn handle_create(
    ctx: &mut AppContext,
    title: String,
    pin: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let pin = match pin {
        Some(pin) => pin,
        None => prompt_pin("New PIN (4 digits): ")?,
    };
    let result = ctx.api.create_diary(&title, color.as_deref(), &pin)?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_diaries()?;
    print::print_diaries(&result.listed_diaries, ctx.theme);
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_open(
    ctx: &AppContext,
    selector: String,
    pin: Option<String>,
    html: bool,
    newest_first: bool,
) -> Result<()> {
    let Some((diary, pin)) = enter_diary(ctx, &selector, pin)? else {
        return Ok(());
    };
    let order = newest_first.then_some(EntryOrder::NewestFirst);
    let result = ctx.api.open_diary(&diary.id, &pin, order)?;

    match (&result.display, html) {
        (Some(display), true) => print!("{}", display.to_html()),
        (Some(display), false) => print::print_diary(&diary, display, ctx.theme),
        (None, _) => {}
    }
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_write(
    ctx: &mut AppContext,
    selector: String,
    text: Vec<String>,
    pin: Option<String>,
) -> Result<()> {
    let Some((diary, _)) = enter_diary(ctx, &selector, pin)? else {
        return Ok(());
    };
    let content = if text.len() == 1 && text[0] == "-" {
        read_stdin()?
    } else {
        text.join(" ")
    };
    let result = ctx.api.add_text(&diary.id, &content)?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_draw(
    ctx: &mut AppContext,
    selector: String,
    script: String,
    display: Option<String>,
    pin: Option<String>,
) -> Result<()> {
    let display_size = display.as_deref().map(parse_display_size).transpose()?;
    let Some((diary, _)) = enter_diary(ctx, &selector, pin)? else {
        return Ok(());
    };
    let script = if script == "-" {
        read_stdin()?
    } else {
        std::fs::read_to_string(&script)?
    };
    let result = ctx.api.add_drawing(&diary.id, &script, display_size)?;
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_media(
    ctx: &mut AppContext,
    selector: String,
    kind: EntryKind,
    files: Vec<PathBuf>,
    pin: Option<String>,
) -> Result<()> {
    let Some((diary, _)) = enter_diary(ctx, &selector, pin)? else {
        return Ok(());
    };
    let result = ctx.api.add_media(&diary.id, kind, &files)?;
    print::print_messages(&result.messages);
    if result.affected_entries.is_empty() && result.has_errors() {
        return Err(DiaryError::Api("No files were added".into()));
    }
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, action: Option<String>) -> Result<()> {
    let action = match action.as_deref() {
        None => ThemeAction::Show,
        Some("toggle") => ThemeAction::Toggle,
        Some(name) => ThemeAction::Set(Theme::from_str(name).map_err(DiaryError::Api)?),
    };
    let result = ctx.api.theme(action)?;
    if let Some(theme) = result.theme {
        ctx.theme = theme;
        if result.messages.is_empty() {
            println!("{}", theme);
        }
    }
    print::print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let Some(error) = result
        .messages
        .iter()
        .find(|m| m.level == MessageLevel::Error)
    {
        return Err(DiaryError::Api(error.content.clone()));
    }
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print::print_config(config);
    }
    print::print_messages(&result.messages);
    Ok(())
}

/// Resolves and unlocks a diary for the detail commands.
///
/// An unknown diary prints a notice and the listing instead and yields
/// `None`. A wrong PIN is re-prompted when prompting interactively; a PIN
/// given on the command line gets one try.
fn enter_diary(
    ctx: &AppContext,
    selector: &str,
    pin: Option<String>,
) -> Result<Option<(DiaryRecord, String)>> {
    let diary = match ctx.api.find_diary(selector) {
        Ok(diary) => diary,
        Err(DiaryError::NotFound(what)) => {
            print::print_notice(&format!("Diary not found: {}", what));
            handle_list(ctx)?;
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let attempts = if pin.is_some() {
        1
    } else {
        ctx.api.settings().pin_attempts.max(1)
    };
    for attempt in 1..=attempts {
        let candidate = match &pin {
            Some(pin) => pin.clone(),
            None => prompt_pin(&format!("PIN for {}: ", diary.title))?,
        };
        match ctx.api.unlock(&diary.id, &candidate) {
            Ok(_) => return Ok(Some((diary, candidate))),
            Err(DiaryError::Auth) if attempt < attempts => print::print_notice("Wrong PIN!"),
            Err(e) => return Err(e),
        }
    }
    Err(DiaryError::Auth)
}

fn prompt_pin(prompt: &str) -> Result<String> {
    let term = console::Term::stderr();
    term.write_str(prompt)?;
    let pin = term.read_secure_line()?;
    Ok(pin.trim().to_string())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_display_size(s: &str) -> Result<(f32, f32)> {
    let invalid = || DiaryError::Api(format!("Invalid display size (expected WxH): {}", s));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: f32 = w.trim().parse().map_err(|_| invalid())?;
    let h: f32 = h.trim().parse().map_err(|_| invalid())?;
    if w <= 0.0 || h <= 0.0 {
        return Err(invalid());
    }
    Ok((w, h))
}
