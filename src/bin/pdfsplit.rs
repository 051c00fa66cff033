//! CLI binary for pdfsplit-client.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, drives one upload workflow cycle, and renders the
//! status banner in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfsplit_client::{
    Banner, BannerKind, ClientConfig, HttpSplitService, Phase, ThemeMode, ThemePreferences,
    UploadWorkflow,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: u8, s: &str) -> String {
    format!("\x1b[{code}m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Foreground colour per banner kind, as a light/dark pair: the standard
/// (darker) SGR codes read well on a light terminal, the bright variants
/// on a dark one. Same pairing the web client's status callouts use.
fn banner_colour(kind: BannerKind, mode: ThemeMode) -> u8 {
    let (light, dark) = match kind {
        BannerKind::Error => (31, 91),
        BannerKind::Cancelled => (90, 37),
        BannerKind::Warning => (33, 93),
        BannerKind::Success => (32, 92),
        BannerKind::Processing => (36, 96),
    };
    match mode {
        ThemeMode::Light => light,
        ThemeMode::Dark => dark,
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Split into single pages, service on localhost:8000
  pdfsplit report.pdf

  # Three pages per chunk, explicit server
  pdfsplit -p 3 -s https://splitter.example.com report.pdf

  # Answer the size confirmation automatically, save elsewhere
  pdfsplit -p 50 --yes -o ~/Downloads report.pdf

  # Tighter validation deadline, bounded split call
  pdfsplit --validate-timeout 10 --split-timeout 300 report.pdf

  # Pick the banner palette, persisted for front-ends sharing the config dir
  pdfsplit --theme light
  pdfsplit --toggle-theme

ENDPOINTS:
  POST {server}/api/validate-split   multipart file + pages_per_split → verdict JSON
  POST {server}/api/split-pdf        multipart file + pages_per_split → ZIP bytes

ENVIRONMENT VARIABLES:
  PDFSPLIT_SERVER             Service base URL (default http://localhost:8000)
  PDFSPLIT_PAGES              Default pages per split
  PDFSPLIT_OUTPUT_DIR         Where archives are saved (default .)
  PDFSPLIT_VALIDATE_TIMEOUT   Validation timeout in seconds (default 60)
  PDFSPLIT_SPLIT_TIMEOUT      Split timeout in seconds (default: unbounded)
  RUST_LOG                    Tracing filter override (e.g. pdfsplit_client=debug)

EXIT STATUS:
  0  archive saved, or split declined at the confirmation prompt
  1  validation or split failed
"#;

/// Split PDFs through a remote splitting service.
#[derive(Parser, Debug)]
#[command(
    name = "pdfsplit",
    version,
    about = "Split PDFs through a remote splitting service",
    long_about = "Upload a PDF to a remote splitting service, pass its validation and \
confirmation steps, and save the returned ZIP of split documents locally.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to split.
    file: Option<PathBuf>,

    /// Pages per split chunk.
    #[arg(
        short = 'p',
        long,
        env = "PDFSPLIT_PAGES",
        default_value = "1",
        long_help = "Pages per split chunk, treated like the form field it mirrors:\n\
          values below 1 snap to 1; non-numeric input halts with a warning before any upload."
    )]
    pages_per_split: String,

    /// Base URL of the split service.
    #[arg(
        short = 's',
        long,
        env = "PDFSPLIT_SERVER",
        default_value = "http://localhost:8000"
    )]
    server: String,

    /// Directory where the returned archive is saved.
    #[arg(short, long = "output-dir", env = "PDFSPLIT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Answer yes to a service confirmation request without prompting.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Validation request timeout in seconds.
    #[arg(long, env = "PDFSPLIT_VALIDATE_TIMEOUT", default_value_t = 60)]
    validate_timeout: u64,

    /// Split request timeout in seconds (unbounded if unset).
    #[arg(long, env = "PDFSPLIT_SPLIT_TIMEOUT")]
    split_timeout: Option<u64>,

    /// Set and persist the theme preference: light or dark.
    #[arg(long, value_name = "MODE", conflicts_with = "toggle_theme")]
    theme: Option<ThemeMode>,

    /// Flip the persisted theme preference.
    #[arg(long)]
    toggle_theme: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "PDFSPLIT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSPLIT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFSPLIT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active; the
    // banner is the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Theme preference ─────────────────────────────────────────────────
    // Loaded on every run: the persisted mode picks the banner palette
    // below, not just the --theme/--toggle-theme maintenance paths.
    let mut prefs = ThemePreferences::load();
    if let Some(mode) = cli.theme {
        prefs
            .set_mode(mode)
            .context("Failed to save theme preference")?;
    }
    if cli.toggle_theme {
        prefs
            .toggle()
            .context("Failed to save theme preference")?;
    }
    if cli.theme.is_some() || cli.toggle_theme {
        if !cli.quiet {
            eprintln!("Theme: {}", prefs.mode());
        }
        if cli.file.is_none() {
            return Ok(());
        }
    }
    let theme = prefs.mode();

    let Some(file) = cli.file.as_ref() else {
        anyhow::bail!("No input file given; see --help");
    };
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Input path has no file name: {}", file.display()))?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read '{}'", file.display()))?;

    // ── Build config & workflow ──────────────────────────────────────────
    let mut builder = ClientConfig::builder()
        .base_url(cli.server.as_str())
        .validate_timeout_secs(cli.validate_timeout)
        .download_dir(cli.output_dir.clone());
    if let Some(secs) = cli.split_timeout {
        builder = builder.split_timeout_secs(secs);
    }
    let config = builder.build().context("Invalid configuration")?;

    let service = Arc::new(HttpSplitService::new(config.clone()).context("Invalid configuration")?);
    let mut workflow = UploadWorkflow::new(service, config);

    // Same coercion the form field applies on blur: "0" becomes "1",
    // non-numeric text stays and halts with a warning below.
    workflow.set_pages_per_split(cli.pages_per_split.as_str());
    workflow.commit_pages_per_split();

    // ── Validate (and, with no confirmation gate, split in one go) ───────
    let bar = show_progress.then(|| spinner("Uploading", file_name.clone()));
    let selected = workflow.select_file(file_name.clone(), bytes).await;
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    selected.context("Upload attempt rejected")?;

    // ── Confirmation gate ────────────────────────────────────────────────
    if let Some(message) = workflow.pending_confirmation().map(str::to_string) {
        let mark = paint(banner_colour(BannerKind::Warning, theme), "⚠");
        eprintln!("{mark} {}", bold(&message));
        let question = gate_question(workflow.pending_total_pages());
        let proceed = cli.yes || prompt_yes_no(&question);
        if proceed {
            let bar = show_progress.then(|| spinner("Splitting", file_name.clone()));
            let confirmed = workflow.confirm().await;
            if let Some(b) = &bar {
                b.finish_and_clear();
            }
            confirmed.context("Confirmation failed")?;
        } else {
            workflow.cancel().context("Cancellation failed")?;
        }
    }

    // ── Outcome ──────────────────────────────────────────────────────────
    match workflow.phase() {
        Phase::Succeeded { archive_path, .. } => {
            if !cli.quiet {
                if let Some(banner) = workflow.banner() {
                    eprintln!("{}", banner_line(&banner, theme));
                }
            }
            // Archive path on stdout, for scripts.
            println!("{}", archive_path.display());
            Ok(())
        }
        Phase::Cancelled => {
            if !cli.quiet {
                if let Some(banner) = workflow.banner() {
                    eprintln!("{}", banner_line(&banner, theme));
                }
            }
            Ok(())
        }
        _ => {
            // Failed, or halted locally with a warning. Errors print even
            // under --quiet.
            if let Some(banner) = workflow.banner() {
                eprintln!("{}", banner_line(&banner, theme));
            }
            std::process::exit(1);
        }
    }
}

/// Spinner shown while a remote call is in flight.
fn spinner(prefix: &str, message: String) -> ProgressBar {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
    bar.set_style(style);
    bar.set_prefix(prefix.to_string());
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// One styled status line per banner kind, coloured for the active theme.
fn banner_line(banner: &Banner, theme: ThemeMode) -> String {
    let mark = match banner.kind {
        BannerKind::Error => "✘",
        BannerKind::Cancelled => "ℹ",
        BannerKind::Warning => "⚠",
        BannerKind::Success => "✔",
        BannerKind::Processing => "…",
    };
    format!(
        "{} {}",
        paint(banner_colour(banner.kind, theme), mark),
        banner.text
    )
}

/// The confirmation-gate question, naming the reported page count when the
/// service sent one.
fn gate_question(total_pages: Option<u32>) -> String {
    match total_pages {
        Some(pages) => format!("Proceed with split? (document has {pages} pages)"),
        None => "Proceed with split?".to_string(),
    }
}

/// Ask on stderr, read one line from stdin. EOF or anything but y/yes is No.
fn prompt_yes_no(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
