//! CLI binary for outline2html.
//!
//! A thin shim over the library crate that maps CLI flags to an
//! `ExportConfig`, wires up a host and a sink, and clicks the registered
//! export action once.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use outline2html::{
    setup, ExportConfig, ExportContext, ExportProgressCallback, FileSink, GraphHost, Host,
    MarkdownOptions, Notice, Notifier, Outcome, ProgressCallback, Sink, SnapshotHost, Step,
    StdoutSink, Toolbar, EXPORT_HTML,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner showing the step the export is on.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new(bar: ProgressBar) -> Arc<Self> {
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Exporting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ExportProgressCallback for CliProgressCallback {
    fn on_step(&self, step: Step) {
        self.bar.set_message(format!("{step}…"));
    }

    fn on_export_complete(&self, _filename: &str, _bytes: usize) {
        self.bar.finish_and_clear();
    }
}

// ── CLI notifier ─────────────────────────────────────────────────────────────

/// Prints notices to stderr, above the spinner when one is running.
struct CliNotifier {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl Notifier for CliNotifier {
    fn notify(&self, notice: Notice) {
        if self.quiet && !notice.is_warning() {
            return;
        }
        let line = match &notice {
            Notice::Warning(m) => yellow(m),
            Notice::Success(m) => green(m),
        };
        match &self.bar {
            Some(bar) => {
                if notice.is_warning() {
                    bar.finish_and_clear();
                }
                bar.suspend(|| eprintln!("{line}"));
            }
            None => eprintln!("{line}"),
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Export a page from a graph directory into ./
  outline2html --graph ~/notes --page "Reading List"

  # Export into a specific folder
  outline2html --graph ~/notes --page "proj/alpha" -o exports/

  # Print the HTML instead of saving it
  outline2html --graph ~/notes --page Test --stdout > Test.html

  # Replay a JSON dump of the host's answers
  outline2html --snapshot page.json -o exports/

  # Machine-readable outcome
  outline2html --graph ~/notes --page Test --json

SNAPSHOT FORMAT:
  {
    "page":   { "originalName": "Test" },
    "graph":  { "path": "/home/me/notes" },
    "blocks": [ { "content": "A", "children": [ { "content": "B" } ] } ]
  }

EXIT STATUS:
  0  page exported
  1  export failed
  2  no current page (nothing exported)

ENVIRONMENT VARIABLES:
  OUTLINE2HTML_GRAPH        Graph directory
  OUTLINE2HTML_PAGE         Page to export
  OUTLINE2HTML_OUTPUT_DIR   Output directory
  RUST_LOG                  Log filter (overrides -v / -q)
"#;

/// Export an outline page as a standalone HTML file.
#[derive(Parser, Debug)]
#[command(
    name = "outline2html",
    version,
    about = "Export an outline page as a standalone HTML file",
    long_about = "Export one page of an outline graph (nested blocks) as a single HTML file \
with nested lists, absolute links to the graph's assets and MathJax math typesetting.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Graph directory (contains pages/, journals/ and assets/).
    #[arg(
        long,
        env = "OUTLINE2HTML_GRAPH",
        required_unless_present = "snapshot",
        conflicts_with = "snapshot"
    )]
    graph: Option<PathBuf>,

    /// Page to export. Without it there is no current page.
    #[arg(long, env = "OUTLINE2HTML_PAGE", requires = "graph")]
    page: Option<String>,

    /// JSON snapshot of the host's answers (page, graph, blocks).
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Directory the HTML file is written to.
    #[arg(short, long, env = "OUTLINE2HTML_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Write the HTML document to stdout instead of a file.
    #[arg(long, conflicts_with = "json")]
    stdout: bool,

    /// Name of the graph's asset folder.
    #[arg(long, default_value = "assets")]
    assets_dir: String,

    /// Keep `collapsed:: true` markers in the output.
    #[arg(long)]
    no_strip_collapsed: bool,

    /// Pass raw HTML inside blocks through unescaped.
    #[arg(long)]
    raw_html: bool,

    /// Print the outcome as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.verbose;
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

    // ── Collaborators ────────────────────────────────────────────────────
    let host: Arc<dyn Host> = match (&cli.snapshot, &cli.graph) {
        (Some(path), _) => Arc::new(
            SnapshotHost::load(path)
                .await
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        ),
        (None, Some(dir)) => Arc::new(
            GraphHost::open(dir)
                .context("Failed to open graph")?
                .with_current_page(cli.page.clone()),
        ),
        (None, None) => anyhow::bail!("one of --graph or --snapshot is required"),
    };

    let sink: Arc<dyn Sink> = if cli.stdout {
        Arc::new(StdoutSink)
    } else {
        Arc::new(FileSink::new(&cli.output_dir))
    };

    let bar = show_progress.then(ProgressBar::new_spinner);
    let spinner = bar.clone();
    let notifier = Arc::new(CliNotifier {
        bar: bar.clone(),
        quiet: cli.quiet,
    });
    let progress: Option<ProgressCallback> =
        bar.map(|b| CliProgressCallback::new(b) as Arc<dyn ExportProgressCallback>);

    let config = build_config(&cli, progress)?;
    let ctx = ExportContext::new(host, sink, notifier);

    // ── Register the action and click it ─────────────────────────────────
    let mut toolbar = Toolbar::new();
    setup(&mut toolbar).context("Failed to register export action")?;
    let result = toolbar.dispatch(EXPORT_HTML, &ctx, &config).await;
    if let Some(ref s) = spinner {
        s.finish_and_clear();
    }
    let outcome = result.context("Export failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialise outcome")?
        );
    }

    match outcome {
        Outcome::Exported { filename, bytes } => {
            if !cli.quiet && !cli.stdout && !cli.json {
                let path = FileSink::new(&cli.output_dir).path_for(&filename);
                eprintln!(
                    "   {} bytes  →  {}",
                    bytes,
                    bold(&path.display().to_string())
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::NoCurrentPage => Ok(ExitCode::from(2)),
    }
}

/// Map CLI args to `ExportConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExportConfig> {
    let mut builder = ExportConfig::builder()
        .assets_dir_name(cli.assets_dir.clone())
        .markdown(MarkdownOptions {
            raw_html: cli.raw_html,
            ..MarkdownOptions::default()
        });

    if cli.no_strip_collapsed {
        builder = builder.collapsed_marker(None::<String>);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
