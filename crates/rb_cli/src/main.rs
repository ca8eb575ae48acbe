// crates/rb_cli/src/main.rs
//
// Wires: argument parsing, tracing, manifest resolution, the sequential
// artifact load, page rendering, optional CSV preview and output writes.
// Any failure after argument parsing is reported once, as the dashboard alert
// plus its cause, with a mapped exit code.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    /// Bad flags, bad manifest, bad base.
    pub const USAGE: u8 = 2;
    pub const IO: u8 = 4;
    pub const RENDER: u8 = 5;
}

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use rb_io::canonical_json;
use rb_io::loader::{ArtifactSource, Loader};
use rb_io::manifest::{self, DashboardManifest};
use rb_report::{csv_preview, render_dashboard, DashboardConfig, Page, ReportError, DEFAULT_TITLE, DEFAULT_TOP_RISKS};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ALERT: &str =
    "Failed to load dashboard data. Make sure the JSON artifacts exist and the hosting setup is configured.";

#[derive(Debug)]
enum MainError {
    /// Manifest or base problems.
    Config(String),
    /// Writing outputs.
    Io(String),
    /// Page structure, template or serialization failures.
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Config(m) => write!(f, "config: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

impl From<ReportError> for MainError {
    fn from(e: ReportError) -> Self {
        MainError::Render(e.to_string())
    }
}

fn map_error(e: &MainError) -> u8 {
    use exitcodes::*;
    match e {
        MainError::Config(_) => USAGE,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn init_tracing(quiet: bool, log_json: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("riskboard: error: {e}");
            return ExitCode::from(exitcodes::USAGE);
        }
    };
    init_tracing(args.quiet, args.log_json);

    match run_once(&args).await {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            error!(error = %e, "dashboard render failed");
            eprintln!("riskboard: {ALERT}");
            eprintln!("riskboard: cause: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

/// Effective settings after merging flags over the manifest.
#[derive(Debug)]
struct Plan {
    source: ArtifactSource,
    manifest: DashboardManifest,
    config: DashboardConfig,
}

fn plan(args: &Args) -> Result<Plan, MainError> {
    let (source, manifest) = match &args.manifest {
        Some(path) => {
            let man = manifest::load_manifest(path).map_err(|e| MainError::Config(e.to_string()))?;
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
            let src = manifest::resolve_base(&dir, &man).map_err(|e| MainError::Config(e.to_string()))?;
            if let Some(id) = &man.id {
                info!(manifest = %path.display(), id = %id, "using dashboard manifest");
            }
            (src, man)
        }
        None => {
            let base = args.base.as_deref().unwrap_or("dist");
            let src = ArtifactSource::parse(base).map_err(|e| MainError::Config(e.to_string()))?;
            (src, DashboardManifest::default())
        }
    };
    let config = DashboardConfig {
        title: args
            .title
            .clone()
            .or_else(|| manifest.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        top_risks_cap: args.top_risks.or(manifest.top_risks_cap).unwrap_or(DEFAULT_TOP_RISKS),
    };
    Ok(Plan { source, manifest, config })
}

async fn run_once(args: &Args) -> Result<(), MainError> {
    let Plan { source, manifest, config } = plan(args)?;

    let loader = Loader::new(source).with_digests(manifest.inputs_sha256.unwrap_or_default());
    let bundle = loader.load_bundle().await;
    let loaded = bundle.statuses.iter().filter(|s| s.is_loaded()).count();
    info!(loaded, total = bundle.statuses.len(), "artifacts loaded");

    let mut page = Page::full(config.title.clone());
    for id in &args.hide {
        page.hide(*id);
    }
    render_dashboard(&mut page, &bundle, &config)?;

    if let Some(csv) = &args.csv {
        preview_csv(csv, &mut page).await;
    }

    write_outputs(args, &page)
}

/// Fill the CSV preview. A read failure leaves the preview empty and the rest
/// of the page untouched.
async fn preview_csv(path: &Path, page: &mut Page) {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            csv_preview::render_csv_preview(&String::from_utf8_lossy(&bytes), page.csv_preview_table.as_mut());
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "csv unreadable; preview left empty");
            csv_preview::render_csv_preview("", page.csv_preview_table.as_mut());
        }
    }
}

fn write_outputs(args: &Args, page: &Page) -> Result<(), MainError> {
    if args.wants("html") {
        let html = rb_report::render_html(page)?;
        let path = args.out.join("index.html");
        canonical_json::write_bytes_atomic(&path, html.as_bytes())
            .map_err(|e| MainError::Io(format!("write index.html: {e}")))?;
        info!(path = %path.display(), "wrote dashboard html");
    }
    if args.wants("json") {
        let value = rb_report::render_json(page)?;
        let path = args.out.join("dashboard.json");
        canonical_json::write_canonical_file(&path, &value)
            .map_err(|e| MainError::Io(format!("write dashboard.json: {e}")))?;
        info!(path = %path.display(), "wrote dashboard json");
    }
    Ok(())
}
