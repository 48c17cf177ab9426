//! Reads a GMX project and prints what was found as JSON.
//!
//!   gmx_inspect game.project.gmx
//!   gmx_inspect game.project.gmx --config reader.toml --actions actions.json --dump

use std::{collections::BTreeMap, path::PathBuf};

use clap::Parser;
use gmx_project_models::{Project, ResNode, ResourceKind};
use gmx_project_reader::{ActionCatalog, ProjectReader, ReaderConfig};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gmx_inspect")]
#[command(about = "Inspect a GameMaker Studio GMX project")]
struct Cli {
    /// Path of the `*.project.gmx` manifest
    manifest: PathBuf,
    /// Reader settings as TOML
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON array of action descriptors
    #[arg(long)]
    actions: Option<PathBuf>,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print every record instead of a summary
    #[arg(long)]
    dump: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    manifest: String,
    counts: BTreeMap<&'static str, usize>,
    last_ids: BTreeMap<&'static str, i32>,
    tree: &'a ResNode,
}

impl<'a> Summary<'a> {
    fn new(cli: &Cli, project: &'a Project) -> Self {
        let mut counts = BTreeMap::new();
        let mut last_ids = BTreeMap::new();
        for kind in ResourceKind::LISTED {
            counts.insert(kind.folder_name(), project.len_of(kind));
            if let Some(last_id) = project.last_id(kind) {
                last_ids.insert(kind.folder_name(), last_id);
            }
        }
        Self {
            manifest: cli.manifest.display().to_string(),
            counts,
            last_ids,
            tree: &project.tree,
        }
    }
}

fn install_logging(log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| miette!("{} is not a file path", log_file.display()))?;
    let dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = install_logging(cli.log_file.as_ref())?;

    let config = match &cli.config {
        Some(path) => ReaderConfig::load(path)?,
        None => ReaderConfig::default(),
    };
    let mut reader = ProjectReader::new(config);
    if let Some(path) = &cli.actions {
        let catalog = ActionCatalog::load(path)?;
        info!("{} action descriptors loaded", catalog.len());
        reader = reader.with_library(catalog);
    }

    let project = reader
        .read(&cli.manifest)
        .wrap_err_with(|| format!("failed to read {}", cli.manifest.display()))?;
    let json = if cli.dump {
        serde_json::to_string_pretty(&project)
    } else {
        serde_json::to_string_pretty(&Summary::new(&cli, &project))
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}
