//! Command-line interface for flatjava.

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::codegen::ClassBuilder;
use crate::config::Config;
use crate::report::{self, FileReport, Selection};
use crate::source::JavaSource;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Flatten Java method bodies into statement expressions, declarators and calls.
#[derive(Parser)]
#[command(name = "flatjava")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report package, public class and per-method analysis for Java files
    Inspect(InspectArgs),
    /// Generate a class with a `main` method
    Scaffold(ScaffoldArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Arguments for the inspect command.
#[derive(Parser)]
pub struct InspectArgs {
    /// Files or directories to inspect
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Only report methods with this name
    #[arg(short, long)]
    pub method: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the scaffold command.
#[derive(Parser)]
pub struct ScaffoldArgs {
    /// Package of the generated class
    #[arg(short, long, default_value = "")]
    pub package: String,

    /// Name of the generated public class
    #[arg(short = 'C', long = "class")]
    pub class_name: String,

    /// Statement for the generated main method (repeatable)
    #[arg(short, long = "statement")]
    pub statements: Vec<String>,

    /// Source root to write into; prints to stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Expand directories into the `.java` files below them, skipping hidden
/// and build output directories and anything matched by `excluded_paths`.
pub fn collect_files(paths: &[PathBuf], config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.exists() {
            anyhow::bail!("cannot access path {}", root.display());
        }

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !(name.starts_with('.') || name == "target" || name == "build" || name == "out")
            })
        {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("java")
                && !config.is_path_excluded(path)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Parse and analyze one file. Failures become failed reports.
fn inspect_file(path: &Path, config: &Config, method: Option<&str>) -> FileReport {
    let selection = Selection {
        method,
        include_non_public: config.include_non_public,
    };
    let result = JavaSource::parse_with(path, config)
        .and_then(|source| FileReport::from_source(&source, selection));

    match result {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping file");
            FileReport::failed(path, e)
        }
    }
}

/// Run the inspect command.
pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<i32> {
    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = match collect_files(&args.paths, &config) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if files.is_empty() {
        eprintln!("Warning: no Java files to inspect");
        return Ok(EXIT_SUCCESS);
    }
    tracing::debug!(files = files.len(), "inspecting");

    let method = args.method.as_deref();
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| inspect_file(path, &config, method))
        .collect();

    match args.format {
        Format::Json => report::write_json(&reports)?,
        Format::Pretty => report::write_pretty(&reports),
    }

    if reports.iter().any(FileReport::is_failed) {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the scaffold command.
pub fn run_scaffold(args: &ScaffoldArgs) -> anyhow::Result<i32> {
    let mut builder = match ClassBuilder::new(&args.package, &args.class_name) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let main = match args.statements.as_slice() {
        [single] => builder.main_method_statement(single),
        statements => {
            let code: Vec<String> = statements
                .iter()
                .map(|s| format!("{};", s.trim().trim_end_matches(';')))
                .collect();
            builder.main_method(code.join("\n"))
        }
    };
    builder.add_method(main);
    let file = builder.build();

    match &args.out {
        Some(dir) => {
            let path = file.write_to(dir)?;
            println!("Created {}", path.display());
        }
        None => print!("{}", file.render()),
    }

    Ok(EXIT_SUCCESS)
}
