use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use yamlpatch::config::Config;
use yamlpatch::file::loader::{load_document, load_ops_file, STDIN_PATH};
use yamlpatch::file::saver::{render_document, save_document};
use yamlpatch::patch::{FindOp, Ops};
use yamlpatch::pointer::Pointer;

/// yamlpatch - apply path-addressed operations to a YAML document
#[derive(Parser, Debug)]
#[command(name = "yamlpatch")]
#[command(version)]
#[command(about = "Apply path-addressed operations to a YAML document", long_about = None)]
struct Cli {
    /// YAML file to patch (`-` reads stdin)
    file: PathBuf,

    /// Ops file to apply, in order (repeatable)
    #[arg(short, long = "ops-file", value_name = "PATH")]
    ops_file: Vec<PathBuf>,

    /// Print only the value at this pointer after patching
    #[arg(short, long, value_name = "POINTER", conflicts_with = "in_place")]
    path: Option<Pointer>,

    /// Write the result back to FILE instead of stdout
    #[arg(short, long)]
    in_place: bool,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if cli.in_place && cli.file.as_os_str() == STDIN_PATH {
        anyhow::bail!("Cannot patch stdin in place");
    }

    let doc = load_document(&cli.file)?;

    let mut ops = Ops::new();
    for ops_path in config.default_ops_files.iter().chain(&cli.ops_file) {
        debug!("loading ops file '{}'", ops_path.display());
        ops.extend(load_ops_file(ops_path)?);
    }
    info!("applying {} ops to '{}'", ops.len(), cli.file.display());

    let patched = ops.apply(&doc).context("Failed to apply operations")?;

    if cli.in_place {
        return save_document(&cli.file, &patched, &config);
    }

    let output = match &cli.path {
        Some(pointer) => FindOp::new(pointer.clone())
            .apply(&patched)
            .with_context(|| format!("Failed to find '{}'", pointer))?,
        None => patched,
    };

    let yaml = render_document(&output, &config)?;
    io::stdout()
        .write_all(yaml.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_path_conflicts_with_in_place() {
        let err = Cli::try_parse_from(["yamlpatch", "doc.yml", "-i", "-p", "/a"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["yamlpatch", "doc.yml", "-p", "/a"]).unwrap();
        assert_eq!(cli.path, Some(Pointer::parse("/a").unwrap()));
        assert!(!cli.in_place);
    }
}
