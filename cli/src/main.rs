#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use clap::Parser;
use oxigraph::io::RdfFormat;
use skigraph_engine::{InferenceConfig, InferenceReport, Orchestrator};
use skigraph_rules::Rule;
use skigraph_storage::{HttpGateway, HttpGatewayConfig, MemoryGateway};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, stdin, stdout, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = Args::parse();
    match matches.command {
        Command::Infer {
            query_endpoint,
            update_endpoint,
            timeout,
            max_iterations,
        } => {
            let gateway = HttpGateway::new(HttpGatewayConfig {
                query_endpoint,
                update_endpoint,
                timeout: Duration::from_secs(timeout),
            })
            .context("Failed to build the HTTP client")?;
            let config = InferenceConfig::default().with_max_iterations(max_iterations);
            let report = Orchestrator::new(&gateway, config)
                .run()
                .await
                .with_context(|| {
                    format!(
                        "Inference against {} failed",
                        gateway.config().query_endpoint
                    )
                })?;
            print_report(&report);
            Ok(())
        }
        Command::Materialize {
            file,
            format,
            to_file,
            to_format,
            max_iterations,
        } => {
            let format = if let Some(format) = format {
                rdf_format_from_name(&format)?
            } else if let Some(file) = &file {
                rdf_format_from_path(file)?
            } else {
                bail!("The --format option must be set when reading from stdin")
            };
            let to_format = if let Some(format) = to_format {
                rdf_format_from_name(&format)?
            } else if let Some(file) = &to_file {
                rdf_format_from_path(file)?
            } else {
                bail!("The --to-format option must be set when writing to stdout")
            };

            let gateway = MemoryGateway::new()?;
            if let Some(file) = file {
                let reader = File::open(&file)
                    .with_context(|| format!("Failed to open {}", file.display()))?;
                gateway
                    .load(format, BufReader::new(reader))
                    .with_context(|| format!("Failed to load {}", file.display()))?;
            } else {
                gateway
                    .load(format, stdin().lock())
                    .context("Failed to load the data read from stdin")?;
            }

            info!(triples = gateway.store().len()?, "Data loaded");

            let config = InferenceConfig::default().with_max_iterations(max_iterations);
            Orchestrator::new(&gateway, config).run().await?;

            if let Some(to_file) = to_file {
                close_file_writer(gateway.dump(to_format, BufWriter::new(File::create(to_file)?))?)?;
            } else {
                gateway.dump(to_format, stdout().lock())?.flush()?;
            }
            Ok(())
        }
        Command::Rules => {
            for rule in Rule::ALL {
                println!("# {rule}\n{}\n", rule.template());
            }
            Ok(())
        }
    }
}

fn print_report(report: &InferenceReport) {
    for phase in &report.phases {
        let applications: usize = phase.closures.iter().map(|c| c.applications).sum();
        println!(
            "{}: {} new facts in {applications} applications",
            phase.phase,
            phase.derived()
        );
    }
    println!("total: {} new facts", report.derived());
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}
