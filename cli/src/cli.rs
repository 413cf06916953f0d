use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueHint};
use skigraph_engine::DEFAULT_MAX_ITERATIONS;
use skigraph_storage::{DEFAULT_QUERY_ENDPOINT, DEFAULT_UPDATE_ENDPOINT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "skigraph")]
/// Skigraph route inference toolkit
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the inference against a remote SPARQL endpoint
    Infer {
        /// URL of the SPARQL query endpoint
        #[arg(long, default_value = DEFAULT_QUERY_ENDPOINT, value_hint = ValueHint::Url)]
        query_endpoint: String,
        /// URL of the SPARQL update endpoint
        #[arg(long, default_value = DEFAULT_UPDATE_ENDPOINT, value_hint = ValueHint::Url)]
        update_endpoint: String,
        /// Timeout of a single request, in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
        /// Maximum number of applications of a rule before giving up on its fixed point
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_ITERATIONS,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        max_iterations: usize,
    },
    /// Load a RDF file into an in-memory store, run the inference and write the closed graph
    Materialize {
        /// File to load
        ///
        /// If no file is given, stdin is read.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// The format of the file to load
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default the format is guessed from the input file extension.
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// File to write the closed graph to
        ///
        /// If no file is given, stdout is written.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        to_file: Option<PathBuf>,
        /// The format of the output
        ///
        /// It can be an extension like "nt" or a MIME type like "application/n-triples".
        ///
        /// By default the format is guessed from the target file extension.
        #[arg(long, required_unless_present = "to_file")]
        to_format: Option<String>,
        /// Maximum number of applications of a rule before giving up on its fixed point
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_ITERATIONS,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        max_iterations: usize,
    },
    /// Print the SPARQL update of every rule
    Rules,
}
