use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use itertools::Itertools;
use mimalloc::MiMalloc;
use symdoc_gen::{DEFAULT_JOBS, GenerateOptions, generate};
use symdoc_resolve::{Resolver, SwiftDemangler};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

// Use mimalloc: generation is allocation-heavy (thousands of short-lived
// strings per module).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Generate Markdown interface documentation from compiler-emitted symbol
/// graph files.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one Markdown file per module
    ///
    /// Reads `<Module>.symbols.json` main documents and
    /// `<Module>@<Other>.symbols.json` extension fragments from the input
    /// directory and writes `<Module>.md` files describing each module's
    /// public interface.
    Generate {
        /// Directory containing *.symbols.json documents
        #[arg(short, long)]
        input: PathBuf,

        /// Directory receiving the generated Markdown files
        #[arg(short, long)]
        output: PathBuf,

        /// Output of `swift package describe --type json`, used to locate
        /// per-module READMEs
        #[arg(long)]
        package_description: Option<PathBuf>,

        /// Restrict generation to this module (repeatable)
        #[arg(long = "module")]
        modules: Vec<String>,

        /// Keep re-exported declarations in the documented interface
        #[arg(long)]
        include_reexported: bool,

        /// Number of modules to generate concurrently
        #[arg(long, default_value_t = DEFAULT_JOBS)]
        jobs: usize,

        /// Demangler executable used to resolve mangled references
        #[arg(long, default_value = "swift")]
        demangler: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging. Output goes to stderr so the generated
    // files and shell pipelines over them stay clean. Default to warn,
    // allowlist our crates.
    const CRATES: &[&str] = &[
        "symdoc",
        "symdoc_gen",
        "symdoc_order",
        "symdoc_render",
        "symdoc_resolve",
        "symdoc_schemas",
    ];
    let level = cli.verbose.tracing_level_filter();
    let allowlist = CRATES.iter().map(|c| format!("{c}={level}")).join(",");
    let filter = EnvFilter::new(format!("warn,{allowlist}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .init();

    match cli.command {
        Commands::Generate {
            input,
            output,
            package_description,
            modules,
            include_reexported,
            jobs,
            demangler,
        } => {
            let options = GenerateOptions {
                input_dir: input,
                output_dir: output,
                package_description,
                modules,
                include_reexported,
                jobs,
            };
            let resolver =
                Resolver::new(Box::new(SwiftDemangler::new(demangler)));
            let report = generate(&options, &resolver)?;

            eprintln!("generated {} module(s)", report.written.len());
            for skipped in &report.skipped {
                eprintln!("skipped {}: {}", skipped.module, skipped.reason);
            }
            Ok(())
        }
    }
}
