//! Markdown documentation generation from symbol-graph modules.
//!
//! This crate turns a directory of compiler-emitted symbol-graph documents
//! into one Markdown file per module, describing the module's exported
//! interface the way a generated Swift interface file would. Each module is
//! loaded (main document plus extension fragments), filtered to its
//! `public`/`open` surface, structured into top-level declarations and
//! foreign-type extension groups, ordered so definitions precede their
//! dependents, and rendered into fenced Swift blocks.
//!
//! ## Usage
//!
//! ```no_run
//! use symdoc_gen::{GenerateOptions, generate};
//! use symdoc_resolve::{Resolver, SwiftDemangler};
//!
//! let options = GenerateOptions {
//!     input_dir: "graphs".into(),
//!     output_dir: "docs".into(),
//!     package_description: None,
//!     modules: Vec::new(),
//!     include_reexported: false,
//!     jobs: symdoc_gen::DEFAULT_JOBS,
//! };
//! let resolver = Resolver::new(Box::new(SwiftDemangler::new("swift")));
//! let report = generate(&options, &resolver).unwrap();
//! println!("wrote {} modules", report.written.len());
//! ```

mod classify;
mod error;
mod filter;
mod loader;
mod module;
mod package;
mod readme;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use symdoc_resolve::Resolver;
use tracing::{info, instrument, warn};

#[doc(inline)]
pub use crate::error::GenError;
use crate::loader::ModuleFiles;
use crate::module::ModuleDoc;
use crate::package::SourcePaths;

/// Worker-pool size used when the caller does not pick one.
pub const DEFAULT_JOBS: usize = 4;

/// Everything a generation run needs to know. Populated by the CLI; no
/// global state is involved.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory containing `*.symbols.json` documents.
    pub input_dir: PathBuf,

    /// Directory receiving one `<Module>.md` per module. Created if absent.
    pub output_dir: PathBuf,

    /// Optional `swift package describe --type json` output, used to locate
    /// per-module READMEs.
    pub package_description: Option<PathBuf>,

    /// When non-empty, restrict generation to these modules. Requested
    /// modules missing from the input directory are reported as skipped.
    pub modules: Vec<String>,

    /// Keep re-exported declarations instead of dropping them.
    pub include_reexported: bool,

    /// Number of modules generated concurrently.
    pub jobs: usize,
}

/// What happened to each module of a run.
///
/// Both lists are sorted by module name. A skipped module never aborts the
/// run; only run-level failures surface as a [`GenError`].
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Modules whose documentation was written.
    pub written: Vec<String>,

    /// Modules that produced no output, with the reason.
    pub skipped: Vec<SkippedModule>,
}

/// One module that produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModule {
    pub module: String,
    pub reason: String,
}

enum ModuleOutcome {
    Written(String),
    Skipped { module: String, reason: String },
}

/// Generates documentation for every discovered (or requested) module.
///
/// Modules are processed independently on a bounded worker pool; the
/// resolver is shared across workers. Returns the per-module report.
///
/// # Errors
///
/// Returns [`GenError`] if:
/// - The input directory cannot be enumerated ([`GenError::is_input_dir`])
/// - The output directory cannot be created ([`GenError::is_io`])
///
/// Per-module failures (missing or malformed main document, write errors)
/// land in the report instead.
#[instrument(skip_all, fields(input = %options.input_dir.display()))]
pub fn generate(
    options: &GenerateOptions,
    resolver: &Resolver,
) -> Result<GenerateReport, GenError> {
    // Step 1: discover module documents.
    let mut modules = loader::discover_modules(&options.input_dir)?;

    // Step 2: restrict to explicitly requested modules.
    let mut report = GenerateReport::default();
    if !options.modules.is_empty() {
        let requested: HashSet<&str> =
            options.modules.iter().map(String::as_str).collect();
        for name in &options.modules {
            if !modules.contains_key(name) {
                report.skipped.push(SkippedModule {
                    module: name.clone(),
                    reason: "not found in input directory".to_owned(),
                });
            }
        }
        modules.retain(|name, _| requested.contains(name.as_str()));
    }

    // Step 3: package description, for README lookup.
    let sources = match &options.package_description {
        Some(path) => SourcePaths::load(path),
        None => SourcePaths::empty(),
    };

    // Step 4: run the per-module pipeline on a bounded worker pool.
    fs::create_dir_all(&options.output_dir)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()
        .map_err(|err| GenError::from(std::io::Error::other(err)))?;
    let generated_at = Utc::now();
    let outcomes: Vec<ModuleOutcome> = pool.install(|| {
        modules
            .par_iter()
            .map(|(name, files)| {
                run_module(
                    name,
                    files,
                    &sources,
                    resolver,
                    options,
                    generated_at,
                )
            })
            .collect()
    });

    // Step 5: fold outcomes into the report.
    for outcome in outcomes {
        match outcome {
            ModuleOutcome::Written(module) => report.written.push(module),
            ModuleOutcome::Skipped { module, reason } => {
                report.skipped.push(SkippedModule { module, reason });
            }
        }
    }
    report.written.sort();
    report.skipped.sort_by(|a, b| a.module.cmp(&b.module));
    Ok(report)
}

/// Generates and writes one module, translating every failure into a
/// skipped outcome.
fn run_module(
    name: &str,
    files: &ModuleFiles,
    sources: &SourcePaths,
    resolver: &Resolver,
    options: &GenerateOptions,
    generated_at: DateTime<Utc>,
) -> ModuleOutcome {
    let skipped = |reason: String| ModuleOutcome::Skipped {
        module: name.to_owned(),
        reason,
    };

    match module::generate_module(
        name,
        files,
        sources,
        resolver,
        options.include_reexported,
        generated_at,
    ) {
        Ok(ModuleDoc::Rendered(markdown)) => {
            let output_path = options.output_dir.join(format!("{name}.md"));
            match fs::write(&output_path, markdown) {
                Ok(()) => {
                    info!(
                        module = name,
                        path = %output_path.display(),
                        "wrote module documentation"
                    );
                    ModuleOutcome::Written(name.to_owned())
                }
                Err(err) => {
                    warn!(
                        module = name,
                        error = %err,
                        "failed to write module documentation"
                    );
                    skipped(format!("write failed: {err}"))
                }
            }
        }
        Ok(ModuleDoc::Empty(reason)) => {
            info!(module = name, reason, "skipping module");
            skipped(reason.to_owned())
        }
        Err(err) => {
            warn!(module = name, reason = %err.reason(), "skipping module");
            skipped(err.reason())
        }
    }
}
