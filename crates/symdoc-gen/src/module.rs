//! The per-module pipeline: load, filter, classify, order, render, assemble.

use chrono::{DateTime, SecondsFormat, Utc};
use symdoc_order::{find_main_symbol, sort_by_hierarchy};
use symdoc_render::SymbolRenderer;
use symdoc_resolve::Resolver;
use tracing::{debug, instrument, warn};

use crate::classify::classify;
use crate::error::GenError;
use crate::filter::filter_symbols;
use crate::loader::{ModuleFiles, load_module};
use crate::package::SourcePaths;
use crate::readme::splice_readme;

/// What the per-module pipeline produced.
pub(crate) enum ModuleDoc {
    /// The assembled Markdown document.
    Rendered(String),
    /// Nothing to document; the reason lands in the run report.
    Empty(&'static str),
}

/// Runs the whole pipeline for one module and returns its Markdown.
///
/// Returns [`ModuleDoc::Empty`] when filtering leaves no exported symbols,
/// or when none of the survivors is a top-level declaration or an extension
/// group member; the caller records it as skipped. The module name is the
/// one derived from the file names at discovery, used for the document
/// heading, the main-symbol fallback, and the README lookup alike.
#[instrument(skip_all, fields(module = module_name))]
pub(crate) fn generate_module(
    module_name: &str,
    files: &ModuleFiles,
    sources: &SourcePaths,
    resolver: &Resolver,
    include_reexported: bool,
    generated_at: DateTime<Utc>,
) -> Result<ModuleDoc, GenError> {
    // Step 1: load the main document and absorb extension fragments.
    let graph = load_module(files)?;

    // Step 2: reduce to the exported interface.
    let retained = filter_symbols(&graph.symbols, include_reexported);
    if retained.is_empty() {
        debug!("no exported symbols");
        return Ok(ModuleDoc::Empty("no exported symbols"));
    }

    // Step 3: split into own declarations and foreign-type extensions.
    // Survivors can still all be members of foreign nested types, which
    // belong to neither set.
    let structure = classify(&retained);
    if structure.top_level.is_empty()
        && structure.extension_groups.is_empty()
    {
        debug!("no top-level symbols or extension groups");
        return Ok(ModuleDoc::Empty(
            "no top-level symbols or extension groups",
        ));
    }

    // Step 4: order top-level symbols and pull the module's main symbol to
    // the front.
    let mut ordered =
        sort_by_hierarchy(&structure.top_level, &graph.relationships);
    let main_position =
        find_main_symbol(&ordered, &graph.relationships, module_name)
            .and_then(|main| {
                ordered
                    .iter()
                    .position(|s| s.precise_id() == main.precise_id())
            });
    if let Some(position) = main_position {
        ordered[..=position].rotate_right(1);
    }

    // Step 5: render interface blocks and extension groups.
    let renderer =
        SymbolRenderer::new(&retained, &graph.relationships, resolver);
    let interface_blocks: Vec<String> = ordered
        .iter()
        .map(|symbol| renderer.render(symbol))
        .collect();
    let extension_blocks: Vec<String> = structure
        .extension_groups
        .iter()
        .map(|(type_name, members)| {
            let members =
                sort_by_hierarchy(members, &graph.relationships);
            renderer.render_extension_group(type_name, &members)
        })
        .collect();

    // Step 6: assemble the document around the optional README body.
    let readme = module_readme(sources, module_name);
    Ok(ModuleDoc::Rendered(assemble(
        module_name,
        readme.as_deref(),
        &interface_blocks,
        &extension_blocks,
        generated_at,
    )))
}

/// Reads and splices the module README, when the package description knows
/// a source path for the module and the file exists. An unreadable README
/// is warned about and omitted.
fn module_readme(sources: &SourcePaths, module_name: &str) -> Option<String> {
    let path = sources.readme_path(module_name)?;
    match std::fs::read_to_string(&path) {
        Ok(content) => Some(splice_readme(&content, module_name)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "cannot read module README"
            );
            None
        }
    }
}

/// Assembles the final Markdown document. Sections with no content are
/// omitted entirely; the footer with the generation timestamp is always
/// present.
fn assemble(
    module_name: &str,
    readme: Option<&str>,
    interface_blocks: &[String],
    extension_blocks: &[String],
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str("# ");
    out.push_str(module_name);
    out.push('\n');

    if let Some(body) = readme {
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }
    }

    for (heading, blocks) in [
        ("## Interface", interface_blocks),
        ("## Extensions", extension_blocks),
    ] {
        if blocks.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        for block in blocks {
            out.push_str("\n```swift\n");
            out.push_str(block);
            out.push_str("```\n");
        }
    }

    out.push_str("\n---\n\n*Generated ");
    out.push_str(
        &generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    out.push_str("*\n");
    out
}
