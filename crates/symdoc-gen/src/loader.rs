//! Discovery and loading of symbol-graph documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use symdoc_schemas::{ModuleGraph, SymbolGraph};
use tracing::{debug, warn};

use crate::error::GenError;

/// File suffix shared by every symbol-graph document.
const DOCUMENT_SUFFIX: &str = ".symbols.json";

/// The on-disk documents describing one module: the main document plus any
/// extension fragments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ModuleFiles {
    pub main: PathBuf,
    pub fragments: Vec<PathBuf>,
}

/// Scans `input_dir` for symbol-graph documents and groups them by module.
///
/// `<Module>.symbols.json` is a main document and defines the module name
/// used throughout the run; `<Module>@<Other>.symbols.json` is an extension
/// fragment of `<Module>`. Fragments without a main document are dropped
/// with a warning; files not ending in the document suffix are ignored. The
/// result iterates in module-name order, fragments sorted by file name.
pub(crate) fn discover_modules(
    input_dir: &Path,
) -> Result<BTreeMap<String, ModuleFiles>, GenError> {
    let entries = fs::read_dir(input_dir)
        .map_err(|err| GenError::input_dir(input_dir, err))?;

    let mut mains: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut fragments: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for entry in entries {
        let entry =
            entry.map_err(|err| GenError::input_dir(input_dir, err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str())
        else {
            continue;
        };
        let Some(stem) = file_name.strip_suffix(DOCUMENT_SUFFIX) else {
            continue;
        };
        match stem.split_once('@') {
            Some((module, _extended)) => {
                fragments.entry(module.to_owned()).or_default().push(path);
            }
            None => {
                mains.insert(stem.to_owned(), path);
            }
        }
    }

    let mut modules = BTreeMap::new();
    for (module, main) in mains {
        let mut module_fragments =
            fragments.remove(&module).unwrap_or_default();
        module_fragments.sort();
        modules.insert(
            module,
            ModuleFiles {
                main,
                fragments: module_fragments,
            },
        );
    }
    for module in fragments.keys() {
        warn!(module, "extension fragments without a main document; ignoring");
    }

    debug!(modules = modules.len(), "discovered module documents");
    Ok(modules)
}

/// Loads and aggregates one module's documents.
///
/// A missing or malformed main document fails the module. Fragment failures
/// degrade: the fragment is skipped with a warning and loading continues
/// with whatever parsed.
pub(crate) fn load_module(
    files: &ModuleFiles,
) -> Result<ModuleGraph, GenError> {
    let main = read_document(&files.main)?;
    let mut graph = ModuleGraph::from_main(main);
    for fragment_path in &files.fragments {
        match read_document(fragment_path) {
            Ok(fragment) => graph.absorb(fragment),
            Err(err) => warn!(
                path = %fragment_path.display(),
                reason = %err.reason(),
                "skipping unreadable extension fragment"
            ),
        }
    }

    debug!(
        module = %graph.module_name,
        symbols = graph.symbol_count(),
        relationships = graph.relationships.len(),
        "loaded module documents"
    );
    Ok(graph)
}

fn read_document(path: &Path) -> Result<SymbolGraph, GenError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
