//! Layered reference resolution with caching.

use std::sync::Mutex;

use indexmap::IndexSet;

use crate::cache::NameCache;
use crate::demangle::BatchDemangle;

/// Objective-C class references: `c:objc(cs)UIView`.
const OBJC_CLASS_PREFIX: &str = "c:objc(cs)";

/// Objective-C protocol references: `c:objc(pl)NSCoding`.
const OBJC_PROTOCOL_PREFIX: &str = "c:objc(pl)";

/// Standard-library references with fixed short manglings.
///
/// These cover the types and protocols that dominate inheritance and
/// conformance lists, so the vast majority of references never reach the
/// external demangler.
const STDLIB_NAMES: &[(&str, &str)] = &[
    ("s:Si", "Int"),
    ("s:Su", "UInt"),
    ("s:Sb", "Bool"),
    ("s:SS", "String"),
    ("s:Ss", "Substring"),
    ("s:SJ", "Character"),
    ("s:Sd", "Double"),
    ("s:Sf", "Float"),
    ("s:Sa", "Array"),
    ("s:SD", "Dictionary"),
    ("s:Sh", "Set"),
    ("s:Sq", "Optional"),
    ("s:Sn", "Range"),
    ("s:SN", "ClosedRange"),
    ("s:SQ", "Equatable"),
    ("s:SH", "Hashable"),
    ("s:SL", "Comparable"),
    ("s:SE", "Encodable"),
    ("s:Se", "Decodable"),
    ("s:ST", "Sequence"),
    ("s:Sl", "Collection"),
    ("s:SK", "BidirectionalCollection"),
    ("s:Sk", "RandomAccessCollection"),
    ("s:SM", "MutableCollection"),
    ("s:Sm", "RangeReplaceableCollection"),
    ("s:SY", "RawRepresentable"),
    ("s:Sx", "Strideable"),
    ("s:Sz", "BinaryInteger"),
    ("s:SZ", "SignedInteger"),
    ("s:SU", "UnsignedInteger"),
    ("s:SF", "FloatingPoint"),
    ("s:SB", "BinaryFloatingPoint"),
    ("s:s5ErrorP", "Error"),
    ("s:s8SendableP", "Sendable"),
    ("s:s12CaseIterableP", "CaseIterable"),
    ("s:s12IdentifiableP", "Identifiable"),
    ("s:s9CodingKeyP", "CodingKey"),
    ("s:s23CustomStringConvertibleP", "CustomStringConvertible"),
    ("s:s28CustomDebugStringConvertibleP", "CustomDebugStringConvertible"),
    ("s:s25LosslessStringConvertibleP", "LosslessStringConvertible"),
    ("s:s26ExpressibleByStringLiteralP", "ExpressibleByStringLiteral"),
];

/// Resolves an Objective-C interop reference by stripping its prefix.
fn objc_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(OBJC_CLASS_PREFIX)
        .or_else(|| reference.strip_prefix(OBJC_PROTOCOL_PREFIX))
}

/// Looks up a reference in the fixed standard-library table.
fn stdlib_name(reference: &str) -> Option<&'static str> {
    STDLIB_NAMES
        .iter()
        .find(|(mangled, _)| *mangled == reference)
        .map(|(_, name)| *name)
}

/// Resolves precise identifiers to display names.
///
/// Resolution tries Objective-C prefix stripping, then the fixed
/// standard-library table, then the external [`BatchDemangle`] capability.
/// External outcomes (including failures) are cached, and the cache lock is
/// never held across the external call, so a `Resolver` can be shared across
/// worker threads without serializing their demangling.
pub struct Resolver {
    demangler: Box<dyn BatchDemangle>,
    cache: Mutex<NameCache>,
}

impl Resolver {
    /// Creates a resolver around a demangling capability, with a fresh
    /// default-bounded cache.
    pub fn new(demangler: Box<dyn BatchDemangle>) -> Self {
        Self::with_cache(demangler, NameCache::new())
    }

    /// Creates a resolver with an explicitly sized cache.
    pub fn with_cache(
        demangler: Box<dyn BatchDemangle>,
        cache: NameCache,
    ) -> Self {
        Self {
            demangler,
            cache: Mutex::new(cache),
        }
    }

    /// Resolves one reference. Returns `None` when every layer fails.
    ///
    /// Resolution has no observable side effects beyond the cache: the same
    /// reference always resolves to the same outcome within a run.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        self.resolve_batch(&[reference]).pop().flatten()
    }

    /// Resolves a batch of references, returning one outcome per reference
    /// in input order.
    ///
    /// References not settled by the fixed layers or the cache are deduped
    /// and sent to the external demangler in a single call.
    pub fn resolve_batch(&self, references: &[&str]) -> Vec<Option<String>> {
        let mut resolved: Vec<Option<String>> = vec![None; references.len()];
        let mut miss_positions: Vec<usize> = Vec::new();
        let mut misses: IndexSet<&str> = IndexSet::new();

        {
            let mut cache = self.lock_cache();
            for (position, &reference) in references.iter().enumerate() {
                if let Some(name) = objc_name(reference) {
                    resolved[position] = Some(name.to_owned());
                } else if let Some(name) = stdlib_name(reference) {
                    resolved[position] = Some(name.to_owned());
                } else if let Some(cached) = cache.get(reference) {
                    resolved[position] = cached.clone();
                } else {
                    miss_positions.push(position);
                    misses.insert(reference);
                }
            }
            // Lock drops here; the external call below runs unlocked.
        }
        if misses.is_empty() {
            return resolved;
        }

        let miss_list: Vec<&str> = misses.iter().copied().collect();
        let mut outcomes = self.demangler.batch_demangle(&miss_list);
        // Outcomes must stay parallel to the miss list; a short response
        // pads out to failures.
        outcomes.resize(miss_list.len(), None);

        let mut cache = self.lock_cache();
        for (reference, outcome) in miss_list.iter().zip(&outcomes) {
            cache.insert((*reference).to_owned(), outcome.clone());
        }
        for position in miss_positions {
            let miss_index = misses
                .get_index_of(references[position])
                .expect("miss was recorded");
            resolved[position] = outcomes[miss_index].clone();
        }
        resolved
    }

    /// Drops all cached outcomes.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Number of cached outcomes, for logging.
    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, NameCache> {
        // A poisoned cache is still a valid cache; recover it.
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Capability stub that answers from a fixed map and counts batch calls.
    struct StubDemangler {
        names: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StubDemangler {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                names: entries
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::new(&[])
        }
    }

    impl BatchDemangle for StubDemangler {
        fn batch_demangle(&self, references: &[&str]) -> Vec<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            references
                .iter()
                .map(|reference| self.names.get(*reference).cloned())
                .collect()
        }
    }

    /// Shared handle so tests can read the call count after the resolver
    /// takes ownership of the stub.
    struct SharedStub(std::sync::Arc<StubDemangler>);

    impl BatchDemangle for SharedStub {
        fn batch_demangle(&self, references: &[&str]) -> Vec<Option<String>> {
            self.0.batch_demangle(references)
        }
    }

    fn resolver_with(
        stub: StubDemangler,
    ) -> (Resolver, std::sync::Arc<StubDemangler>) {
        let shared = std::sync::Arc::new(stub);
        let resolver = Resolver::new(Box::new(SharedStub(shared.clone())));
        (resolver, shared)
    }

    // -----------------------------------------------------------------
    // Fixed layers
    // -----------------------------------------------------------------

    #[test]
    fn stdlib_table_bypasses_the_demangler() {
        let (resolver, stub) = resolver_with(StubDemangler::empty());
        assert_eq!(resolver.resolve("s:SS"), Some("String".to_owned()));
        assert_eq!(resolver.resolve("s:Si"), Some("Int".to_owned()));
        assert_eq!(resolver.resolve("s:s5ErrorP"), Some("Error".to_owned()));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn objc_prefixes_are_stripped() {
        let (resolver, stub) = resolver_with(StubDemangler::empty());
        assert_eq!(
            resolver.resolve("c:objc(cs)UIView"),
            Some("UIView".to_owned())
        );
        assert_eq!(
            resolver.resolve("c:objc(pl)NSCoding"),
            Some("NSCoding".to_owned())
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    // -----------------------------------------------------------------
    // Capability and cache interplay
    // -----------------------------------------------------------------

    #[test]
    fn external_outcomes_are_cached() {
        let (resolver, stub) = resolver_with(StubDemangler::new(&[(
            "s:10Foundation4DateV",
            "Foundation.Date",
        )]));

        assert_eq!(
            resolver.resolve("s:10Foundation4DateV"),
            Some("Foundation.Date".to_owned())
        );
        assert_eq!(
            resolver.resolve("s:10Foundation4DateV"),
            Some("Foundation.Date".to_owned())
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    /// An unresolvable reference fails on the first call and on a repeat
    /// call, with the capability consulted exactly once.
    #[test]
    fn failures_are_cached_and_not_retried() {
        let (resolver, stub) = resolver_with(StubDemangler::empty());

        assert_eq!(resolver.resolve("s:NoSuchRef"), None);
        assert_eq!(resolver.resolve("s:NoSuchRef"), None);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn batch_preserves_positions_and_dedupes() {
        let (resolver, stub) = resolver_with(StubDemangler::new(&[(
            "s:custom",
            "MyLib.Custom",
        )]));

        let outcomes = resolver.resolve_batch(&[
            "s:SS",
            "s:custom",
            "s:missing",
            "s:custom",
            "c:objc(cs)UILabel",
        ]);
        assert_eq!(
            outcomes,
            vec![
                Some("String".to_owned()),
                Some("MyLib.Custom".to_owned()),
                None,
                Some("MyLib.Custom".to_owned()),
                Some("UILabel".to_owned()),
            ]
        );
        // One call for the whole batch, duplicates collapsed.
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_batch_is_free() {
        let (resolver, stub) = resolver_with(StubDemangler::empty());
        assert!(resolver.resolve_batch(&[]).is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clear_cache_forces_a_fresh_lookup() {
        let (resolver, stub) =
            resolver_with(StubDemangler::new(&[("s:x", "X")]));

        resolver.resolve("s:x");
        resolver.clear_cache();
        assert_eq!(resolver.cached_count(), 0);
        resolver.resolve("s:x");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    /// A capability returning a short array must not leave misses uncached.
    #[test]
    fn short_capability_responses_are_padded() {
        struct Truncating;
        impl BatchDemangle for Truncating {
            fn batch_demangle(
                &self,
                _references: &[&str],
            ) -> Vec<Option<String>> {
                Vec::new()
            }
        }

        let resolver = Resolver::new(Box::new(Truncating));
        assert_eq!(resolver.resolve_batch(&["s:a", "s:b"]), vec![None, None]);
        assert_eq!(resolver.cached_count(), 2);
    }
}
