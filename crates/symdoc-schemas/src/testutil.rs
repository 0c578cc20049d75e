//! Shared proptest strategies for schema tests.

use proptest::prelude::*;

/// Strategy for generating arbitrary identifier-like names.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,19}"
}

/// Strategy for generating precise-identifier-shaped strings (e.g. `s:3AbcV`).
pub fn arb_precise_id() -> impl Strategy<Value = String> {
    arb_name().prop_map(|name| format!("s:{}{name}", name.len()))
}

/// Strategy for generating kind identifiers, weighted toward the known
/// vocabulary with the occasional unrecognized tag.
pub fn arb_kind_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => prop_oneof![
            Just("swift.class"),
            Just("swift.struct"),
            Just("swift.enum"),
            Just("swift.protocol"),
            Just("swift.enum.case"),
            Just("swift.property"),
            Just("swift.type.property"),
            Just("swift.method"),
            Just("swift.type.method"),
            Just("swift.func"),
            Just("swift.macro"),
        ].prop_map(str::to_owned),
        1 => arb_name().prop_map(|name| format!("swift.{name}")),
    ]
}
