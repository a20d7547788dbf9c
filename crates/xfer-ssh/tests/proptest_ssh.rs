// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for argument formatting and command construction.

use std::path::PathBuf;

use proptest::prelude::*;
use xfer_ssh::{
    FixedOverride, NotFound, Resolver, Tool, compression_argument, timeout_argument,
};

// ── Strategies ─────────────────────────────────────────────────────

fn arb_arg() -> impl Strategy<Value = String> {
    "[ -~]{0,32}" // printable ASCII, empty allowed
}

fn arb_tool() -> impl Strategy<Value = Tool> {
    prop_oneof![Just(Tool::Ssh), Just(Tool::Scp)]
}

fn fixed_discovery(name: &str) -> Result<PathBuf, NotFound> {
    Ok(PathBuf::from("/usr/bin").join(name))
}

fn failing_discovery(name: &str) -> Result<PathBuf, NotFound> {
    Err(NotFound {
        name: name.to_string(),
        searched: vec![PathBuf::from("/usr/bin")],
    })
}

// ── Formatter properties ───────────────────────────────────────────

proptest! {
    #[test]
    fn timeout_is_decimal_without_padding(t in 1u32..=u32::MAX) {
        let arg = timeout_argument(t);
        prop_assert_eq!(&arg, &format!("-oConnectTimeout={t}"));
        let digits = arg.strip_prefix("-oConnectTimeout=").unwrap();
        prop_assert!(!digits.starts_with('0'));
        prop_assert_eq!(digits.parse::<u32>().unwrap(), t);
    }

    #[test]
    fn compression_is_constant(_seed in any::<u64>()) {
        prop_assert_eq!(compression_argument(), "-C");
    }
}

// ── Builder properties ─────────────────────────────────────────────

proptest! {
    #[test]
    fn arguments_are_passed_through_verbatim(
        tool in arb_tool(),
        args in proptest::collection::vec(arb_arg(), 0..16),
    ) {
        let resolver = Resolver::with_parts(FixedOverride::none(), fixed_discovery);
        let descriptor = resolver.command(tool, None, args.clone()).unwrap();
        prop_assert_eq!(descriptor.args().len(), args.len());
        prop_assert_eq!(descriptor.args(), args.as_slice());
    }

    #[test]
    fn unset_override_matches_discovery(tool in arb_tool(), succeed in any::<bool>()) {
        let discovery = if succeed { fixed_discovery } else { failing_discovery };
        let resolver = Resolver::with_parts(FixedOverride::none(), discovery);

        let expected = discovery(tool.command_name());
        let actual = resolver.resolve(tool);
        match (expected, actual) {
            (Ok(e), Ok(a)) => prop_assert_eq!(e, a),
            (Err(e), Err(a)) => prop_assert_eq!(&e, a.not_found()),
            (e, a) => prop_assert!(false, "mismatch: {:?} vs {:?}", e, a),
        }
    }
}
