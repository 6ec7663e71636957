use std::{ops::Bound, sync::Once};

use proptest::prelude::*;

/// The upper limit (exclusive) of generated keys.
///
/// Kept small so that generated keys collide often, exercising duplicate
/// handling and bounds that land exactly on a stored key.
const KEY_MAX: u8 = 20;

/// The maximum number of values generated for a single test case.
pub(crate) const N_VALUES: usize = 200;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
pub(crate) fn arbitrary_key() -> impl Strategy<Value = u8> {
    0..KEY_MAX
}

fn arbitrary_bound() -> impl Strategy<Value = Bound<u8>> {
    prop_oneof![
        arbitrary_key().prop_map(Bound::Included),
        arbitrary_key().prop_map(Bound::Excluded),
        Just(Bound::Unbounded),
    ]
}

/// Generate arbitrary (potentially inverted!) key range bounds.
pub(crate) fn arbitrary_bounds() -> impl Strategy<Value = (Bound<u8>, Bound<u8>)> {
    (arbitrary_bound(), arbitrary_bound())
}

/// Emit tree logs to the test output, filtered by `RUST_LOG`.
pub(crate) fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
