use proptest::prelude::ProptestConfig;

/// Keep cases modest so the suite stays fast under debug builds.
pub(crate) fn proptest_cfg() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}
