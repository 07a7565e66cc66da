//! Property tests for hostile-input handling and persistence
//! invariants.

use proptest::prelude::*;

use custodian::domain::entities::{Asset, AssetType};
use custodian::{ComplianceCore, MemoryBackend};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: asset import never panics, and a failed import leaves
    /// the store byte-for-byte unchanged.
    #[test]
    fn property_import_assets_never_panics_or_half_applies(
        payload in ".{0,256}",
    ) {
        let core = ComplianceCore::new(MemoryBackend::new());
        core.assets.save(Asset::new("sentinel", AssetType::Hardware)).unwrap();
        let before = core.store().snapshot();

        let report = core.store().import_assets(&payload);
        if !report.success {
            prop_assert_eq!(report.imported, 0);
            prop_assert_eq!(core.store().snapshot(), before);
        }
    }

    /// PROPERTY: restore never panics, and a rejected payload leaves
    /// the store unchanged.
    #[test]
    fn property_restore_never_panics_or_half_applies(
        payload in ".{0,256}",
    ) {
        let core = ComplianceCore::new(MemoryBackend::new());
        core.assets.save(Asset::new("sentinel", AssetType::Hardware)).unwrap();
        let before = core.store().snapshot();

        if core.store().restore_from_backup(&payload).is_err() {
            prop_assert_eq!(core.store().snapshot(), before);
        }
    }

    /// PROPERTY: re-saving an unchanged entity keeps its `created_at`
    /// and never duplicates the record.
    #[test]
    fn property_resave_is_idempotent_on_identity(
        name in "[a-zA-Z0-9 _-]{1,32}",
    ) {
        let core = ComplianceCore::new(MemoryBackend::new());
        let first = core.assets.save(Asset::new(&name, AssetType::Software)).unwrap();
        let second = core.assets.save(first.clone()).unwrap();

        prop_assert_eq!(second.created_at, first.created_at);
        prop_assert_eq!(&second.id, &first.id);
        prop_assert_eq!(core.assets.all().len(), 1);
    }
}
