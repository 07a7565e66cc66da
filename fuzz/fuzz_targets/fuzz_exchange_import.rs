#![no_main]

use libfuzzer_sys::fuzz_target;

use custodian::{ComplianceCore, MemoryBackend};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let core = ComplianceCore::new(MemoryBackend::new());
        let report = core.store().import_all(text);
        // A failed import reports zero records applied.
        if !report.success {
            assert_eq!(report.imported, 0);
        }
    }
});
