#![no_main]

use libfuzzer_sys::fuzz_target;

use custodian::{ComplianceCore, MemoryBackend};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Restore of arbitrary payloads must reject, never panic.
        let core = ComplianceCore::new(MemoryBackend::new());
        let _ = core.store().restore_from_backup(text);
    }
});
