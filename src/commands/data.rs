//! Backup, restore, import, export, and reset commands

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::application::export as csv;
use crate::cli::ExportDomain;
use crate::runtime::ComplianceCore;

pub fn backup(core: &ComplianceCore, out: Option<&Path>) -> Result<()> {
    let document = core.store().create_backup()?;
    match out {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("writing backup to {}", path.display()))?;
            eprintln!("backup written to {}", path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

pub fn restore(core: &ComplianceCore, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading backup from {}", file.display()))?;
    core.store().restore_from_backup(&text)?;
    eprintln!("restore complete");
    Ok(())
}

pub fn import_assets(core: &ComplianceCore, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading assets from {}", file.display()))?;
    let report = core.store().import_assets(&text);

    for error in &report.errors {
        eprintln!("skipped: {}", error);
    }
    if !report.success {
        bail!("import failed; nothing was changed");
    }
    eprintln!("imported {} asset(s)", report.imported);
    Ok(())
}

pub fn export(core: &ComplianceCore, domain: ExportDomain) -> Result<()> {
    let document = match domain {
        ExportDomain::Controls => csv::controls_to_csv(&core.controls.all()),
        ExportDomain::Policies => csv::policies_to_csv(&core.policies.all()),
        ExportDomain::Evidence => csv::evidence_to_csv(&core.evidence.all()),
        ExportDomain::Calendar => csv::calendar_to_csv(&core.calendar.all()),
        ExportDomain::Reports => csv::reports_to_csv(&core.reporting.reports().all()),
    };
    print!("{}", document);
    Ok(())
}

pub fn reset(core: &ComplianceCore, keep_profile: bool, yes: bool) -> Result<()> {
    if !yes {
        bail!("refusing to clear all data without --yes");
    }
    core.store().reset(keep_profile)?;
    eprintln!("all data cleared{}", if keep_profile { " (profile kept)" } else { "" });
    Ok(())
}
