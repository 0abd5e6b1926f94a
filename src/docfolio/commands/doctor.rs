use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.storage_exists {
        result.add_message(CmdMessage::info(format!(
            "Storage folder: {}",
            report.storage_dir.display()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Storage folder missing: {} (created on next import)",
            report.storage_dir.display()
        )));
    }

    result.add_message(CmdMessage::info(format!(
        "{} document(s) indexed",
        report.document_count
    )));
    result.add_message(CmdMessage::info(format!("Platform: {}", report.platform)));
    match report.free_space {
        Some(bytes) => result.add_message(CmdMessage::info(format!(
            "Free space: {:.1} MB",
            bytes as f64 / (1024.0 * 1024.0)
        ))),
        None => result.add_message(CmdMessage::info("Free space: unknown")),
    }

    if report.purged_records > 0 {
        result.add_message(CmdMessage::success(format!(
            "Dropped {} record(s) whose file was missing",
            report.purged_records
        )));
    }

    if report.stray_files.is_empty() {
        result.add_message(CmdMessage::success("No unindexed files found"));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} file(s) in storage are not indexed:",
            report.stray_files.len()
        )));
        for path in &report.stray_files {
            result.add_message(CmdMessage::warning(format!("  {}", path.display())));
        }
    }

    result.report = Some(report);
    Ok(result)
}
