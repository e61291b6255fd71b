use super::{colorize_status, json_pretty, EXIT_FAILURE, EXIT_SUCCESS};
use groove_core::{check_dataset, CheckReport, DatasetLayout, EntryOutcome, HeaderProbe, StoreConfig};
use groove_schema::MANIFEST_FILE_NAME;
use std::path::Path;

pub fn run(repo: &Path, config: &StoreConfig, json: bool) -> Result<u8, String> {
    let layout = DatasetLayout::new(config.dataset_root(repo));
    let report = check_dataset(&layout, &HeaderProbe).map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({
            "passed": report.passed(),
            "checked": report.entries.len(),
            "failed": report.failed_count(),
            "entries": report.entries,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        print_report(&layout, &report);
    }

    Ok(if report.passed() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

fn print_report(layout: &DatasetLayout, report: &CheckReport) {
    println!(
        "{}",
        colorize_status(
            "heading",
            &format!(
                "{} entries found in {}",
                report.entries.len(),
                layout.root().display()
            )
        )
    );
    println!("{}", colorize_status("heading", "DATABASE"));

    for entry in &report.entries {
        println!("└─ {}", entry.id);
        match &entry.outcome {
            EntryOutcome::Valid => {
                println!(
                    "{}",
                    colorize_status("valid", &format!("   ✓ {}: Valid", entry.id))
                );
            }
            EntryOutcome::Invalid(failure) if failure.is_missing_manifest() => {
                eprintln!(
                    "{}",
                    colorize_status(
                        "invalid",
                        &format!("Error: Missing {MANIFEST_FILE_NAME} in {}", entry.id)
                    )
                );
            }
            EntryOutcome::Invalid(failure) => {
                let line = match failure.rule {
                    Some(rule) => format!(
                        "   └─ Manifest validation failed [{rule}]: {}",
                        failure.message
                    ),
                    None => format!("   └─ Manifest validation failed: {}", failure.message),
                };
                println!("{}", colorize_status("invalid", &line));
            }
        }
    }

    if report.passed() {
        println!("{}", colorize_status("passed", "Database check passed"));
    } else {
        eprintln!(
            "{}",
            colorize_status(
                "failed",
                &format!(
                    "Database check failed ({} of {} entries invalid)",
                    report.failed_count(),
                    report.entries.len()
                )
            )
        );
    }
}
