use super::{json_pretty, EXIT_SUCCESS};
use chrono::Utc;
use groove_core::{build_index, write_index, DatasetLayout, StoreConfig};
use groove_schema::StoreIndex;
use std::path::Path;

pub fn run(repo: &Path, config: &StoreConfig, json: bool) -> Result<u8, String> {
    let layout = DatasetLayout::new(config.dataset_root(repo));
    let dest = config.output_path(repo);

    let index =
        build_index(&layout, &config.store.name, Utc::now()).map_err(|e| e.to_string())?;
    write_index(&dest, &index).map_err(|e| e.to_string())?;

    print_result(&dest, &index, json)?;
    Ok(EXIT_SUCCESS)
}

fn print_result(dest: &Path, index: &StoreIndex, json: bool) -> Result<(), String> {
    if json {
        let payload = serde_json::json!({
            "status": "written",
            "path": dest,
            "entries": index.store.db.len(),
            "lastUpdated": index.store.last_updated,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "store data saved to {} ({} entries)",
            dest.display(),
            index.store.db.len()
        );
    }
    Ok(())
}
