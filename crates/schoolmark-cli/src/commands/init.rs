//! The `schoolmark init` command.

use std::path::Path;

use anyhow::Result;

use schoolmark_core::repository::Repository;
use schoolmark_core::snapshot::Snapshot;

pub fn execute(data_path: &Path) -> Result<()> {
    if Path::new("schoolmark.toml").exists() {
        println!("schoolmark.toml already exists, skipping.");
    } else {
        std::fs::write("schoolmark.toml", SAMPLE_CONFIG)?;
        println!("Created schoolmark.toml");
    }

    if data_path.exists() {
        println!("{} already exists, skipping.", data_path.display());
    } else {
        Snapshot::capture(&Repository::new()).save(data_path)?;
        println!("Created {}", data_path.display());
    }

    println!("\nNext steps:");
    println!("  1. schoolmark add-user admin secret --role admin");
    println!("  2. schoolmark add-school \"Northgate Primary\" --level primary --location Leeds");
    println!("  3. schoolmark rate 1 5 --user admin");
    println!("  4. schoolmark rankings");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# schoolmark configuration

data_path = "schoolmark.json"
log_path = "schoolmark.log"
report_dir = "./reports"
top_limit = 3
"#;
