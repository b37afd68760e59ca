//! Schema command - print the inferred column classification.

use std::path::PathBuf;

use colored::Colorize;

use synopsis::Dashboard;

pub fn run(file: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let session = Dashboard::new().open(&file)?;
    let profile = session.profile();

    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows)",
        "Schema for".cyan().bold(),
        session.source().file.white(),
        profile.row_count
    );
    println!();

    for col in &profile.columns {
        let class = format!("{:?}", col.class).to_lowercase();
        let detail = match &col.distinct_values {
            Some(values) => format!("{} distinct values", values.len()),
            None => String::new(),
        };
        println!(
            "  {:24} {:12} {:>4} missing  {}",
            col.name,
            class.white().bold(),
            col.missing_count,
            detail.dimmed()
        );
    }

    println!();
    match &profile.grouping {
        Some(name) => println!("Grouping column: {}", name.green().bold()),
        None => println!("{}", "No grouping column detected".dimmed()),
    }
    println!(
        "Indicators: {}",
        session.indicators().join(", ").white().bold()
    );

    Ok(())
}
