use homwin_analysis::WindowConfig;
use std::path::Path;

use crate::commands::inspect::GenerationSummary;

/// One-line description of the window geometry.
pub fn describe_config(config: &WindowConfig) -> String {
    format!(
        "window {} bp [-w, --window], step {} bp [-s, --step], {} chunks per window",
        config.window_size,
        config.step,
        config.window_size.checked_div(config.step).unwrap_or(0)
    )
}

pub fn print_generations(input: &Path, summaries: &[GenerationSummary]) {
    if summaries.is_empty() {
        println!("No generations found in {}.", input.display());
        return;
    }

    println!("\n📈 Generations in {}", input.display());
    println!("{}", "=".repeat(50));
    for s in summaries {
        let sites = s
            .site_count
            .map_or_else(|| "?".to_string(), |n| n.to_string());
        let status = if s.consistent { "✓" } else { "✗ inconsistent" };
        println!(
            "  • Generation {}: {} diploid, {} sites, {} haplotypes {}",
            s.generation, s.diploid_count, sites, s.haplotypes, status
        );
    }
    println!("Total: {} generations", summaries.len());
}
