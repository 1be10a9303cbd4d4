//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are testable; `display_*`
//! functions print them.

use crate::domain::{ServiceTag, ServiceTagInfo, TrackedState};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning to stderr.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// One tag per line under a heading, or a placeholder line when empty.
pub fn format_tag_list(heading: &str, tags: &[ServiceTag]) -> String {
    let mut output = format!("{}\n", style(heading).bold());
    if tags.is_empty() {
        output.push_str(&format!("  {}\n", style("(none)").dim()));
    }
    for tag in tags {
        output.push_str(&format!("  - {}\n", style(tag).cyan()));
    }
    output
}

/// Print the tags an operation created, removed, or pushed.
///
/// # Arguments
/// * `heading` - What happened to the tags, e.g. "Created tags:"
/// * `tags` - The affected tags
/// * `dry_run` - Marks the listing as a preview
pub fn display_tags(heading: &str, tags: &[ServiceTag], dry_run: bool) {
    let heading = if dry_run {
        format!("[dry run] {}", heading)
    } else {
        heading.to_string()
    };
    print!("{}", format_tag_list(&heading, tags));
}

/// Table of tags with the commits they point at.
pub fn format_tag_infos(infos: &[ServiceTagInfo]) -> String {
    let width = infos
        .iter()
        .map(|info| info.tag.to_string().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for info in infos {
        output.push_str(&format!(
            "{:width$}  {}\n",
            style(&info.tag).cyan(),
            style(&info.commit_id).dim(),
            width = width
        ));
    }
    output
}

pub fn display_tag_infos(infos: &[ServiceTagInfo]) {
    if infos.is_empty() {
        display_status("No service tags found");
        return;
    }
    print!("{}", format_tag_infos(infos));
}

/// Summary of a tracked state: each service with its latest and previous version.
pub fn format_state(state: &TrackedState) -> String {
    let mut output = String::new();
    for service in state.services() {
        let latest = service
            .latest
            .as_ref()
            .map(|info| info.tag.version.to_string())
            .unwrap_or_else(|| "-".to_string());
        let prev = service
            .prev
            .as_ref()
            .map(|info| info.tag.version.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {} latest {} prev {}\n",
            style(&service.name).bold(),
            style(latest).green(),
            style(prev).dim()
        ));
    }
    output
}

pub fn display_state(path: &std::path::Path, state: &TrackedState) {
    println!("{} {}", style("State file").bold(), style(path.display()).dim());
    print!("{}", format_state(state));
}
