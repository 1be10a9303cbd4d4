//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::domain::ServiceTag;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_state, display_status, display_success, display_tag_infos, display_tags,
    display_warning,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, or "n"/"no")
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(prompt, &mut stdin.lock(), &mut io::stdout())
}

fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "\n{} (y/N): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let response = answer.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Asks before deleting `tags`; `where_` names the places they are removed from.
pub fn confirm_reset(tags: &[ServiceTag], where_: &str) -> Result<bool> {
    print!("{}", formatter::format_tag_list("Tags to delete:", tags));
    confirm_action(&format!("Delete {} tag(s) {}?", tags.len(), where_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> bool {
        let mut output = Vec::new();
        confirm_with("Continue?", &mut Cursor::new(input), &mut output).unwrap()
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  yes  \n"));
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer("whatever\n"));
        assert!(!answer(""));
    }

    #[test]
    fn test_confirm_prints_prompt() {
        let mut output = Vec::new();
        confirm_with("Delete?", &mut Cursor::new("n\n"), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\nDelete? (y/N): ");
    }
}
