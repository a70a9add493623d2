use crate::error::{Error, Result};
use dialoguer::{Input, theme::ColorfulTheme};

/// Abstraction over a single line of user input.
///
/// Implementors decide how the line is collected; callers interpret it. This
/// keeps the confirmation logic testable without a terminal.
pub trait LinePrompter {
    /// Shows `prompt` and returns what the user typed, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if input could not be read.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Default implementation of `LinePrompter` using `dialoguer::Input`.
///
/// Uses the `ColorfulTheme` and accepts empty input.
#[derive(Debug, Default)]
pub struct DialoguerLinePrompter;

impl LinePrompter for DialoguerLinePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let theme = ColorfulTheme::default();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        match input.interact_text() {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::Prompt(e.to_string())),
        }
    }
}

/// Interprets a confirmation answer. Empty means yes, as does anything
/// starting with `Y` or `y`.
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.starts_with(&['Y', 'y'][..])
}

/// Asks whether a destructive git command should go ahead.
///
/// # Parameters
/// - `prompter`: where the answer comes from.
/// - `command`: the git command line shown to the user, e.g. `reset --hard`.
///
/// # Returns
/// - `Ok(true)` if the user accepted (including the empty default).
/// - `Ok(false)` if the user declined.
/// - `Err` if input failed.
pub fn confirm_destructive<P: LinePrompter>(prompter: &mut P, command: &str) -> Result<bool> {
    let prompt = format!("`git {}` discards local changes. Continue? [Y/n]", command);
    let answer = prompter.read_line(&prompt)?;
    Ok(is_yes(&answer))
}
