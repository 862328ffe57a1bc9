//! Status lines for the built-in commands
//!
//! Remote command output (tables, JSON, success messages) is written verbatim by the
//! display-mode handlers. This reporter only decorates the CLI's own status messages, with
//! emoji prefixes that fall back to text on terminals without Unicode support.

use std::fmt::Display;

use console::{Emoji, style};

static ERROR_EMOJI: Emoji<'_, '_> = Emoji("❌ ", "[E] ");
static SUCCESS_EMOJI: Emoji<'_, '_> = Emoji("✅ ", "OK ");
static WARN_EMOJI: Emoji<'_, '_> = Emoji("⚠️ ", "[W] ");

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MessageType {
    Error,
    Success,
    Warning,
}

#[derive(Debug, Clone, Copy)]
pub struct TerminalReporter {
    use_colors: bool,
}

impl TerminalReporter {
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub(crate) fn status_line(self, message_type: MessageType, message: impl Display) -> String {
        let prefix = match message_type {
            MessageType::Error => ERROR_EMOJI,
            MessageType::Success => SUCCESS_EMOJI,
            MessageType::Warning => WARN_EMOJI,
        };

        let formatted_message = if self.use_colors {
            match message_type {
                MessageType::Error => style(message).for_stderr().red().bold().to_string(),
                MessageType::Success => style(message).green().to_string(),
                MessageType::Warning => style(message).for_stderr().yellow().bold().to_string(),
            }
        } else {
            message.to_string()
        };

        format!("{prefix}{formatted_message}")
    }

    pub(crate) fn format_error(self, message: impl Display) -> String {
        self.status_line(MessageType::Error, message)
    }

    pub(crate) fn format_warning(self, message: impl Display) -> String {
        self.status_line(MessageType::Warning, message)
    }

    pub(crate) fn report_success(self, message: impl Display) {
        println!("{}", self.status_line(MessageType::Success, message));
    }

    /// Print an error status line to stderr
    ///
    pub(crate) fn report_error(self, message: impl Display) {
        eprintln!("{}", self.format_error(message));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_lines_carry_message_and_prefix() {
        let reporter = TerminalReporter::new(true);

        let success_msg = reporter.status_line(MessageType::Success, "Configuration is valid");
        let error_msg = reporter.format_error("Validation failed");
        let warning_msg = reporter.format_warning("token without rest_url");

        assert!(success_msg.contains("Configuration is valid"));
        assert!(error_msg.contains("Validation failed"));
        assert!(warning_msg.contains("token without rest_url"));

        assert!(success_msg.contains("✅") || success_msg.contains("OK"));
        assert!(error_msg.contains("❌") || error_msg.contains("[E]"));
        assert!(warning_msg.contains("⚠️") || warning_msg.contains("[W]"));
    }

    #[test]
    fn test_status_lines_without_colors() {
        let reporter = TerminalReporter::new(false);

        let error_msg = reporter.format_error("Validation failed");

        assert!(!error_msg.contains("\x1b["));
    }
}
