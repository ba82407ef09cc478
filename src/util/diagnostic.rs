//! Error reports for the terminal.
//!
//! Anything implementing [`miette::Diagnostic`] is rendered with miette's
//! graphical handler: message, code, cause chain and help. [`BomError`] carries
//! its own codes and help; [`SettingsIssue`] covers what `bomsmith check`
//! reports about a settings file beyond config validation.
//!
//! [`BomError`]: crate::ops::BomError

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, Severity};

/// Help lines shared by the error types.
pub mod suggestions {
    /// Suggestion for a malformed coordinate pattern.
    pub const PATTERN_FORMAT: &str =
        "Write patterns as group:artifact[:version[:type[:classifier]]], e.g. `org.acme:*`";

    /// Suggestion when a bom entry fails validation.
    pub const CHECK_SETTINGS: &str = "Run `bomsmith check` to validate every [[bom]] entry";

    /// Suggestion when a custom template was configured.
    pub const BUILTIN_TEMPLATE: &str =
        "Remove the [template] section to use the built-in POM template";

    /// Suggestion when building the generated unit fails.
    pub const VERBOSE: &str = "Run `bomsmith --verbose generate` for more details";
}

/// A problem in a settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsIssue {
    message: String,
    location: PathBuf,
    severity: Severity,
    help: Option<String>,
}

impl SettingsIssue {
    /// An issue that makes the settings unusable.
    pub fn error(message: impl Into<String>, location: &Path) -> Self {
        SettingsIssue {
            message: message.into(),
            location: location.to_path_buf(),
            severity: Severity::Error,
            help: None,
        }
    }

    /// An issue worth fixing that does not stop generation.
    pub fn warning(message: impl Into<String>, location: &Path) -> Self {
        SettingsIssue {
            severity: Severity::Warning,
            ..SettingsIssue::error(message, location)
        }
    }

    /// Attach a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Does the issue fail the check?
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location.display(), self.message)
    }
}

impl StdError for SettingsIssue {}

impl Diagnostic for SettingsIssue {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("bomsmith::settings"))
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_deref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }
}

/// Render a diagnostic for the terminal.
pub fn render(diagnostic: &dyn Diagnostic, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    // Keep long coordinates and paths on one line
    let handler = GraphicalReportHandler::new_themed(theme).with_width(400);

    let mut out = String::new();
    if handler.render_report(&mut out, diagnostic).is_err() {
        out = format!("error: {}\n", diagnostic);
    }
    out
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &dyn Diagnostic, color: bool) {
    eprint!("{}", render(diagnostic, color));
}
