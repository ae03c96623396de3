//! Console output for failed API responses

use bitbucket_api::{DiagnosticSink, HttpDiagnostic};
use colored::*;

/// Prints the body and headers of every non-2xx response to stdout
///
/// Installed by the CLI when `--debug` is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Render a diagnostic as the lines printed to the console
    pub fn render(diagnostic: &HttpDiagnostic) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{} {} {}",
                diagnostic.method.to_string().cyan().bold(),
                diagnostic.url,
                diagnostic.status.to_string().red()
            ),
            diagnostic.body.clone(),
        ];

        lines.extend(diagnostic.headers.iter().map(|(name, value)| {
            format!(
                "  {}: {}",
                name.as_str().dimmed(),
                value.to_str().unwrap_or("<binary>")
            )
        }));

        lines
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&self, diagnostic: &HttpDiagnostic) {
        for line in Self::render(diagnostic) {
            println!("{line}");
        }
    }
}
