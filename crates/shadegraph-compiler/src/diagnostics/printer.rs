//! Builder-pattern printer for rendering build diagnostics.

use std::fmt::Write;

use shadegraph_core::Colors;

use super::Diagnostics;
use super::message::Severity;

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    path: Option<&'d str>,
    colored: bool,
    sorted: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            path: None,
            colored: false,
            sorted: false,
        }
    }

    /// Graph file the diagnostics belong to, shown before each location.
    pub fn path(mut self, path: &'d str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Order by kind priority instead of emission order.
    pub fn sorted(mut self, value: bool) -> Self {
        self.sorted = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = Colors::new(self.colored);
        let messages: Vec<_> = if self.sorted {
            self.diagnostics.sorted()
        } else {
            self.diagnostics.iter().collect()
        };

        for (i, diag) in messages.into_iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let severity = severity_label(diag.severity(), c);
            writeln!(w, "{severity}: {}", diag.message)?;
            match self.path {
                Some(path) => writeln!(
                    w,
                    "  {}-->{} {path} @ {}{}{}",
                    c.dim, c.reset, c.blue, diag.location, c.reset
                )?,
                None => writeln!(
                    w,
                    "  {}-->{} {}{}{}",
                    c.dim, c.reset, c.blue, diag.location, c.reset
                )?,
            }
            for hint in &diag.hints {
                writeln!(w, "  {}={} hint: {hint}", c.dim, c.reset)?;
            }
        }

        Ok(())
    }
}

fn severity_label(severity: Severity, c: Colors) -> String {
    match severity {
        Severity::Error => format!("{}{severity}{}", c.red, c.reset),
        Severity::Warning => format!("{}{severity}{}", c.yellow, c.reset),
    }
}
