//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use super::Diagnostics;
use super::message::Severity;

pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    sorted: bool,
    min_severity: Option<Severity>,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            sorted: false,
            min_severity: None,
        }
    }

    /// Print by kind priority instead of emission order.
    pub fn sorted(mut self, value: bool) -> Self {
        self.sorted = value;
        self
    }

    /// Only print errors.
    pub fn errors_only(mut self) -> Self {
        self.min_severity = Some(Severity::Error);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let messages = if self.sorted {
            self.diagnostics.sorted()
        } else {
            self.diagnostics.iter().collect()
        };

        let visible = messages
            .into_iter()
            .filter(|d| self.min_severity.is_none_or(|s| d.severity() == s));

        for (i, diag) in visible.enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}
