use serde::Serialize;

/// One labeled block of triage output, e.g. the filtered SMS lines or the
/// photo-preview file names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSection {
    pub label: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.lines.push(line.into());
        }
    }
}

/// Append-only accumulation of one triage run. Sections keep the order in
/// which categories were processed; the whole report is rendered to a single
/// text blob for display and export, then discarded.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EvidenceReport {
    sections: Vec<ReportSection>,
}

impl EvidenceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("--- {} ---\n", section.label));
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_in_order() {
        let mut report = EvidenceReport::new();
        let mut calls = ReportSection::new("Call Logs");
        calls.push("Row 1: number=555");
        report.push(calls);
        let mut sms = ReportSection::new("Filtered SMS");
        sms.extend(["Row 1: body=hello", "Row 2: body=bye"]);
        report.push(sms);

        let text = report.render();
        assert_eq!(
            text,
            "--- Call Logs ---\nRow 1: number=555\n\n--- Filtered SMS ---\nRow 1: body=hello\nRow 2: body=bye\n\n"
        );
    }

    #[test]
    fn empty_report_renders_empty() {
        assert!(EvidenceReport::new().render().is_empty());
        assert!(EvidenceReport::new().is_empty());
    }
}
