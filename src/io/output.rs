use crate::core::{CheckReport, LeakDiagnostic};
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_diagnostic(&mut self, diagnostic: &LeakDiagnostic) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}: {}: {}",
            format!(
                "{}:{}:{}",
                diagnostic.file.display(),
                diagnostic.line,
                diagnostic.column
            )
            .bold(),
            diagnostic.function.cyan(),
            diagnostic.message.yellow()
        )?;

        let signature = diagnostic.signature.lines().next().unwrap_or_default();
        if !signature.is_empty() {
            writeln!(self.writer, "    {} {}", "|".blue(), signature.dimmed())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()> {
        for diagnostic in &report.diagnostics {
            self.write_diagnostic(diagnostic)?;
        }

        let summary = report.summary.to_string();
        if report.summary.has_warnings() {
            writeln!(self.writer, "{}", summary.yellow().bold())?;
        } else {
            writeln!(self.writer, "{}", summary.green())?;
        }
        Ok(())
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AnalysisSummary;
    use std::path::PathBuf;

    fn report() -> CheckReport {
        CheckReport {
            diagnostics: vec![LeakDiagnostic {
                file: PathBuf::from("converters/c1/c1.go"),
                function: "ConvertSampleToDB".to_string(),
                line: 8,
                column: 6,
                signature: "func ConvertSampleToDB(sample model.Sample) (result *dbmodel.Sample)"
                    .to_string(),
                missing_input_fields: vec!["sample.Note".to_string()],
                missing_output_fields: vec![],
                message: "converter function is leaking fields: missing input fields: [sample.Note]; missing output fields: []".to_string(),
            }],
            summary: AnalysisSummary {
                files_analyzed: 2,
                files_with_warnings: 1,
                warnings: 1,
            },
        }
    }

    #[test]
    fn test_terminal_output() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_report(&report())
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains(
            "converters/c1/c1.go:8:6: ConvertSampleToDB: converter function is leaking fields"
        ));
        assert_eq!(
            output.lines().next().unwrap(),
            "converters/c1/c1.go:8:6: ConvertSampleToDB: converter function is leaking fields: missing input fields: [sample.Note]; missing output fields: []"
        );
        assert!(output.contains("| func ConvertSampleToDB(sample model.Sample)"));
        assert!(output
            .trim_end()
            .ends_with("Files total analyzed: 2. Warnings: 1 caught in 1 files"));
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["summary"]["warnings"], 1);
        assert_eq!(value["diagnostics"][0]["function"], "ConvertSampleToDB");
        assert_eq!(
            value["diagnostics"][0]["missing_input_fields"][0],
            "sample.Note"
        );
    }
}
