// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EXPORTAÇÃO DE RELATÓRIOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// JSON: metadata / extracted_sections / subsection_analysis
// CSV:  uma linha de metadados, uma por seção, uma por análise
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::types::AnalysisReport;
use crate::utils::{clean_text, format_processing_time, readability_score, truncate_text};

/// Tamanho do trecho de resumo na coluna de análise do CSV
const CSV_SUMMARY_PREVIEW: usize = 100;

const CSV_HEADER: [&str; 9] = [
    "Type",
    "Document",
    "Title",
    "Persona",
    "Job_To_Be_Done",
    "Processing_Time",
    "Rank",
    "Page",
    "Relevance_Score",
];

/// Erros de exportação
#[derive(Debug, Error)]
pub enum ExportError {
    /// Falha de serialização JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Falha ao gravar o arquivo
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Formato pedido não existe
    #[error("Unknown export format: {0} (expected json or csv)")]
    UnknownFormat(String),
}

/// Formatos de saída
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON indentado
    #[default]
    Json,
    /// CSV com cabeçalho
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Serialize)]
struct ExportMetadata<'a> {
    input_documents: &'a [String],
    persona: &'a str,
    job_to_be_done: &'a str,
    processing_timestamp: &'a str,
    processing_time: String,
}

#[derive(Serialize)]
struct ExportSection<'a> {
    document: &'a str,
    section_title: &'a str,
    importance_rank: usize,
    page_number: u32,
    relevance_score: Option<f64>,
}

#[derive(Serialize)]
struct ExportAnalysis<'a> {
    document: &'a str,
    refined_text: &'a str,
    page_number: u32,
    keywords: &'a [String],
    readability_score: f64,
}

#[derive(Serialize)]
struct ExportReport<'a> {
    metadata: ExportMetadata<'a>,
    extracted_sections: Vec<ExportSection<'a>>,
    subsection_analysis: Vec<ExportAnalysis<'a>>,
}

fn processing_time(report: &AnalysisReport) -> String {
    let millis = u64::try_from(report.metadata.processing_time_ms).unwrap_or(u64::MAX);
    format_processing_time(Duration::from_millis(millis))
}

fn export_view(report: &AnalysisReport) -> ExportReport<'_> {
    ExportReport {
        metadata: ExportMetadata {
            input_documents: &report.metadata.input_documents,
            persona: &report.metadata.persona,
            job_to_be_done: &report.metadata.job_to_be_done,
            processing_timestamp: &report.metadata.processing_timestamp,
            processing_time: processing_time(report),
        },
        extracted_sections: report
            .extracted_sections
            .iter()
            .map(|r| ExportSection {
                document: &r.section.document_id,
                section_title: &r.section.title,
                importance_rank: r.importance_rank,
                page_number: r.section.page_number,
                relevance_score: r.section.relevance_score,
            })
            .collect(),
        subsection_analysis: report
            .subsection_analysis
            .iter()
            .map(|a| ExportAnalysis {
                document: &a.document_id,
                refined_text: &a.summary,
                page_number: a.page_number,
                keywords: &a.keywords,
                readability_score: (readability_score(&a.summary) * 10.0).round() / 10.0,
            })
            .collect(),
    }
}

/// Relatório como JSON indentado
pub fn to_json(report: &AnalysisReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&export_view(report))?)
}

/// Relatório como CSV (RFC 4180: campos com vírgula, aspas ou quebra de linha vão entre aspas)
pub fn to_csv(report: &AnalysisReport) -> String {
    let metadata = &report.metadata;
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(
        1 + report.extracted_sections.len() + report.subsection_analysis.len(),
    );

    rows.push(vec![
        "Metadata".into(),
        "System".into(),
        "Processing Info".into(),
        metadata.persona.clone(),
        metadata.job_to_be_done.clone(),
        processing_time(report),
        String::new(),
        String::new(),
        String::new(),
    ]);

    for ranked in &report.extracted_sections {
        let section = &ranked.section;
        rows.push(vec![
            "Section".into(),
            section.document_id.clone(),
            section.title.clone(),
            metadata.persona.clone(),
            metadata.job_to_be_done.clone(),
            String::new(),
            ranked.importance_rank.to_string(),
            section.page_number.to_string(),
            section
                .relevance_score
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ]);
    }

    for (i, analysis) in report.subsection_analysis.iter().enumerate() {
        rows.push(vec![
            "Analysis".into(),
            analysis.document_id.clone(),
            format!("Analysis {}", i + 1),
            metadata.persona.clone(),
            truncate_text(&clean_text(&analysis.summary), CSV_SUMMARY_PREVIEW),
            String::new(),
            String::new(),
            analysis.page_number.to_string(),
            String::new(),
        ]);
    }

    let mut out = csv_line(CSV_HEADER.iter().copied());
    for row in &rows {
        out.push_str(&csv_line(row.iter().map(String::as_str)));
    }
    out
}

/// Grava o relatório no formato pedido
pub fn write_report(
    report: &AnalysisReport,
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let rendered = render(report, format)?;
    std::fs::write(path.as_ref(), rendered)?;
    log::info!("💾 Relatório {} gravado em {}", format, path.as_ref().display());
    Ok(())
}

/// Renderiza o relatório no formato pedido
pub fn render(report: &AnalysisReport, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => to_json(report),
        ExportFormat::Csv => Ok(to_csv(report)),
    }
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
