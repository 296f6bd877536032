//! # File Reader
//!
//! Decodifica arquivos locais para o texto UTF-8 consumido pelo segmentador.
//!
//! ## Tipos de Arquivo Suportados
//!
//! | Tipo | Extensões | Decodificação |
//! |------|-----------|---------------|
//! | PDF | `.pdf` | `pdf_extract`, página a página, com marcadores `[PAGE n]` |
//! | Texto | `.txt` | UTF-8, fallback Latin-1 |
//! | Markdown | `.md`, `.markdown` | UTF-8, fallback Latin-1 |
//! | DOCX | `.docx` | `docx_rs`, parágrafos não-vazios |
//!
//! Páginas de PDF sem texto são omitidas; as demais viram
//! `"[PAGE n]\n<texto>"` unidas por linha em branco. Parágrafos de DOCX
//! também são unidos por linha em branco, sem marcadores de página.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;

use crate::types::DocumentText;
use crate::utils::word_count;

/// Limite máximo de tamanho de arquivo padrão (100MB).
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Erros de leitura e decodificação de arquivos.
#[derive(Debug, Error)]
pub enum FileReaderError {
    /// Arquivo excede o limite de tamanho.
    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge {
        /// Tamanho do arquivo em bytes
        size: u64,
        /// Limite máximo permitido em bytes
        max: u64,
    },

    /// Formato sem decodificador.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// Falha ao extrair texto de um PDF (corrompido, protegido, só imagens).
    #[error("PDF extraction failed: {0}")]
    PdfExtractionError(String),

    /// Falha ao abrir um DOCX (zip ou XML inválido).
    #[error("DOCX extraction failed: {0}")]
    DocxExtractionError(String),

    /// Erro de I/O do sistema de arquivos.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Formato de arquivo detectado pela extensão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    /// Documento PDF
    Pdf,
    /// Texto puro
    Text,
    /// Markdown (tratado como texto)
    Markdown,
    /// Documento Word
    Docx,
    /// Extensão desconhecida (guarda a extensão, se houver)
    Unknown(String),
}

impl FileType {
    /// Detecta o tipo pela extensão do caminho (case-insensitive).
    ///
    /// ```rust
    /// use section_ranker::utils::FileType;
    ///
    /// assert_eq!(FileType::from_path("report.PDF"), FileType::Pdf);
    /// assert_eq!(FileType::from_path("notes.md"), FileType::Markdown);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "txt" => Self::Text,
            "md" | "markdown" => Self::Markdown,
            "docx" => Self::Docx,
            _ => Self::Unknown(extension),
        }
    }
}

/// Texto decodificado de um arquivo + metadados.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Caminho de origem
    pub source: String,
    /// Tipo detectado
    pub file_type: FileType,
    /// Texto UTF-8 (com marcadores de página para PDFs)
    pub text: String,
    /// Tamanho original em bytes
    pub size_bytes: u64,
    /// Número de palavras do texto
    pub word_count: usize,
    /// Páginas com texto (PDF); None para texto puro
    pub page_count: Option<usize>,
}

impl FileContent {
    /// Converte para o documento de entrada do pipeline, usando o nome do arquivo como id
    pub fn into_document(self) -> DocumentText {
        let document_id = Path::new(&self.source)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.source.clone());
        DocumentText::new(document_id, self.text)
    }
}

/// Leitor de arquivos locais.
#[derive(Debug, Clone)]
pub struct FileReader {
    max_file_size: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileReader {
    /// Cria leitor com limite padrão de 100MB
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Define o limite de tamanho em bytes
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Lê e decodifica um arquivo local.
    ///
    /// # Erros
    ///
    /// - [`FileReaderError::IoError`] - Arquivo não encontrado ou sem permissão
    /// - [`FileReaderError::FileTooLarge`] - Acima do limite configurado
    /// - [`FileReaderError::PdfExtractionError`] - PDF ilegível
    /// - [`FileReaderError::DocxExtractionError`] - DOCX ilegível
    /// - [`FileReaderError::UnsupportedType`] - Extensão desconhecida
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<FileContent, FileReaderError> {
        let path = path.as_ref();
        log::info!("📂 Lendo arquivo local: {}", path.display());

        let size = std::fs::metadata(path)?.len();
        if size > self.max_file_size {
            return Err(FileReaderError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        let data = std::fs::read(path)?;
        self.process_content(&path.display().to_string(), &data, FileType::from_path(path))
    }

    /// Decodifica bytes já carregados conforme o tipo informado
    pub fn process_content(
        &self,
        source: &str,
        data: &[u8],
        file_type: FileType,
    ) -> Result<FileContent, FileReaderError> {
        let (text, page_count) = match &file_type {
            FileType::Pdf => {
                let pages = Self::extract_pdf_pages(data)?;
                let count = pages.iter().filter(|p| !p.trim().is_empty()).count();
                (join_pages(&pages), Some(count))
            }
            FileType::Text | FileType::Markdown => (decode_text(data), None),
            FileType::Docx => (extract_docx_text(data)?, None),
            FileType::Unknown(extension) => {
                return Err(FileReaderError::UnsupportedType(format!(
                    "extension '{}'",
                    extension
                )));
            }
        };

        let word_count = word_count(&text);

        log::info!(
            "✅ Arquivo processado: {} | tipo={:?} | {} bytes | {} palavras",
            source,
            file_type,
            data.len(),
            word_count
        );

        Ok(FileContent {
            source: source.to_string(),
            file_type,
            text,
            size_bytes: data.len() as u64,
            word_count,
            page_count,
        })
    }

    /// Extrai o texto de cada página de um PDF.
    ///
    /// O `pdf_extract` escreve avisos de fontes no stderr; eles são
    /// silenciados durante a extração.
    pub fn extract_pdf_pages(data: &[u8]) -> Result<Vec<String>, FileReaderError> {
        log::info!("📄 Extraindo texto de PDF ({} bytes)", data.len());

        let _silence = gag::Gag::stderr().ok();
        pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| FileReaderError::PdfExtractionError(e.to_string()))
    }
}

/// Une páginas como `"[PAGE n]\n<texto>"`, pulando páginas vazias (n é 1-based)
pub fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .filter(|(_, page)| !page.trim().is_empty())
        .map(|(i, page)| format!("[PAGE {}]\n{}", i + 1, page))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Texto de um DOCX: parágrafos não-vazios unidos por linha em branco.
///
/// Tabelas e imagens são ignoradas; os runs de um parágrafo são concatenados
/// sem separador.
pub fn extract_docx_text(data: &[u8]) -> Result<String, FileReaderError> {
    let docx = read_docx(data).map_err(|e| FileReaderError::DocxExtractionError(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    log::debug!("[docx] {} parágrafos com texto", paragraphs.len());
    Ok(paragraphs.join("\n\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Decodifica texto: UTF-8 válido é usado direto; senão Latin-1.
///
/// Latin-1 mapeia todo byte para um caractere, então a decodificação nunca falha.
pub fn decode_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            log::debug!("Texto não é UTF-8 válido, decodificando como Latin-1");
            data.iter().map(|&b| b as char).collect()
        }
    }
}
