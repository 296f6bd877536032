// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS COMPARTILHADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::utils::word_count;

/// Identificador de documento (nome do arquivo, caminho, etc.)
pub type DocumentId = String;

/// Texto já decodificado de um documento.
///
/// Marcadores de página, quando conhecidos, aparecem inline como
/// `[PAGE <n>]\n` imediatamente antes do texto da página.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    /// Identificador do documento
    pub document_id: DocumentId,
    /// Texto UTF-8 completo
    pub text: String,
}

impl DocumentText {
    /// Cria um documento a partir de id e texto
    pub fn new(document_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            text: text.into(),
        }
    }
}

/// Query de ranking: persona + tarefa (job-to-be-done)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Papel do usuário (ex: "Travel Planner")
    pub persona: String,
    /// Tarefa que as seções devem atender
    pub job: String,
}

impl Query {
    /// Cria uma nova query
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job: job.into(),
        }
    }

    /// Documento sintético usado no corpus TF-IDF ("persona job")
    pub fn as_document(&self) -> String {
        format!("{} {}", self.persona, self.job)
    }
}

/// Seção contígua de um documento, unidade de ranking.
///
/// Valor imutável: o score é anexado produzindo uma nova seção via
/// [`Section::with_relevance_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Título derivado da primeira linha significativa
    pub title: String,
    /// Texto da seção (sem espaços nas pontas)
    pub content: String,
    /// Página de origem (>= 1)
    pub page_number: u32,
    /// Número de tokens separados por whitespace em `content`
    pub word_count: usize,
    /// Documento de origem
    pub document_id: DocumentId,
    /// Score de relevância (None até ser pontuada)
    pub relevance_score: Option<f64>,
}

impl Section {
    /// Cria uma seção ainda não pontuada e sem documento associado
    pub fn new(title: impl Into<String>, content: impl Into<String>, page_number: u32) -> Self {
        let content = content.into();
        let word_count = word_count(&content);
        Self {
            title: title.into(),
            content,
            page_number: page_number.max(1),
            word_count,
            document_id: String::new(),
            relevance_score: None,
        }
    }

    /// Retorna uma cópia associada ao documento informado
    pub fn with_document_id(self, document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..self
        }
    }

    /// Retorna uma cópia com o score de relevância anexado
    pub fn with_relevance_score(self, score: f64) -> Self {
        Self {
            relevance_score: Some(score),
            ..self
        }
    }

    /// Score usado na ordenação (seções não pontuadas vão para o fim)
    pub fn score_or_min(&self) -> f64 {
        self.relevance_score.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Seção na posição final do ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSection {
    /// Posição 1-based no ranking
    pub importance_rank: usize,
    /// Seção pontuada
    #[serde(flatten)]
    pub section: Section,
}

/// Resultado do sumarizador para o texto de uma seção
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    /// Sentenças selecionadas, na ordem do score, separadas por espaço
    pub summary: String,
    /// Até 10 keywords do texto completo
    pub keywords: Vec<String>,
}

/// Análise detalhada de uma das seções do topo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsectionAnalysis {
    /// Documento de origem
    pub document_id: DocumentId,
    /// Página da seção analisada
    pub page_number: u32,
    /// Resumo extrativo
    pub summary: String,
    /// Keywords da seção
    pub keywords: Vec<String>,
}

/// Metadados de uma execução do pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    /// Documentos recebidos, na ordem de entrada
    pub input_documents: Vec<DocumentId>,
    /// Persona usada no ranking
    pub persona: String,
    /// Tarefa usada no ranking
    pub job_to_be_done: String,
    /// Momento do processamento (RFC 3339)
    pub processing_timestamp: String,
    /// Duração do processamento em milissegundos
    pub processing_time_ms: u128,
}

/// Resultado completo de uma requisição
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Metadados da execução
    pub metadata: ReportMetadata,
    /// Seções ranqueadas (já truncadas)
    pub extracted_sections: Vec<RankedSection>,
    /// Resumos das primeiras K seções
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
