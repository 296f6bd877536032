//! # Section Ranker
//!
//! Motor de extração de seções relevantes por persona: recebe o texto de
//! vários documentos, divide em seções, pontua cada seção contra uma
//! persona + tarefa (job-to-be-done), ranqueia e gera resumos extrativos
//! das seções do topo.
//!
//! ## Arquitetura Principal
//!
//! Componentes, das folhas para a raiz:
//!
//! ### 1. Keywords (`nlp`)
//! Extração de keywords por frequência, com stopwords fechadas.
//!
//! ### 2. Segmentação (`segmentation`)
//! Regras de fronteira (headers em caixa alta, numerados, markdown,
//! marcadores `[PAGE n]`) transformam texto em seções com título e página.
//!
//! ### 3. Scoring (`scoring`)
//! Similaridade TF-IDF com a query combinada com um score de keywords
//! (job, vocabulário da persona, tamanho). Corpus degenerado cai para o
//! score de keywords puro, sem erro.
//!
//! ### 4. Ranking e resumo (`ranking`, `summarizer`)
//! Sort estável decrescente + truncamento; resumo por seleção de sentenças.
//!
//! ### 5. Pipeline (`pipeline`)
//! Orquestra tudo para uma requisição, segmentando documentos em paralelo
//! com Rayon.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use section_ranker::prelude::*;
//!
//! let documents = vec![DocumentText::new(
//!     "guide.txt",
//!     "COASTAL TOWNS OVERVIEW\nSmall harbors, quiet beaches and family hotels line the coast.",
//! )];
//! let query = Query::new("Travel Planner", "Plan a relaxing trip");
//!
//! let pipeline = AnalysisPipeline::new(PipelineConfig::new().with_min_section_length(3));
//! let report = pipeline.analyze(&documents, &query);
//! assert_eq!(report.extracted_sections[0].importance_rank, 1);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos compartilhados: [`Section`], [`Query`], [`DocumentText`] e registros do relatório.
pub mod types;

/// Configuração do pipeline e do pool de threads.
///
/// Structs com `Default` + setters `with_*`, e carregamento por variáveis
/// de ambiente:
///
/// - `RANKER_MAX_SECTIONS`: Máximo de seções ranqueadas (padrão: 10)
/// - `RANKER_MIN_SECTION_LENGTH`: Mínimo de palavras por seção (padrão: 30)
/// - `RANKER_SUMMARY_TOP_K`: Seções com resumo (padrão: 5)
/// - `RANKER_PARALLEL`: Segmentação paralela (padrão: true)
/// - `RANKER_THREADS`: Threads do pool Rayon (padrão: dinâmico)
/// - `RANKER_SIMILARITY_WEIGHT` / `RANKER_KEYWORD_WEIGHT`: Pesos do score (0.7 / 0.3)
/// - `RANKER_PERSONAS_FILE`: Tabela de personas em JSON (opcional)
pub mod config;

/// Keywords e stopwords.
pub mod nlp;

/// Otimizações de performance de baixo nível.
///
/// - Produto escalar f64 com SIMD (AVX), determinístico
/// - Comparação query x linhas em paralelo
pub mod performance;

/// Divisão de documentos em seções.
pub mod segmentation;

/// Pontuação de relevância (TF-IDF + keywords + personas).
pub mod scoring;

/// Ordenação estável e truncamento.
pub mod ranking;

/// Resumo extrativo de seções.
pub mod summarizer;

/// Orquestração de uma requisição completa.
pub mod pipeline;

/// Exportação de relatórios em JSON e CSV.
pub mod export;

/// Utilitários diversos.
///
/// - Leitura de arquivos locais (PDF, texto)
/// - Formatação de texto e duração
/// - Cronômetro de etapas
pub mod utils;

// Re-exports principais
pub use config::{
    install_thread_pool, load_pipeline_config, load_runtime_config, PipelineConfig,
    RuntimeConfig, ScoringWeights,
};
pub use pipeline::AnalysisPipeline;
pub use ranking::rank;
pub use scoring::{score_sections, PersonaKeywordTable, RelevanceScorer};
pub use segmentation::{segment, Segmenter};
pub use summarizer::{summarize, Summarizer};
pub use types::*;

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// ```rust
/// use section_ranker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{PipelineConfig, ScoringWeights};
    pub use crate::nlp::extract_keywords;
    pub use crate::pipeline::AnalysisPipeline;
    pub use crate::ranking::{assign_importance_ranks, rank};
    pub use crate::scoring::{score_sections, PersonaKeywordTable, RelevanceScorer};
    pub use crate::segmentation::{segment, BoundaryRule, Segmenter};
    pub use crate::summarizer::{summarize, Summarizer};
    pub use crate::types::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
