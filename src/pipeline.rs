// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ANALYSIS PIPELINE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Uma requisição de ponta a ponta:
//
//   documentos ──► segmentação (rayon, ordem preservada)
//                       │
//                       ▼
//               pool de seções ──► score ──► rank + truncamento
//                                                │
//                                                ▼
//                                   resumo das K primeiras ──► relatório
//
// A ordem do pool (documento, depois posição no documento) é o critério de
// desempate do ranking, então a segmentação paralela precisa devolver
// exatamente a mesma sequência que a sequencial.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::time::Instant;

use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::ranking::{assign_importance_ranks, rank};
use crate::scoring::{PersonaKeywordTable, RelevanceScorer};
use crate::segmentation::Segmenter;
use crate::summarizer::Summarizer;
use crate::types::{
    AnalysisReport, DocumentText, Query, RankedSection, ReportMetadata, Section,
    SubsectionAnalysis,
};
use crate::utils::{ActionTimer, TimingStats};

/// Relatório + tempos de cada etapa
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Relatório final
    pub report: AnalysisReport,
    /// Tempos por etapa
    pub timings: TimingStats,
}

/// Orquestra segmentação, score, ranking e resumos.
///
/// Sem estado entre chamadas: a mesma instância pode atender várias
/// requisições (inclusive em paralelo).
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: PipelineConfig,
    segmenter: Segmenter,
    scorer: RelevanceScorer,
    summarizer: Summarizer,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl AnalysisPipeline {
    /// Cria pipeline com personas padrão
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            segmenter: Segmenter::new(config.segmenter.clone()),
            scorer: RelevanceScorer::new(config.weights.clone(), config.vectorizer.clone()),
            summarizer: Summarizer::new(config.summarizer.clone()),
            config,
        }
    }

    /// Substitui a tabela de personas
    pub fn with_personas(mut self, personas: PersonaKeywordTable) -> Self {
        self.scorer = self.scorer.with_personas(personas);
        self
    }

    /// Configuração ativa
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Segmenta todos os documentos; ordem = documento, depois posição
    pub fn segment_all(&self, documents: &[DocumentText]) -> Vec<Section> {
        let per_document: Vec<Vec<Section>> = if self.config.parallel_segmentation {
            documents
                .par_iter()
                .map(|doc| self.segmenter.segment_document(doc))
                .collect()
        } else {
            documents
                .iter()
                .map(|doc| self.segmenter.segment_document(doc))
                .collect()
        };

        per_document.into_iter().flatten().collect()
    }

    /// Pontua, ordena e trunca o pool, atribuindo `importance_rank`
    pub fn rank_sections(&self, sections: Vec<Section>, query: &Query) -> Vec<RankedSection> {
        let scored = self.scorer.score(sections, query);
        assign_importance_ranks(rank(scored, self.config.max_sections))
    }

    /// Resumos das primeiras `summary_top_k` seções ranqueadas
    pub fn analyze_top(&self, ranked: &[RankedSection]) -> Vec<SubsectionAnalysis> {
        ranked
            .iter()
            .take(self.config.summary_top_k)
            .map(|r| {
                let summary = self.summarizer.summarize(&r.section.content);
                SubsectionAnalysis {
                    document_id: r.section.document_id.clone(),
                    page_number: r.section.page_number,
                    summary: summary.summary,
                    keywords: summary.keywords,
                }
            })
            .collect()
    }

    /// Executa a requisição e devolve só o relatório
    pub fn analyze(&self, documents: &[DocumentText], query: &Query) -> AnalysisReport {
        self.run(documents, query).report
    }

    /// Executa a requisição completa
    pub fn run(&self, documents: &[DocumentText], query: &Query) -> PipelineRun {
        let started = Instant::now();
        let timestamp = chrono::Utc::now();
        let mut timings = TimingStats::default();

        log::info!(
            "🔎 Analisando {} documentos | persona='{}' | job='{}'",
            documents.len(),
            query.persona,
            query.job
        );

        let timer = ActionTimer::start("Segmentação");
        let pool = self.segment_all(documents);
        timings.segmentation_ms = timer.stop_and_log();
        log::info!("📑 {} seções candidatas", pool.len());

        let timer = ActionTimer::start("Scoring");
        let scored = self.scorer.score(pool, query);
        timings.scoring_ms = timer.stop_and_log();

        let timer = ActionTimer::start("Ranking");
        let ranked = assign_importance_ranks(rank(scored, self.config.max_sections));
        timings.ranking_ms = timer.stop_and_log();

        let timer = ActionTimer::start("Resumos");
        let subsection_analysis = self.analyze_top(&ranked);
        timings.summarization_ms = timer.stop_and_log();

        let processing_time_ms = started.elapsed().as_millis();
        log::info!(
            "✅ {} seções ranqueadas, {} resumos em {}ms",
            ranked.len(),
            subsection_analysis.len(),
            processing_time_ms
        );

        let report = AnalysisReport {
            metadata: ReportMetadata {
                input_documents: documents.iter().map(|d| d.document_id.clone()).collect(),
                persona: query.persona.clone(),
                job_to_be_done: query.job.clone(),
                processing_timestamp: timestamp.to_rfc3339(),
                processing_time_ms,
            },
            extracted_sections: ranked,
            subsection_analysis,
        };

        PipelineRun { report, timings }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
