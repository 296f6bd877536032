//! Pontuação de relevância das seções.
//!
//! Combina dois sinais por seção:
//!
//! - **Similaridade TF-IDF** entre a seção e o documento sintético
//!   `"persona job"`, escalada para 0-100
//! - **Score léxico** ([`lexical::keyword_score`]): keywords do job,
//!   vocabulário da persona e bônus de tamanho
//!
//! `score = similaridade × 0.7 + keywords × 0.3` (pesos configuráveis).
//! Se o corpus não vetoriza, cai para o score léxico puro, sem erro.

pub mod lexical;
pub mod personas;
pub mod tfidf;

pub use lexical::{keyword_score, round2};
pub use personas::{PersonaKeywordTable, PersonaSchema, PersonaTableConfig, PersonaTableError};
pub use tfidf::{TfidfMatrix, TfidfVectorizer, VectorizeError};

use crate::config::{ScoringWeights, VectorizerConfig};
use crate::nlp::extract_keywords;
use crate::performance::similarities_to;
use crate::types::{Query, Section};

/// Mínimo de seções com texto para o caminho TF-IDF (a query não conta)
pub const MIN_SECTIONS_FOR_SIMILARITY: usize = 2;

/// Caminho usado numa chamada de `score`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPath {
    /// Similaridade TF-IDF combinada com keywords
    Blended,
    /// Apenas keywords (corpus degenerado)
    KeywordOnly,
}

/// Seções pontuadas + caminho usado
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    /// Seções com `relevance_score` preenchido, na ordem de entrada
    pub sections: Vec<Section>,
    /// Caminho efetivamente usado
    pub path: ScoringPath,
}

/// Pontuador de relevância.
///
/// Guarda só configuração e a tabela de personas: o vetorizador é criado a
/// cada chamada, então uma instância pode ser compartilhada entre threads.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
    vectorizer: VectorizerConfig,
    personas: PersonaKeywordTable,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            vectorizer: VectorizerConfig::default(),
            personas: PersonaKeywordTable::with_defaults(),
        }
    }
}

impl RelevanceScorer {
    /// Cria pontuador com pesos e config do vetorizador
    pub fn new(weights: ScoringWeights, vectorizer: VectorizerConfig) -> Self {
        Self {
            weights,
            vectorizer,
            personas: PersonaKeywordTable::with_defaults(),
        }
    }

    /// Substitui a tabela de personas
    pub fn with_personas(mut self, personas: PersonaKeywordTable) -> Self {
        self.personas = personas;
        self
    }

    /// Pesos em uso
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Tabela de personas em uso
    pub fn personas(&self) -> &PersonaKeywordTable {
        &self.personas
    }

    /// Pontua as seções (mesma ordem de entrada)
    pub fn score(&self, sections: Vec<Section>, query: &Query) -> Vec<Section> {
        self.score_with_path(sections, query).sections
    }

    /// Pontua as seções e informa qual caminho foi usado
    pub fn score_with_path(&self, sections: Vec<Section>, query: &Query) -> ScoringOutcome {
        if sections.is_empty() {
            return ScoringOutcome {
                sections,
                path: ScoringPath::KeywordOnly,
            };
        }

        let job_keywords = extract_keywords(&query.job);
        let persona_keywords = self.personas.keywords_for(&query.persona);
        if persona_keywords.is_empty() {
            log::debug!("[scoring] persona '{}' sem keywords conhecidas", query.persona);
        }

        let lexical: Vec<f64> = sections
            .iter()
            .map(|s| keyword_score(&s.content, &job_keywords, persona_keywords, &self.weights))
            .collect();

        match self.similarities(&sections, query) {
            Ok(similarities) => {
                let sections = sections
                    .into_iter()
                    .zip(similarities)
                    .zip(lexical)
                    .map(|((section, similarity), kw)| {
                        let blended = similarity * 100.0 * self.weights.similarity_weight
                            + kw * self.weights.keyword_weight;
                        section.with_relevance_score(round2(blended))
                    })
                    .collect();
                ScoringOutcome {
                    sections,
                    path: ScoringPath::Blended,
                }
            }
            Err(e) => {
                log::warn!("⚠️  TF-IDF indisponível ({}), usando apenas keywords", e);
                let sections = sections
                    .into_iter()
                    .zip(lexical)
                    .map(|(section, kw)| section.with_relevance_score(kw))
                    .collect();
                ScoringOutcome {
                    sections,
                    path: ScoringPath::KeywordOnly,
                }
            }
        }
    }

    /// Cosseno entre a query e cada seção, num vocabulário ajustado só neste corpus
    fn similarities(&self, sections: &[Section], query: &Query) -> Result<Vec<f64>, VectorizeError> {
        let with_text = sections
            .iter()
            .filter(|s| !s.content.trim().is_empty())
            .count();
        if with_text < MIN_SECTIONS_FOR_SIMILARITY {
            return Err(VectorizeError::TooFewDocuments {
                found: with_text,
                required: MIN_SECTIONS_FOR_SIMILARITY,
            });
        }

        let query_document = query.as_document();
        let mut corpus: Vec<&str> = sections.iter().map(|s| s.content.as_str()).collect();
        corpus.push(&query_document);

        let mut matrix = TfidfVectorizer::new(self.vectorizer.clone()).fit_transform(&corpus)?;
        let query_row = matrix.rows.pop().ok_or(VectorizeError::EmptyVocabulary)?;

        Ok(similarities_to(&query_row, &matrix.rows))
    }
}

/// Pontua com pesos e personas padrão
pub fn score_sections(sections: Vec<Section>, query: &Query) -> Vec<Section> {
    RelevanceScorer::default().score(sections, query)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
