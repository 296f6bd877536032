// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SUMARIZADOR EXTRATIVO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Seleciona sentenças existentes, sem gerar texto:
// 1. Divide em sentenças por sequências de `.`, `!`, `?`
// 2. Descarta sentenças com menos de 5 tokens
// 3. score = tokens + 2 × keywords distintas da própria sentença
// 4. Top 3 (estável), unidas por espaço na ordem do score
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SummarizerConfig;
use crate::nlp::{extract_keywords, extract_top_keywords};
use crate::types::SectionSummary;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("literal regex"));

/// Divide em sentenças (trim, sem vazias)
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Sumarizador extrativo
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
}

impl Summarizer {
    /// Cria sumarizador com a configuração informada
    pub fn new(config: SummarizerConfig) -> Self {
        Self { config }
    }

    /// Score de uma sentença, ou None se curta demais
    pub fn sentence_score(&self, sentence: &str) -> Option<usize> {
        let tokens = sentence.split_whitespace().count();
        if tokens < self.config.min_sentence_tokens {
            return None;
        }
        Some(tokens + self.config.keyword_bonus * extract_keywords(sentence).len())
    }

    /// Resumo + keywords do texto
    pub fn summarize(&self, text: &str) -> SectionSummary {
        if text.trim().is_empty() {
            return SectionSummary::default();
        }

        let mut scored: Vec<(&str, usize)> = split_sentences(text)
            .into_iter()
            .filter_map(|s| self.sentence_score(s).map(|score| (s, score)))
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let summary = scored
            .iter()
            .take(self.config.max_sentences)
            .map(|(sentence, _)| *sentence)
            .collect::<Vec<_>>()
            .join(" ");

        SectionSummary {
            summary,
            keywords: extract_top_keywords(text, self.config.max_keywords),
        }
    }
}

/// Sumariza com a configuração padrão
pub fn summarize(text: &str) -> SectionSummary {
    Summarizer::default().summarize(text)
}
