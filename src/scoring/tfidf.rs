// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TF-IDF - Vetorização léxica do corpus
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Cada chamada de `fit_transform` ajusta o vocabulário só com os documentos
// recebidos. O vetorizador guarda apenas a configuração: nenhum vocabulário
// sobrevive entre chamadas.
//
// Pipeline:
// 1. lowercase + tokens `\b\w\w+\b` + remoção de stopwords
// 2. n-gramas 1..=max_ngram
// 3. poda por df (min_df / max_df) e corte por frequência total (max_features)
// 4. idf suavizado: ln((1 + n) / (1 + df)) + 1
// 5. linhas = contagem × idf, normalizadas em L2
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::VectorizerConfig;
use crate::nlp::is_english_stopword;
use crate::performance::simd::normalize;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("literal regex"));

/// Motivos pelos quais o corpus não pode ser vetorizado
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorizeError {
    /// Menos documentos não-vazios que o necessário
    #[error("Too few documents to vectorize: {found} (need at least {required})")]
    TooFewDocuments {
        /// Documentos não-vazios encontrados
        found: usize,
        /// Mínimo necessário
        required: usize,
    },

    /// Nenhum termo sobrou após stopwords e poda por df
    #[error("Empty vocabulary after pruning")]
    EmptyVocabulary,
}

/// Resultado da vetorização: vocabulário + uma linha por documento
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Termos do vocabulário, em ordem lexicográfica (índice = coluna)
    pub vocabulary: Vec<String>,
    /// Linhas L2-normalizadas, na ordem dos documentos de entrada
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Número de documentos
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Retorna true se não há linhas
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Vetorizador TF-IDF sem estado entre chamadas
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
}

impl TfidfVectorizer {
    /// Cria vetorizador com a configuração informada
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Termos (unigramas + n-gramas) de um documento, em ordem de aparição
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = TOKEN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !is_english_stopword(t))
            .collect();

        let max_n = self.config.max_ngram.max(1);
        let mut terms = Vec::with_capacity(tokens.len() * max_n);
        for n in 1..=max_n {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Ajusta o vocabulário nos `documents` e devolve a matriz TF-IDF
    pub fn fit_transform(&self, documents: &[&str]) -> Result<TfidfMatrix, VectorizeError> {
        let non_empty = documents.iter().filter(|d| !d.trim().is_empty()).count();
        if non_empty < 2 {
            return Err(VectorizeError::TooFewDocuments {
                found: non_empty,
                required: 2,
            });
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf: HashMap<String, usize> = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // df e frequência total por termo (BTreeMap = ordem determinística)
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in &counts {
            for (term, count) in tf {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        if stats.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n_docs = documents.len();
        let max_doc_count = self.config.max_df * n_docs as f64;
        let min_doc_count = self.config.min_df;

        let mut kept: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= min_doc_count && (*df as f64) <= max_doc_count)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        if kept.len() > self.config.max_features {
            // Mais frequentes primeiro; empate em ordem lexicográfica (sort estável)
            kept.sort_by(|a, b| b.2.cmp(&a.2));
            kept.truncate(self.config.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        if kept.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, df, _)| ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0)
            .collect();
        let vocabulary: Vec<String> = kept.iter().map(|(term, _, _)| term.to_string()).collect();
        let column: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let rows: Vec<Vec<f64>> = counts
            .iter()
            .map(|tf| {
                let mut row = vec![0.0f64; vocabulary.len()];
                for (term, count) in tf {
                    if let Some(&col) = column.get(term.as_str()) {
                        row[col] = *count as f64 * idf[col];
                    }
                }
                normalize(&mut row);
                row
            })
            .collect();

        log::debug!(
            "[tfidf] {} documentos, vocabulário de {} termos",
            n_docs,
            vocabulary.len()
        );

        Ok(TfidfMatrix { vocabulary, rows })
    }
}
