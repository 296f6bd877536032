//! Processamento léxico básico.
//!
//! - [`extract_keywords`]: keywords por frequência (usado no score e no resumo)
//! - Listas de stopwords do extrator e do vetorizador

/// Extrator de keywords por frequência.
pub mod keywords;
/// Listas fechadas de stopwords.
pub mod stopwords;

pub use keywords::{
    extract_keywords, extract_top_keywords, keyword_counts, tokenize_words, KeywordCount,
    MAX_KEYWORDS,
};
pub use stopwords::{is_english_stopword, is_keyword_stopword};
