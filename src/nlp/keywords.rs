// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// KEYWORD EXTRACTOR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Extração de keywords por frequência:
// 1. Lowercase
// 2. Caracteres não-palavra viram espaço
// 3. Remove tokens com <= 2 chars e stopwords
// 4. Conta frequência preservando ordem de primeira ocorrência
// 5. Ordena por frequência (empates: quem apareceu primeiro)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::collections::HashMap;

use serde::Serialize;

use super::stopwords::is_keyword_stopword;

/// Número máximo de keywords retornadas por [`extract_keywords`]
pub const MAX_KEYWORDS: usize = 20;

/// Keyword com sua frequência no texto
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    /// Token em minúsculas
    pub token: String,
    /// Número de ocorrências
    pub frequency: usize,
}

/// Tokeniza como o extrator: lowercase, não-palavra -> espaço, split por whitespace
pub fn tokenize_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Conta keywords candidatas, mais frequentes primeiro.
///
/// Empates preservam a ordem de primeira ocorrência no texto, o que torna
/// o resultado determinístico.
pub fn keyword_counts(text: &str) -> Vec<KeywordCount> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in tokenize_words(text) {
        if token.chars().count() <= 2 || is_keyword_stopword(&token) {
            continue;
        }
        match counts.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut result: Vec<KeywordCount> = order
        .into_iter()
        .map(|token| {
            let frequency = counts.get(&token).copied().unwrap_or(0);
            KeywordCount { token, frequency }
        })
        .collect();

    // sort_by é estável: empates mantêm ordem de inserção
    result.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    result
}

/// Extrai até [`MAX_KEYWORDS`] keywords, mais frequentes primeiro
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_top_keywords(text, MAX_KEYWORDS)
}

/// Extrai até `limit` keywords (nunca mais que [`MAX_KEYWORDS`])
pub fn extract_top_keywords(text: &str, limit: usize) -> Vec<String> {
    keyword_counts(text)
        .into_iter()
        .take(limit.min(MAX_KEYWORDS))
        .map(|k| k.token)
        .collect()
}
