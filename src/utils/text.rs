// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TEXT UTILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Utilitários de apresentação de texto:
// - Limpeza e truncamento
// - Formatação de duração
// - Legibilidade aproximada
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::time::Duration;

const ELLIPSIS: &str = "...";

/// Conta palavras em um texto
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normaliza whitespace e troca símbolos por espaço.
///
/// Mantém letras, dígitos, `_` e a pontuação básica `. , ! ? ; : - ( )`.
/// Quebras de linha viram espaço, então não use antes da segmentação.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || ".,!?;:-()".contains(c) {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trunca em `max_chars` caracteres, terminando com "..."
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Formata duração: "350ms", "2.5s", "1m 5.0s"
pub fn format_processing_time(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        let minutes = (seconds / 60.0).floor() as u64;
        format!("{}m {:.1}s", minutes, seconds % 60.0)
    }
}

/// Legibilidade simplificada (Flesch), limitada a 0..=100.
///
/// Sentenças = pedaços separados por '.', palavras = tokens por whitespace.
pub fn readability_score(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = text.split('.').count();
    let avg_sentence_length = words.len() as f64 / sentences as f64;
    let avg_word_length =
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words.len() as f64;

    let score = 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_word_length / 5.0;
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Hello world test"), 3);
        assert_eq!(word_count("  multiple   spaces  "), 2);
    }

    #[test]
    fn test_clean_text() {
        let text = "Hello\x00   world\t\n★ test (ok), done!";
        assert_eq!(clean_text(text), "Hello world test (ok), done!");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 10), "abcdefghij");
        assert_eq!(truncate_text("abcdefghijk", 10), "abcdefg...");
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let truncated = truncate_text("ááááááááááá", 6);
        assert_eq!(truncated, "ááá...");
    }

    #[test]
    fn test_format_processing_time() {
        assert_eq!(format_processing_time(Duration::from_millis(350)), "350ms");
        assert_eq!(format_processing_time(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_processing_time(Duration::from_millis(65_000)), "1m 5.0s");
    }

    #[test]
    fn test_readability_bounds() {
        assert_eq!(readability_score(""), 0.0);
        let simple = readability_score("The cat sat. The dog ran.");
        assert!(simple > 0.0 && simple <= 100.0);
        let dense = readability_score(
            "Internationalization notwithstanding, interdisciplinary institutionalization \
             characteristically overcomplicates organizational responsibilities",
        );
        assert!(dense < simple);
    }
}
