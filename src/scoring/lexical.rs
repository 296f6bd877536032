// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SCORE LÉXICO (KEYWORDS)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Sempre calculado, mesmo quando o TF-IDF funciona:
// - keywords do job:     (ocorrências / palavras da seção) × 15
// - keywords da persona: +8 por keyword presente
// - tamanho:             +2 entre 50 e 500 palavras; ln(wc/500) acima de 500
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::config::ScoringWeights;
use crate::utils::word_count;

/// Arredonda para 2 casas decimais, empates para o par (2.125 -> 2.12).
///
/// O empate é decidido pelo valor exato de `value`: quando `value * 100`
/// arredonda para um `.5` exato, o resíduo da multiplicação (via `mul_add`)
/// diz de que lado o valor real estava.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    if scaled - floor != 0.5 {
        return scaled.round() / 100.0;
    }

    let residue = value.mul_add(100.0, -scaled);
    let rounded = if residue > 0.0 {
        floor + 1.0
    } else if residue < 0.0 || floor % 2.0 == 0.0 {
        floor
    } else {
        floor + 1.0
    };
    rounded / 100.0
}

/// Score de keywords de uma seção.
///
/// `job_keywords` e `persona_keywords` devem estar em minúsculas (como saem
/// de [`crate::nlp::extract_keywords`] e da tabela de personas). Matching é
/// por substring no conteúdo em minúsculas. Resultado arredondado.
pub fn keyword_score(
    content: &str,
    job_keywords: &[String],
    persona_keywords: &[String],
    weights: &ScoringWeights,
) -> f64 {
    let word_count = word_count(content);
    if word_count == 0 {
        return 0.0;
    }

    let content_lower = content.to_lowercase();
    let mut score = 0.0;

    for keyword in job_keywords {
        let occurrences = content_lower.matches(keyword.as_str()).count();
        if occurrences > 0 {
            score += occurrences as f64 / word_count as f64 * weights.job_keyword_weight;
        }
    }

    for keyword in persona_keywords {
        if content_lower.contains(keyword.as_str()) {
            score += weights.persona_keyword_bonus;
        }
    }

    score += length_bonus(word_count, weights);

    round2(score)
}

/// Bônus de qualidade pelo tamanho da seção
pub fn length_bonus(word_count: usize, weights: &ScoringWeights) -> f64 {
    if (weights.ideal_min_words..=weights.ideal_max_words).contains(&word_count) {
        weights.length_bonus
    } else if word_count > weights.ideal_max_words && weights.ideal_max_words > 0 {
        (word_count as f64 / weights.ideal_max_words as f64).ln()
    } else {
        0.0
    }
}
