// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RANKER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Ordena por score decrescente (sort estável: empates mantêm a ordem de
// segmentação, documento e depois posição no documento) e trunca.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::types::{RankedSection, Section};

/// Ordena e trunca em `max_sections`. Zero = sequência vazia.
pub fn rank(mut sections: Vec<Section>, max_sections: usize) -> Vec<Section> {
    if max_sections == 0 {
        return Vec::new();
    }

    sections.sort_by(|a, b| b.score_or_min().total_cmp(&a.score_or_min()));
    sections.truncate(max_sections);
    sections
}

/// Atribui `importance_rank` 1-based na ordem recebida
pub fn assign_importance_ranks(sections: Vec<Section>) -> Vec<RankedSection> {
    sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| RankedSection {
            importance_rank: i + 1,
            section,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(title: &str, score: f64) -> Section {
        Section::new(title, "content", 1).with_relevance_score(score)
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank(vec![scored("a", 1.0), scored("b", 3.0), scored("c", 2.0)], 10);
        assert_eq!(titles(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Cenário: scores [5.0, 7.0, 5.0, 9.0], max 3
        let ranked = rank(
            vec![scored("s0", 5.0), scored("s1", 7.0), scored("s2", 5.0), scored("s3", 9.0)],
            3,
        );
        assert_eq!(titles(&ranked), vec!["s3", "s1", "s0"]);
    }

    #[test]
    fn test_zero_max_is_empty() {
        assert!(rank(vec![scored("a", 1.0)], 0).is_empty());
    }

    #[test]
    fn test_max_larger_than_pool() {
        let ranked = rank(vec![scored("a", 1.0), scored("b", 2.0)], 50);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_unscored_sections_go_last() {
        let ranked = rank(vec![Section::new("none", "x", 1), scored("neg", -1.0)], 2);
        assert_eq!(titles(&ranked), vec!["neg", "none"]);
    }

    #[test]
    fn test_rerank_is_idempotent() {
        let once = rank(
            vec![scored("a", 2.0), scored("b", 2.0), scored("c", 4.0), scored("d", 1.0)],
            3,
        );
        let twice = rank(once.clone(), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_importance_ranks_are_one_based() {
        let ranked = assign_importance_ranks(vec![scored("a", 2.0), scored("b", 1.0)]);
        assert_eq!(ranked[0].importance_rank, 1);
        assert_eq!(ranked[1].importance_rank, 2);
        assert_eq!(ranked[1].section.title, "b");
    }
}
