// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SEGMENTER - Divisão de documentos em seções
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Fluxo:
// 1. Cada BoundaryRule devolve offsets de início de seção
// 2. Offsets 0 e len(text) sempre entram; dedup + sort
// 3. Cada par consecutivo vira uma candidata (trim)
// 4. Candidatas com menos de `min_length` palavras são descartadas
// 5. Título e número de página são derivados do texto da seção
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Regras de detecção de fronteiras.
pub mod rules;

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SegmenterConfig;
use crate::types::{DocumentText, Section};
use crate::utils::word_count;

pub use rules::{BoundaryRule, PAGE_MARKER_PATTERN};

/// Número de palavras usado no título de fallback
const FALLBACK_TITLE_WORDS: usize = 8;
/// Faixa de palavras aceitável para uma linha de título
const TITLE_MIN_WORDS: usize = 2;
const TITLE_MAX_WORDS: usize = 15;

static PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(PAGE_MARKER_PATTERN).expect("literal regex"));
static LEADING_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("literal regex"));

/// Segmentador com lista aberta de regras de fronteira
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Vec<BoundaryRule>,
    config: SegmenterConfig,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

impl Segmenter {
    /// Cria segmentador com as regras padrão
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            rules: BoundaryRule::defaults(),
            config,
        }
    }

    /// Substitui a lista de regras
    pub fn with_rules(mut self, rules: Vec<BoundaryRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Adiciona uma regra ao fim da lista
    pub fn with_rule(mut self, rule: BoundaryRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Regras ativas, na ordem de aplicação
    pub fn rules(&self) -> &[BoundaryRule] {
        &self.rules
    }

    /// Configuração ativa
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Offsets ordenados e sem duplicatas, incluindo 0 e `text.len()`
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        let mut offsets: BTreeSet<usize> = BTreeSet::new();
        offsets.insert(0);
        for rule in &self.rules {
            offsets.extend(rule.boundaries(text));
        }
        offsets.insert(text.len());
        offsets.into_iter().collect()
    }

    /// Divide `text` em seções com pelo menos `min_length` palavras.
    ///
    /// O `document_id` das seções fica vazio; use [`Section::with_document_id`]
    /// ou [`Segmenter::segment_document`].
    pub fn segment(&self, text: &str, min_length: usize) -> Vec<Section> {
        if text.is_empty() {
            return Vec::new();
        }

        let markers = if self.config.carry_page_forward {
            page_markers(text)
        } else {
            Vec::new()
        };

        let offsets = self.boundaries(text);
        let mut sections = Vec::new();

        for window in offsets.windows(2) {
            let (start, end) = (window[0], window[1]);
            // com min_length 0 um trecho vazio entre fronteiras vira seção vazia
            let candidate = text[start..end].trim();
            if word_count(candidate) < min_length {
                continue;
            }

            let page_number = extract_page_number(candidate)
                .or_else(|| inherited_page(&markers, start))
                .unwrap_or(1);

            sections.push(Section::new(extract_title(candidate), candidate, page_number));
        }

        log::debug!(
            "[segment] {} fronteiras -> {} seções (min_length={})",
            offsets.len(),
            sections.len(),
            min_length
        );

        sections
    }

    /// Segmenta um documento usando `min_section_length` da configuração
    pub fn segment_document(&self, document: &DocumentText) -> Vec<Section> {
        self.segment(&document.text, self.config.min_section_length)
            .into_iter()
            .map(|s| s.with_document_id(document.document_id.clone()))
            .collect()
    }
}

/// Atalho: segmenta com as regras padrão
pub fn segment(text: &str, min_length: usize) -> Vec<Section> {
    Segmenter::default().segment(text, min_length)
}

/// Extrai o título da seção.
///
/// Primeira linha com 2 a 15 palavras, sem marcador de página, sem numeração
/// inicial e sem ':' final. Fallback: primeiras 8 palavras + "...".
pub fn extract_title(text: &str) -> String {
    for line in text.lines() {
        let line = line.trim();
        let words = line.split_whitespace().count();
        if line.is_empty() || !(TITLE_MIN_WORDS..=TITLE_MAX_WORDS).contains(&words) {
            continue;
        }

        let without_marker = PAGE_MARKER.replace_all(line, "");
        let without_numbering = LEADING_NUMBERING.replace(without_marker.trim(), "");
        let title: &str = without_numbering.as_ref();
        let title = title.strip_suffix(':').unwrap_or(title).trim();

        if !title.is_empty() {
            return title.to_string();
        }
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut title = words
        .iter()
        .take(FALLBACK_TITLE_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > FALLBACK_TITLE_WORDS {
        title.push_str("...");
    }
    title
}

/// Número do primeiro marcador `[PAGE n]` no texto
pub fn extract_page_number(text: &str) -> Option<u32> {
    PAGE_MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|page| *page >= 1)
}

/// Marcadores de página do documento: (offset, página)
fn page_markers(text: &str) -> Vec<(usize, u32)> {
    PAGE_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let offset = caps.get(0)?.start();
            let page = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some((offset, page))
        })
        .filter(|(_, page)| *page >= 1)
        .collect()
}

/// Página do último marcador antes de `offset`
fn inherited_page(markers: &[(usize, u32)], offset: usize) -> Option<u32> {
    markers
        .iter()
        .take_while(|(marker_offset, _)| *marker_offset < offset)
        .last()
        .map(|(_, page)| *page)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn body(words: usize) -> String {
        (0..words).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_text() {
        assert!(segment("", 0).is_empty());
        assert!(segment("", 5).is_empty());
    }

    #[test]
    fn test_introduction_scenario() {
        let text = "[PAGE 1]\nINTRODUCTION\nThis chapter explains trip planning for groups visiting Europe for four days with friends touring cities.";
        let sections = segment(text, 5);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 1);
        assert!(sections[0].title.contains("INTRODUCTION"));
        assert!(sections[0].word_count >= 5);
    }

    #[test]
    fn test_page_marker_round_trip() {
        let text = format!("[PAGE 7]\n{}", body(12));
        let sections = segment(&text, 5);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 7);
    }

    #[test]
    fn test_page_marker_only_is_discarded() {
        let text = format!("[PAGE 1]\n{}\n[PAGE 2]", body(10));
        let sections = segment(&text, 3);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 1);
    }

    #[test]
    fn test_min_length_filter() {
        let text = format!("{}\n## Short\ntiny\n## Long Section\n{}", body(3), body(20));
        let sections = segment(&text, 10);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "## Long Section");
        for section in &sections {
            assert!(section.word_count >= 10);
        }
    }

    #[test]
    fn test_zero_min_length_keeps_every_part() {
        let text = "first part\n## Second\nmore";
        let sections = segment(text, 0);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_zero_min_length_keeps_empty_candidates() {
        let segmenter = Segmenter::default().with_rule(BoundaryRule::new("blank", r"\n\n").unwrap());
        let text = "alpha beta\n\n\n\ngamma delta";

        let sections = segmenter.segment(text, 0);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].content, "");
        assert_eq!(sections[1].word_count, 0);
        assert_eq!(sections[2].content, "gamma delta");

        assert_eq!(segmenter.segment(text, 1).len(), 2);
    }

    #[test]
    fn test_word_count_matches_content() {
        let text = format!("1. Getting There\n{}\n\n2. Where To Stay\n{}", body(30), body(40));
        for section in segment(&text, 1) {
            assert_eq!(section.word_count, section.content.split_whitespace().count());
        }
    }

    #[test]
    fn test_title_strips_numbering_and_colon() {
        assert_eq!(extract_title("3. Packing Tips:\nbody text here"), "Packing Tips");
        assert_eq!(extract_title("[PAGE 4] Travel Budget\nrest"), "Travel Budget");
    }

    #[test]
    fn test_title_skips_single_word_lines() {
        assert_eq!(
            extract_title("OVERVIEW\nThe coast of France\nmore"),
            "The coast of France"
        );
    }

    #[test]
    fn test_title_fallback() {
        let text = "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine";
        assert_eq!(extract_title(text), "one two three four five six seven eight...");
        assert_eq!(extract_title("alone"), "alone");
    }

    #[test]
    fn test_extract_page_number() {
        assert_eq!(extract_page_number("[PAGE 12]\ntext"), Some(12));
        assert_eq!(extract_page_number("no marker"), None);
        assert_eq!(extract_page_number("[PAGE 0]"), None);
    }

    #[test]
    fn test_carry_page_forward() {
        let text = format!("[PAGE 3]\nGETTING AROUND TOWN\n{}", body(12));
        let plain = segment(&text, 5);
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].page_number, 1);

        let segmenter = Segmenter::new(SegmenterConfig {
            min_section_length: 5,
            carry_page_forward: true,
        });
        let carried = segmenter.segment(&text, 5);
        assert_eq!(carried.len(), 1);
        assert_eq!(carried[0].page_number, 3);
    }

    #[test]
    fn test_custom_rule_adds_boundaries() {
        let text = format!("{}\n---\n{}", body(6), body(6));
        assert_eq!(segment(&text, 1).len(), 1);

        let segmenter = Segmenter::default()
            .with_rule(BoundaryRule::new("separator", r"\n---\n").unwrap());
        assert_eq!(segmenter.segment(&text, 1).len(), 2);
    }

    #[test]
    fn test_segment_document_attaches_id() {
        let segmenter = Segmenter::new(SegmenterConfig {
            min_section_length: 3,
            carry_page_forward: false,
        });
        let doc = DocumentText::new("guide.pdf", body(10));
        let sections = segmenter.segment_document(&doc);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].document_id, "guide.pdf");
    }

    #[test]
    fn test_boundaries_sorted_and_deduplicated() {
        let text = "[PAGE 1]\nabc\n[PAGE 2]\ndef";
        let offsets = Segmenter::default().boundaries(text);
        assert_eq!(offsets, vec![0, 13, text.len()]);
    }
}
