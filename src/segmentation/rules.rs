// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BOUNDARY RULES - Detectores de início de seção
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Cada regra é independente e devolve os offsets (em bytes) onde uma nova
// seção começa. Regras padrão, na ordem de aplicação:
// - all_caps_header:  linha com >= 10 chars sem minúsculas
// - numbered_header:  "1. Título"
// - colon_header:     "TÍTULO:" sozinho na linha
// - markdown_header:  "#".."######"
// - page_marker:      "[PAGE n]"
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use once_cell::sync::Lazy;
use regex::Regex;

/// Padrão do marcador de página inserido pelo decodificador
pub const PAGE_MARKER_PATTERN: &str = r"\[PAGE (\d+)\]";

/// Regra de detecção de fronteira de seção
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    name: String,
    pattern: Regex,
}

impl BoundaryRule {
    /// Cria uma regra a partir de um padrão regex
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Cria uma regra a partir de uma regex já compilada
    pub fn from_regex(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Nome da regra (para logs e testes)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Padrão regex da regra
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Offsets de início de cada match no texto
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        self.pattern.find_iter(text).map(|m| m.start()).collect()
    }

    /// Lista padrão de regras, na ordem de aplicação
    pub fn defaults() -> Vec<BoundaryRule> {
        DEFAULT_RULES.clone()
    }
}

static DEFAULT_RULES: Lazy<Vec<BoundaryRule>> = Lazy::new(|| {
    [
        ("all_caps_header", r"\n\s*[A-Z][^a-z\n]{10,}\s*\n"),
        ("numbered_header", r"\n\s*\d+\.\s+[A-Z][^\n]+\n"),
        ("colon_header", r"\n\s*[A-Z][^a-z\n]+:\s*\n"),
        ("markdown_header", r"\n\s*#{1,6}\s+[^\n]+\n"),
        ("page_marker", PAGE_MARKER_PATTERN),
    ]
    .iter()
    .filter_map(|(name, pattern)| match BoundaryRule::new(*name, pattern) {
        Ok(rule) => Some(rule),
        Err(e) => {
            log::error!("Regra '{}' com regex inválido: {}", name, e);
            None
        }
    })
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> BoundaryRule {
        BoundaryRule::defaults()
            .into_iter()
            .find(|r| r.name() == name)
            .unwrap()
    }

    #[test]
    fn test_defaults_order() {
        let names: Vec<String> = BoundaryRule::defaults()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "all_caps_header",
                "numbered_header",
                "colon_header",
                "markdown_header",
                "page_marker"
            ]
        );
    }

    #[test]
    fn test_all_caps_header() {
        let text = "intro text\nGETTING AROUND TOWN\nbody";
        assert_eq!(rule("all_caps_header").boundaries(text), vec![10]);
        // Menos de 10 chars após a inicial não conta
        assert!(rule("all_caps_header").boundaries("a\nSHORT\nb").is_empty());
    }

    #[test]
    fn test_numbered_header() {
        let text = "prefix\n2. Local Cuisine\nbody";
        assert_eq!(rule("numbered_header").boundaries(text), vec![6]);
        assert!(rule("numbered_header").boundaries("x\n2. lowercase\ny").is_empty());
    }

    #[test]
    fn test_colon_header() {
        let text = "prefix\nTIPS:\nbody";
        assert_eq!(rule("colon_header").boundaries(text), vec![6]);
    }

    #[test]
    fn test_markdown_header() {
        let text = "prefix\n## Nightlife\nbody";
        assert_eq!(rule("markdown_header").boundaries(text), vec![6]);
        assert!(rule("markdown_header").boundaries("x\n####### Too deep\ny").is_empty());
    }

    #[test]
    fn test_page_marker() {
        let text = "[PAGE 1]\nabc\n[PAGE 2]\ndef";
        assert_eq!(rule("page_marker").boundaries(text), vec![0, 13]);
    }

    #[test]
    fn test_custom_rule() {
        let custom = BoundaryRule::new("separator", r"\n---\n").unwrap();
        assert_eq!(custom.name(), "separator");
        assert_eq!(custom.boundaries("a\n---\nb"), vec![1]);
        assert!(BoundaryRule::new("broken", "[unclosed").is_err());
    }
}
