// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TABELA DE KEYWORDS POR PERSONA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Mapeamento persona -> vocabulário típico do papel. É dado, não código:
// novas personas entram via `register` ou por um arquivo JSON.
// O nome casa exatamente (caixa e espaços contam). Persona desconhecida =
// lista vazia (contribuição zero no score).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Schema de uma persona (para JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaSchema {
    /// Nome da persona (comparação exata)
    pub name: String,
    /// Keywords do papel
    pub keywords: Vec<String>,
    /// Se está habilitada
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Configuração completa da tabela (para carregar de JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PersonaTableConfig {
    /// Versão do schema de configuração
    #[serde(default = "default_version")]
    pub version: String,
    /// Personas configuradas
    #[serde(default)]
    pub personas: Vec<PersonaSchema>,
}

fn default_version() -> String {
    "1.0".into()
}

/// Erro ao montar ou carregar a tabela de personas
#[derive(Debug, thiserror::Error)]
pub enum PersonaTableError {
    /// Persona já registrada com esse nome
    #[error("Persona '{0}' already exists")]
    AlreadyExists(String),

    /// Schema inválido
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// JSON mal-formado
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Falha ao ler o arquivo
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Tabela persona -> keywords
#[derive(Debug, Clone, Default)]
pub struct PersonaKeywordTable {
    /// Nome -> keywords em minúsculas
    entries: HashMap<String, Vec<String>>,
    /// Ordem de registro (para listagem estável)
    order: Vec<String>,
}

impl PersonaKeywordTable {
    /// Cria uma tabela vazia
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria a tabela com as 5 personas padrão
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_PERSONAS
            .iter()
            .map(|(name, keywords)| {
                let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
                (name.to_string(), keywords)
            })
            .collect();
        let order = DEFAULT_PERSONAS.iter().map(|(name, _)| name.to_string()).collect();
        Self { entries, order }
    }

    /// Registra uma persona
    pub fn register(
        &mut self,
        name: &str,
        keywords: Vec<String>,
    ) -> Result<(), PersonaTableError> {
        if name.trim().is_empty() {
            return Err(PersonaTableError::ValidationError(
                "persona name cannot be empty".into(),
            ));
        }
        if self.entries.contains_key(name) {
            return Err(PersonaTableError::AlreadyExists(name.to_string()));
        }

        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        self.entries.insert(name.to_string(), keywords);
        self.order.push(name.to_string());
        Ok(())
    }

    /// Keywords da persona (nome exato); desconhecida retorna lista vazia
    pub fn keywords_for(&self, persona: &str) -> &[String] {
        self.entries
            .get(persona)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Verifica se a persona é conhecida (nome exato)
    pub fn contains(&self, persona: &str) -> bool {
        self.entries.contains_key(persona)
    }

    /// Nomes registrados, na ordem de registro
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Número de personas registradas
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Retorna true se não há personas
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monta tabela a partir da configuração (personas desabilitadas são ignoradas)
    pub fn from_config(config: PersonaTableConfig) -> Result<Self, PersonaTableError> {
        let mut table = Self::new();
        for schema in config.personas.into_iter().filter(|p| p.enabled) {
            table.register(&schema.name, schema.keywords)?;
        }
        Ok(table)
    }

    /// Carrega de uma string JSON
    pub fn from_json(json: &str) -> Result<Self, PersonaTableError> {
        let config: PersonaTableConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Carrega de um arquivo JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PersonaTableError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        log::info!(
            "📋 {} personas carregadas de {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Exporta a tabela como configuração serializável
    pub fn to_config(&self) -> PersonaTableConfig {
        PersonaTableConfig {
            version: default_version(),
            personas: self
                .order
                .iter()
                .filter_map(|name| self.entries.get(name).map(|keywords| (name, keywords)))
                .map(|(name, keywords)| PersonaSchema {
                    name: name.clone(),
                    keywords: keywords.clone(),
                    enabled: true,
                })
                .collect(),
        }
    }
}

/// Personas padrão e seu vocabulário
const DEFAULT_PERSONAS: &[(&str, &[&str])] = &[
    (
        "Travel Planner",
        &["travel", "trip", "destination", "hotel", "restaurant", "activity", "tour", "visit", "explore"],
    ),
    (
        "Business Analyst",
        &["business", "market", "analysis", "data", "revenue", "strategy", "competitive", "trend"],
    ),
    (
        "Research Scientist",
        &["research", "study", "method", "data", "analysis", "findings", "experiment", "results"],
    ),
    (
        "Marketing Manager",
        &["marketing", "campaign", "audience", "brand", "promotion", "advertising", "customer"],
    ),
    (
        "Project Manager",
        &["project", "timeline", "requirements", "deliverable", "milestone", "resource", "planning"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_five_personas() {
        let table = PersonaKeywordTable::with_defaults();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.names(),
            vec![
                "Travel Planner",
                "Business Analyst",
                "Research Scientist",
                "Marketing Manager",
                "Project Manager"
            ]
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = PersonaKeywordTable::with_defaults();
        assert_eq!(table.keywords_for("Travel Planner").len(), 9);
        assert!(table.keywords_for("Travel Planner").contains(&"hotel".to_string()));

        // Caixa e espaços diferentes = persona desconhecida
        assert!(table.keywords_for("travel planner").is_empty());
        assert!(table.keywords_for(" Travel Planner").is_empty());
        assert!(!table.contains("TRAVEL PLANNER"));
    }

    #[test]
    fn test_unknown_persona_is_empty() {
        let table = PersonaKeywordTable::with_defaults();
        assert!(table.keywords_for("Astronaut").is_empty());
        assert!(!table.contains("Astronaut"));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut table = PersonaKeywordTable::with_defaults();
        let result = table.register("Travel Planner", vec!["x".into()]);
        assert!(matches!(result, Err(PersonaTableError::AlreadyExists(_))));

        // Outra grafia é outra persona
        assert!(table.register("TRAVEL PLANNER", vec!["x".into()]).is_ok());
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut table = PersonaKeywordTable::new();
        let result = table.register("   ", vec!["x".into()]);
        assert!(matches!(result, Err(PersonaTableError::ValidationError(_))));
    }

    #[test]
    fn test_register_new_persona() {
        let mut table = PersonaKeywordTable::new();
        table
            .register("Food Critic", vec!["Cuisine".into(), " wine ".into(), "".into()])
            .unwrap();
        assert_eq!(table.keywords_for("Food Critic"), &["cuisine", "wine"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "personas": [
                {"name": "HR Professional", "keywords": ["onboarding", "compliance"]},
                {"name": "Disabled One", "keywords": ["x"], "enabled": false}
            ]
        }"#;
        let table = PersonaKeywordTable::from_json(json).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.keywords_for("HR Professional").len(), 2);
        assert!(!table.contains("Disabled One"));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = PersonaKeywordTable::from_json("{not json");
        assert!(matches!(result, Err(PersonaTableError::ConfigError(_))));
    }

    #[test]
    fn test_config_round_trip_keeps_order() {
        let table = PersonaKeywordTable::with_defaults();
        let rebuilt = PersonaKeywordTable::from_config(table.to_config()).unwrap();
        assert_eq!(rebuilt.names(), table.names());
    }
}
