// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO PIPELINE, SCORING E RUNTIME
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Parâmetros do pipeline de ranking. Todas as configurações podem ser
// definidas via .env; valores inválidos são ignorados (mantém o padrão).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::str::FromStr;

/// Pesos e constantes do score de relevância.
///
/// Os valores padrão são heurísticos (calibrados empiricamente), por isso
/// ficam configuráveis em vez de fixos no código.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringWeights {
    /// Peso da similaridade TF-IDF (escala 0-100) no score final. Padrão: 0.7
    pub similarity_weight: f64,
    /// Peso do score de keywords no score final. Padrão: 0.3
    pub keyword_weight: f64,
    /// Multiplicador da frequência relativa de keywords do job. Padrão: 15.0
    pub job_keyword_weight: f64,
    /// Bônus fixo por keyword da persona presente. Padrão: 8.0
    pub persona_keyword_bonus: f64,
    /// Bônus para seções de tamanho ideal. Padrão: 2.0
    pub length_bonus: f64,
    /// Menor tamanho (palavras) que recebe o bônus. Padrão: 50
    pub ideal_min_words: usize,
    /// Maior tamanho (palavras) que recebe o bônus fixo. Padrão: 500
    pub ideal_max_words: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity_weight: 0.7,
            keyword_weight: 0.3,
            job_keyword_weight: 15.0,
            persona_keyword_bonus: 8.0,
            length_bonus: 2.0,
            ideal_min_words: 50,
            ideal_max_words: 500,
        }
    }
}

impl ScoringWeights {
    /// Define os pesos da mistura similaridade/keywords
    pub fn with_blend(mut self, similarity_weight: f64, keyword_weight: f64) -> Self {
        self.similarity_weight = similarity_weight;
        self.keyword_weight = keyword_weight;
        self
    }
}

/// Parâmetros do vetorizador TF-IDF
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    /// Tamanho máximo do vocabulário. Padrão: 1000
    pub max_features: usize,
    /// Maior n-grama gerado (1 = só unigramas). Padrão: 2
    pub max_ngram: usize,
    /// Documentos mínimos em que o termo aparece. Padrão: 1
    pub min_df: usize,
    /// Fração máxima de documentos em que o termo aparece. Padrão: 0.95
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 1000,
            max_ngram: 2,
            min_df: 1,
            max_df: 0.95,
        }
    }
}

/// Parâmetros do segmentador
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Mínimo de palavras por seção (0 = sem filtro). Padrão: 30
    pub min_section_length: usize,
    /// Herda o último `[PAGE n]` visto no documento quando a seção não tem marcador
    pub carry_page_forward: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_section_length: 30,
            carry_page_forward: false,
        }
    }
}

/// Parâmetros do sumarizador extrativo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// Número de sentenças no resumo. Padrão: 3
    pub max_sentences: usize,
    /// Sentenças com menos tokens são descartadas. Padrão: 5
    pub min_sentence_tokens: usize,
    /// Peso de cada keyword distinta no score da sentença. Padrão: 2
    pub keyword_bonus: usize,
    /// Keywords retornadas junto com o resumo. Padrão: 10
    pub max_keywords: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            min_sentence_tokens: 5,
            keyword_bonus: 2,
            max_keywords: 10,
        }
    }
}

/// Configuração completa de uma execução do pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Máximo de seções no ranking final. Padrão: 10
    pub max_sections: usize,
    /// Quantas seções do topo recebem análise detalhada. Padrão: 5
    pub summary_top_k: usize,
    /// Segmenta documentos em paralelo (rayon). Padrão: true
    pub parallel_segmentation: bool,
    /// Configuração do segmentador
    pub segmenter: SegmenterConfig,
    /// Pesos do score
    pub weights: ScoringWeights,
    /// Configuração do vetorizador
    pub vectorizer: VectorizerConfig,
    /// Configuração do sumarizador
    pub summarizer: SummarizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_sections: 10,
            summary_top_k: 5,
            parallel_segmentation: true,
            segmenter: SegmenterConfig::default(),
            weights: ScoringWeights::default(),
            vectorizer: VectorizerConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Cria configuração padrão
    pub fn new() -> Self {
        Self::default()
    }

    /// Define o máximo de seções no ranking
    pub fn with_max_sections(mut self, max_sections: usize) -> Self {
        self.max_sections = max_sections;
        self
    }

    /// Define o mínimo de palavras por seção
    pub fn with_min_section_length(mut self, min_section_length: usize) -> Self {
        self.segmenter.min_section_length = min_section_length;
        self
    }

    /// Define quantas seções recebem resumo
    pub fn with_summary_top_k(mut self, top_k: usize) -> Self {
        self.summary_top_k = top_k;
        self
    }

    /// Liga/desliga segmentação paralela
    pub fn with_parallel_segmentation(mut self, parallel: bool) -> Self {
        self.parallel_segmentation = parallel;
        self
    }

    /// Substitui os pesos do score
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Configuração do pool de threads usado na segmentação paralela.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Número fixo de threads. Se None, usa min(cpu_cores, max_threads).
    pub worker_threads: Option<usize>,
    /// Limite superior para o cálculo dinâmico. Padrão: 16
    pub max_threads: usize,
    /// Prefixo do nome das threads
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            max_threads: 16,
            thread_name: "section-ranker".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Calcula número efetivo de threads.
    pub fn effective_worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(threads) => threads,
            None => std::cmp::min(num_cpus::get(), self.max_threads),
        }
    }
}

/// Instala o pool global do rayon com a configuração informada.
///
/// Só pode ser chamado uma vez por processo; chamadas seguintes retornam erro
/// do rayon e mantêm o pool já instalado.
pub fn install_thread_pool(config: &RuntimeConfig) -> Result<(), rayon::ThreadPoolBuildError> {
    let threads = config.effective_worker_threads();
    let prefix = config.thread_name.clone();

    log::info!("🔧 Rayon: {} threads", threads);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |i| format!("{}-{}", prefix, i))
        .build_global()
}

/// Lê variável de ambiente e converte; valores inválidos são logados e ignorados
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("⚠️ {}='{}' inválido, usando padrão", name, raw);
            None
        }
    }
}

fn env_bool(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            log::warn!("⚠️ {}='{}' inválido, usando padrão", name, raw);
            None
        }
    }
}

/// Carrega configuração do pipeline a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `RANKER_MAX_SECTIONS`: máximo de seções no ranking (padrão: 10)
/// - `RANKER_MIN_SECTION_LENGTH`: mínimo de palavras por seção (padrão: 30)
/// - `RANKER_SUMMARY_TOP_K`: seções com resumo (padrão: 5)
/// - `RANKER_PARALLEL`: segmentação paralela (padrão: true)
/// - `RANKER_SIMILARITY_WEIGHT`: peso da similaridade (padrão: 0.7)
/// - `RANKER_KEYWORD_WEIGHT`: peso das keywords (padrão: 0.3)
pub fn load_pipeline_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();

    if let Some(max) = env_parse::<usize>("RANKER_MAX_SECTIONS") {
        config.max_sections = max;
        log::info!("📦 RANKER_MAX_SECTIONS={}", max);
    }

    if let Some(min) = env_parse::<usize>("RANKER_MIN_SECTION_LENGTH") {
        config.segmenter.min_section_length = min;
        log::info!("📦 RANKER_MIN_SECTION_LENGTH={}", min);
    }

    if let Some(top_k) = env_parse::<usize>("RANKER_SUMMARY_TOP_K") {
        config.summary_top_k = top_k;
        log::info!("📦 RANKER_SUMMARY_TOP_K={}", top_k);
    }

    if let Some(parallel) = env_bool("RANKER_PARALLEL") {
        config.parallel_segmentation = parallel;
        log::info!("📦 RANKER_PARALLEL={}", parallel);
    }

    let similarity = env_blend_weight("RANKER_SIMILARITY_WEIGHT");
    let keyword = env_blend_weight("RANKER_KEYWORD_WEIGHT");
    if similarity.is_some() || keyword.is_some() {
        let similarity = similarity.unwrap_or(config.weights.similarity_weight);
        let keyword = keyword.unwrap_or(config.weights.keyword_weight);
        config.weights = config.weights.with_blend(similarity, keyword);
    }

    config
}

/// Peso da mistura vindo do ambiente; ignora valores negativos ou não-finitos
fn env_blend_weight(name: &str) -> Option<f64> {
    let weight = env_parse::<f64>(name)?;
    if weight.is_finite() && weight >= 0.0 {
        log::info!("📦 {}={}", name, weight);
        Some(weight)
    } else {
        log::warn!("⚠️  {}={} ignorado (peso inválido)", name, weight);
        None
    }
}

/// Carrega configuração de threads (`RANKER_THREADS`, `RANKER_MAX_THREADS`).
pub fn load_runtime_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if let Some(threads) = env_parse::<usize>("RANKER_THREADS") {
        if threads > 0 {
            config.worker_threads = Some(threads);
            log::info!("📦 RANKER_THREADS={} (fixo)", threads);
        }
    }

    if let Some(max) = env_parse::<usize>("RANKER_MAX_THREADS") {
        if max > 0 {
            config.max_threads = max;
            log::info!("📦 RANKER_MAX_THREADS={}", max);
        }
    }

    config
}

/// Caminho opcional de uma tabela de personas em JSON (`RANKER_PERSONAS_FILE`)
pub fn personas_file_from_env() -> Option<String> {
    std::env::var("RANKER_PERSONAS_FILE")
        .ok()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}
