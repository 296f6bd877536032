// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIMING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Cronômetro por etapa do pipeline (segmentação, scoring, ranking, resumo).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::time::Instant;

/// Timer para medir duração de uma etapa
pub struct ActionTimer {
    start: Instant,
    action_name: String,
}

impl ActionTimer {
    /// Inicia um novo timer
    pub fn start(action_name: &str) -> Self {
        Self {
            start: Instant::now(),
            action_name: action_name.to_string(),
        }
    }

    /// Tempo decorrido em milissegundos
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Para o timer e loga (nível debug) o tempo decorrido
    pub fn stop_and_log(self) -> u128 {
        let elapsed = self.elapsed_ms();
        log::debug!("⏱️  {} completado em {}ms", self.action_name, elapsed);
        elapsed
    }
}

/// Tempos (ms) de cada etapa de uma execução
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingStats {
    /// Segmentação de todos os documentos
    pub segmentation_ms: u128,
    /// Pontuação do pool
    pub scoring_ms: u128,
    /// Ordenação e truncamento
    pub ranking_ms: u128,
    /// Resumos do topo
    pub summarization_ms: u128,
}

impl TimingStats {
    /// Soma das etapas
    pub fn total_ms(&self) -> u128 {
        self.segmentation_ms + self.scoring_ms + self.ranking_ms + self.summarization_ms
    }

    /// Resumo legível
    pub fn summary(&self) -> String {
        format!(
            "Timing Stats:\n\
             - Segmentation: {}ms\n\
             - Scoring: {}ms\n\
             - Ranking: {}ms\n\
             - Summarization: {}ms\n\
             - Total: {}ms",
            self.segmentation_ms,
            self.scoring_ms,
            self.ranking_ms,
            self.summarization_ms,
            self.total_ms()
        )
    }
}
