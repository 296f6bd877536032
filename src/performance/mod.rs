//! Módulo de otimizações de performance.
//!
//! O passo mais caro do ranking é comparar o vetor da query contra todas as
//! linhas TF-IDF das seções. Para pools com centenas de seções e vocabulário
//! de 1000 termos isso vira o gargalo.
//!
//! ## Técnicas Utilizadas
//!
//! - **SIMD (AVX)**: 4 f64 por instrução, mesma ordem de soma do escalar
//! - **Paralelismo**: Comparações distribuídas via Rayon (ordem preservada)

/// Produto escalar e normalização das linhas TF-IDF.
///
/// - [`dot`]: Produto escalar (= cosseno para linhas normalizadas)
/// - [`similarities_to`]: Query contra todas as linhas
pub mod simd;

pub use simd::{dot, normalize, similarities_to};
