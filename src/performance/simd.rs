// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SIMD - PRODUTO ESCALAR DAS LINHAS TF-IDF
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// As linhas TF-IDF saem do vetorizador já normalizadas em L2, então o
// cosseno entre query e seção é só o produto escalar.
//
// Tudo em f64. O caminho AVX e o escalar acumulam nas mesmas 4 faixas
// (elemento i vai para a faixa i % 4), sem FMA, e reduzem as faixas na
// mesma ordem: os dois devolvem exatamente os mesmos bits, em qualquer CPU.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use rayon::prelude::*;

/// Faixas de acumulação (= f64 por registro de 256 bits)
const LANES: usize = 4;

/// Redução fixa das faixas: (l0 + l2) + (l1 + l3)
#[inline]
fn reduce_lanes(acc: [f64; LANES]) -> f64 {
    (acc[0] + acc[2]) + (acc[1] + acc[3])
}

/// Produto escalar sem SIMD, com a mesma ordem de soma do caminho AVX.
///
/// Vetores de tamanhos diferentes são comparados até o menor tamanho.
pub fn dot_scalar(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / LANES;

    let mut acc = [0.0f64; LANES];
    for chunk in 0..chunks {
        let base = chunk * LANES;
        for (lane, slot) in acc.iter_mut().enumerate() {
            *slot += a[base + lane] * b[base + lane];
        }
    }

    let mut sum = reduce_lanes(acc);
    for i in chunks * LANES..len {
        sum += a[i] * b[i];
    }
    sum
}

/// Produto escalar com AVX (4 × f64 por instrução).
///
/// # Safety
///
/// O caller deve garantir que a CPU suporta AVX.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
unsafe fn dot_avx(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / LANES;

    let mut acc = _mm256_setzero_pd();
    for chunk in 0..chunks {
        let base = chunk * LANES;
        let va = _mm256_loadu_pd(a.as_ptr().add(base));
        let vb = _mm256_loadu_pd(b.as_ptr().add(base));
        // mul + add separados: FMA arredondaria diferente do escalar
        acc = _mm256_add_pd(acc, _mm256_mul_pd(va, vb));
    }

    let mut lanes = [0.0f64; LANES];
    _mm256_storeu_pd(lanes.as_mut_ptr(), acc);

    let mut sum = reduce_lanes(lanes);
    for i in chunks * LANES..len {
        sum += a[i] * b[i];
    }
    sum
}

/// Produto escalar, com AVX quando a CPU suporta
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx") {
            return unsafe { dot_avx(a, b) };
        }
    }

    dot_scalar(a, b)
}

/// Normaliza em L2; vetor nulo fica como está
pub fn normalize(v: &mut [f64]) {
    let norm = dot(v, v).sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosseno da query contra cada linha (todas já normalizadas).
///
/// Linhas em paralelo via Rayon; índice i da saída = linha i. Uma linha
/// nula (seção sem termos do vocabulário) dá 0.0.
pub fn similarities_to(query: &[f64], rows: &[Vec<f64>]) -> Vec<f64> {
    rows.par_iter().map(|row| dot(query, row)).collect()
}
