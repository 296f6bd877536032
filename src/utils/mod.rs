// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// UTILITÁRIOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Utilitários fora do núcleo de ranking:
// - Leitura de arquivos (PDF, texto)
// - Formatação de texto e tempo
// - Cronômetro de etapas
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decodificação de arquivos locais para texto com marcadores de página.
pub mod file_reader;
mod text;
mod timing;

pub use file_reader::{FileContent, FileReader, FileReaderError, FileType};
pub use text::*;
pub use timing::{ActionTimer, TimingStats};
