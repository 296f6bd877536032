// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SECTION RANKER CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Lê documentos locais, ranqueia as seções para uma persona e imprime o
// relatório.
//
// Uso:
//   section-ranker-cli --persona "Travel Planner" --job "Plan a 4 day trip" guia.pdf
//   section-ranker-cli --persona "HR Professional" --job "..." --format csv *.txt
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};

use section_ranker::export::{self, ExportFormat};
use section_ranker::utils::{format_processing_time, FileReader};
use section_ranker::{
    config::personas_file_from_env, install_thread_pool, load_pipeline_config,
    load_runtime_config, AnalysisPipeline, DocumentText, PersonaKeywordTable, Query,
};

/// Argumentos da linha de comando
#[derive(Debug, Default)]
struct CliArgs {
    persona: Option<String>,
    job: Option<String>,
    max_sections: Option<usize>,
    min_length: Option<usize>,
    top_k: Option<usize>,
    format: ExportFormat,
    output: Option<PathBuf>,
    files: Vec<PathBuf>,
}

/// Tenta carregar o arquivo .env de múltiplos locais possíveis
fn load_dotenv() {
    let possible_paths = [PathBuf::from(".env"), PathBuf::from("../.env")];

    for path in &possible_paths {
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => {
                    eprintln!(
                        "✓ Carregado .env de: {:?}",
                        path.canonicalize().unwrap_or(path.clone())
                    );
                    return;
                }
                Err(e) => {
                    eprintln!("⚠ Erro ao carregar {:?}: {}", path, e);
                }
            }
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Section Ranker CLI v{}", section_ranker::VERSION);
    eprintln!();
    eprintln!("Uso: {} --persona <persona> --job <tarefa> [opções] <arquivos...>", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  --max-sections <n>   Máximo de seções no ranking (padrão: 10)");
    eprintln!("  --min-length <n>     Mínimo de palavras por seção (padrão: 30)");
    eprintln!("  --top-k <n>          Seções com resumo detalhado (padrão: 5)");
    eprintln!("  --format <json|csv>  Formato de saída (padrão: json)");
    eprintln!("  --output <arquivo>   Grava o relatório em arquivo em vez do stdout");
    eprintln!();
    eprintln!("Formatos aceitos: .pdf, .txt, .md");
}

fn parse_number(flag: &str, value: Option<String>) -> anyhow::Result<usize> {
    let value = value.ok_or_else(|| anyhow!("{} requer um valor", flag))?;
    value
        .parse::<usize>()
        .with_context(|| format!("{} espera um inteiro não-negativo, recebeu '{}'", flag, value))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--persona" => {
                parsed.persona = Some(args.next().ok_or_else(|| anyhow!("--persona requer um valor"))?)
            }
            "--job" => parsed.job = Some(args.next().ok_or_else(|| anyhow!("--job requer um valor"))?),
            "--max-sections" => parsed.max_sections = Some(parse_number(&arg, args.next())?),
            "--min-length" => parsed.min_length = Some(parse_number(&arg, args.next())?),
            "--top-k" => parsed.top_k = Some(parse_number(&arg, args.next())?),
            "--format" => {
                let value = args.next().ok_or_else(|| anyhow!("--format requer um valor"))?;
                parsed.format = ExportFormat::from_str(&value)?;
            }
            "--output" => {
                let value = args.next().ok_or_else(|| anyhow!("--output requer um valor"))?;
                parsed.output = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => bail!("Opção desconhecida: {}", flag),
            _ => parsed.files.push(PathBuf::from(arg)),
        }
    }

    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    // Carregar .env PRIMEIRO, antes de qualquer coisa
    load_dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut raw_args = std::env::args();
    let program = raw_args.next().unwrap_or_else(|| "section-ranker-cli".into());
    let args = parse_args(raw_args)?;

    let (persona, job) = match (args.persona.clone(), args.job.clone()) {
        (Some(persona), Some(job)) if !args.files.is_empty() => (persona, job),
        _ => {
            print_usage(&program);
            std::process::exit(1);
        }
    };

    let runtime = load_runtime_config();
    if let Err(e) = install_thread_pool(&runtime) {
        log::warn!("⚠️  Pool do rayon já instalado: {}", e);
    }

    let mut config = load_pipeline_config();
    if let Some(max) = args.max_sections {
        config = config.with_max_sections(max);
    }
    if let Some(min) = args.min_length {
        config = config.with_min_section_length(min);
    }
    if let Some(top_k) = args.top_k {
        config = config.with_summary_top_k(top_k);
    }

    let mut pipeline = AnalysisPipeline::new(config);
    if let Some(path) = personas_file_from_env() {
        let personas = PersonaKeywordTable::from_file(&path)
            .with_context(|| format!("falha ao carregar personas de {}", path))?;
        pipeline = pipeline.with_personas(personas);
    }

    // Arquivos que não decodificam são pulados com aviso
    let reader = FileReader::new();
    let documents: Vec<DocumentText> = args
        .files
        .iter()
        .filter_map(|path| match reader.read_file(path) {
            Ok(content) => Some(content.into_document()),
            Err(e) => {
                log::warn!("⚠️  Ignorando {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    if documents.is_empty() {
        bail!("nenhum documento pôde ser lido");
    }

    let query = Query::new(persona, job);
    let run = pipeline.run(&documents, &query);
    log::debug!("{}", run.timings.summary());
    log::info!(
        "⏱️  Processamento: {}",
        format_processing_time(std::time::Duration::from_millis(
            u64::try_from(run.report.metadata.processing_time_ms).unwrap_or(u64::MAX)
        ))
    );

    match &args.output {
        Some(path) => export::write_report(&run.report, args.format, path)?,
        None => println!("{}", export::render(&run.report, args.format)?),
    }

    Ok(())
}
