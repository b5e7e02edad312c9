use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use transcriba_core::export::transcript_file;
use transcriba_core::pipeline::transcribe_upload_use_case::{
    is_supported_extension, TranscribeUploadUseCase,
};
use transcriba_core::shared::constants::{OPENAI_BASE_URL, WHISPER_MODEL_NAME};
use transcriba_core::transcription::domain::api_key::ApiKey;
use transcriba_core::transcription::domain::audio_upload::AudioUpload;
use transcriba_core::transcription::domain::language::Language;
use transcriba_core::transcription::domain::options::TranscriptionOptions;
use transcriba_core::transcription::infrastructure::openai_provider::{
    OpenAiProvider, ProviderConfig,
};

/// Transcribe or translate an audio file with an OpenAI-compatible speech-to-text API.
#[derive(Parser, Debug)]
#[command(name = "transcriba")]
struct Cli {
    /// Audio file (mp3, mp4, wav, m4a, webm, ogg, flac; max 25MB).
    input: PathBuf,

    /// Spoken language: auto, pt, en, es, fr, de, it, ja, ko, zh, ru, ar, hi, nl, tr.
    #[arg(long, short, default_value = "auto")]
    language: Language,

    /// Translate the audio into English instead of transcribing it.
    #[arg(long, short)]
    translate: bool,

    /// Provider API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Save the transcript as transcricao.txt in this directory.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, default_value = OPENAI_BASE_URL)]
    base_url: String,

    /// Speech-to-text model name.
    #[arg(long, default_value = WHISPER_MODEL_NAME)]
    model: String,

    /// Request timeout in seconds (waits indefinitely when omitted).
    #[arg(long)]
    timeout: Option<u64>,

    /// Directory for the temporary copy of the upload.
    #[arg(long)]
    staging_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let upload = AudioUpload::from_path(&cli.input)?;
    eprintln!("File size: {:.1}MB", upload.size_mib());

    let provider = OpenAiProvider::new(provider_config(&cli))?;
    let mut use_case = TranscribeUploadUseCase::new(Box::new(provider));
    if let Some(dir) = cli.staging_dir.clone() {
        use_case = use_case.with_staging_dir(dir);
    }

    let options = TranscriptionOptions::new(cli.language, cli.translate);
    log::info!(
        "Language: {}, translate to English: {}",
        cli.language.code(),
        cli.translate
    );
    let key = cli.api_key.as_deref().and_then(ApiKey::new);

    eprintln!("Processing audio...");
    let transcript = use_case.run(&upload, &options, key.as_ref())?;

    println!("{}", transcript.text());

    if let Some(dir) = cli.save {
        let path = transcript_file::save_to_dir(&transcript, &dir)?;
        eprintln!("Transcript saved to {}", path.display());
    }

    Ok(())
}

fn provider_config(cli: &Cli) -> ProviderConfig {
    ProviderConfig {
        base_url: cli.base_url.clone(),
        model: cli.model.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.is_file() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    let extension = cli
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !is_supported_extension(extension) {
        return Err(format!(
            "Input must be one of mp3, mp4, wav, m4a, webm, ogg, flac, got '{}'",
            cli.input.display()
        )
        .into());
    }
    if let Some(ref dir) = cli.save {
        if dir.exists() && !dir.is_dir() {
            return Err(format!("--save must be a directory, got {}", dir.display()).into());
        }
    }
    if let Some(ref dir) = cli.staging_dir {
        if !dir.is_dir() {
            return Err(format!("Staging directory not found: {}", dir.display()).into());
        }
    }
    if cli.timeout == Some(0) {
        return Err("Timeout must be at least 1 second".into());
    }
    if cli.base_url.trim().is_empty() {
        return Err("Base URL must not be empty".into());
    }
    Ok(())
}
