use clap::{Arg, Command};
use gazlin_translate::{
    AvailabilityProber, HttpTranslationClient, LanguageRegistry, MockBackend, MockMode,
    TranslateError, TranslationBackend, TranslationCache, TranslationConfig, TranslationService,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("gazlin-translate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate catalog text through the GazlinGO translation proxy")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required_unless_present("check")
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., en, fr, de)")
                .required_unless_present("check")
                .index(2),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code (default: ru)")
                .default_value("ru"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .short('u')
                .help("Translation server base URL (default: TRANSLATE_BASE_URL or http://localhost:5050)"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the in-process mock backend instead of the translation server")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .short('c')
                .help("Only check that the translation server is reachable")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let mut config = TranslationConfig::from_env()?;
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url);
    }

    let backend: Arc<dyn TranslationBackend> = if matches.get_flag("mock") {
        Arc::new(MockBackend::new(MockMode::Suffix))
    } else {
        Arc::new(HttpTranslationClient::new(&config)?)
    };

    if matches.get_flag("check") {
        let availability = AvailabilityProber::new(Arc::clone(&backend)).check().await;
        if availability.available {
            println!(
                "✅ {} is available ({} ms)",
                availability.backend,
                availability.latency.as_millis()
            );
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!(
            "❌ {} is not available: {}",
            availability.backend,
            availability.error.unwrap_or_default()
        );
        return Ok(ExitCode::FAILURE);
    }

    // Both are required unless --check was given
    let (Some(text), Some(target)) = (
        matches.get_one::<String>("text"),
        matches.get_one::<String>("target"),
    ) else {
        return Err("text and target language are required".into());
    };
    let source = matches
        .get_one::<String>("source")
        .map(|s| s.as_str())
        .unwrap_or("ru");

    let service = TranslationService::new(
        LanguageRegistry::new(config.languages.clone()),
        Arc::new(TranslationCache::new()),
        backend,
    );

    match service.translate(text, source, target).await {
        Ok(translated) => {
            println!("{}", translated);
            Ok(ExitCode::SUCCESS)
        }
        Err(TranslateError::EmptyInput) => {
            println!();
            Ok(ExitCode::SUCCESS)
        }
        Err(TranslateError::UnsupportedLanguage(code)) => {
            let supported: Vec<&str> = service
                .supported_languages()
                .iter()
                .map(|l| l.code.as_str())
                .collect();
            eprintln!(
                "❌ Unsupported target language '{}' (supported: {})",
                code,
                supported.join(", ")
            );
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("❌ {} ({})", e, e.kind());
            Ok(ExitCode::FAILURE)
        }
    }
}
