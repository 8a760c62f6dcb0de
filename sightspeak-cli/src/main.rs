use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use sightspeak_core::audio::playback::AudioPlayer;
use sightspeak_core::speech::{GoogleSynthesizer, Speaker, SpeechSynthesizer};
use sightspeak_core::vision::{GeminiAnalyzer, GeminiClient, ImageAnalyzer, VertexQaClient, VisionQaAnalyzer};
use sightspeak_core::GoogleConfig;

#[derive(Parser, Debug)]
#[command(name = "sightspeak")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask a question about an image and hear the answer")]
struct Args {
    /// Image to analyze
    #[arg(long, default_value = "car.jpg")]
    image: PathBuf,

    /// Question to ask about the image
    #[arg(long, default_value = "What is the plate number of this car?")]
    question: String,

    /// Language for the spoken answer
    #[arg(long, default_value = "English")]
    language: String,

    /// Voice persona for the spoken answer
    #[arg(long, default_value = "Maria")]
    persona: String,

    /// Analysis strategy
    #[arg(long, value_enum, default_value_t = Strategy::Gemini)]
    strategy: Strategy,

    /// Write the audio file but skip local playback
    #[arg(long)]
    no_play: bool,

    /// List the voices offered by the synthesis service and exit
    #[arg(long)]
    list_voices: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Strategy {
    /// One call: image and prompt go to the generative model together
    Gemini,
    /// Two calls: visual question answering, then a rewrite pass
    Vision,
    /// Schema-constrained vehicle description, printed as JSON (no speech)
    Json,
}

fn main() -> Result<()> {
    setup_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();
    let config = GoogleConfig::from_env()?;

    if args.list_voices {
        let synthesizer = GoogleSynthesizer::new(&config);
        for voice in synthesizer.list_voices().await? {
            println!(
                "{}\t{}\t{}",
                voice.name,
                voice.language_codes.join(","),
                voice.ssml_gender
            );
        }
        return Ok(());
    }

    info!(
        strategy = ?args.strategy,
        image = %args.image.display(),
        language = %args.language,
        "Analyzing image"
    );

    let gemini = Arc::new(GeminiClient::new(config.clone()));

    let answer = match args.strategy {
        Strategy::Json => {
            let analyzer = GeminiAnalyzer::new(&args.image, gemini);
            let report = analyzer.describe_vehicle().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        Strategy::Gemini => {
            let analyzer = GeminiAnalyzer::new(&args.image, gemini);
            analyzer.analyze(&args.question, &args.language).await?
        }
        Strategy::Vision => {
            let qa = Arc::new(VertexQaClient::new(config.clone()));
            let analyzer = VisionQaAnalyzer::new(&args.image, qa, gemini);
            analyzer.analyze(&args.question, &args.language).await?
        }
    };

    println!("{answer}");

    let synthesizer = Arc::new(GoogleSynthesizer::new(&config));
    let player = if args.no_play {
        None
    } else {
        Some(AudioPlayer::new()?)
    };

    let speaker = Speaker::new(synthesizer, player);
    speaker.talk(&answer, &args.language, &args.persona).await?;

    Ok(())
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
