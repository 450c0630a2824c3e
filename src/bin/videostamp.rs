use clap::Parser;
use plaidvision::caption::CaptionRenderer;
use plaidvision::config::Config;
use plaidvision::frame_pipeline::main::FramePipeline;
use plaidvision::image_classifier::models::model_config::ModelConfig;
use plaidvision::image_classifier::network::Network;
use plaidvision::image_classifier::{create_classifier, Backend};
use plaidvision::library::logger::{impl_console::LoggerConsole, interface::Logger};
use plaidvision::{frame_sink, frame_source};
use std::path::PathBuf;

/// Classify every frame of a video, optionally writing a captioned copy and a JSON report.
#[derive(Parser, Debug)]
#[command(name = "videostamp")]
struct Args {
    input: PathBuf,

    /// Annotated copy of the input.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log level; a bare flag means 3.
    #[arg(short, long, num_args = 0..=1, default_missing_value = "3")]
    verbose: Option<u8>,

    /// Run the network on an OpenCL device.
    #[arg(long)]
    plaid: bool,

    #[arg(long, value_enum, default_value_t = Network::MobileNet)]
    network: Network,

    /// Number of frames to process instead of the input's length; 0 means all.
    #[arg(long)]
    frames: Option<usize>,

    /// Where to write the per-frame results.
    #[arg(long)]
    json: Option<PathBuf>,

    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config {
        models_dir: args.models_dir.clone(),
        top_n: args.top,
        verbosity: args.verbose.unwrap_or(0),
        ..Config::default()
    };

    let logger = LoggerConsole::new(config.verbosity).with_namespace("videostamp");

    let backend = if args.plaid {
        logger.info("Using the plaid backend");
        Backend::Plaid
    } else {
        Backend::Cpu
    };
    let model = ModelConfig::for_network(args.network, &config.models_dir, config.top_n);
    let classifier = create_classifier(model, backend, logger.as_ref())?;

    let mut source = frame_source::open_path(&args.input)?;
    let mut sink = args
        .output
        .as_deref()
        .map(|path| frame_sink::create_path(path, &config))
        .transpose()?;

    let mut pipeline =
        FramePipeline::new(&config, logger.as_ref(), classifier.as_ref(), source.as_mut())
            .with_frame_limit(args.frames);
    if let Some(sink) = sink.as_mut() {
        pipeline = pipeline.with_sink(sink.as_mut(), CaptionRenderer::new()?);
    }

    pipeline.run().finish(args.json.as_deref())?;

    if let Some(path) = &args.json {
        logger.info(&format!("Wrote {}", path.display()));
    }

    Ok(())
}
