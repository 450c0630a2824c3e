use clap::Parser;
use plaidvision::caption::CaptionRenderer;
use plaidvision::config::Config;
use plaidvision::display::impl_gui::DisplayGui;
use plaidvision::error::Error;
use plaidvision::frame_source::interface::FrameSource;
use plaidvision::frame_source::{self, impl_image_sequence::ImageSequenceSource};
use plaidvision::image_classifier::models::model_config::ModelConfig;
use plaidvision::image_classifier::network::Network;
use plaidvision::image_classifier::{create_classifier, Backend};
use plaidvision::interactive::InteractiveSession;
use plaidvision::library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::path::PathBuf;
use std::time::Duration;

/// Live ImageNet classification of camera frames.
#[derive(Parser, Debug)]
#[command(name = "plaidvision")]
struct Args {
    #[arg(value_enum)]
    network: Network,

    /// Run the network on an OpenCL device.
    #[arg(long, conflicts_with = "no_plaid")]
    plaid: bool,

    /// Run the network on the CPU even when an OpenCL device exists.
    #[arg(long)]
    no_plaid: bool,

    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    #[arg(long, default_value_t = 0)]
    camera: i32,

    /// Delay after opening the camera before the first capture.
    #[arg(long, default_value_t = 100)]
    warmup_ms: u64,

    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Loop over a GIF or still image instead of the camera.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(short, long, default_value_t = 0)]
    verbose: u8,
}

fn open_source(args: &Args, config: &Config, logger: &dyn Logger) -> Result<Box<dyn FrameSource>, Error> {
    if let Some(path) = &args.input {
        if !frame_source::is_image_path(path) {
            return Err(Error::Config(format!(
                "{} is not a GIF or still image",
                path.display()
            )));
        }
        return Ok(Box::new(ImageSequenceSource::new(path)));
    }

    #[cfg(feature = "opencv")]
    {
        use plaidvision::frame_source::impl_opencv_camera::{
            OpencvCameraConfig, OpencvCameraSource,
        };
        let camera = OpencvCameraConfig {
            index: config.camera_index,
            size: config.camera_size,
            warmup: config.camera_warmup,
        };
        Ok(Box::new(OpencvCameraSource::new(camera, logger)))
    }
    #[cfg(not(feature = "opencv"))]
    {
        let _ = (config, logger);
        Err(Error::Source(
            "camera capture needs the `opencv` feature; pass --input to use a file".to_string(),
        ))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config {
        models_dir: args.models_dir.clone(),
        camera_index: args.camera,
        camera_warmup: Duration::from_millis(args.warmup_ms),
        top_n: args.top,
        verbosity: args.verbose,
        ..Config::default()
    };

    let logger = LoggerConsole::new(config.verbosity).with_namespace("plaidvision");

    let backend = Backend::select(args.plaid, args.no_plaid);
    let model = ModelConfig::for_network(args.network, &config.models_dir, config.top_n);
    let classifier = create_classifier(model, backend, logger.as_ref())?;

    let source = open_source(&args, &config, logger.as_ref())?;
    let session = InteractiveSession::new(
        config.clone(),
        logger.as_ref(),
        classifier,
        source,
        CaptionRenderer::new()?,
    );

    DisplayGui::new(&config).run(session)?;

    Ok(())
}
