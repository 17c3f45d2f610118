use anyhow::Result;
use signcoach::integration::{CoachConfig, SessionCoordinator, SourceFactory};
use signcoach::ui::CoachApp;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "camera-io")]
fn source_factory(camera_index: u32) -> SourceFactory {
    use signcoach::capture::{CameraInput, FrameSource};
    Box::new(move || {
        CameraInput::new(camera_index).map(|camera| Box::new(camera) as Box<dyn FrameSource>)
    })
}

#[cfg(not(feature = "camera-io"))]
fn source_factory(_camera_index: u32) -> SourceFactory {
    use signcoach::CoachError;
    Box::new(|| {
        Err(CoachError::CameraError(
            "Built without the camera-io feature".to_string(),
        ))
    })
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signcoach=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SignCoach");

    let config = CoachConfig::from_env();
    config.validate().map_err(anyhow::Error::msg)?;
    info!("Classification service: {}", config.classify.base_url);

    let camera_index = config.capture.camera_index;
    // The landmark detector is an integration point; no backend is wired by
    // default, so the frame loop runs preview-only until one is provided.
    let coordinator = SessionCoordinator::new(config, source_factory(camera_index), None);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title("SignCoach"),
        ..Default::default()
    };

    eframe::run_native(
        "SignCoach",
        options,
        Box::new(|cc| Ok(Box::new(CoachApp::new(cc, coordinator)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))
}
