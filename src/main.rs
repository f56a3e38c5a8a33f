use std::io;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use surfacevolume::configuration::Configuration;
use surfacevolume::math::surface::paraboloid::Paraboloid;
use surfacevolume::report::comparisonreport::ComparisonReport;
use surfacevolume::report::surfacerenderer::LoggingRenderer;

const LOG_ENV: &str = "SURFACEVOLUME_LOG";

fn log_level() -> Level {
    let level = std::env::var(LOG_ENV).unwrap_or_default();
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {}", error);
    }

    let surface = Paraboloid::new();
    let renderer = LoggingRenderer::new();
    let report = ComparisonReport::new(Configuration::default(), &surface, &renderer);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match report.run(&mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
