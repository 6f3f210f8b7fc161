use crate::bootstrap::{Game, bootstrap};
use crate::config;
use crate::error::{BootstrapError, Stage};
use crate::platform::WinitPlatform;

/// Process entry: logging, configuration, then the bootstrap sequence on the
/// winit platform.
pub async fn run<G>(game: G) -> Result<(), BootstrapError>
where
    G: Game<WinitPlatform> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    let config = {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        // Only initialize logger if it hasn't been initialized yet
        let _ = console_log::init_with_level(log::Level::Info);

        config::CleanConfig::default()
    };

    #[cfg(not(target_arch = "wasm32"))]
    let config = {
        use clap::Parser;

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        config::RawConfig::parse().clean()
    };

    log::debug!("{:?}", config);

    // The event loop has to exist before any window can
    let platform = WinitPlatform::new(&config)
        .map_err(|e| BootstrapError::new(Stage::DisplayInit, e))?;

    bootstrap(platform, &config, game).await
}
