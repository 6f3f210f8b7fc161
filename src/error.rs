use std::error::Error;
use std::fmt;

/// Result type shared by the platform services and the game callbacks.
pub type HostResult<T> = Result<T, Box<dyn Error>>;

/// Bootstrap step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DisplayInit,
    AudioInit,
    AppInit,
    SchedulerRegister,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::DisplayInit => "display init",
            Stage::AudioInit => "audio init",
            Stage::AppInit => "app init",
            Stage::SchedulerRegister => "scheduler register",
        };
        f.write_str(name)
    }
}

/// Fatal startup error. Never recovered, only reported at the process boundary.
#[derive(Debug)]
pub struct BootstrapError {
    pub stage: Stage,
    source: Box<dyn Error>,
}

impl BootstrapError {
    pub fn new(stage: Stage, source: Box<dyn Error>) -> Self {
        Self { stage, source }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bootstrap failed during {}: {}", self.stage, self.source)
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}
