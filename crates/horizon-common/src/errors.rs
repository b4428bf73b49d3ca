use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("image subsystem unavailable: {0}")]
    ImageSubsystem(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HorizonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("renderer error: {0}")]
    Renderer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("camera.near must be > 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: camera.near must be > 0"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::Window("no display".into());
        assert_eq!(err.to_string(), "window error: no display");

        let err = PlatformError::ImageSubsystem("png decoder missing".into());
        assert_eq!(
            err.to_string(),
            "image subsystem unavailable: png decoder missing"
        );
    }

    #[test]
    fn horizon_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: HorizonError = config_err.into();
        assert!(matches!(err, HorizonError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn horizon_error_from_platform() {
        let err: HorizonError = PlatformError::EventLoop("no display".into()).into();
        assert!(matches!(err, HorizonError::Platform(_)));
        assert_eq!(err.to_string(), "event loop error: no display");
    }

    #[test]
    fn horizon_error_renderer_display() {
        let err = HorizonError::Renderer("adapter lost".into());
        assert_eq!(err.to_string(), "renderer error: adapter lost");
    }
}
