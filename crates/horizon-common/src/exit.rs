//! Process exit codes for fatal startup failures.

use std::fmt;

/// A fatal startup failure, each mapped to a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupFailure {
    /// The windowing subsystem (event loop) could not be initialized.
    Windowing,
    /// No PNG/JPEG decoder is available.
    ImageSubsystem,
    /// The window could not be created.
    WindowCreation,
    /// The GPU surface, adapter, device, or kernels could not be created.
    Context,
}

impl StartupFailure {
    pub fn code(self) -> u8 {
        match self {
            StartupFailure::Windowing => 1,
            StartupFailure::ImageSubsystem => 2,
            StartupFailure::WindowCreation => 3,
            StartupFailure::Context => 4,
        }
    }
}

impl fmt::Display for StartupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            StartupFailure::Windowing => "windowing initialization failed",
            StartupFailure::ImageSubsystem => "image subsystem initialization failed",
            StartupFailure::WindowCreation => "window creation failed",
            StartupFailure::Context => "GPU context creation failed",
        };
        f.write_str(what)
    }
}
