use clap::Parser;

/// Horizon: a million particles falling into a steerable black hole.
#[derive(Parser, Debug)]
#[command(name = "horizon", version, about)]
pub struct Args {
    /// Opacity mode. Parsed like a C integer; any nonzero value fades slow
    /// particles out.
    #[arg(value_name = "OPACITY", allow_negative_numbers = true)]
    pub opacity: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// The opacity override, if the positional argument was given.
    pub fn opacity_override(&self) -> Option<bool> {
        self.opacity.as_deref().map(opacity_flag)
    }
}

pub fn parse() -> Args {
    Args::parse()
}

/// Read the leading integer of `arg` the way `atoi` does and report
/// whether it is nonzero. Anything without leading digits reads as 0.
pub fn opacity_flag(arg: &str) -> bool {
    let trimmed = arg.trim_start();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .any(|c| c != '0')
}
