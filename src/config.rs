use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub output_mode: OutputMode,
    pub verbose: bool,
    /// Print the request instead of sending it.
    pub dry_run: bool,
    /// Gateway address from `--ip` or `DALION_IP`; prompted for when absent.
    pub gateway: Option<String>,
    pub timeout: Duration,
}
