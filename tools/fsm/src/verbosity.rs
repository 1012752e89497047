use clap::Args;
use log::LevelFilter;

/// The global flags that determine how much is logged.
#[derive(Args, Debug)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Only print errors")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Print progress information")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Print the sizes and timings of every phase")]
    debug: bool,

    #[arg(short, long, global = true, help = "Print every explored state")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the log level filter for the given flags, where the quietest flag wins.
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}
