use is_terminal::IsTerminal;
use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Colored, one event per line, for people watching a terminal.
    Human,
    /// One JSON object per line, for journald, cron mail and friends.
    Json,
}

impl Format {
    /// Human output if stderr is a terminal, JSON otherwise.
    pub fn detect() -> Self {
        if std::io::stderr().is_terminal() {
            Format::Human
        } else {
            Format::Json
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub format: Format,
}

impl LogSettings {
    /// `verbosity` is the number of `-v` flags given.
    pub fn new(verbosity: u8, format: Format) -> Self {
        let level = match verbosity {
            0 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        };

        Self { level, format }
    }
}

/// Builds the subscriber every event of a run goes to. It is meant to be
/// installed with [`tracing::dispatcher::with_default`] around the run.
pub fn dispatch<W>(settings: &LogSettings, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_writer(writer);

    match settings.format {
        Format::Human => Dispatch::new(builder.with_ansi(true).finish()),
        Format::Json => Dispatch::new(builder.json().finish()),
    }
}
