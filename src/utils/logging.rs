use std::str::FromStr;
use tracing::Level;

pub enum LogFormat {
    // one json object per line, for the http service
    Json,
    // plain text on stderr so it does not interleave with the interactive menu
    Text,
}

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub fn setup_tracing(format: LogFormat, level: &str) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        // disable printing the name of the module in every log line.
        .with_target(false);
    match format {
        LogFormat::Json => {
            builder
                .with_ansi(false)
                .json()
                .init();
        }
        LogFormat::Text => {
            builder
                .with_writer(std::io::stderr)
                .without_time()
                .init();
        }
    }
}
