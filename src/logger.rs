use chrono::Local;
use env_logger::Builder;
use log::{LevelFilter, SetLoggerError};
use std::io::Write;

/// Installs the process-wide logger. Call once, before the browser launches.
///
/// The browser driver and its websocket transport chatter at `info` for every
/// protocol message, so they are held to warnings.
pub fn init() -> Result<(), SetLoggerError> {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .filter(Some("headless_chrome"), LevelFilter::Warn)
        .filter(Some("tungstenite"), LevelFilter::Warn)
        .try_init()
}
