//! Stderr logging for the `grid-expand` tools.
//!
//! Records are printed as `   0.012s DEBUG grid_expand::expand: message`.
//! Call [`init_with_level`] once at startup; with the `tracing` feature,
//! [`init_tracing`] installs a `tracing-subscriber` instead.

use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut out = std::io::stderr().lock();
        let _ = writeln!(
            out,
            "{elapsed:8.3}s {:<5} {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Set once this module's logger is the global `log` backend.
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Install the stderr logger with the provided level filter.
///
/// Once installed, later calls are no-ops and keep the first level. Fails if
/// a different logger already owns the global `log` slot.
pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        return Ok(());
    }
    log::set_boxed_logger(Box::new(StderrLogger {
        level,
        started: Instant::now(),
    }))?;
    log::set_max_level(level);
    *installed = true;
    Ok(())
}

#[cfg(feature = "tracing")]
fn default_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

/// Install a `tracing` fmt subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise events at `level` and above pass.
#[cfg(feature = "tracing")]
pub fn init_tracing(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::Uptime::default())
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_init_installs_once() {
        let handles: Vec<_> = [LevelFilter::Debug, LevelFilter::Debug, LevelFilter::Debug]
            .into_iter()
            .map(|level| std::thread::spawn(move || init_with_level(level)))
            .collect();
        for h in handles {
            h.join().expect("thread").expect("init");
        }
        init_with_level(LevelFilter::Trace).expect("repeat init");
        log::debug!("logger installed");
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(*INSTALLED.lock().expect("lock"));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_default_follows_level() {
        assert_eq!(default_directive(LevelFilter::Warn), "warn");
        assert_eq!(default_directive(LevelFilter::Off), "off");
    }
}
