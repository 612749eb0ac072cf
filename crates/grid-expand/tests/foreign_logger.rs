use log::{LevelFilter, Log, Metadata, Record};

struct NullLogger;

impl Log for NullLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        false
    }

    fn log(&self, _: &Record) {}

    fn flush(&self) {}
}

static NULL: NullLogger = NullLogger;

#[test]
fn init_reports_foreign_logger_every_time() {
    log::set_logger(&NULL).expect("first logger");
    assert!(grid_expand::init_with_level(LevelFilter::Info).is_err());
    // a failed install must not be remembered as a success
    assert!(grid_expand::init_with_level(LevelFilter::Info).is_err());
}
