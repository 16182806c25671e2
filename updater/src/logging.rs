use std::{ fmt, path::Path };

use log::Level;
use log4rs::{
    self,
    append::{ console::{ConsoleAppender, Target}, rolling_file::{ policy::compound::{ roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy, }, RollingFileAppender, }, },
    config::{Appender, Root},
    encode::{ json::JsonEncoder, pattern::PatternEncoder, Encode },
};

use crate::config::logging::{ Format, Logging };

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l}):5} {t} - {m}{n}";

/// Installs the process wide backend. Components never touch it directly,
/// they log through the [`Scope`] they were built with.
pub fn init(cnf: &Logging) -> Result<log4rs::Handle> {
    let handle = log4rs::init_config(generate_config(cnf)?)?;
    log_panics::init();
    Ok(handle)
}

fn encoder(format: Format) -> Box<dyn Encode> {
    match format {
        Format::Pattern => Box::new(PatternEncoder::new(PATTERN)),
        Format::Json => Box::new(JsonEncoder::new()),
    }
}

fn generate_config(cnf: &Logging) -> Result<log4rs::Config> {
    let size = cnf.size.checked_mul(1024 * 1024).unwrap_or(u64::MAX);

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(encoder(cnf.format))
        .build();

    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build("console_appender", Box::new(console_appender)));
    let mut root = Root::builder().appender("console_appender");

    if !cnf.path.is_empty() {
        let path = Path::new(&cnf.path);
        let file = path.join("updater.log");
        let roll = path.join("updater.{}.log");

        let rolling_file_appender = RollingFileAppender::builder()
            .encoder(encoder(cnf.format))
            .build(
                &file,
                Box::new(CompoundPolicy::new(
                    Box::new(SizeTrigger::new(size)),
                    Box::new(
                        FixedWindowRoller::builder().build(&roll.to_string_lossy(), cnf.count)?,
                    ),
                )),
            )?;

        builder = builder.appender(Appender::builder().build("rolling_file_appender", Box::new(rolling_file_appender)));
        root = root.appender("rolling_file_appender");
    }

    Ok(builder.build(root.build(cnf.level))?)
}

/// Log target plus `key=value` context that is appended to every message.
///
/// Each adapter gets its own scope at construction and narrows it per call
/// with [`Scope::with`], e.g. `scope.with("method", "list_timezones")`.
#[derive(Debug, Clone)]
pub struct Scope {
    target: &'static str,
    fields: Vec<(&'static str, String)>,
}

impl Scope {
    pub fn new(target: &'static str) -> Self {
        Scope { target, fields: Vec::new() }
    }

    pub fn with(&self, key: &'static str, value: impl fmt::Display) -> Self {
        let mut fields = self.fields.clone();
        fields.push((key, value.to_string()));
        Scope { target: self.target, fields }
    }

    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        log::log!(target: self.target, level, "{msg}{}", Fields(&self.fields));
    }

    pub fn error(&self, msg: impl fmt::Display) { self.log(Level::Error, msg) }
    pub fn warn(&self, msg: impl fmt::Display) { self.log(Level::Warn, msg) }
    pub fn info(&self, msg: impl fmt::Display) { self.log(Level::Info, msg) }
    pub fn debug(&self, msg: impl fmt::Display) { self.log(Level::Debug, msg) }
}

struct Fields<'a>(&'a [(&'static str, String)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.0 {
            if v.is_empty() || v.contains(char::is_whitespace) { write!(f, " {k}={v:?}")?; }
            else { write!(f, " {k}={v}")?; }
        }
        Ok(())
    }
}
