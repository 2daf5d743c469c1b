//! Default logging setup for the array table binaries
#![warn(missing_docs)]

use std::{sync::Mutex, time::Instant};

/// Environment variable holding the `env_logger` filter, defaults to `info`.
pub const FILTER_ENV: &str = "ARRAYTABLE_LOG";
/// Environment variable selecting when to emit ANSI styles (`auto`, `always` or `never`).
pub const STYLE_ENV: &str = "ARRAYTABLE_LOG_STYLE";

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Perform the default logging setup used by the array table binaries.
///
/// Each record is prefixed with the time elapsed since this call. The target is printed on a
/// line of its own whenever it differs from that of the previous record.
pub fn setup() {
    builder().init();
}

/// Like [`setup`], but returns an error instead of panicking if a logger is already installed.
pub fn try_setup() -> Result<(), log::SetLoggerError> {
    builder().try_init()
}

fn builder() -> env_logger::Builder {
    let start_time = Instant::now();
    let last_target = Mutex::new(String::new());

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or(FILTER_ENV, "info")
            .write_style(STYLE_ENV),
    );
    builder.format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        let level = record.level();
        let target = record.target();

        {
            let mut last_target = last_target.lock().unwrap_or_else(|err| err.into_inner());
            if target != *last_target {
                last_target.clear();
                last_target.push_str(target);

                writeln!(
                    buf,
                    "{} {}",
                    format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                    format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
                )?;
            }
        }
        writeln!(
            buf,
            "{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{level:5}{style:#}",
                style = buf.default_level_style(level),
            ),
            record.args(),
        )
    });
    builder
}
