//! Writes statistics as `{prefix} {name}={value}` lines to a globally configured writer.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

/// How and where statistics are written.
pub struct StatisticOptions {
    /// Printed before every statistic.
    pub prefix: &'static str,
    /// A closing line which is printed after a block of statistics.
    pub postfix: Option<&'static str>,
    /// The casing applied to the name of a statistic.
    pub casing: Option<Case>,
    pub writer: Box<dyn Write + Send + Sync>,
}

impl Default for StatisticOptions {
    fn default() -> Self {
        StatisticOptions {
            prefix: "%%",
            postfix: None,
            casing: None,
            writer: Box::new(stdout()),
        }
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("postfix", &self.postfix)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Configures the logging of the statistics. Only the first configuration takes effect.
pub fn configure_statistic_logging(options: StatisticOptions) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| RwLock::new(options));
}

/// Returns whether statistics are written, i.e. whether [`configure_statistic_logging`] has been
/// called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}

/// Logs the statistic `name` with `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.write() else {
        return;
    };

    let line = format_statistic(options.prefix, options.casing, name, value);
    let _ = writeln!(options.writer, "{line}");
}

/// Logs the closing line of a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.write() else {
        return;
    };

    if let Some(postfix) = options.postfix {
        let _ = writeln!(options.writer, "{postfix}");
    }
}

fn format_statistic(
    prefix: &str,
    casing: Option<Case>,
    name: impl Display,
    value: impl Display,
) -> String {
    let name = match casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };

    format!("{prefix} {name}={value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_are_formatted_with_prefix() {
        assert_eq!(
            format_statistic("%%", None, "state_num_rewrites", 3),
            "%% state_num_rewrites=3"
        );
    }

    #[test]
    fn casing_is_applied_to_the_name() {
        assert_eq!(
            format_statistic("c", Some(Case::Camel), "state_num_rewrites", 3),
            "c stateNumRewrites=3"
        );
    }
}
