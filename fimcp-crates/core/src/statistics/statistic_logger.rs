use std::fmt::Display;

use super::statistic_logging::log_statistic;

/// Logs statistics under a name prefix, e.g. the statistics of a [`State`](crate::State) are
/// logged as `state_<field>`.
#[derive(Debug, Default, Clone)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new(name_prefix: impl Display) -> Self {
        Self {
            name_prefix: name_prefix.to_string(),
        }
    }

    /// A logger whose prefix is extended with `addition_to_prefix`.
    pub fn attach_to_prefix(&self, addition_to_prefix: impl Display) -> Self {
        let name_prefix = if self.name_prefix.is_empty() {
            addition_to_prefix.to_string()
        } else {
            format!("{}_{addition_to_prefix}", self.name_prefix)
        };

        Self { name_prefix }
    }

    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }
}

impl std::fmt::Write for StatisticLogger {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        log_statistic(&self.name_prefix, s);
        Ok(())
    }
}
