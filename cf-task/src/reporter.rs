use cf_common::log_report;

/// Operator facing progress lines, collected in order. Statement text is
/// only kept in verbose mode.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    pub enabled: bool,
    pub verbose: bool,
    pub lines: Vec<String>,
}

impl Reporter {
    pub fn new(enabled: bool, verbose: bool) -> Self {
        Self {
            enabled,
            verbose,
            lines: Vec::new(),
        }
    }

    pub fn report(&mut self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        log_report!("{}", message);
        self.lines.push(message);
    }

    pub fn report_sql(&mut self, sql: &str) {
        if self.verbose {
            self.report(sql);
        }
    }
}
