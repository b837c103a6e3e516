/// Construction parameters for an [`Interpreter`](super::Interpreter).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MachineConfig {
    /// Name used to tell machines apart in log lines.
    pub name: String,
    /// Zero cells appended after the program words.
    pub extra_memory: usize,
    /// Maximum number of instructions to execute; `None` runs unbounded.
    pub step_limit: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "intcode".to_string(),
            extra_memory: 0,
            step_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_extra_memory(mut self, extra_memory: usize) -> Self {
        self.extra_memory = extra_memory;
        self
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MachineConfig::default();
        assert_eq!(config.name, "intcode");
        assert_eq!(config.extra_memory, 0);
        assert_eq!(config.step_limit, None);
    }

    #[test]
    fn builder_sets_fields() {
        let config = MachineConfig::default()
            .with_name("amp-a")
            .with_extra_memory(1024)
            .with_step_limit(10_000);
        assert_eq!(config.name, "amp-a");
        assert_eq!(config.extra_memory, 1024);
        assert_eq!(config.step_limit, Some(10_000));
    }
}
