/// Tuning knobs for the eviction scheduler: a small plain struct with a
/// sane `Default`, not a config-file format, since the scheduler has
/// nothing else worth externalizing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SchedulerConfig {
    pub tick_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            tick_interval_secs: 60,
        }
    }
}

/// 59 minutes, in milliseconds.
pub const VERIFICATION_WINDOW_MILLIS: i64 = 3_540_000;

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_default_scheduler_config_is_one_minute() {
        assert_eq!(SchedulerConfig::default().tick_interval_secs, 60);
    }
}
