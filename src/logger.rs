#[cfg(not(target_arch = "wasm32"))]
use std::{collections::HashMap, time::Instant};

#[cfg(target_arch = "wasm32")]
use web_sys::console;

/// Leveled logging. Native builds write to stderr, since stdout belongs to
/// the game manager.
#[derive(Clone)]
pub struct Logger {
    /// 10 is everything and 0 is nothing
    level: u8,

    #[cfg(not(target_arch = "wasm32"))]
    start_times: HashMap<String, Instant>,
}

impl Logger {
    pub fn new(level: u8) -> Self {
        Logger {
            level,
            #[cfg(not(target_arch = "wasm32"))]
            start_times: HashMap::new(),
        }
    }

    pub fn enabled(&self, level: u8) -> bool { level <= self.level }

    pub fn log(&self, level: u8, msg: &str) {
        if self.enabled(level) {
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", msg);

            #[cfg(target_arch = "wasm32")]
            console::log_1(&msg.into());
        }
    }

    pub fn log_lazy(&self, level: u8, msg: impl FnOnce() -> String) {
        if self.enabled(level) {
            self.log(level, &msg());
        }
    }

    pub fn time_start(&mut self, _level: u8, name: &str) {
        #[cfg(not(target_arch = "wasm32"))]
        self.start_times.insert(name.to_string(), Instant::now());

        #[cfg(target_arch = "wasm32")]
        if _level <= self.level {
            console::time_with_label(name);
        }
    }

    pub fn time_end(&mut self, level: u8, name: &str) {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(start) = self.start_times.remove(name) {
            let elapsed = start.elapsed();
            self.log(
                level,
                &format!("{}: {}.{:03}s", name, elapsed.as_secs(), elapsed.subsec_millis()),
            );
        } else {
            panic!("time_end called for non-existing timing string {:?}", name)
        }

        #[cfg(target_arch = "wasm32")]
        if level <= self.level {
            console::time_end_with_label(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let logger = Logger::new(3);
        assert!(logger.enabled(0));
        assert!(logger.enabled(3));
        assert!(!logger.enabled(4));
    }

    #[test]
    fn test_lazy_message_not_built_when_disabled() {
        let logger = Logger::new(0);
        logger.log_lazy(5, || panic!("message should not be built"));
    }

    #[test]
    fn test_timing_pairs() {
        let mut logger = Logger::new(0);
        logger.time_start(2, "search");
        logger.time_end(2, "search");
    }

    #[test]
    #[should_panic]
    fn test_unmatched_time_end() {
        let mut logger = Logger::new(0);
        logger.time_end(2, "never started");
    }
}
