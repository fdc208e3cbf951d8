//! Logger installation
//!
//! `log` records go to the browser console through `wasm_logger` and to
//! stderr through `env_logger` on the host, so the same `log::info!` calls
//! work in the page and in tests.

use log::LevelFilter;

/// Install the logger for this target. Safe to call more than once; later
/// calls only adjust the level.
pub fn install(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        static INSTALLED: std::sync::Once = std::sync::Once::new();
        INSTALLED.call_once(|| {
            // `Off` has no `Level`; the max level below silences everything
            let console_level = level.to_level().unwrap_or(log::Level::Error);
            wasm_logger::init(wasm_logger::Config::new(console_level));
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        // fails when the host (or an earlier call) already installed one
        let _ = env_logger::builder().filter_level(level).try_init();
    }
    log::set_max_level(level);
}

/// Parse a level name coming from JS ("error", "warn", "info", "debug", "trace", "off").
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
}
