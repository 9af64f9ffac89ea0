// src/logging.rs
//! `log` クレートのマクロ (info! / warn! / error! ...) をブラウザのコンソールに流すロガー。

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// コンソールに出す1行を作る。
fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, target, message)
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        write_line(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    use web_sys::console;
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

// ネイティブ (テスト) では標準エラーに出すだけ
#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// ロガーを登録する。2回目以降は何もしない。
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_line_has_level_and_target() {
        let line = format_record(Level::Warn, "mtg_combos::engine", "stale fetch");
        assert_eq!(line, "[WARN] mtg_combos::engine: stale fetch");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(LevelFilter::Debug);
        init(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
