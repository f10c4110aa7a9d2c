//! Browser console logging

use tracing_subscriber::fmt::format::Pretty;
use tracing_subscriber::prelude::*;
use tracing_web::{MakeWebConsoleWriter, performance_layer};

/// Route panics, `log` records and `tracing` events to the console
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(perf_layer);
    // `log` already has wasm_logger, so install without the log bridge
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        web_sys::console::warn_1(&format!("tracing already initialised: {e}").into());
    }
}
