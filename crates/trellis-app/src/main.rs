//! Web entry point for the trellis canvas UI.

fn main() {
    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    tracing_wasm::set_as_global_default();
    #[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
    tracing_subscriber::fmt().init();

    dioxus::launch(trellis_app::App);
}
