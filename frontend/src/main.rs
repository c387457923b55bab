//! Entry point for the WASM application

fn main() {
    rasar_frontend::run();
}
