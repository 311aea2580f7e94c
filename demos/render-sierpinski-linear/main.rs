#[path = "../common/mod.rs"]
mod common;

/// ```sh
/// cargo run --release --example render-sierpinski-linear
/// ```
pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::render_demo_from_string("render-sierpinski-linear")
}
