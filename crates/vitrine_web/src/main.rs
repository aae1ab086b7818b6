// Binary the site bundler loads: `wasm_start` boots the page glue as soon as
// the module is instantiated. Host builds get an empty `main`.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    vitrine_web::start();
}
