use leptos::prelude::*;
use stockdesk_frontend::App;

// lol_alloc keeps the wasm binary small
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    let config = stockdesk_frontend::config();
    if let Some(level) = config.log_level.to_level() {
        let _ = console_log::init_with_level(level);
    }
    mount_to_body(App);
}
