mod app_core;
mod app_router;
mod boot;
mod input;
mod yew_app;

use crate::app_core::AppCore;
use crate::boot::BootPhase;

fn main() {
    console_error_panic_hook::set_once();
    boot::enter(BootPhase::Config);
    let config = app_router::load_init_config();
    boot::enter(BootPhase::Mount);
    if yew_app::run(AppCore::shared(), config) {
        boot::ready();
    }
}
