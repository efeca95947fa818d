use yew::prelude::*;
use log::info;

mod config;
mod estimator;
mod interaction;
mod state;
mod timers;
mod tooltip;
mod components {
    pub mod calculator;
    pub mod info_modal;
}

use components::calculator::Calculator;

#[function_component]
fn App() -> Html {
    html! {
        <Calculator />
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(config::log_level()).is_err() {
        gloo_console::warn!("error initializing log");
    }

    info!("Starting estate planning calculator");
    yew::Renderer::<App>::new().render();
}
