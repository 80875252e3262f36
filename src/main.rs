mod canvas;
mod components;
mod data;
mod error;
mod leaderboard;
mod model;
mod state;
mod util;
mod viewport;

use components::App;
use util::ConsoleLogger;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    ConsoleLogger::install();
    log::info!("starting depth-guesser");
    yew::Renderer::<App>::new().render();
}
