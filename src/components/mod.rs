pub mod app;
pub mod camera_controls;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod hud;
pub mod leaderboard_panel;
pub mod map_view;
pub mod results_panel;

pub use app::App;
