pub mod audio_director;
pub mod best_score;
pub mod board_render;
pub mod challenge;
pub mod grid_core;
pub mod input;
pub mod session;
pub mod settings;
pub mod sfx;
pub mod theme;
