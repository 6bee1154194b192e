// Library surface for headless/integration tests and reuse.
// The binary in main.rs only parses flags and owns the real terminal.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod dictionary;
pub mod display;
pub mod error;
pub mod feedback;
pub mod hints;
pub mod input;
pub mod logging;
pub mod results;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;
pub mod word;

pub use app::App;
pub use dictionary::Dictionary;
pub use session::{Difficulty, GameSession, Status};
pub use word::Word;
