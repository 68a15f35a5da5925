//! cadenza - melody game demo
//!
//! Plays one level of the game through the default audio device: first
//! the target melody, then a graded attempt behind a two-beat countoff.
//!
//! Run with: cargo run [level-set] [level-number]

mod app;

use color_eyre::eyre::{eyre, Result};

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let set_name = args.get(1).map(String::as_str).unwrap_or("tutorial");
    let level_index: usize = match args.get(2) {
        Some(raw) => raw
            .parse()
            .map_err(|_| eyre!("level number must be an integer, got {:?}", raw))?,
        None => 0,
    };

    app::run(set_name, level_index)
}
