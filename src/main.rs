use anyhow::Context;
use engine::Position;
use tracing_subscriber::EnvFilter;

mod game;
mod ui;

fn main() -> anyhow::Result<()> {
    // logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let game = if args.is_empty() {
        game::Game::new()
    } else {
        let fen = args.join(" ");
        let position = Position::from_fen(&fen).with_context(|| format!("invalid starting position {fen:?}"))?;
        game::Game::from_position(position)
    };
    ui::ui(game)?;
    Ok(())
}
