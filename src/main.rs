mod config;
mod error;
mod game;
mod model;
mod random;
mod render;
mod seg_display;


use std::thread::sleep;

use anyhow::{anyhow, Context};
use clap::Parser;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::GameConfig;
use crate::game::Game;
use crate::random::{make_rng, RandomPieceSource};


const WINDOW_TITLE: &str = "Blockfall";


#[derive(Parser)]
#[command(name = "blockfall")]
#[command(about = "A falling-block puzzle game", long_about = None)]
struct Opts {
    /// Seed for the piece sequence; random if omitted
    #[arg(short, long)]
    seed: Option<u128>,

    /// Gravity ticks (and frames) per second
    #[arg(long, default_value_t = 5)]
    fps: u32,

    /// Size of one board cell in pixels; the window is resized to fit the board
    #[arg(long)]
    block_size: Option<u32>,
}


/// Builds the log filter from `RUST_LOG`-style directives, logging warnings and errors when none
/// are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}


fn set_up_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();
}


fn main() -> anyhow::Result<()> {
    set_up_logging();
    let opts = Opts::parse();

    let mut config = GameConfig::default()
        .with_frames_per_second(opts.fps);
    if let Some(block_size) = opts.block_size {
        config = config.with_block_size(block_size);
    }
    config.validate()
        .context("invalid game configuration")?;

    let source = RandomPieceSource::new(
        make_rng(opts.seed),
        config.shapes.len(),
        config.palette.len(),
    );
    let mut game = Game::new(&config, source)?;
    info!(seed = ?opts.seed, width = config.board_width, height = config.board_height, "starting game");

    let sdl_context = sdl2::init()
        .map_err(|e| anyhow!("failed to initialize SDL: {}", e))?;
    let video_subsystem = sdl_context.video()
        .map_err(|e| anyhow!("failed to initialize SDL video: {}", e))?;

    let window = video_subsystem.window(WINDOW_TITLE, config.screen_width, config.screen_height)
        .position_centered()
        .build()
        .context("failed to create window")?;

    let mut canvas = window.into_canvas().build()
        .context("failed to create canvas")?;
    let mut event_pump = sdl_context.event_pump()
        .map_err(|e| anyhow!("failed to obtain event pump: {}", e))?;

    let mut shown_score = None;
    'main_loop: loop {
        // handle events
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                    break 'main_loop;
                },
                Event::KeyDown { keycode: Some(kc), .. } => {
                    match kc {
                        Keycode::Left => game.move_piece(-1),
                        Keycode::Right => game.move_piece(1),
                        Keycode::Down => { game.drop_piece(); },
                        Keycode::Up => game.rotate_piece(),
                        _ => {},
                    }
                },
                _ => {},
            }
        }

        // gravity
        game.drop_piece();

        render::draw(&mut canvas, &config, &game)
            .map_err(|e| anyhow!("failed to draw frame: {}", e))?;

        if shown_score != Some(game.score()) {
            let title = format!("{} - score {}", WINDOW_TITLE, game.score());
            canvas.window_mut().set_title(&title)
                .context("failed to set window title")?;
            shown_score = Some(game.score());
        }

        if game.is_game_over() {
            render::draw_game_over(&mut canvas, &config, game.score())
                .map_err(|e| anyhow!("failed to draw game over banner: {}", e))?;
            canvas.present();
            sleep(config.game_over_delay);
            break 'main_loop;
        }

        canvas.present();
        sleep(config.frame_duration());
    }

    info!(score = game.score(), state = ?game.state(), "exiting");
    Ok(())
}


#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::log_filter;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_honors_given_level() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter("info").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter("blockfall=trace").max_level_hint(), Some(LevelFilter::TRACE));
    }
}
