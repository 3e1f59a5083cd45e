#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Metro Dash experience.

mod config;
mod driver;

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use metro_dash_rendering::{
    palette, FrameInput, Presentation, RenderingBackend, VirtualJoystick, WindowSize,
};
use metro_dash_rendering_macroquad::MacroquadBackend;
use metro_dash_world::{query, World};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use self::driver::FrameDriver;

/// Top-down city runner: find the red building while dodging pedestrians.
#[derive(Debug, Parser)]
#[command(name = "metro-dash", version, about)]
struct CliArgs {
    /// Seed for city and pedestrian generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding tuning values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Initial window width in pixels.
    #[arg(long, default_value_t = 1_280)]
    width: u32,
    /// Initial window height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,
    /// Log frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Run the simulation without opening a window.
    #[arg(long)]
    headless: bool,
    /// Number of ticks simulated in headless mode.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
}

/// Entry point for the Metro Dash command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(io::stdout().is_terminal()))
        .with(EnvFilter::from_default_env().add_directive("metro_dash=info".parse()?))
        .init();

    let args = CliArgs::parse();
    let tuning = config::load_tuning(args.config.as_deref()).context("failed to load tuning")?;
    let window = WindowSize::new(args.width as f32, args.height as f32)
        .context("invalid window dimensions")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let world = World::new(window.viewport(), tuning, seed);
    info!("{}", query::welcome_banner(&world));

    if args.headless {
        run_headless(world, args.ticks);
        return Ok(());
    }

    let joystick = VirtualJoystick::new(&query::tuning(&world).joystick);
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .with_window_size(window.width() as i32, window.height() as i32)
        .with_joystick(joystick);

    let mut driver = FrameDriver::with_presentation(world);
    let presentation = Presentation::new("Metro Dash", palette::GROUND, driver.scene());
    backend
        .run(presentation, move |input, scene| driver.frame(input, scene))
        .context("render loop failed")
}

fn run_headless(world: World, ticks: u64) {
    let viewport = query::viewport(&world);
    let mut driver = FrameDriver::new(world, ());
    for _ in 0..ticks {
        let _ = driver.advance(FrameInput::idle(viewport));
    }

    let world = driver.world();
    let player = query::player(world);
    info!(
        ticks = query::tick_index(world),
        health = query::health(world).get(),
        mission_completed = query::mission(world).completed,
        player_x = player.position.x,
        player_y = player.position.y,
        "headless session finished"
    );
}
