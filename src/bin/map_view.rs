//! Top-down visibility inspector.
//!
//! Shows the whole map with the classifier's verdicts painted live: tiles
//! inside the view cone, exposed faces, and the cone itself. Same movement
//! keys as the first-person viewer.

use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use std::path::PathBuf;
use std::time::Instant;

use glam::{ivec2, vec2};
use quadcaster::{
    renderer::{Framebuffer, Software},
    sim::{InputCmd, apply_input},
    world::{Player, TileMap},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// ASCII map file (`#` solid, `.` floor); the built-in map if omitted
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 768)]
    width: usize,

    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let owned_map;
    let map: &TileMap = match &opts.map {
        Some(path) => {
            owned_map = TileMap::from_file(path)?;
            &owned_map
        }
        None => TileMap::demo(),
    };

    // fit the grid into the window with a small margin
    let tile_px = ((opts.width.min(opts.height) as i32 - 16)
        / map.width().max(map.height()))
    .max(2);
    let origin = ivec2(
        (opts.width as i32 - map.width() * tile_px) / 2,
        (opts.height as i32 - map.height() * tile_px) / 2,
    );

    let mut player = Player::new(vec2(2.0, 2.0), 0.0, opts.fov);
    let mut renderer = Software::default();
    let mut win = Window::new(
        "Quadcaster map view",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    let mut last_frame = Instant::now();
    while win.is_open() && !win.is_key_down(Key::Escape) {
        let dt = last_frame.elapsed().as_secs_f32().min(0.1);
        last_frame = Instant::now();

        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::Q) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::E) {
            cmd.strafe += 1.0;
        }
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            cmd.turn += 1.0;
        }
        cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        cmd.creep = win.is_key_down(Key::LeftCtrl) || win.is_key_down(Key::RightCtrl);

        apply_input(&mut player, map, &cmd, dt);

        renderer.begin_frame(opts.width, opts.height);
        renderer.draw_map_overlay(map, &player, origin, tile_px);
        renderer.end_frame(|fb, w, h| win.update_with_buffer(fb, w, h).unwrap());
    }
    Ok(())
}
