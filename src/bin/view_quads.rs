//! First-person quad viewer.
//!
//! ```bash
//! cargo run --release [-- <map.txt>]
//! ```
//!
//! Controls: W/S move, Q/E strafe, A/D turn, Shift run, Ctrl creep,
//! R toggles flat/textured, B toggles the wireframe overlay in flat mode,
//! M toggles the minimap, T dumps frame stats, Escape quits.

use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::{ivec2, vec2};
use quadcaster::{
    engine::{FrameSettings, Projection, RenderMode, Scene, SpanSet, render_frame},
    renderer::{Framebuffer, Software},
    sim::{InputCmd, apply_input},
    world::{Player, Texture, TextureBank, TileMap},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// ASCII map file (`#` solid, `.` floor); the built-in map if omitted
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 1024)]
    width: usize,

    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Distance at which walls fade to black, in cells
    #[arg(long, default_value_t = 20.0)]
    max_dist: f32,
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

    let mut player = Player::new(vec2(2.0, 2.0), 0.0, opts.fov);
    let proj = Projection::new(opts.width, player.fov_rad());
    let mut occ = SpanSet::new(opts.width as i32);

    let mut bank = TextureBank::default_with_checker();
    let brick = bank.insert("BRICK", Texture::bricks("BRICK", 128, 128))?;

    let mut renderer = Software::default();
    let mut win = Window::new(
        "Quadcaster",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    let mut settings = FrameSettings {
        mode: RenderMode::Flat { wireframe: false },
        max_dist: opts.max_dist,
    };
    let mut wireframe = false;
    let mut minimap = false;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = last_frame.elapsed().as_secs_f32().min(0.1);
        last_frame = Instant::now();

        /* --------------- build one InputCmd per frame --------------------- */
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

        /* toggles are edge-triggered ---------------------------------------*/
        if win.is_key_pressed(Key::R, KeyRepeat::No) {
            settings.mode = match settings.mode {
                RenderMode::Flat { .. } => RenderMode::Textured,
                RenderMode::Textured => RenderMode::Flat { wireframe },
            };
        }
        if win.is_key_pressed(Key::B, KeyRepeat::No) {
            wireframe = !wireframe;
            if let RenderMode::Flat { .. } = settings.mode {
                settings.mode = RenderMode::Flat { wireframe };
            }
        }
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            minimap = !minimap;
        }

        apply_input(&mut player, map, &cmd, dt);

        /* draw */
        renderer.begin_frame(opts.width, opts.height);
        let scene = Scene {
            map,
            player: &player,
            bank: &bank,
            walls: [brick; 4],
        };
        let stats = render_frame(&mut renderer, &scene, &proj, &mut occ, settings);
        if minimap {
            renderer.draw_map_overlay(map, &player, ivec2(8, 8), 8);
        }
        renderer.end_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h).unwrap()
        });

        if win.is_key_pressed(Key::T, KeyRepeat::No) {
            println!(
                "tiles {}  faces {}  drawn {}  spans {}",
                stats.tiles, stats.faces, stats.faces_drawn, stats.spans
            );
        }

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let fps = 1000.0 / avg_ms;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
