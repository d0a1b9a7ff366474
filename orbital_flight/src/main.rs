//! Orbital Flight - pilot a spacecraft around a star and planet
//!
//! Controls:
//! - W/A/S/D: Thrust up/left/down/right while held
//! - F: Toggle camera follow
//! - Space: Toggle time warp between normal and fast
//! - . / ,: Double / halve time warp
//! - I: Switch integrator (RK4 / Euler)
//! - P: Pause/resume
//! - Scroll: Zoom at cursor
//! - Escape: Quit

mod renderer;

use std::time::Instant;

use anyhow::Result;
use common::{Camera2D, GraphicsContext, ZOOM_STEP};
use glam::{DVec2, Vec2};
use orbital_flight::{SimConfig, Simulation};
use renderer::Renderer;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const WINDOW_TITLE: &str = "Orbital Flight";
const HUD_INTERVAL_SECS: f32 = 0.25;
const STATUS_INTERVAL_SECS: f32 = 2.0;

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    simulation: Simulation,
    camera: Camera2D,
    cursor: Vec2,
    paused: bool,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let simulation = Simulation::with_default_system(SimConfig::default());

        let mut camera = Camera2D::new(ctx.viewport());
        camera.follow(simulation.ship.position);

        let max_discs = simulation.bodies.len() + 1;
        let renderer = Renderer::new(&ctx, &camera, max_discs, simulation.config().trail_capacity);

        Self {
            ctx,
            renderer,
            simulation,
            camera,
            cursor: Vec2::ZERO,
            paused: false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_viewport(self.ctx.viewport());
    }

    fn update(&mut self) {
        if !self.paused {
            self.simulation.frame();
        }

        if self.camera.following {
            self.camera.follow(self.simulation.ship.position);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let render_data = self.renderer.update(&self.ctx.queue, &self.camera, &self.simulation);

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        self.renderer.render(&mut encoder, &view, &render_data);

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn thrust(&mut self, direction: DVec2, pressed: bool) {
        let ship = &mut self.simulation.ship;
        if pressed {
            ship.set_thrust_direction(direction);
        }
        ship.apply_thrust(pressed);
    }

    /// Returns false when the app should quit
    fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> bool {
        match key {
            // Screen y grows downward, so "up" is -y
            KeyCode::KeyW => self.thrust(DVec2::new(0.0, -1.0), pressed),
            KeyCode::KeyS => self.thrust(DVec2::new(0.0, 1.0), pressed),
            KeyCode::KeyA => self.thrust(DVec2::new(-1.0, 0.0), pressed),
            KeyCode::KeyD => self.thrust(DVec2::new(1.0, 0.0), pressed),

            _ if pressed && !repeat => match key {
                KeyCode::Escape => return false,
                KeyCode::KeyF => {
                    self.camera.toggle_following();
                    log::info!("Camera follow: {}", self.camera.following);
                }
                KeyCode::Space => self.simulation.warp.toggle(),
                KeyCode::Period => self.simulation.warp.speed_up(),
                KeyCode::Comma => self.simulation.warp.slow_down(),
                KeyCode::KeyI => self.simulation.toggle_integrator(),
                KeyCode::KeyP => {
                    self.paused = !self.paused;
                    log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                }
                _ => {}
            },
            _ => {}
        }
        true
    }

    fn handle_scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.camera.zoom_at(ZOOM_STEP, self.cursor);
        } else if delta < 0.0 {
            self.camera.zoom_at(1.0 / ZOOM_STEP, self.cursor);
        }
    }

    fn hud(&self) -> String {
        format!(
            "{WINDOW_TITLE} | Warp: {:.0}x | {} | {} | T+{:.1} h{}",
            self.simulation.warp.factor(),
            self.simulation.integrator.name(),
            self.simulation.ship.info_string(),
            self.simulation.time / 3600.0,
            if self.paused { " | PAUSED" } else { "" },
        )
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔═══════════════════════════════════════════════╗");
    println!("║                ORBITAL FLIGHT                 ║");
    println!("╠═══════════════════════════════════════════════╣");
    println!("║   WASD      - Thrust                          ║");
    println!("║   F         - Toggle camera follow            ║");
    println!("║   Space     - Toggle time warp                ║");
    println!("║   . / ,     - Time warp x2 / /2               ║");
    println!("║   I         - Switch integrator               ║");
    println!("║   P         - Pause/Resume                    ║");
    println!("║   Scroll    - Zoom at cursor                  ║");
    println!("║   Escape    - Quit                            ║");
    println!("╚═══════════════════════════════════════════════╝");

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(WINDOW_TITLE, 1280, 720))?;

    let mut app = App::new(ctx);
    let mut frame_count = 0u32;
    let mut status_timer = Instant::now();
    let mut hud_timer = Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(size),
                WindowEvent::CursorMoved { position, .. } => {
                    app.cursor = Vec2::new(position.x as f32, position.y as f32);
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state,
                            repeat,
                            ..
                        },
                    ..
                } => {
                    if !app.handle_key(key, state == ElementState::Pressed, repeat) {
                        elwt.exit();
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                    };
                    app.handle_scroll(scroll);
                }
                WindowEvent::RedrawRequested => {
                    app.update();

                    match app.render() {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }

                    frame_count += 1;
                    if hud_timer.elapsed().as_secs_f32() >= HUD_INTERVAL_SECS {
                        app.ctx.window.set_title(&app.hud());
                        hud_timer = Instant::now();
                    }
                    if status_timer.elapsed().as_secs_f32() >= STATUS_INTERVAL_SECS {
                        let fps = frame_count as f32 / status_timer.elapsed().as_secs_f32();
                        log::info!(
                            "FPS: {:.1} | Warp: {:.0}x | {}",
                            fps,
                            app.simulation.warp.factor(),
                            app.simulation.ship.info_string()
                        );
                        frame_count = 0;
                        status_timer = Instant::now();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
