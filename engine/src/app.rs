use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
}

pub struct AppContext {
    pub window: Window,
    pub pixels: Pixels,
    pub surface_size: SurfaceSize,
}

/// Input gathered since the previous frame.
///
/// Key presses are edge events (one entry per physical press, repeats
/// included); the pointer fields unify mouse and touch so swipe detection
/// does not care which one produced them.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub keys_pressed: Vec<VirtualKeyCode>,
    pub pointer_pos: Option<(f64, f64)>,
    pub pointer_pressed: bool,
    pub pointer_released: bool,
}

impl InputFrame {
    fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.pointer_pressed = false;
        self.pointer_released = false;
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    );

    fn render(&mut self, state: &Self::State, gfx: &mut dyn Renderer2d);
}

/// Opens a window and runs `game` until close.
///
/// Never returns on success; the `Result` covers startup failures only.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let monitor_size = if config.clamp_to_monitor {
        event_loop.primary_monitor().map(|m| m.size())
    } else {
        None
    };
    let initial_size = if let Some(monitor) = monitor_size {
        PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        )
    } else {
        config.desired_size
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let mut builder = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        builder = builder.enable_vsync(vsync);
    }
    let pixels = builder.build()?;

    let mut ctx = AppContext {
        window,
        pixels,
        surface_size,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let new_size = SurfaceSize::new(size.width, size.height);
                    if new_size.is_empty() {
                        return;
                    }
                    ctx.surface_size = new_size;
                    if let Err(err) = ctx.pixels.resize_surface(new_size.width, new_size.height) {
                        eprintln!("warning: surface resize failed: {err}");
                    }
                    if let Err(err) = ctx.pixels.resize_buffer(new_size.width, new_size.height) {
                        eprintln!("warning: buffer resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::KeyboardInput { input: key_event, .. } => {
                    if key_event.state == ElementState::Pressed {
                        if let Some(key) = key_event.virtual_keycode {
                            input.keys_pressed.push(key);
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.pointer_pos = Some((position.x, position.y));
                }
                WindowEvent::MouseInput { state: button_state, button, .. } => {
                    if *button == MouseButton::Left {
                        match button_state {
                            ElementState::Pressed => input.pointer_pressed = true,
                            ElementState::Released => input.pointer_released = true,
                        }
                    }
                }
                WindowEvent::Touch(Touch { phase, location, .. }) => {
                    input.pointer_pos = Some((location.x, location.y));
                    match phase {
                        TouchPhase::Started => input.pointer_pressed = true,
                        TouchPhase::Ended => input.pointer_released = true,
                        TouchPhase::Moved | TouchPhase::Cancelled => {}
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                game.update(&mut state, &input, dt, &mut ctx);

                let size = ctx.surface_size;
                let mut gfx = CpuRenderer::new(ctx.pixels.frame_mut(), size);
                gfx.begin_frame(size);
                game.render(&state, &mut gfx);
                if let Err(err) = ctx.pixels.render() {
                    eprintln!("warning: present failed: {err}");
                }

                input.end_frame();
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
