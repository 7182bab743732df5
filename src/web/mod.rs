//! Browser front-end: wasm entry point, input listeners, the fixed-step animation loop, wgpu
//! rendering, the DOM HUD and music playback.

mod audio;
mod hud;
mod renderer;

use std::{cell::RefCell, rc::Rc};

use anyhow::{anyhow, Result};
use js_sys::Function;
use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{self, window, HtmlCanvasElement};

use crate::config::{GameConfig, LaunchOptions, FIXED_STEP};
use crate::draw::{self, Palette, Viewport};
use crate::engine::{InputEvent, InputQueue, Key};
use crate::game::Game;

use audio::MusicPlayer;
use hud::Hud;
use renderer::Renderer;

type SharedInput = Rc<RefCell<InputQueue>>;

#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let canvas = document
        .get_element_by_id("game-canvas")
        .ok_or_else(|| JsValue::from_str("Missing canvas"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let options = LaunchOptions::from_query(&window.location().search().unwrap_or_default());
    let config = GameConfig::default();
    size_canvas(&canvas, &config)?;
    info!("starting with {options:?}");

    let hud = Hud::new(&document, config.font)?;
    let input: SharedInput = Rc::new(RefCell::new(InputQueue::new()));
    install_trigger_jump(&window, &input)?;
    install_input_listeners(&window, &canvas, &input)?;

    let gpu = match Gpu::new(&canvas, options.uncapped).await {
        Ok(gpu) => gpu,
        Err(err) => {
            error!("{:#}", err);
            hud.set_error("WebGPU not available\nCheck browser support (Safari 17.4/iOS 17.4+)");
            return Err(JsValue::from_str(&format!("{err:#}")));
        }
    };

    let clear_color = options.background.unwrap_or_else(|| config.background_rgb());
    let palette = match options.background {
        Some(rgb) => Palette::default().with_sky(rgb),
        None => Palette::default(),
    };
    let state = Rc::new(RefCell::new(AppState {
        gpu,
        game: Game::new(config, options.seed),
        hud,
        music: MusicPlayer::new(options.muted),
        input,
        pending: Vec::new(),
        canvas,
        timer: FrameTimer::default(),
        palette,
        clear_color,
        raf_closure: None,
    }));

    start_animation_loop(state).map_err(|err| JsValue::from_str(&format!("{err:#}")))
}

fn size_canvas(canvas: &HtmlCanvasElement, config: &GameConfig) -> Result<(), JsValue> {
    let width = (config.screen_width * config.scale) as u32;
    let height = (config.screen_height * config.scale) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{height}px"))?;
    Ok(())
}

/// Exposes `window.triggerJump()` so page buttons can act like a click.
fn install_trigger_jump(window: &web_sys::Window, input: &SharedInput) -> Result<(), JsValue> {
    let queue = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        queue.borrow_mut().push(InputEvent::Click);
    }) as Box<dyn Fn()>);

    let func: &Function = closure.as_ref().unchecked_ref();
    js_sys::Reflect::set(window, &JsValue::from_str("triggerJump"), func)?;
    closure.forget();
    Ok(())
}

fn install_input_listeners(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    input: &SharedInput,
) -> Result<(), JsValue> {
    let queue_key = input.clone();
    let key_closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let code = event.code();
        if Key::from_code(&code).is_some() {
            event.prevent_default();
        }
        if let Some(press) = InputEvent::from_keydown(&code, event.repeat()) {
            queue_key.borrow_mut().push(press);
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())?;
    key_closure.forget();

    let queue_mouse = input.clone();
    let mouse_closure = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        queue_mouse.borrow_mut().push(InputEvent::Click);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mouse_closure.as_ref().unchecked_ref())?;
    mouse_closure.forget();

    let queue_touch = input.clone();
    let touch_closure = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
        event.prevent_default();
        queue_touch.borrow_mut().push(InputEvent::Click);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchstart", touch_closure.as_ref().unchecked_ref())?;
    touch_closure.forget();

    Ok(())
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,
    renderer: Renderer,
}

impl Gpu {
    async fn new(canvas: &HtmlCanvasElement, uncapped: bool) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("WebGPU adapter not available"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                },
                None,
            )
            .await
            .map_err(|e| anyhow!("Request device failed: {}", e))?;

        let (width, height) = canvas_size(canvas);
        let surface_caps = surface.get_capabilities(&adapter);
        let present_mode = if uncapped
            && surface_caps
                .present_modes
                .contains(&wgpu::PresentMode::Immediate)
        {
            wgpu::PresentMode::Immediate
        } else {
            wgpu::PresentMode::Fifo
        };
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("Surface reports no texture formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            desired_maximum_frame_latency: 1,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(&device, surface_format)?;
        Ok(Self {
            surface,
            config,
            device,
            queue,
            renderer,
        })
    }

    fn resize_if_needed(&mut self, canvas: &HtmlCanvasElement) {
        let (width, height) = canvas_size(canvas);
        if width > 0 && height > 0 && (width != self.config.width || height != self.config.height) {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

fn start_animation_loop(state: Rc<RefCell<AppState>>) -> Result<()> {
    let win = window().ok_or_else(|| anyhow!("No window"))?;
    let performance = win.performance().ok_or_else(|| anyhow!("No performance"))?;
    let last_time = Rc::new(RefCell::new(performance.now()));

    let closure_state = state.clone();
    let closure_last = last_time.clone();

    let closure = Closure::wrap(Box::new(move |time: f64| {
        let dt = {
            let mut last = closure_last.borrow_mut();
            let dt = ((time - *last) / 1000.0) as f32;
            *last = time;
            dt.max(0.0)
        };

        {
            let mut state = closure_state.borrow_mut();
            if let Err(err) = state.frame(dt) {
                error!("Frame error: {err:#}");
                state.hud.set_error(&format!("WebGPU error\n{err:#}"));
                state.raf_closure = None;
                return;
            }
        }

        if let Some(win) = window() {
            let state_ref = closure_state.borrow();
            if let Some(cb) = state_ref
                .raf_closure
                .as_ref()
                .map(|c| c.as_ref().unchecked_ref())
            {
                if win.request_animation_frame(cb).is_err() {
                    error!("Failed to schedule animation frame");
                }
            }
        }
    }) as Box<dyn FnMut(f64)>);

    {
        let mut state_mut = state.borrow_mut();
        state_mut.raf_closure = Some(closure);
    }

    if let Some(cb) = state
        .borrow()
        .raf_closure
        .as_ref()
        .map(|c| c.as_ref().unchecked_ref())
    {
        win.request_animation_frame(cb)
            .map_err(|_| anyhow!("Failed to request animation frame"))?;
    }
    Ok(())
}

fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = canvas.client_width().max(1) as u32;
    let height = canvas.client_height().max(1) as u32;
    (width, height)
}

struct AppState {
    gpu: Gpu,
    game: Game,
    hud: Hud,
    music: MusicPlayer,
    input: SharedInput,
    pending: Vec<InputEvent>,
    canvas: HtmlCanvasElement,
    timer: FrameTimer,
    palette: Palette,
    clear_color: [f32; 3],
    raf_closure: Option<Closure<dyn FnMut(f64)>>,
}

impl AppState {
    fn frame(&mut self, dt: f32) -> Result<()> {
        let fresh = self.input.borrow_mut().take();
        self.pending.extend(fresh);

        self.timer.accumulate(dt);

        // Input gathered since the last frame goes to the first step only.
        while self.timer.accumulator >= FIXED_STEP {
            self.game.step(&self.pending);
            self.pending.clear();
            self.timer.accumulator -= FIXED_STEP;
        }

        for command in self.game.take_audio() {
            self.music.apply(&command);
        }

        self.gpu.resize_if_needed(&self.canvas);
        let game_config = self.game.config();
        let viewport = Viewport::fit(
            self.gpu.config.width,
            self.gpu.config.height,
            game_config.screen_width,
            game_config.screen_height,
        );

        let bounds = self.canvas.get_bounding_client_rect();
        self.hud.set_fps(self.timer.fps);
        self.hud
            .sync(
                &draw::labels(self.game.world()),
                &viewport,
                [bounds.left() as f32, bounds.top() as f32],
            )
            .map_err(|err| anyhow!("HUD update failed: {err:?}"))?;

        let quads = draw::quads(self.game.world(), &self.palette);
        let gpu = &mut self.gpu;
        match gpu.renderer.render(
            &gpu.surface,
            &gpu.device,
            &gpu.queue,
            &gpu.config,
            &quads,
            &viewport,
            self.clear_color,
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                // Skip this frame silently.
            }
            Err(err) => return Err(anyhow!("Surface error: {err}")),
        }

        Ok(())
    }
}

#[derive(Default)]
struct FrameTimer {
    accumulator: f32,
    fps_accum: f32,
    fps_frames: u32,
    fps: f32,
}

impl FrameTimer {
    fn accumulate(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        self.accumulator += dt;
        self.fps_accum += dt;
        self.fps_frames += 1;
        let max_accum = FIXED_STEP * 5.0;
        if self.accumulator > max_accum {
            self.accumulator = max_accum;
        }
        if self.fps_accum >= 0.5 {
            self.fps = self.fps_frames as f32 / self.fps_accum.max(1e-5);
            self.fps_accum = 0.0;
            self.fps_frames = 0;
        }
    }
}
