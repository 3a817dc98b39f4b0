mod canvas;

use std::collections::HashMap;

use duel_core::{
    verify_assets, AssetError, AssetKey, InputEvent, Key, PlayerId, Session, SessionConfig,
    FRAME_RATE,
};
use log::{info, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::canvas::CanvasSurface;

// ── Logging ─────────────────────────────────────────────────

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&line),
            log::Level::Warn => console::warn_1(&line),
            log::Level::Info => console::info_1(&line),
            _ => console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install panic hook and console logger so problems show in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Change console verbosity: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| js_error(&format!("unknown log level {level}")))?;
    log::set_max_level(filter);
    Ok(())
}

/// Host driver period in milliseconds.
#[wasm_bindgen]
pub fn frame_interval_ms() -> f64 {
    1000.0 / FRAME_RATE as f64
}

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

impl From<AssetErrorJs> for JsValue {
    fn from(e: AssetErrorJs) -> Self {
        js_error(&e.0.to_string())
    }
}

struct AssetErrorJs(AssetError);

// ── Assets ──────────────────────────────────────────────────

/// Images loaded by the page, keyed by their file names.
#[wasm_bindgen]
#[derive(Default)]
pub struct AssetImages {
    images: HashMap<AssetKey, HtmlImageElement>,
}

#[wasm_bindgen]
impl AssetImages {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AssetImages {
        AssetImages::default()
    }

    /// Register a loaded image under its file name, e.g. "walk1.png".
    pub fn insert(&mut self, file: &str, image: HtmlImageElement) -> Result<(), JsValue> {
        let key = AssetKey::from_file(file)
            .ok_or_else(|| AssetErrorJs(AssetError::UnknownFile(file.to_string())))?;
        self.images.insert(key, image);
        Ok(())
    }

    /// File names the game expects, in load order.
    pub fn required_files() -> Vec<String> {
        AssetKey::all().map(|k| k.file().to_string()).collect()
    }

    fn is_ready(&self, key: AssetKey) -> bool {
        self.images
            .get(&key)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }
}

// ── Game ────────────────────────────────────────────────────

/// Small HUD summary for the page (camelCase for JS).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsHud {
    frame: u64,
    game_over: bool,
    winner: Option<u8>,
    health: [i32; 2],
    can_shoot: [bool; 2],
}

fn player_number(id: PlayerId) -> u8 {
    id.index() as u8 + 1
}

#[wasm_bindgen]
pub struct WasmGame {
    session: Session,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a session on `canvas`. Fails if any sprite or the background is
    /// missing or not finished loading.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, assets: AssetImages, seed: u32) -> Result<WasmGame, JsValue> {
        verify_assets(|k| assets.is_ready(k)).map_err(AssetErrorJs)?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let config = SessionConfig {
            seed,
            viewport_width: canvas.width() as f64,
            viewport_height: canvas.height() as f64,
        };
        info!(
            "session start: {}x{} seed={}",
            config.viewport_width, config.viewport_height, seed
        );

        Ok(WasmGame {
            session: Session::new(config),
            surface: CanvasSurface::new(
                ctx,
                assets.images,
                config.viewport_width,
                config.viewport_height,
            ),
        })
    }

    /// Queue a DOM `KeyboardEvent.code` press. Returns false for keys the game
    /// ignores, so the page can leave their default action alone.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.queue(code, InputEvent::KeyDown)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.queue(code, InputEvent::KeyUp)
    }

    fn queue(&mut self, code: &str, event: fn(Key) -> InputEvent) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.session.push_input(event(key));
                true
            }
            None => false,
        }
    }

    /// Advance and draw one frame. `now` is `performance.now()`.
    pub fn frame(&mut self, now: f64) {
        self.session.frame(now, &mut self.surface);
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_over()
    }

    /// 1 or 2 once the game is over.
    pub fn winner(&self) -> Option<u8> {
        self.session.winner().map(player_number)
    }

    pub fn export_hud(&self) -> Result<JsValue, JsValue> {
        let players = *self.session.players();
        let hud = JsHud {
            frame: self.session.frame_count(),
            game_over: self.session.is_over(),
            winner: self.winner(),
            health: players.map(|p| p.health),
            can_shoot: players.map(|p| p.can_shoot),
        };
        Ok(serde_wasm_bindgen::to_value(&hud)?)
    }

    /// Full session snapshot as a JS object.
    pub fn export_state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.session.snapshot())?)
    }

    /// Full session snapshot as JSON text.
    pub fn export_state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| js_error(&e.to_string()))
    }
}
