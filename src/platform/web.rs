//! Browser glue: scheduling, event wiring and the exported handles

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use glam::Vec2;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlCanvasElement, HtmlDocument, KeyboardEvent, MouseEvent, ResizeObserver, Window,
};

use super::{FrameToken, Scheduler, TimerToken};
use crate::desktop::{AppId, Desktop, Point, Size};
use crate::driver::{Command, Driver, Effect, Game};
use crate::renderer::Draw;
use crate::renderer::canvas2d::Canvas2d;
use crate::settings::Preferences;
use crate::shell::{Clock, Shell, ShellAction};
use crate::sim::{ArenaState, Outcome, WaveState};
use crate::tuning::{ArenaTuning, WaveTuning};

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn html_document() -> Result<HtmlDocument, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?
        .dyn_into::<HtmlDocument>()
}

pub fn read_cookies() -> Result<String, JsValue> {
    html_document()?.cookie()
}

pub fn write_cookie(cookie: &str) -> Result<(), JsValue> {
    html_document()?.set_cookie(cookie)
}

/// `Date.now()` plus a German locale timestamp
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn local_string(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("de-DE", &JsValue::UNDEFINED)
            .into()
    }
}

/// A callback from the browser into a session
#[derive(Debug, Clone, Copy)]
pub enum Wakeup {
    Frame(FrameToken, f64),
    Timer(TimerToken),
}

/// `requestAnimationFrame` + `setInterval`, reporting back through a sink
pub struct BrowserScheduler {
    window: Window,
    sink: Rc<dyn Fn(Wakeup)>,
    next_token: u64,
    /// Only one frame is ever pending: (token, rAF id)
    frame: Option<(u64, i32)>,
    intervals: HashMap<u64, (i32, Closure<dyn FnMut()>)>,
}

impl BrowserScheduler {
    pub fn new(window: Window, sink: Rc<dyn Fn(Wakeup)>) -> Self {
        Self {
            window,
            sink,
            next_token: 0,
            frame: None,
            intervals: HashMap::new(),
        }
    }

    fn mint(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = self.mint();
        let sink = self.sink.clone();
        let callback = Closure::once_into_js(move |now: f64| {
            sink(Wakeup::Frame(FrameToken(token), now));
        });
        match self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            Ok(id) => self.frame = Some((token, id)),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        FrameToken(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some((pending, id)) = self.frame
            && pending == token.0
        {
            let _ = self.window.cancel_animation_frame(id);
            self.frame = None;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerToken {
        let token = self.mint();
        let sink = self.sink.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            sink(Wakeup::Timer(TimerToken(token)));
        });
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => {
                self.intervals.insert(token, (id, callback));
            }
            Err(e) => log::error!("setInterval failed: {e:?}"),
        }
        TimerToken(token)
    }

    fn cancel_interval(&mut self, token: TimerToken) {
        if let Some((id, _callback)) = self.intervals.remove(&token.0) {
            self.window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for (id, _) in self.intervals.values() {
            self.window.clear_interval_with_handle(*id);
        }
        if let Some((_, id)) = self.frame {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// One mounted game: driver, canvas and host callbacks
struct Session<G: Game + Draw> {
    driver: RefCell<Driver<G, BrowserScheduler>>,
    canvas: RefCell<Canvas2d>,
    container: Element,
    on_hud: RefCell<Option<js_sys::Function>>,
    on_effect: RefCell<Option<js_sys::Function>>,
    listeners: RefCell<Vec<Listener>>,
    observer: RefCell<Option<(ResizeObserver, Closure<dyn FnMut()>)>>,
}

/// A DOM listener kept alive until unmount
struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

impl<G> Session<G>
where
    G: Game + Draw + 'static,
    G::Hud: Serialize,
{
    fn mount(canvas_id: &str, game: G) -> Result<Rc<Self>, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
            .dyn_into()?;
        let container = canvas
            .parent_element()
            .ok_or_else(|| JsValue::from_str("canvas has no container"))?;
        let canvas = Canvas2d::new(canvas)?;

        let session = Rc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let sink: Rc<dyn Fn(Wakeup)> = Rc::new(move |wakeup: Wakeup| {
                if let Some(session) = weak.upgrade() {
                    session.wake(wakeup);
                }
            });
            Self {
                driver: RefCell::new(Driver::new(game, BrowserScheduler::new(window, sink))),
                canvas: RefCell::new(canvas),
                container,
                on_hud: RefCell::new(None),
                on_effect: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                observer: RefCell::new(None),
            }
        });

        session.fit_container();
        session.attach_listeners()?;
        session.observe_resize()?;
        session.driver.borrow_mut().start();
        Ok(session)
    }

    fn wake(&self, wakeup: Wakeup) {
        let effect = match wakeup {
            Wakeup::Frame(token, now) => {
                let mut canvas = self.canvas.borrow_mut();
                self.driver
                    .borrow_mut()
                    .on_frame(token, now, &mut *canvas)
            }
            Wakeup::Timer(token) => {
                self.driver.borrow_mut().on_timer(token);
                None
            }
        };
        self.flush_hud();
        self.handle(effect);
    }

    fn flush_hud(&self) {
        let Some(hud) = self.driver.borrow_mut().take_hud() else {
            return;
        };
        let Some(callback) = self.on_hud.borrow().clone() else {
            return;
        };
        match serde_json::to_string(&hud) {
            Ok(json) => {
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
            Err(e) => log::warn!("HUD serialization failed: {e}"),
        }
    }

    fn handle(&self, effect: Option<Effect>) {
        let Some(effect) = effect else {
            return;
        };
        let kind = match &effect {
            Effect::Alert(text) => {
                if let Ok(window) = window() {
                    let _ = window.alert_with_message(text);
                }
                return;
            }
            Effect::Exit => "exit",
            Effect::SessionEnded(Outcome::GameOver) => "gameover",
            Effect::SessionEnded(Outcome::Victory) => "victory",
        };
        if let Some(callback) = self.on_effect.borrow().clone() {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(kind));
        }
    }

    /// Size the canvas to its container (or the game's fixed surface) and repaint
    fn fit_container(&self) {
        let (w, h) = (
            self.container.client_width().max(0) as u32,
            self.container.client_height().max(0) as u32,
        );
        let mut canvas = self.canvas.borrow_mut();
        let fitted = self
            .driver
            .borrow_mut()
            .fit(w, h, &mut *canvas, js_sys::Date::now());
        if !fitted {
            log::warn!("container has no size yet");
        }
    }

    fn pointer(&self, event: &MouseEvent) -> Vec2 {
        let rect = self.container.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn listen(
        self: &Rc<Self>,
        target: web_sys::EventTarget,
        kind: &'static str,
        handler: impl Fn(&Self, web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(session) = weak.upgrade() {
                handler(&*session, event);
            }
        });
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            closure,
        });
        Ok(())
    }

    fn attach_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let window: web_sys::EventTarget = window()?.into();
        let container: web_sys::EventTarget = self.container.clone().into();

        self.listen(window.clone(), "keydown", |session, event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.ctrl_key() || event.meta_key() {
                let command = match event.key().as_str() {
                    "r" => Some(Command::Restart),
                    "p" => Some(Command::Pause),
                    "?" => Some(Command::ShowControls),
                    _ => None,
                };
                if let Some(command) = command {
                    event.prevent_default();
                    let effect = session.driver.borrow_mut().dispatch(command);
                    session.handle(effect);
                }
                return;
            }
            if event.code() == "Space" {
                event.prevent_default();
            }
            let effect = session.driver.borrow_mut().key_down(&event.code());
            session.handle(effect);
        })?;

        self.listen(window, "keyup", |session, event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                session.driver.borrow_mut().key_up(&event.code());
            }
        })?;

        self.listen(container.clone(), "mousemove", |session, event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let pos = session.pointer(event);
                session.driver.borrow_mut().pointer_move(pos);
            }
        })?;

        self.listen(container, "click", |session, event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let pos = session.pointer(event);
                session.driver.borrow_mut().click(pos);
            }
        })?;
        Ok(())
    }

    fn observe_resize(self: &Rc<Self>) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(session) = weak.upgrade() {
                session.fit_container();
            }
        });
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
        observer.observe(&self.container);
        *self.observer.borrow_mut() = Some((observer, closure));
        Ok(())
    }

    fn teardown(&self) {
        self.driver.borrow_mut().dispatch(Command::Exit);
        self.listeners.borrow_mut().clear();
        if let Some((observer, _)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
    }
}

/// Object-safe view of a session for the exported handle
trait SessionOps {
    fn dispatch(&self, command: Command);
    fn key_down(&self, code: &str);
    fn key_up(&self, code: &str);
    fn pointer_move(&self, x: f32, y: f32);
    fn click(&self, x: f32, y: f32);
    fn set_on_hud(&self, callback: Option<js_sys::Function>);
    fn set_on_effect(&self, callback: Option<js_sys::Function>);
    fn unmount(&self);
}

impl<G> SessionOps for Session<G>
where
    G: Game + Draw + 'static,
    G::Hud: Serialize,
{
    fn dispatch(&self, command: Command) {
        let effect = self.driver.borrow_mut().dispatch(command);
        self.flush_hud();
        self.handle(effect);
    }

    fn key_down(&self, code: &str) {
        let effect = self.driver.borrow_mut().key_down(code);
        self.handle(effect);
    }

    fn key_up(&self, code: &str) {
        self.driver.borrow_mut().key_up(code);
    }

    fn pointer_move(&self, x: f32, y: f32) {
        self.driver.borrow_mut().pointer_move(Vec2::new(x, y));
    }

    fn click(&self, x: f32, y: f32) {
        self.driver.borrow_mut().click(Vec2::new(x, y));
    }

    fn set_on_hud(&self, callback: Option<js_sys::Function>) {
        *self.on_hud.borrow_mut() = callback;
        // Replay the current values to the new listener
        let hud = self.driver.borrow().game().hud();
        let callback = self.on_hud.borrow().clone();
        if let (Some(callback), Ok(json)) = (callback, serde_json::to_string(&hud)) {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }

    fn set_on_effect(&self, callback: Option<js_sys::Function>) {
        *self.on_effect.borrow_mut() = callback;
    }

    fn unmount(&self) {
        self.teardown();
    }
}

/// A running game mounted on a canvas
#[wasm_bindgen]
pub struct GameHandle {
    session: Rc<dyn SessionOps>,
}

#[wasm_bindgen]
impl GameHandle {
    /// Menu action: `"restart"`, `"pause"`, `"controls"` or `"exit"`
    pub fn dispatch(&self, action: &str) -> Result<(), JsValue> {
        let command = match action {
            "restart" => Command::Restart,
            "pause" => Command::Pause,
            "controls" => Command::ShowControls,
            "exit" => Command::Exit,
            other => return Err(JsValue::from_str(&format!("unknown action {other}"))),
        };
        self.session.dispatch(command);
        Ok(())
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, code: &str) {
        self.session.key_down(code);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&self, code: &str) {
        self.session.key_up(code);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f32, y: f32) {
        self.session.pointer_move(x, y);
    }

    pub fn click(&self, x: f32, y: f32) {
        self.session.click(x, y);
    }

    /// Called with the HUD as JSON whenever it changes
    #[wasm_bindgen(js_name = onHud)]
    pub fn on_hud(&self, callback: Option<js_sys::Function>) {
        self.session.set_on_hud(callback);
    }

    /// Called with `"exit"`, `"gameover"` or `"victory"`
    #[wasm_bindgen(js_name = onEffect)]
    pub fn on_effect(&self, callback: Option<js_sys::Function>) {
        self.session.set_on_effect(callback);
    }

    /// Tear down timers and listeners
    pub fn unmount(&self) {
        self.session.unmount();
    }
}

fn bad_tuning(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&format!("invalid tuning: {e}"))
}

/// Mount the arena. `tuning` is optional JSON overriding any balance values.
#[wasm_bindgen(js_name = mountArena)]
pub fn mount_arena(canvas_id: &str, tuning: Option<String>) -> Result<GameHandle, JsValue> {
    let tuning = ArenaTuning::from_overrides(tuning.as_deref()).map_err(bad_tuning)?;
    let seed = js_sys::Date::now() as u64;
    let session = Session::mount(
        canvas_id,
        ArenaState::with_tuning(seed, 800.0, 600.0, tuning),
    )?;
    log::info!("Arena mounted on #{canvas_id} (seed {seed})");
    Ok(GameHandle { session })
}

#[wasm_bindgen(js_name = mountInvaders)]
pub fn mount_invaders(canvas_id: &str, tuning: Option<String>) -> Result<GameHandle, JsValue> {
    let tuning = WaveTuning::from_overrides(tuning.as_deref()).map_err(bad_tuning)?;
    let session = Session::mount(canvas_id, WaveState::with_tuning(tuning))?;
    log::info!("Invaders mounted on #{canvas_id}");
    Ok(GameHandle { session })
}

fn app_id(id: &str) -> Result<AppId, JsValue> {
    id.parse().map_err(|e: crate::desktop::UnknownApp| JsValue::from_str(&e.to_string()))
}

/// Window manager exported to the page
#[wasm_bindgen(js_name = Desktop)]
pub struct DesktopHandle {
    desktop: Desktop,
}

#[wasm_bindgen(js_class = Desktop)]
impl DesktopHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            desktop: Desktop::new(),
        }
    }

    pub fn open(&mut self, id: &str) -> Result<(), JsValue> {
        self.desktop.windows.open_or_focus(app_id(id)?);
        Ok(())
    }

    pub fn close(&mut self, id: &str) -> Result<(), JsValue> {
        self.desktop.windows.close(app_id(id)?);
        Ok(())
    }

    pub fn minimize(&mut self, id: &str) -> Result<(), JsValue> {
        self.desktop.windows.minimize(app_id(id)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleMaximize)]
    pub fn toggle_maximize(&mut self, id: &str) -> Result<(), JsValue> {
        self.desktop.windows.toggle_maximize(app_id(id)?);
        Ok(())
    }

    pub fn focus(&mut self, id: &str) -> Result<(), JsValue> {
        self.desktop.windows.focus(app_id(id)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = titleDown)]
    pub fn title_down(&mut self, id: &str, x: f32, y: f32) -> Result<(), JsValue> {
        let id = app_id(id)?;
        let Desktop {
            windows,
            interaction,
        } = &mut self.desktop;
        interaction.title_down(windows, id, Point::new(x, y));
        Ok(())
    }

    #[wasm_bindgen(js_name = edgeDown)]
    pub fn edge_down(&mut self, id: &str, handle: &str, x: f32, y: f32) -> Result<(), JsValue> {
        let id = app_id(id)?;
        let Desktop {
            windows,
            interaction,
        } = &mut self.desktop;
        interaction.edge_down(windows, id, handle, Point::new(x, y));
        Ok(())
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Desktop {
            windows,
            interaction,
        } = &mut self.desktop;
        interaction.pointer_move(windows, Point::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.desktop.interaction.pointer_up();
    }

    /// Visible windows, dock and focus as JSON
    pub fn snapshot(&self, screen_width: f32, screen_height: f32) -> Result<String, JsValue> {
        self.desktop
            .snapshot_json(Size::new(screen_width, screen_height))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for DesktopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// The terminal app exported to the page
#[wasm_bindgen(js_name = Terminal)]
pub struct TerminalHandle {
    shell: Shell,
}

#[wasm_bindgen(js_class = Terminal)]
impl TerminalHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            shell: Shell::new(js_sys::Date::now() as u64),
        }
    }

    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, input: &str) {
        self.shell.set_input(input);
    }

    pub fn input(&self) -> String {
        self.shell.input().to_string()
    }

    /// Handle a `KeyboardEvent.key`. Returns `"invaders"` when the game should open.
    pub fn key(&mut self, key: &str) -> Option<String> {
        match self.shell.key(key, &BrowserClock) {
            ShellAction::LaunchInvaders => Some("invaders".to_string()),
            ShellAction::None => None,
        }
    }

    /// Pump the speed test; true when new output arrived
    pub fn advance(&mut self) -> bool {
        self.shell.advance(BrowserClock.now_ms())
    }

    #[wasm_bindgen(js_name = exitGame)]
    pub fn exit_game(&mut self) {
        self.shell.exit_game();
    }

    /// Output lines as JSON
    pub fn output(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.shell.output()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for TerminalHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wallpaper path, reconciling cookie and LocalStorage
#[wasm_bindgen(js_name = loadWallpaper)]
pub fn load_wallpaper() -> String {
    Preferences::load().wallpaper.path().to_string()
}

/// Persist a wallpaper choice to both stores
#[wasm_bindgen(js_name = saveWallpaper)]
pub fn save_wallpaper(path: &str) -> Result<(), JsValue> {
    let mut prefs = Preferences::default();
    prefs
        .set_wallpaper(path)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    prefs.save();
    Ok(())
}

/// Wallpaper catalogue paths as JSON
#[wasm_bindgen(js_name = availableWallpapers)]
pub fn available_wallpapers() -> Result<String, JsValue> {
    let paths: Vec<_> = crate::settings::Wallpaper::ALL
        .iter()
        .map(|w| w.path())
        .collect();
    serde_json::to_string(&paths).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Module start hook: logging and panic reporting
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger init failed: {e}")));
    }
    log::info!("Desktop Arcade starting...");
}
