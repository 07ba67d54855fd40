//! Desktop Arcade entry point
//!
//! The web build is driven from JavaScript through the exported handles.
//! Natively this runs both games headless with a scripted player, plus a
//! short desktop and shell session, and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use desktop_arcade::consts::FRAME_MS;
    use desktop_arcade::desktop::{AppId, Desktop, Point, Size};
    use desktop_arcade::driver::{Driver, Effect, Game};
    use desktop_arcade::platform::ManualScheduler;
    use desktop_arcade::renderer::{DisplayList, Draw};
    use desktop_arcade::shell::{FixedClock, LineKind, Shell};
    use desktop_arcade::sim::{ArenaState, WaveState};

    /// Upper bound on simulated frames per game (five minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    /// Step one frame: fire due timers, then the frame callback
    fn pump<G: Game + Draw>(
        driver: &mut Driver<G, ManualScheduler>,
        canvas: &mut DisplayList,
        now_ms: f64,
    ) -> Option<Effect> {
        for token in driver.scheduler_mut().advance_to(now_ms) {
            driver.on_timer(token);
        }
        let token = driver.scheduler_mut().fire_frame()?;
        canvas.clear();
        let effect = driver.on_frame(token, now_ms, canvas);
        if let Some(hud) = driver.take_hud() {
            log::debug!("{} HUD {:?}", driver.game().name(), hud);
        }
        effect
    }

    pub fn arena(seed: u64) {
        let mut driver = Driver::new(ArenaState::new(seed, 800.0, 600.0), ManualScheduler::new());
        let mut canvas = DisplayList::new(800.0, 600.0);
        driver.start();

        let mut strafe = "KeyA";
        for frame in 0..MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;

            // Circle-strafe and shoot at the closest enemy
            if frame % 90 == 0 {
                driver.key_up(strafe);
                strafe = if strafe == "KeyA" { "KeyD" } else { "KeyA" };
                driver.key_down(strafe);
            }
            let player = driver.game().player.pos;
            let target = driver
                .game()
                .enemies
                .iter()
                .min_by(|a, b| a.pos.distance(player).total_cmp(&b.pos.distance(player)))
                .map(|e| e.pos);
            if let Some(target) = target {
                driver.pointer_move(target);
                if frame % 8 == 0 {
                    driver.click(target);
                }
                if driver.game().player.charge >= driver.game().tuning.charge_max {
                    driver.key_down("Space");
                    driver.key_up("Space");
                }
            }

            if let Some(effect) = pump(&mut driver, &mut canvas, now) {
                log::info!("arena: {:?} at frame {}", effect, frame);
                break;
            }
        }
        let game = driver.game();
        log::info!(
            "arena: {} gems, {} health, {} ticks, {} draw calls in the last frame",
            game.score,
            game.player.health,
            game.time_ticks,
            canvas.commands.len()
        );
    }

    pub fn invaders() {
        let mut driver = Driver::new(WaveState::new(), ManualScheduler::new());
        let mut canvas = DisplayList::new(600.0, 400.0);
        driver.start();
        driver.key_down("Space");

        let mut heading = "ArrowLeft";
        driver.key_down(heading);
        for frame in 0..MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;
            let x = driver.game().cannon.rect.x;
            let turn = (heading == "ArrowLeft" && x <= 0.0)
                || (heading == "ArrowRight" && x >= driver.game().width - 30.0);
            if turn {
                driver.key_up(heading);
                heading = if heading == "ArrowLeft" { "ArrowRight" } else { "ArrowLeft" };
                driver.key_down(heading);
            }
            if let Some(effect) = pump(&mut driver, &mut canvas, now) {
                log::info!("invaders: {:?} at frame {}", effect, frame);
                break;
            }
        }
        log::info!(
            "invaders: score {}, {} aliens left",
            driver.game().score,
            driver.game().aliens.len()
        );
        // Q leaves the game
        if let Some(effect) = driver.key_down("KeyQ") {
            log::info!("invaders: {:?} on KeyQ", effect);
        }
    }

    pub fn desktop() {
        let mut desktop = Desktop::new();
        for app in [AppId::About, AppId::Projects, AppId::Arena] {
            desktop.windows.open_or_focus(app);
        }
        desktop.windows.minimize(AppId::Projects);
        desktop
            .interaction
            .edge_down(&mut desktop.windows, AppId::About, "w", Point::new(130.0, 200.0));
        desktop
            .interaction
            .pointer_move(&mut desktop.windows, Point::new(90.0, 200.0));
        desktop.interaction.pointer_up();

        match desktop.snapshot_json(Size::new(1440.0, 900.0)) {
            Ok(json) => log::info!("desktop: {json}"),
            Err(e) => log::error!("desktop snapshot failed: {e}"),
        }
    }

    pub fn shell() {
        let clock = FixedClock {
            now_ms: 0.0,
            local: "18.10.2026, 12:00:00".to_string(),
        };
        let mut shell = Shell::new(7);
        for line in ["whoami", "ls", "date", "kaffee", "speedtest"] {
            shell.execute(line, &clock);
        }
        shell.advance(30_000.0);
        for line in shell.output() {
            let text = if line.segments.is_empty() {
                line.content.clone()
            } else {
                line.segments.iter().map(|s| s.text.as_str()).collect()
            };
            match line.kind {
                LineKind::Command => println!("$ {text}"),
                LineKind::Error => println!("! {text}"),
                _ => println!("{text}"),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Desktop Arcade (native, headless) starting...");
    log::info!("The interactive build targets wasm32 - serve it with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    headless::arena(seed);
    headless::invaders();
    headless::desktop();
    headless::shell();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `platform::web::start`, this is just to satisfy the compiler
}
