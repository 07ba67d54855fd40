//! Arena shooter painter

use glam::Vec2;

use super::{Canvas, Draw, TextAlign, colors, with_alpha};
use crate::sim::{ArenaState, Enemy, Gem, Outcome, Player, Projectile};

const GRID_SIZE: f32 = 50.0;
const HEALTH_BAR_WIDTH: f32 = 30.0;
const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Pulse period of the "super ready" glow
const GLOW_PERIOD_MS: f64 = 200.0;

impl Draw for ArenaState {
    fn draw(&self, canvas: &mut dyn Canvas, now_ms: f64) {
        let (width, height) = (self.width, self.height);

        // Translucent fill leaves a short motion trail
        canvas.fill_rect(0.0, 0.0, width, height, colors::ARENA_TRAIL);
        draw_grid(canvas, width, height);

        draw_player(canvas, &self.player, self.tuning.charge_max, now_ms);
        for projectile in &self.projectiles {
            draw_projectile(canvas, projectile);
        }
        for enemy in &self.enemies {
            draw_enemy(canvas, enemy);
        }
        for gem in &self.gems {
            draw_gem(canvas, gem);
        }

        if self.outcome == Some(Outcome::GameOver) {
            canvas.fill_rect(0.0, 0.0, width, height, colors::OVERLAY);
            let center = Vec2::new(width / 2.0, height / 2.0);
            canvas.fill_text("GAME OVER", center, 48.0, TextAlign::Center, colors::ENEMY);
            canvas.fill_text(
                &format!("Gems: {}", self.score),
                center + Vec2::new(0.0, 40.0),
                20.0,
                TextAlign::Center,
                colors::WHITE,
            );
        }
    }
}

fn draw_grid(canvas: &mut dyn Canvas, width: f32, height: f32) {
    let mut segments = Vec::new();
    let mut x = 0.0;
    while x < width {
        segments.push((Vec2::new(x, 0.0), Vec2::new(x, height)));
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y < height {
        segments.push((Vec2::new(0.0, y), Vec2::new(width, y)));
        y += GRID_SIZE;
    }
    canvas.stroke_lines(&segments, 1.0, colors::ARENA_GRID);
}

fn draw_player(canvas: &mut dyn Canvas, player: &Player, charge_max: u32, now_ms: f64) {
    canvas.fill_circle(player.pos, player.radius, colors::PLAYER);
    canvas.stroke_circle(player.pos, player.radius, 3.0, colors::PLAYER_RING);

    if player.charge >= charge_max {
        let pulse = (now_ms / GLOW_PERIOD_MS).sin().abs() as f32;
        canvas.stroke_circle(
            player.pos,
            player.radius + 10.0,
            4.0,
            with_alpha(colors::SUPER_GLOW, pulse),
        );
    }
}

fn draw_projectile(canvas: &mut dyn Canvas, projectile: &Projectile) {
    if projectile.special {
        canvas.fill_circle(projectile.pos, projectile.radius, colors::SUPER_SHOT);
        canvas.stroke_circle(projectile.pos, projectile.radius, 2.0, colors::WHITE);
    } else {
        canvas.fill_circle(projectile.pos, projectile.radius, colors::SHOT);
    }
}

fn draw_enemy(canvas: &mut dyn Canvas, enemy: &Enemy) {
    canvas.fill_circle(enemy.pos, enemy.radius, colors::ENEMY);

    let x = enemy.pos.x - HEALTH_BAR_WIDTH / 2.0;
    let y = enemy.pos.y - 30.0;
    canvas.fill_rect(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, colors::HEALTH_BACK);
    canvas.fill_rect(
        x,
        y,
        HEALTH_BAR_WIDTH * enemy.health_fraction(),
        HEALTH_BAR_HEIGHT,
        colors::HEALTH_FILL,
    );
}

fn draw_gem(canvas: &mut dyn Canvas, gem: &Gem) {
    let c = gem.pos + Vec2::new(0.0, gem.float_offset());
    let r = gem.radius;
    let diamond = [
        c - Vec2::new(0.0, r),
        c + Vec2::new(r, 0.0),
        c + Vec2::new(0.0, r),
        c - Vec2::new(r, 0.0),
    ];
    canvas.fill_polygon(&diamond, colors::GEM);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DisplayList, DrawCmd};

    #[test]
    fn draws_every_entity() {
        let mut state = ArenaState::new(7, 600.0, 400.0);
        state.push_enemy(Vec2::new(50.0, 50.0), 2.0);
        state.push_enemy(Vec2::new(550.0, 50.0), 2.0);
        state.push_gem(Vec2::new(300.0, 100.0));
        state.fire_shot(Vec2::new(400.0, 200.0));

        let mut canvas = DisplayList::new(600.0, 400.0);
        state.draw(&mut canvas, 0.0);

        assert_eq!(canvas.circles_of(colors::PLAYER), 1);
        assert_eq!(canvas.circles_of(colors::ENEMY), 2);
        assert_eq!(canvas.circles_of(colors::SHOT), 1);
        let diamonds = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillPolygon { .. }))
            .count();
        assert_eq!(diamonds, 1);
        // No overlay while alive
        assert_eq!(canvas.texts().count(), 0);
    }

    #[test]
    fn grid_spans_surface() {
        let state = ArenaState::new(1, 600.0, 400.0);
        let mut canvas = DisplayList::new(600.0, 400.0);
        state.draw(&mut canvas, 0.0);
        let grid = canvas.commands.iter().find_map(|c| match c {
            DrawCmd::StrokeLines { segments, .. } => Some(segments.len()),
            _ => None,
        });
        // 12 vertical + 8 horizontal lines
        assert_eq!(grid, Some(20));
    }

    #[test]
    fn full_charge_glows() {
        let mut state = ArenaState::new(1, 600.0, 400.0);
        state.player.charge = 100;
        let mut canvas = DisplayList::new(600.0, 400.0);
        state.draw(&mut canvas, 100.0);
        let rings = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::StrokeCircle { radius, .. } if *radius == 30.0))
            .count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn game_over_overlay() {
        let mut state = ArenaState::new(1, 600.0, 400.0);
        state.outcome = Some(Outcome::GameOver);
        state.score = 3;
        let mut canvas = DisplayList::new(600.0, 400.0);
        state.draw(&mut canvas, 0.0);
        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["GAME OVER", "Gems: 3"]);
    }
}
