//! Alien wave painter: flat CRT look

use glam::Vec2;

use super::{Canvas, Draw, TextAlign, colors};
use crate::sim::{Alien, AlienKind, Outcome, WaveState};

impl Draw for WaveState {
    fn draw(&self, canvas: &mut dyn Canvas, _now_ms: f64) {
        let (width, height) = (self.width, self.height);
        canvas.fill_rect(0.0, 0.0, width, height, colors::WAVE_BACKGROUND);

        for alien in &self.aliens {
            draw_alien(canvas, alien);
        }
        for bullet in &self.bullets {
            let r = bullet.rect;
            canvas.fill_rect(r.x, r.y, r.width, r.height, colors::WAVE_FOREGROUND);
        }

        let mut y = 0.0;
        while y < height {
            canvas.fill_rect(0.0, y, width, 1.0, colors::SCANLINE);
            y += 2.0;
        }

        // Tank goes over the scanlines: base plus turret
        let c = self.cannon.rect;
        canvas.fill_rect(c.x, c.y + 10.0, c.width, 10.0, colors::GREEN);
        canvas.fill_rect(c.x + 10.0, c.y, 10.0, 10.0, colors::GREEN);

        canvas.fill_text(
            &format!("SCORE: {}", self.score),
            Vec2::new(10.0, 20.0),
            16.0,
            TextAlign::Left,
            colors::WAVE_FOREGROUND,
        );

        let banner = match self.outcome {
            Some(Outcome::GameOver) => Some(("GAME OVER", colors::RED)),
            Some(Outcome::Victory) => Some(("VICTORY!", colors::GREEN)),
            None => None,
        };
        if let Some((text, color)) = banner {
            let center = Vec2::new(width / 2.0, height / 2.0);
            canvas.fill_text(text, center, 40.0, TextAlign::Center, color);
            canvas.fill_text(
                "Press Q to exit",
                center + Vec2::new(0.0, 36.0),
                16.0,
                TextAlign::Center,
                colors::WAVE_FOREGROUND,
            );
        }
    }
}

fn draw_alien(canvas: &mut dyn Canvas, alien: &Alien) {
    let (x, y) = (alien.rect.x, alien.rect.y);
    match alien.kind {
        AlienKind::Squid => {
            canvas.fill_rect(x + 4.0, y, 16.0, 18.0, colors::PINK);
            canvas.clear_rect(x + 8.0, y + 4.0, 8.0, 4.0);
        }
        AlienKind::Crab => {
            canvas.fill_rect(x, y + 4.0, 24.0, 10.0, colors::CYAN);
            canvas.fill_rect(x + 8.0, y, 8.0, 4.0, colors::CYAN);
            canvas.fill_rect(x + 2.0, y + 14.0, 4.0, 4.0, colors::CYAN);
            canvas.fill_rect(x + 18.0, y + 14.0, 4.0, 4.0, colors::CYAN);
        }
        AlienKind::Octopus => {
            canvas.fill_rect(x + 2.0, y + 2.0, 20.0, 14.0, colors::YELLOW);
            canvas.clear_rect(x + 6.0, y + 6.0, 4.0, 4.0);
            canvas.clear_rect(x + 14.0, y + 6.0, 4.0, 4.0);
        }
    }
}
