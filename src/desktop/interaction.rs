//! Pointer gestures on windows: drag by the title bar, resize by an edge

use super::manager::{ResizeEdges, WindowManager};
use super::window::{AppId, Frame, Point};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        id: AppId,
        /// Pointer position relative to the window's top-left corner
        grab: Point,
    },
    Resizing {
        id: AppId,
        edges: ResizeEdges,
        origin: Point,
        start: Frame,
    },
}

/// Tracks the single active pointer sequence (down, move*, up)
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    gesture: Gesture,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Pointer down on a title bar: raise and start dragging.
    /// Maximized windows are raised but stay put.
    pub fn title_down(&mut self, wm: &mut WindowManager, id: AppId, pointer: Point) {
        if !self.is_idle() {
            return;
        }
        let Some(window) = wm.get(id) else {
            return;
        };
        let maximized = window.maximized;
        let grab = Point::new(pointer.x - window.position.x, pointer.y - window.position.y);
        wm.focus(id);
        if !maximized {
            self.gesture = Gesture::Dragging { id, grab };
        }
    }

    /// Pointer down on a resize handle (`"n"`, `"se"`, ...)
    pub fn edge_down(&mut self, wm: &mut WindowManager, id: AppId, handle: &str, pointer: Point) {
        if !self.is_idle() {
            return;
        }
        let Some(edges) = ResizeEdges::parse(handle) else {
            log::warn!("unknown resize handle {handle:?}");
            return;
        };
        let Some(window) = wm.get(id) else {
            return;
        };
        let (maximized, start) = (window.maximized, window.frame());
        wm.focus(id);
        if !maximized {
            self.gesture = Gesture::Resizing {
                id,
                edges,
                origin: pointer,
                start,
            };
        }
    }

    pub fn pointer_move(&mut self, wm: &mut WindowManager, pointer: Point) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { id, grab } => {
                wm.move_to(id, pointer.x - grab.x, pointer.y - grab.y);
            }
            Gesture::Resizing {
                id,
                edges,
                origin,
                start,
            } => {
                wm.resize(id, start, edges, pointer.x - origin.x, pointer.y - origin.y);
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::window::Size;

    #[test]
    fn drag_follows_pointer() {
        let mut wm = WindowManager::new();
        wm.open_or_focus(AppId::About);
        let mut ix = Interaction::new();

        // Grab the terminal title bar 20px into the window
        ix.title_down(&mut wm, AppId::Terminal, Point::new(100.0, 70.0));
        assert_eq!(wm.focused(), Some(AppId::Terminal));
        ix.pointer_move(&mut wm, Point::new(300.0, 200.0));
        assert_eq!(
            wm.get(AppId::Terminal).unwrap().position,
            Point::new(280.0, 190.0)
        );
        // Clamped under the top bar
        ix.pointer_move(&mut wm, Point::new(0.0, 0.0));
        assert_eq!(
            wm.get(AppId::Terminal).unwrap().position,
            Point::new(0.0, 28.0)
        );
        ix.pointer_up();
        ix.pointer_move(&mut wm, Point::new(500.0, 500.0));
        assert_eq!(
            wm.get(AppId::Terminal).unwrap().position,
            Point::new(0.0, 28.0)
        );
    }

    #[test]
    fn west_edge_drag() {
        let mut wm = WindowManager::new();
        let mut ix = Interaction::new();
        // Terminal at (80, 60), 700 wide
        ix.edge_down(&mut wm, AppId::Terminal, "w", Point::new(80.0, 200.0));
        ix.pointer_move(&mut wm, Point::new(50.0, 200.0));
        let t = wm.get(AppId::Terminal).unwrap();
        assert_eq!(t.position.x, 50.0);
        assert_eq!(t.size.width, 730.0);

        // Far right: width floors at 300 with the right edge fixed at 780
        ix.pointer_move(&mut wm, Point::new(700.0, 200.0));
        let t = wm.get(AppId::Terminal).unwrap();
        assert_eq!(t.size.width, 300.0);
        assert_eq!(t.position.x, 480.0);
        assert_eq!(t.size.height, 500.0);
    }

    #[test]
    fn one_gesture_at_a_time() {
        let mut wm = WindowManager::new();
        wm.open_or_focus(AppId::Files);
        let mut ix = Interaction::new();
        ix.title_down(&mut wm, AppId::Terminal, Point::new(90.0, 65.0));
        ix.edge_down(&mut wm, AppId::Files, "se", Point::new(0.0, 0.0));
        assert!(matches!(
            ix.gesture(),
            Gesture::Dragging {
                id: AppId::Terminal,
                ..
            }
        ));
        assert_eq!(wm.focused(), Some(AppId::Terminal));
    }

    #[test]
    fn maximized_window_ignores_resize() {
        let mut wm = WindowManager::new();
        wm.toggle_maximize(AppId::Terminal);
        let mut ix = Interaction::new();
        ix.edge_down(&mut wm, AppId::Terminal, "e", Point::new(780.0, 100.0));
        assert!(ix.is_idle());
        ix.pointer_move(&mut wm, Point::new(900.0, 100.0));
        assert_eq!(
            wm.get(AppId::Terminal).unwrap().size,
            Size::new(700.0, 500.0)
        );
    }
}
