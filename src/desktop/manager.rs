//! Window manager
//!
//! One record per app id. Z-order comes from a monotonic counter: every
//! focus or open takes `max_z + 1`, so the most recently touched window is
//! always on top and z values never repeat.

use serde::Serialize;

use super::window::{AppId, Frame, Point, Size, WindowRecord};
use crate::consts::{
    CASCADE_ORIGIN, CASCADE_STEP, DOCK_RESERVE, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    TOP_BAR_HEIGHT,
};

/// Which edges a resize handle drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ResizeEdges {
    /// Parse a handle name such as `"n"`, `"se"` or `"nw"`
    pub fn parse(handle: &str) -> Option<Self> {
        let mut edges = ResizeEdges::default();
        for c in handle.chars() {
            match c {
                'n' => edges.north = true,
                's' => edges.south = true,
                'e' => edges.east = true,
                'w' => edges.west = true,
                _ => return None,
            }
        }
        let valid = (edges.north || edges.south || edges.east || edges.west)
            && !(edges.north && edges.south)
            && !(edges.east && edges.west);
        valid.then_some(edges)
    }
}

/// A dock entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DockItem {
    pub id: AppId,
    pub label: &'static str,
    pub is_open: bool,
}

/// Dock order and labels
const DOCK: [(AppId, &str); 8] = [
    (AppId::Terminal, "Terminal"),
    (AppId::About, "Über Mich"),
    (AppId::Skills, "Skills"),
    (AppId::Projects, "Projekte"),
    (AppId::Files, "Dateien"),
    (AppId::Contact, "Kontakt"),
    (AppId::Arena, "Brawl"),
    (AppId::Settings, "Settings"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    max_z: u32,
}

impl Default for WindowManager {
    /// The desktop boots with the terminal open
    fn default() -> Self {
        Self {
            windows: vec![WindowRecord::new(
                AppId::Terminal,
                Point::new(80.0, 60.0),
                1,
            )],
            max_z: 1,
        }
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A desktop with nothing open
    pub fn empty() -> Self {
        Self {
            windows: Vec::new(),
            max_z: 0,
        }
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: AppId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn is_open(&self, id: AppId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_z(&self) -> u32 {
        self.max_z
    }

    fn next_z(&mut self) -> u32 {
        self.max_z += 1;
        self.max_z
    }

    /// Restore and raise an existing window, or create it at the cascade offset
    pub fn open_or_focus(&mut self, id: AppId) {
        let z = self.next_z();
        if let Some(window) = self.get_mut(id) {
            window.minimized = false;
            window.z = z;
            log::debug!("window {}: raised to z={}", id.as_str(), z);
            return;
        }
        let offset = self.windows.len() as f32 * CASCADE_STEP;
        let position = Point::new(CASCADE_ORIGIN.0 + offset, CASCADE_ORIGIN.1 + offset);
        self.windows.push(WindowRecord::new(id, position, z));
        log::debug!(
            "window {}: opened at ({}, {}) z={}",
            id.as_str(),
            position.x,
            position.y,
            z
        );
    }

    pub fn close(&mut self, id: AppId) {
        self.windows.retain(|w| w.id != id);
        log::debug!("window {}: closed", id.as_str());
    }

    /// Hide without touching z
    pub fn minimize(&mut self, id: AppId) {
        if let Some(window) = self.get_mut(id) {
            window.minimized = true;
        }
    }

    pub fn toggle_maximize(&mut self, id: AppId) {
        if let Some(window) = self.get_mut(id) {
            window.maximized = !window.maximized;
            log::trace!("window {}: maximized={}", id.as_str(), window.maximized);
        }
    }

    pub fn focus(&mut self, id: AppId) {
        if !self.is_open(id) {
            return;
        }
        let z = self.next_z();
        if let Some(window) = self.get_mut(id) {
            window.z = z;
        }
    }

    /// Move the window's top-left corner, kept right of x = 0 and below the top bar
    pub fn move_to(&mut self, id: AppId, x: f32, y: f32) {
        if let Some(window) = self.get_mut(id) {
            window.position = clamp_position(x, y);
        }
    }

    /// Edge-aware resize from a starting frame and pointer delta.
    ///
    /// East/south edges grow the size; west/north edges move the origin and
    /// keep the opposite edge fixed. Width and height never drop below the
    /// window floor.
    pub fn resize(&mut self, id: AppId, start: Frame, edges: ResizeEdges, dx: f32, dy: f32) {
        let Some(window) = self.get_mut(id) else {
            return;
        };
        let frame = resize_frame(start, edges, dx, dy);
        window.position = Point::new(frame.x, frame.y);
        window.size = Size::new(frame.width, frame.height);
    }

    /// Open, non-minimized windows in paint order (lowest z first)
    pub fn visible(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<_> = self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z);
        visible
    }

    /// Topmost visible window
    pub fn focused(&self) -> Option<AppId> {
        self.visible().last().map(|w| w.id)
    }

    /// On-screen rectangle. Maximized windows fill the area between the top
    /// bar and the dock; the stored geometry is left alone.
    pub fn layout_rect(&self, id: AppId, screen: Size) -> Option<Frame> {
        let window = self.get(id)?;
        if window.maximized {
            Some(Frame {
                x: 0.0,
                y: TOP_BAR_HEIGHT,
                width: screen.width,
                height: (screen.height - TOP_BAR_HEIGHT - DOCK_RESERVE).max(0.0),
            })
        } else {
            Some(window.frame())
        }
    }

    pub fn dock_items(&self) -> Vec<DockItem> {
        DOCK.iter()
            .map(|&(id, label)| DockItem {
                id,
                label,
                is_open: self.is_open(id),
            })
            .collect()
    }
}

fn clamp_position(x: f32, y: f32) -> Point {
    Point::new(x.max(0.0), y.max(TOP_BAR_HEIGHT))
}

pub(crate) fn resize_frame(start: Frame, edges: ResizeEdges, dx: f32, dy: f32) -> Frame {
    let mut frame = start;

    if edges.east {
        frame.width = (start.width + dx).max(MIN_WINDOW_WIDTH);
    }
    if edges.south {
        frame.height = (start.height + dy).max(MIN_WINDOW_HEIGHT);
    }
    if edges.west {
        let right = start.x + start.width;
        let max_x = (right - MIN_WINDOW_WIDTH).max(0.0);
        frame.x = (start.x + dx).clamp(0.0, max_x);
        frame.width = (right - frame.x).max(MIN_WINDOW_WIDTH);
    }
    if edges.north {
        let bottom = start.y + start.height;
        let max_y = (bottom - MIN_WINDOW_HEIGHT).max(TOP_BAR_HEIGHT);
        frame.y = (start.y + dy).clamp(TOP_BAR_HEIGHT, max_y);
        frame.height = (bottom - frame.y).max(MIN_WINDOW_HEIGHT);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boots_with_terminal() {
        let wm = WindowManager::new();
        let terminal = wm.get(AppId::Terminal).unwrap();
        assert_eq!(terminal.position, Point::new(80.0, 60.0));
        assert_eq!(terminal.z, 1);
        assert_eq!(wm.focused(), Some(AppId::Terminal));
    }

    #[test]
    fn open_cascades_and_raises() {
        let mut wm = WindowManager::new();
        wm.open_or_focus(AppId::About);
        let about = wm.get(AppId::About).unwrap();
        assert_eq!(about.position, Point::new(130.0, 110.0));
        assert_eq!(about.size, Size::new(500.0, 450.0));
        assert_eq!(about.z, 2);

        wm.open_or_focus(AppId::Contact);
        assert_eq!(
            wm.get(AppId::Contact).unwrap().position,
            Point::new(160.0, 140.0)
        );
        assert_eq!(wm.focused(), Some(AppId::Contact));
    }

    #[test]
    fn reopen_is_find_or_create() {
        let mut wm = WindowManager::new();
        wm.open_or_focus(AppId::Skills);
        wm.minimize(AppId::Skills);
        assert_eq!(wm.focused(), Some(AppId::Terminal));
        let z_before = wm.get(AppId::Skills).unwrap().z;

        wm.open_or_focus(AppId::Skills);
        assert_eq!(wm.windows().len(), 2);
        let skills = wm.get(AppId::Skills).unwrap();
        assert!(!skills.minimized);
        assert!(skills.z > z_before);
        assert_eq!(wm.focused(), Some(AppId::Skills));
    }

    #[test]
    fn minimize_keeps_z() {
        let mut wm = WindowManager::new();
        wm.minimize(AppId::Terminal);
        assert_eq!(wm.get(AppId::Terminal).unwrap().z, 1);
        assert!(wm.visible().is_empty());
    }

    #[test]
    fn close_removes_record() {
        let mut wm = WindowManager::new();
        wm.close(AppId::Terminal);
        assert!(!wm.is_open(AppId::Terminal));
        // Focusing a closed window does nothing
        wm.focus(AppId::Terminal);
        assert!(wm.windows().is_empty());
    }

    #[test]
    fn maximize_is_layout_only() {
        let mut wm = WindowManager::new();
        wm.toggle_maximize(AppId::Terminal);
        let screen = Size::new(1280.0, 800.0);
        assert_eq!(
            wm.layout_rect(AppId::Terminal, screen),
            Some(Frame {
                x: 0.0,
                y: 28.0,
                width: 1280.0,
                height: 702.0,
            })
        );
        let terminal = wm.get(AppId::Terminal).unwrap();
        assert_eq!(terminal.position, Point::new(80.0, 60.0));
        assert_eq!(terminal.size, Size::new(700.0, 500.0));

        wm.toggle_maximize(AppId::Terminal);
        assert_eq!(
            wm.layout_rect(AppId::Terminal, screen),
            Some(wm.get(AppId::Terminal).unwrap().frame())
        );
    }

    #[test]
    fn move_clamps_to_desktop() {
        let mut wm = WindowManager::new();
        wm.move_to(AppId::Terminal, -40.0, 5.0);
        assert_eq!(
            wm.get(AppId::Terminal).unwrap().position,
            Point::new(0.0, 28.0)
        );
    }

    #[test]
    fn west_edge_keeps_right_fixed() {
        let start = Frame {
            x: 200.0,
            y: 100.0,
            width: 400.0,
            height: 300.0,
        };
        let west = ResizeEdges::parse("w").unwrap();
        let grown = resize_frame(start, west, -50.0, 0.0);
        assert_eq!((grown.x, grown.width), (150.0, 450.0));

        // Shrinking past the floor pins the width at 300
        let shrunk = resize_frame(start, west, 250.0, 0.0);
        assert_eq!((shrunk.x, shrunk.width), (300.0, 300.0));
        assert_eq!(shrunk.x + shrunk.width, 600.0);
    }

    #[test]
    fn north_edge_stops_at_top_bar() {
        let start = Frame {
            x: 10.0,
            y: 50.0,
            width: 400.0,
            height: 300.0,
        };
        let f = resize_frame(start, ResizeEdges::parse("n").unwrap(), 0.0, -100.0);
        assert_eq!(f.y, 28.0);
        assert_eq!(f.y + f.height, 350.0);
    }

    #[test]
    fn south_east_floor() {
        let start = Frame {
            x: 0.0,
            y: 28.0,
            width: 400.0,
            height: 300.0,
        };
        let f = resize_frame(start, ResizeEdges::parse("se").unwrap(), -500.0, -500.0);
        assert_eq!((f.width, f.height), (300.0, 200.0));
        assert_eq!((f.x, f.y), (0.0, 28.0));
    }

    #[test]
    fn handle_names() {
        assert_eq!(
            ResizeEdges::parse("nw"),
            Some(ResizeEdges {
                north: true,
                west: true,
                ..Default::default()
            })
        );
        assert_eq!(ResizeEdges::parse("ns"), None);
        assert_eq!(ResizeEdges::parse("x"), None);
        assert_eq!(ResizeEdges::parse(""), None);
    }

    #[test]
    fn dock_shows_open_state() {
        let mut wm = WindowManager::new();
        wm.open_or_focus(AppId::Arena);
        let dock = wm.dock_items();
        assert_eq!(dock.len(), 8);
        assert!(dock[0].is_open);
        assert!(!dock[1].is_open);
        assert!(dock.iter().any(|d| d.id == AppId::Arena && d.is_open));
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Open(usize),
        Focus(usize),
        Minimize(usize),
        Close(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        let app = 0..AppId::ALL.len();
        prop_oneof![
            app.clone().prop_map(Op::Open),
            app.clone().prop_map(Op::Focus),
            app.clone().prop_map(Op::Minimize),
            app.prop_map(Op::Close),
        ]
    }

    proptest! {
        #[test]
        fn last_raised_window_is_on_top(ops in prop::collection::vec(op(), 1..40)) {
            let mut wm = WindowManager::new();
            let mut last_raised = Some(AppId::Terminal);
            for op in ops {
                match op {
                    Op::Open(i) => {
                        wm.open_or_focus(AppId::ALL[i]);
                        last_raised = Some(AppId::ALL[i]);
                    }
                    Op::Focus(i) => {
                        let id = AppId::ALL[i];
                        if wm.is_open(id) {
                            wm.focus(id);
                            last_raised = Some(id);
                        }
                    }
                    Op::Minimize(i) => wm.minimize(AppId::ALL[i]),
                    Op::Close(i) => {
                        wm.close(AppId::ALL[i]);
                        if last_raised == Some(AppId::ALL[i]) {
                            last_raised = None;
                        }
                    }
                }

                // z values are unique and bounded by the counter
                let mut zs: Vec<u32> = wm.windows().iter().map(|w| w.z).collect();
                zs.sort_unstable();
                zs.dedup();
                prop_assert_eq!(zs.len(), wm.windows().len());
                prop_assert!(zs.iter().all(|&z| z <= wm.max_z()));

                if let Some(id) = last_raised {
                    let top = wm.windows().iter().max_by_key(|w| w.z).map(|w| w.id);
                    prop_assert_eq!(top, Some(id));
                }
            }
        }
    }
}
