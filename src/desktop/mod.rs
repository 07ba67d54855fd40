//! Simulated desktop: windows, dock and pointer gestures

pub mod interaction;
pub mod manager;
pub mod window;

pub use interaction::{Gesture, Interaction};
pub use manager::{DockItem, ResizeEdges, WindowManager};
pub use window::{AppId, Frame, Point, Size, UnknownApp, WindowRecord};

use serde::Serialize;

/// What the host needs to paint the desktop
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    /// Visible windows in paint order
    pub windows: Vec<WindowView<'a>>,
    pub dock: Vec<DockItem>,
    pub focused: Option<AppId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView<'a> {
    #[serde(flatten)]
    pub record: &'a WindowRecord,
    /// Where to draw it right now (maximized windows fill the work area)
    pub layout: Frame,
}

/// Window manager plus the active pointer gesture
#[derive(Debug, Clone, Default)]
pub struct Desktop {
    pub windows: WindowManager,
    pub interaction: Interaction,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, screen: Size) -> Snapshot<'_> {
        let windows = self
            .windows
            .visible()
            .into_iter()
            .filter_map(|record| {
                let layout = self.windows.layout_rect(record.id, screen)?;
                Some(WindowView { record, layout })
            })
            .collect();
        Snapshot {
            windows,
            dock: self.windows.dock_items(),
            focused: self.windows.focused(),
        }
    }

    pub fn snapshot_json(&self, screen: Size) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot(screen))
    }
}
