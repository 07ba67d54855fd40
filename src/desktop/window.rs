//! Window records and the app table

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown app: {0}")]
pub struct UnknownApp(pub String);

/// Every app the desktop can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppId {
    Terminal,
    About,
    Projects,
    Contact,
    Skills,
    Files,
    Settings,
    Arena,
}

impl AppId {
    pub const ALL: [AppId; 8] = [
        AppId::Terminal,
        AppId::About,
        AppId::Projects,
        AppId::Contact,
        AppId::Skills,
        AppId::Files,
        AppId::Settings,
        AppId::Arena,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppId::Terminal => "terminal",
            AppId::About => "about",
            AppId::Projects => "projects",
            AppId::Contact => "contact",
            AppId::Skills => "skills",
            AppId::Files => "files",
            AppId::Settings => "settings",
            AppId::Arena => "arena",
        }
    }

    /// Window title shown in the title bar
    pub fn title(&self) -> &'static str {
        match self {
            AppId::Terminal => "Terminal",
            AppId::About => "Über Mich",
            AppId::Projects => "Projekte",
            AppId::Contact => "Kontakt",
            AppId::Skills => "Skills.exe",
            AppId::Files => "Dateien",
            AppId::Settings => "Settings",
            AppId::Arena => "Brawl",
        }
    }

    pub fn default_size(&self) -> Size {
        let (width, height) = match self {
            AppId::Terminal => (700.0, 500.0),
            AppId::About => (500.0, 450.0),
            AppId::Projects => (600.0, 500.0),
            AppId::Contact => (400.0, 350.0),
            AppId::Skills => (550.0, 480.0),
            AppId::Files => (600.0, 450.0),
            AppId::Settings => (600.0, 500.0),
            AppId::Arena => (800.0, 600.0),
        };
        Size { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Placement of a window on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One open window. Position and size are kept while maximized so
/// un-maximizing restores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: AppId,
    pub title: String,
    pub minimized: bool,
    pub maximized: bool,
    pub z: u32,
    pub position: Point,
    pub size: Size,
}

impl WindowRecord {
    pub fn new(id: AppId, position: Point, z: u32) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            minimized: false,
            maximized: false,
            z,
            position,
            size: id.default_size(),
        }
    }

    /// Whether the window is painted at all
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.minimized
    }

    /// Stored geometry (ignores the maximized flag)
    pub fn frame(&self) -> Frame {
        Frame {
            x: self.position.x,
            y: self.position.y,
            width: self.size.width,
            height: self.size.height,
        }
    }
}

impl FromStr for AppId {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownApp(s.to_string()))
    }
}
