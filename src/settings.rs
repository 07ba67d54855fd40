//! Desktop preferences
//!
//! Only the wallpaper is persisted. It lives in a cookie (so the first paint
//! can use it) and in LocalStorage; on mount a valid LocalStorage value that
//! disagrees with the cookie wins and the cookie is rewritten.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie and LocalStorage key
pub const STORAGE_KEY: &str = "os-wallpaper";
/// One year
pub const COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefsError {
    #[error("unknown wallpaper: {0}")]
    UnknownWallpaper(String),
    #[error("malformed cookie value: {0}")]
    MalformedCookie(String),
}

/// Wallpaper catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Wallpaper {
    BlueRoseLight,
    LakeMountains,
    Fahrenbruch,
    BigSurWaves,
    #[default]
    Wellen,
}

impl Wallpaper {
    pub const ALL: [Wallpaper; 5] = [
        Wallpaper::BlueRoseLight,
        Wallpaper::LakeMountains,
        Wallpaper::Fahrenbruch,
        Wallpaper::BigSurWaves,
        Wallpaper::Wellen,
    ];

    /// Image path served by the site
    pub fn path(&self) -> &'static str {
        match self {
            Wallpaper::BlueRoseLight => "/images/Blaues und rosafarbenes Licht.jpg",
            Wallpaper::LakeMountains => {
                "/images/lake-mountains-rocks-sunrise-daylight-scenery-illustration-3840x2160-3773.jpg"
            }
            Wallpaper::Fahrenbruch => "/images/sean-fahrenbruch-g95tsUeCohM-unsplash.jpg",
            Wallpaper::BigSurWaves => {
                "/images/waves-macos-big-sur-colorful-dark-5k-6016x6016-4990.jpg"
            }
            Wallpaper::Wellen => "/images/wellen-20hintergrund-20wallpaper.jpg",
        }
    }

    pub fn from_path(path: &str) -> Result<Self, PrefsError> {
        Wallpaper::ALL
            .into_iter()
            .find(|w| w.path() == path)
            .ok_or_else(|| PrefsError::UnknownWallpaper(path.to_string()))
    }
}

impl TryFrom<String> for Wallpaper {
    type Error = PrefsError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Wallpaper::from_path(&path)
    }
}

impl From<Wallpaper> for String {
    fn from(w: Wallpaper) -> Self {
        w.path().to_string()
    }
}

/// Persisted desktop preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub wallpaper: Wallpaper,
}

impl Preferences {
    /// Read the wallpaper from a `document.cookie` string. Missing, malformed
    /// or unknown values fall back to the default.
    pub fn from_cookie(cookies: &str) -> Self {
        let wallpaper = match cookie_wallpaper(cookies) {
            Some(Ok(w)) => w,
            Some(Err(e)) => {
                log::warn!("Ignoring wallpaper cookie: {e}");
                Wallpaper::default()
            }
            None => Wallpaper::default(),
        };
        Self { wallpaper }
    }

    /// `Set-Cookie`-style string for `document.cookie`
    pub fn cookie(&self) -> String {
        format!(
            "{}={}; max-age={}; path=/; SameSite=Lax",
            STORAGE_KEY,
            percent_encode(self.wallpaper.path()),
            COOKIE_MAX_AGE
        )
    }

    /// Apply the LocalStorage value read on mount. Returns true when it won
    /// and the cookie needs rewriting.
    pub fn reconcile(&mut self, stored: Option<&str>) -> bool {
        let Some(stored) = stored else {
            return false;
        };
        match Wallpaper::from_path(stored) {
            Ok(w) if w != self.wallpaper => {
                log::debug!("LocalStorage wallpaper overrides cookie: {}", w.path());
                self.wallpaper = w;
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("Ignoring stored wallpaper: {e}");
                false
            }
        }
    }

    pub fn set_wallpaper(&mut self, path: &str) -> Result<(), PrefsError> {
        self.wallpaper = Wallpaper::from_path(path)?;
        Ok(())
    }

    /// Load from the cookie, then reconcile with LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let cookies = crate::platform::web::read_cookies().unwrap_or_default();
        let mut prefs = Self::from_cookie(&cookies);

        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(STORAGE_KEY).ok())
            .flatten();
        if prefs.reconcile(stored.as_deref()) {
            prefs.write_cookie();
        }
        log::info!("Wallpaper: {}", prefs.wallpaper.path());
        prefs
    }

    /// Write both stores (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if let Some(storage) = storage {
            let _ = storage.set_item(STORAGE_KEY, self.wallpaper.path());
        }
        self.write_cookie();
        log::info!("Preferences saved");
    }

    #[cfg(target_arch = "wasm32")]
    fn write_cookie(&self) {
        if let Err(e) = crate::platform::web::write_cookie(&self.cookie()) {
            log::warn!("Could not write cookie: {e:?}");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Find and decode our entry in a `name=value; name=value` cookie string
fn cookie_wallpaper(cookies: &str) -> Option<Result<Wallpaper, PrefsError>> {
    let raw = cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == STORAGE_KEY).then_some(value)
    })?;
    Some(percent_decode(raw).and_then(|path| Wallpaper::from_path(&path)))
}

/// Same escaping as `encodeURIComponent`
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

pub fn percent_decode(s: &str) -> Result<String, PrefsError> {
    let malformed = || PrefsError::MalformedCookie(s.to_string());
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3).ok_or_else(malformed)?;
            out.push(u8::from_str_radix(hex, 16).map_err(|_| malformed())?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| malformed())
}
