//! Light/dark theme handling.
//!
//! The initial theme is resolved once at startup: a stored `"theme"`
//! preference wins, otherwise the terminal's reported background decides.
//! Toggling flips the theme and writes the new value back to the store.
use ratatui::style::Color;
use tracing::{info, warn};

use crate::dataset::Accent;
use crate::storage::PreferenceStore;

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored value. Anything other than `"light"` or `"dark"` is
    /// rejected.
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: hex((0xfa, 0xfa, 0xfa)),
                foreground: hex((0x18, 0x18, 0x1b)),
                muted: hex((0x71, 0x71, 0x7a)),
                border: hex((0xd4, 0xd4, 0xd8)),
                primary: hex((0x04, 0x78, 0x57)),
                card: hex((0xff, 0xff, 0xff)),
                highlight: hex((0x25, 0x63, 0xeb)),
            },
            Theme::Dark => Palette {
                background: hex((0x09, 0x09, 0x0b)),
                foreground: hex((0xf4, 0xf4, 0xf5)),
                muted: hex((0xa1, 0xa1, 0xaa)),
                border: hex((0x3f, 0x3f, 0x46)),
                primary: hex((0x34, 0xd3, 0x99)),
                card: hex((0x18, 0x18, 0x1b)),
                highlight: hex((0x60, 0xa5, 0xfa)),
            },
        }
    }
}

/// Colors used by the renderer for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    /// Command text.
    pub primary: Color,
    pub card: Color,
    /// Focused borders and the match count.
    pub highlight: Color,
}

fn hex(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Dot color for a category accent.
pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Emerald => hex((0x10, 0xb9, 0x81)),
        Accent::Cyan => hex((0x06, 0xb6, 0xd4)),
        Accent::Violet => hex((0x8b, 0x5c, 0xf6)),
        Accent::Amber => hex((0xf5, 0x9e, 0x0b)),
        Accent::Sky => hex((0x0e, 0xa5, 0xe9)),
        Accent::Rose => hex((0xf4, 0x3f, 0x5e)),
        Accent::Fuchsia => hex((0xd9, 0x46, 0xef)),
        Accent::Default => hex((0x71, 0x71, 0x7a)),
    }
}

/// Source of the environment's preferred color scheme.
pub trait ColorSchemeProbe {
    /// `Some(true)` for dark, `Some(false)` for light, `None` when unknown.
    fn prefers_dark(&self) -> Option<bool>;
}

/// Reads the terminal background from `COLORFGBG` (`fg;bg` or `fg;x;bg`).
#[derive(Debug, Default)]
pub struct EnvColorScheme;

impl ColorSchemeProbe for EnvColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| colorfgbg_prefers_dark(&value))
    }
}

/// Interprets a `COLORFGBG` value. ANSI background colors 0-6 and 8 are dark.
pub fn colorfgbg_prefers_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}

/// A fixed answer, for tests and for forcing a scheme.
#[derive(Debug, Clone, Copy)]
pub struct FixedColorScheme(pub Option<bool>);

impl ColorSchemeProbe for FixedColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

/// Owns the current theme and the store it is persisted to.
pub struct ThemeController {
    theme: Theme,
    store: Box<dyn PreferenceStore>,
}

impl ThemeController {
    /// Resolves the initial theme. The probe is consulted only when the store
    /// holds no usable value.
    pub fn initialize(store: Box<dyn PreferenceStore>, probe: &dyn ColorSchemeProbe) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(Some(value)) => {
                let parsed = Theme::parse(&value);
                if parsed.is_none() {
                    warn!("Ignoring unrecognized stored theme {:?}", value);
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                None
            }
        };

        let theme = stored.unwrap_or_else(|| match probe.prefers_dark() {
            Some(true) => Theme::Dark,
            _ => Theme::Light,
        });
        info!("Initial theme: {}", theme.as_str());
        ThemeController { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Flips the theme and persists it. A failed write is logged; the new
    /// theme still applies for this session.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            warn!("Could not persist theme preference: {}", e);
        }
        info!("Theme switched to {}", self.theme.as_str());
        self.theme
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        &*self.store
    }
}
