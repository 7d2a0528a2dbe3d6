//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom hex overrides from the
//! `[theme.custom]` config table.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Explorer tree
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_cursor_bg: Color,
    pub disk_fg: Color,
    pub partition_fg: Color,
    pub dir_fg: Color,
    pub file_fg: Color,
    pub info_fg: Color,

    // Detail panel
    pub detail_fg: Color,
    pub detail_label_fg: Color,

    // Command terminal
    pub terminal_fg: Color,
    pub terminal_prompt_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,
    pub overlay_bg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_cursor_bg: Color::Rgb(49, 50, 68),      // #313244 (surface0)
        disk_fg: Color::Rgb(250, 179, 135),          // #fab387 (peach)
        partition_fg: Color::Rgb(148, 226, 213),     // #94e2d5 (teal)
        dir_fg: Color::Rgb(137, 180, 250),           // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),
        info_fg: Color::Rgb(108, 112, 134), // #6c7086 (overlay0)

        detail_fg: Color::Rgb(205, 214, 244),
        detail_label_fg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)

        terminal_fg: Color::Rgb(186, 194, 222), // #bac2de (subtext1)
        terminal_prompt_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250),
        overlay_bg: Color::Rgb(49, 50, 68),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),            // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),
        tree_cursor_bg: Color::Rgb(230, 233, 239), // #e6e9ef (surface0)
        disk_fg: Color::Rgb(254, 100, 11),         // #fe640b (peach)
        partition_fg: Color::Rgb(23, 146, 153),    // #179299 (teal)
        dir_fg: Color::Rgb(30, 102, 245),          // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),
        info_fg: Color::Rgb(156, 160, 176), // #9ca0b0 (overlay0)

        detail_fg: Color::Rgb(76, 79, 105),
        detail_label_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)

        terminal_fg: Color::Rgb(92, 95, 119), // #5c5f77 (subtext1)
        terminal_prompt_fg: Color::Rgb(64, 160, 43), // #40a02b (green)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),
        overlay_bg: Color::Rgb(230, 233, 239),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        accent_fg: Color::Rgb(136, 57, 239),
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme.as_deref().unwrap_or("dark") {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        other => {
            if other != "dark" {
                tracing::warn!(scheme = other, "unknown theme scheme, using dark");
            }
            dark_theme()
        }
    }
}

/// Apply custom hex color overrides on top of an existing theme. Malformed
/// values keep the existing color.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides: [(&Option<String>, &mut Color); 17] = [
        (&custom.tree_fg, &mut theme.tree_fg),
        (&custom.tree_selected_bg, &mut theme.tree_selected_bg),
        (&custom.tree_selected_fg, &mut theme.tree_selected_fg),
        (&custom.tree_cursor_bg, &mut theme.tree_cursor_bg),
        (&custom.disk_fg, &mut theme.disk_fg),
        (&custom.partition_fg, &mut theme.partition_fg),
        (&custom.dir_fg, &mut theme.dir_fg),
        (&custom.file_fg, &mut theme.file_fg),
        (&custom.info_fg, &mut theme.info_fg),
        (&custom.detail_fg, &mut theme.detail_fg),
        (&custom.detail_label_fg, &mut theme.detail_label_fg),
        (&custom.terminal_fg, &mut theme.terminal_fg),
        (&custom.terminal_prompt_fg, &mut theme.terminal_prompt_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.status_fg, &mut theme.status_fg),
        (&custom.border_fg, &mut theme.border_fg),
        (&custom.border_focused_fg, &mut theme.border_focused_fg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
