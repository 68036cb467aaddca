//! Synthetic badge images.
//!
//! Closing tier of the image cascade: a deterministic SVG badge built from
//! a fixed per-species palette and returned as a self-contained
//! `data:image/svg+xml;base64` URI, so the reference renders with no
//! further network fetch. Pure function of the palette table and its input.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use fauna_common::{ImageRef, SpeciesKey};

struct PaletteEntry {
    key: &'static str,
    color: &'static str,
    glyph: &'static str,
    label: &'static str,
}

const PALETTE: &[PaletteEntry] = &[
    PaletteEntry { key: "chat", color: "#FF6B6B", glyph: "🐱", label: "Chat" },
    PaletteEntry { key: "chien", color: "#4ECDC4", glyph: "🐕", label: "Chien" },
    PaletteEntry { key: "lion", color: "#FFD93D", glyph: "🦁", label: "Lion" },
    PaletteEntry { key: "elephant", color: "#95A5A6", glyph: "🐘", label: "Éléphant" },
    PaletteEntry { key: "tigre", color: "#FF8C00", glyph: "🐯", label: "Tigre" },
    PaletteEntry { key: "ours", color: "#8B4513", glyph: "🐻", label: "Ours" },
    PaletteEntry { key: "girafe", color: "#D4A574", glyph: "🦒", label: "Girafe" },
    PaletteEntry { key: "zebre", color: "#2C3E50", glyph: "🦓", label: "Zèbre" },
    PaletteEntry { key: "hippopotame", color: "#6C5B7B", glyph: "🦛", label: "Hippopotame" },
    PaletteEntry { key: "crocodile", color: "#27AE60", glyph: "🐊", label: "Crocodile" },
    PaletteEntry { key: "singe", color: "#8B6F47", glyph: "🐵", label: "Singe" },
    PaletteEntry { key: "leopard", color: "#B8860B", glyph: "🐆", label: "Léopard" },
    PaletteEntry { key: "panthere", color: "#1A1A1A", glyph: "🐆", label: "Panthère" },
    PaletteEntry { key: "rhinoceros", color: "#696969", glyph: "🦏", label: "Rhinocéros" },
    PaletteEntry { key: "antilope", color: "#A0826D", glyph: "🦌", label: "Antilope" },
    PaletteEntry { key: "buffle", color: "#654321", glyph: "🐃", label: "Buffle" },
    PaletteEntry { key: "hyene", color: "#8B7355", glyph: "🦒", label: "Hyène" },
    PaletteEntry { key: "autruche", color: "#8B7355", glyph: "🦅", label: "Autruche" },
    PaletteEntry { key: "serpent", color: "#4A7C59", glyph: "🐍", label: "Serpent" },
    PaletteEntry { key: "python", color: "#2F5233", glyph: "🐍", label: "Python" },
];

/// Fallback bucket for names the palette does not know.
const DEFAULT_COLOR: &str = "#667eea";
const DEFAULT_GLYPH: &str = "🐾";

/// Render the badge for `name` as a data URI. Identical input always
/// produces byte-identical output.
pub fn generate(name: &str) -> ImageRef {
    let key = SpeciesKey::new(name);
    let (color, glyph, label) = match PALETTE.iter().find(|entry| entry.key == key.as_str()) {
        Some(entry) => (entry.color, entry.glyph, entry.label.to_string()),
        None => (DEFAULT_COLOR, DEFAULT_GLYPH, name.to_string()),
    };

    let svg = render_svg(color, glyph, &label);
    ImageRef {
        url: format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)),
    }
}

/// Radial two-tone circular badge with the glyph and label beneath it.
fn render_svg(color: &str, glyph: &str, label: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400" viewBox="0 0 600 400">
  <defs>
    <linearGradient id="bgGrad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:{color};stop-opacity:0.15" />
      <stop offset="100%" style="stop-color:{color};stop-opacity:0.05" />
    </linearGradient>
  </defs>
  <rect width="600" height="400" fill="url(#bgGrad)"/>
  <circle cx="300" cy="180" r="90" fill="{color}" opacity="0.4"/>
  <circle cx="300" cy="150" r="70" fill="{color}" opacity="0.7"/>
  <text x="300" y="320" text-anchor="middle" font-size="32" font-weight="bold" fill="{color}">{glyph} {label}</text>
</svg>"##
    )
}
