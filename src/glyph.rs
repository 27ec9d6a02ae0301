//! Category → display glyph mapping for the dashboard. A pure lookup with a
//! fixed fallback; it cannot fail.

use crate::incident::Category;

pub const FALLBACK_GLYPH: &str = "⚠️";

pub fn glyph_for(category: Category) -> &'static str {
    match category {
        Category::Fire => "🔥",
        Category::Medical => "🚑",
        Category::Flood => "🌊",
        Category::Chemical => "☢️",
        Category::Storm => "⛈️",
        Category::General => FALLBACK_GLYPH,
    }
}
