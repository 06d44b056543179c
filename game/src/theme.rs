use engine::graphics::Color;

// Festive palette: deep night-sky background, pine and holly tones for the
// low tiles, brightening toward gold as values climb.
pub const BACKGROUND: Color = [18, 32, 48, 255];
pub const BOARD_FRAME: Color = [120, 140, 160, 255];
pub const EMPTY_CELL: Color = [30, 48, 68, 255];
pub const HUD_TEXT: Color = [230, 236, 244, 255];
pub const BANNER_TEXT: Color = [255, 214, 120, 255];

/// Festive label for a tile: the low tiles show their symbol from the
/// original theme, higher tiles show their number, empty cells show
/// nothing.
pub fn symbol_for_tile(value: u32) -> Option<String> {
    match value {
        0 => None,
        2 => Some("GIFT".to_string()),
        4 => Some("CANDY".to_string()),
        8 => Some("TREE".to_string()),
        16 => Some("SANTA".to_string()),
        v if v.is_power_of_two() => Some(v.to_string()),
        _ => None,
    }
}

pub fn color_for_tile(value: u32) -> Color {
    match value {
        0 => EMPTY_CELL,
        2 => [178, 34, 52, 255],   // gift red
        4 => [214, 214, 214, 255], // candy-cane white
        8 => [34, 120, 60, 255],   // tree green
        16 => [200, 40, 40, 255],  // santa red
        32 => [70, 130, 180, 255],
        64 => [148, 96, 190, 255],
        128 => [212, 160, 60, 255],
        256 => [224, 178, 48, 255],
        512 => [235, 194, 40, 255],
        1024 => [245, 208, 32, 255],
        2048 => [255, 221, 24, 255],
        _ => [255, 236, 120, 255], // beyond 2048: pale gold
    }
}

/// Dark text on the light tiles, light text everywhere else.
pub fn text_color_for_tile(value: u32) -> Color {
    match value {
        4 | 128 | 256 | 512 | 1024 | 2048 => [40, 40, 40, 255],
        v if v > 2048 => [40, 40, 40, 255],
        _ => [245, 245, 245, 255],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_tiles_use_the_festive_symbols() {
        assert_eq!(symbol_for_tile(2).as_deref(), Some("GIFT"));
        assert_eq!(symbol_for_tile(4).as_deref(), Some("CANDY"));
        assert_eq!(symbol_for_tile(8).as_deref(), Some("TREE"));
        assert_eq!(symbol_for_tile(16).as_deref(), Some("SANTA"));
    }

    #[test]
    fn high_tiles_fall_back_to_numbers() {
        assert_eq!(symbol_for_tile(32).as_deref(), Some("32"));
        assert_eq!(symbol_for_tile(2048).as_deref(), Some("2048"));
    }

    #[test]
    fn empty_and_invalid_values_render_blank() {
        assert_eq!(symbol_for_tile(0), None);
        assert_eq!(symbol_for_tile(12), None);
    }

    #[test]
    fn every_tile_value_has_a_color() {
        for exp in 1..=16 {
            let value = 1u32 << exp;
            assert_ne!(color_for_tile(value), EMPTY_CELL);
        }
    }
}
