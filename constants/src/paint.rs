/// glTF material name marking the user-adjustable body paint.
pub const PAINT_MATERIAL_NAME: &str = "carpaint";

/// Neutral paint used for unknown colour names.
pub const DEFAULT_PAINT_HEX: &str = "#aaaaaa";

/// Registered colour names and the paint they map to.
pub const PAINT_PALETTE: [(&str, &str); 8] = [
    ("RED", "#c93030"),
    ("BLUE", "#2e4cad"),
    ("WHITE", "#ffffff"),
    ("BLACK", "#111111"),
    ("GREY", "#777777"),
    ("SILVER", "#cccccc"),
    ("YELLOW", "#e2e211"),
    ("GREEN", "#197d30"),
];

/// Map a registered colour name to a paint hex, case-insensitively.
pub fn colour_name_to_hex(name: Option<&str>) -> &'static str {
    let Some(name) = name else {
        return DEFAULT_PAINT_HEX;
    };

    PAINT_PALETTE
        .iter()
        .find(|(colour, _)| colour.eq_ignore_ascii_case(name.trim()))
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_PAINT_HEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names_map_to_fixed_hex() {
        assert_eq!(colour_name_to_hex(Some("RED")), "#c93030");
        assert_eq!(colour_name_to_hex(Some("BLUE")), "#2e4cad");
        assert_eq!(colour_name_to_hex(Some("WHITE")), "#ffffff");
        assert_eq!(colour_name_to_hex(Some("BLACK")), "#111111");
        assert_eq!(colour_name_to_hex(Some("GREY")), "#777777");
        assert_eq!(colour_name_to_hex(Some("SILVER")), "#cccccc");
        assert_eq!(colour_name_to_hex(Some("YELLOW")), "#e2e211");
        assert_eq!(colour_name_to_hex(Some("GREEN")), "#197d30");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(colour_name_to_hex(Some("red")), "#c93030");
        assert_eq!(colour_name_to_hex(Some("Silver")), "#cccccc");
    }

    #[test]
    fn test_unknown_or_missing_name_is_neutral() {
        assert_eq!(colour_name_to_hex(Some("MAROON")), DEFAULT_PAINT_HEX);
        assert_eq!(colour_name_to_hex(Some("")), DEFAULT_PAINT_HEX);
        assert_eq!(colour_name_to_hex(None), DEFAULT_PAINT_HEX);
    }
}
