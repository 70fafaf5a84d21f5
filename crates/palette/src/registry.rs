use serde::{Deserialize, Serialize};

use crate::Rgb;

/// A named entry of the built-in color catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColor {
    /// Munsell-style hue code ("5R".."5RP"), or "W"/"Bk"/"Gy" for neutrals.
    pub code: String,
    /// Korean display name.
    pub name: String,
    pub rgb: Rgb,
}

/// Wheel neighbours of a chromatic color: the two adjacent hues and the
/// directly opposing one.
#[derive(Clone, Copy, Debug)]
pub struct WheelRelations<'a> {
    pub similar: [&'a CatalogColor; 2],
    pub opposite: &'a CatalogColor,
}

macro_rules! colors {
    ($(($code:expr, $name:expr, $r:expr, $g:expr, $b:expr)),* $(,)?) => {
        vec![
            $(
                CatalogColor {
                    code: $code.to_string(),
                    name: $name.to_string(),
                    rgb: Rgb::new($r, $g, $b),
                },
            )*
        ]
    };
}

/// Hue codes counted as warm and cool. Domain facts, fixed with the catalog.
const WARM_CODES: [&str; 3] = ["5R", "5YR", "5Y"];
const COOL_CODES: [&str; 3] = ["5PB", "5B", "5BG"];

/// The fixed color catalog: ten chromatic hues in cyclic wheel order, the
/// white/black neutral pair, and a derived gray that only exists for lookup.
pub struct ColorRegistry {
    wheel: Vec<CatalogColor>,
    neutrals: Vec<CatalogColor>,
    gray: CatalogColor,
}

impl ColorRegistry {
    pub fn new() -> Self {
        // The wheel order defines adjacency and opposition, so it must stay
        // exactly as listed: index +-1 are the similar hues, index +5 the
        // opposite one.
        let wheel = colors![
            ("5R", "빨강", 0xee, 0x3f, 0x40),
            ("5YR", "주황", 0xf6, 0x88, 0x2c),
            ("5Y", "노랑", 0xff, 0xde, 0x17),
            ("5GY", "연두", 0xb2, 0xd2, 0x35),
            ("5G", "초록", 0x00, 0xa6, 0x51),
            ("5BG", "청록", 0x00, 0xa9, 0x9d),
            ("5B", "파랑", 0x00, 0x8e, 0xd5),
            ("5PB", "남색", 0x3f, 0x51, 0xb5),
            ("5P", "보라", 0x8b, 0x5c, 0xf6),
            ("5RP", "자주", 0xd0, 0x36, 0x8a),
        ];

        let neutrals = colors![
            ("W", "흰색", 0xff, 0xff, 0xff),
            ("Bk", "검정색", 0x00, 0x00, 0x00),
        ];

        let gray = CatalogColor {
            code: "Gy".to_string(),
            name: "회색".to_string(),
            rgb: Rgb::new(0x7a, 0x7a, 0x7a),
        };

        ColorRegistry {
            wheel,
            neutrals,
            gray,
        }
    }

    /// The ten chromatic hues in wheel order.
    pub fn wheel(&self) -> &[CatalogColor] {
        &self.wheel
    }

    /// White and black. Gray is not a neutral here; it is never a mixing input.
    pub fn neutrals(&self) -> &[CatalogColor] {
        &self.neutrals
    }

    pub fn white(&self) -> &CatalogColor {
        &self.neutrals[0]
    }

    pub fn black(&self) -> &CatalogColor {
        &self.neutrals[1]
    }

    /// The derived gray, present only in the combined lookup list.
    pub fn gray(&self) -> &CatalogColor {
        &self.gray
    }

    /// Every color selectable as a mixing input: the wheel plus the neutrals.
    pub fn mixing_colors(&self) -> Vec<&CatalogColor> {
        self.wheel.iter().chain(self.neutrals.iter()).collect()
    }

    /// The combined lookup list: wheel, neutrals, and the derived gray.
    pub fn all_colors(&self) -> Vec<&CatalogColor> {
        self.wheel
            .iter()
            .chain(self.neutrals.iter())
            .chain(std::iter::once(&self.gray))
            .collect()
    }

    pub fn find_by_rgb(&self, rgb: Rgb) -> Option<&CatalogColor> {
        self.all_colors().into_iter().find(|c| c.rgb == rgb)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&CatalogColor> {
        self.all_colors().into_iter().find(|c| c.code == code)
    }

    pub fn is_neutral(&self, rgb: Rgb) -> bool {
        self.neutrals.iter().any(|c| c.rgb == rgb)
    }

    /// Position of a color on the wheel. Neutrals and blends return `None`.
    pub fn wheel_index(&self, rgb: Rgb) -> Option<usize> {
        self.wheel.iter().position(|c| c.rgb == rgb)
    }

    /// Similar and opposite hues of a wheel color, `None` off the wheel.
    pub fn relations(&self, rgb: Rgb) -> Option<WheelRelations<'_>> {
        let index = self.wheel_index(rgb)?;
        let len = self.wheel.len();
        Some(WheelRelations {
            similar: [
                &self.wheel[(index + len - 1) % len],
                &self.wheel[(index + 1) % len],
            ],
            opposite: &self.wheel[(index + len / 2) % len],
        })
    }

    /// Two colors are opposite when both sit on the wheel exactly half its
    /// length apart. Anything off the wheel is never opposite.
    pub fn are_opposites(&self, a: Rgb, b: Rgb) -> bool {
        match (self.wheel_index(a), self.wheel_index(b)) {
            (Some(first), Some(second)) => {
                first.abs_diff(second) == self.wheel.len() / 2
            }
            _ => false,
        }
    }

    pub fn warm_colors(&self) -> Vec<&CatalogColor> {
        WARM_CODES
            .iter()
            .filter_map(|code| self.find_by_code(code))
            .collect()
    }

    pub fn cool_colors(&self) -> Vec<&CatalogColor> {
        COOL_CODES
            .iter()
            .filter_map(|code| self.find_by_code(code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_order() {
        let registry = ColorRegistry::new();
        let codes: Vec<&str> = registry.wheel().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(
            codes,
            ["5R", "5YR", "5Y", "5GY", "5G", "5BG", "5B", "5PB", "5P", "5RP"]
        );
    }

    #[test]
    fn test_wheel_length_is_even() {
        // Opposition (index + half the length) is only well defined for an
        // even wheel.
        let registry = ColorRegistry::new();
        assert_eq!(registry.wheel().len(), 10);
        assert_eq!(registry.wheel().len() % 2, 0);
    }

    #[test]
    fn test_mixing_colors_exclude_gray() {
        let registry = ColorRegistry::new();
        let mixing = registry.mixing_colors();
        assert_eq!(mixing.len(), 12);
        assert!(mixing.iter().all(|c| c.code != "Gy"));

        let all = registry.all_colors();
        assert_eq!(all.len(), 13);
        assert!(all.iter().any(|c| c.code == "Gy"));
    }

    #[test]
    fn test_lookup_by_rgb_and_code() {
        let registry = ColorRegistry::new();

        let red = registry.find_by_code("5R").unwrap();
        assert_eq!(red.name, "빨강");
        assert_eq!(red.rgb, Rgb::from_hex("#ee3f40").unwrap());

        let gray = registry.find_by_rgb(Rgb::from_hex("#7a7a7a").unwrap()).unwrap();
        assert_eq!(gray.code, "Gy");

        assert!(registry.find_by_rgb(Rgb::new(1, 2, 3)).is_none());
        assert!(registry.find_by_code("5X").is_none());
    }

    #[test]
    fn test_relations_of_red() {
        let registry = ColorRegistry::new();
        let red = registry.find_by_code("5R").unwrap().rgb;

        let relations = registry.relations(red).unwrap();
        assert_eq!(relations.similar[0].code, "5RP");
        assert_eq!(relations.similar[1].code, "5YR");
        assert_eq!(relations.opposite.code, "5BG");
    }

    #[test]
    fn test_relations_wrap_around() {
        let registry = ColorRegistry::new();
        let magenta = registry.find_by_code("5RP").unwrap().rgb;

        let relations = registry.relations(magenta).unwrap();
        assert_eq!(relations.similar[0].code, "5P");
        assert_eq!(relations.similar[1].code, "5R");
        assert_eq!(relations.opposite.code, "5G");
    }

    #[test]
    fn test_neutrals_have_no_relations() {
        let registry = ColorRegistry::new();
        let white = registry.white().rgb;
        assert!(registry.relations(white).is_none());
        assert!(registry.wheel_index(white).is_none());
    }

    #[test]
    fn test_are_opposites() {
        let registry = ColorRegistry::new();
        let red = registry.find_by_code("5R").unwrap().rgb;
        let teal = registry.find_by_code("5BG").unwrap().rgb;
        let orange = registry.find_by_code("5YR").unwrap().rgb;
        let white = registry.white().rgb;
        let black = registry.black().rgb;

        assert!(registry.are_opposites(red, teal));
        assert!(registry.are_opposites(teal, red));
        assert!(!registry.are_opposites(red, orange));
        assert!(!registry.are_opposites(white, black));
        assert!(!registry.are_opposites(red, white));
    }

    #[test]
    fn test_warm_and_cool_groups() {
        let registry = ColorRegistry::new();

        let warm: Vec<&str> = registry.warm_colors().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(warm, ["5R", "5YR", "5Y"]);

        let cool: Vec<&str> = registry.cool_colors().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(cool, ["5PB", "5B", "5BG"]);
    }
}
