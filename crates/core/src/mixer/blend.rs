use chromalab_palette::{CatalogColor, ColorRegistry, Rgb};

/// Name given to blends with no special naming rule.
pub const GENERIC_BLEND_NAME: &str = "새로운 색";

const GRAY_BLEND_NAME: &str = "회색";

// Complementary pigments cancel into a muddy brown rather than the hue the
// straight RGB line would pass through.
const MUDDY_MIDPOINT: Rgb = Rgb::new(0x8d, 0x6e, 0x63);

/// A color produced by the mixer, carrying its derived name.
#[derive(Clone, Debug, PartialEq)]
pub struct MixedColor {
    pub name: String,
    pub rgb: Rgb,
}

/// Outcome of mixing two ingredients.
///
/// Mixing a color with itself yields the catalog entry untouched; every
/// other combination produces a new blended color.
#[derive(Clone, Debug, PartialEq)]
pub enum Mix {
    Catalog(CatalogColor),
    Blended(MixedColor),
}

impl Mix {
    pub fn name(&self) -> &str {
        match self {
            Mix::Catalog(color) => &color.name,
            Mix::Blended(color) => &color.name,
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            Mix::Catalog(color) => color.rgb,
            Mix::Blended(color) => color.rgb,
        }
    }

    pub fn is_blended(&self) -> bool {
        matches!(self, Mix::Blended(_))
    }
}

/// Mix two ingredients at `ratio`, where 0.0 is all `first` and 1.0 is all
/// `second`. The ratio is clamped into that range.
///
/// Naming rules, in order:
/// - identical ingredients pass through unchanged
/// - two neutrals make "회색"
/// - one neutral lightens ("밝은 ...") or darkens ("어두운 ...") the other
///   ingredient depending on which neutral it is
/// - everything else is a "새로운 색"
///
/// Opposite wheel hues interpolate through [`MUDDY_MIDPOINT`] instead of the
/// straight line; colors the registry does not know mix as plain chromatics.
pub fn mix(registry: &ColorRegistry, first: &CatalogColor, second: &CatalogColor, ratio: f64) -> Mix {
    let ratio = ratio.clamp(0.0, 1.0);

    if first.rgb == second.rgb {
        return Mix::Catalog(first.clone());
    }

    let first_neutral = registry.is_neutral(first.rgb);
    let second_neutral = registry.is_neutral(second.rgb);

    if first_neutral || second_neutral {
        let rgb = first.rgb.lerp(&second.rgb, ratio);
        let name = if first_neutral && second_neutral {
            // The only distinct neutral pair is white and black.
            GRAY_BLEND_NAME.to_string()
        } else {
            let (neutral, other) = if first_neutral {
                (first, second)
            } else {
                (second, first)
            };
            if neutral.rgb == registry.white().rgb {
                format!("밝은 {}", other.name)
            } else {
                format!("어두운 {}", other.name)
            }
        };
        return Mix::Blended(MixedColor { name, rgb });
    }

    let rgb = if registry.are_opposites(first.rgb, second.rgb) {
        if ratio <= 0.5 {
            first.rgb.lerp(&MUDDY_MIDPOINT, ratio * 2.0)
        } else {
            MUDDY_MIDPOINT.lerp(&second.rgb, (ratio - 0.5) * 2.0)
        }
    } else {
        first.rgb.lerp(&second.rgb, ratio)
    };

    Mix::Blended(MixedColor {
        name: GENERIC_BLEND_NAME.to_string(),
        rgb,
    })
}
