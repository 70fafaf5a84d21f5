pub use registry::{CatalogColor, ColorRegistry, WheelRelations};
pub use rgb::{ParseRgbError, Rgb};

mod registry;
mod rgb;
