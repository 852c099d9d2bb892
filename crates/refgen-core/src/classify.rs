//! The type-code codec.
//!
//! Arena and task configurations name objects with compact codes:
//!
//! | Code | Category | Form | Color | Orientation |
//! |------|----------|------|-------|-------------|
//! | `S40_40_H` | [`Category::Cavity`] | `S40_40` | `DEFAULT` | [`Orientation::Horizontal`] |
//! | `F20_20_B` | [`Category::ColoredObject`] | `F20_20` | `B` | [`Orientation::Free`] |
//! | `CONTAINER_RED` | [`Category::Container`] | `DEFAULT` | `RED` | [`Orientation::Free`] |
//! | `M20` | [`Category::PlainObject`] | `M20` | `DEFAULT` | [`Orientation::Free`] |
//!
//! [`classify`] is the single decoding entry point. The suffix rules are
//! checked before the container prefix, so `CONTAINER_B` decodes as a
//! colored object of form `CONTAINER`.

use std::fmt;

use crate::error::TypeCodeError;

/// Prefix marking container codes.
pub const CONTAINER_PREFIX: &str = "CONTAINER_";

/// Placeholder used for forms and colors a category does not carry.
pub const DEFAULT_ATTRIBUTE: &str = "DEFAULT";

/// Semantic category of an object type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Not decoded from a code.
    #[default]
    Unknown,
    /// An object identified by its form alone.
    PlainObject,
    /// An object identified by form and color (`_G` / `_B` suffix).
    ColoredObject,
    /// A precision-placement receptacle (`_H` / `_V` suffix).
    Cavity,
    /// A container keyed by color (`CONTAINER_` prefix).
    Container,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cavity => write!(f, "Cavity"),
            Self::Container => write!(f, "Container"),
            Self::ColoredObject => write!(f, "Colored Object"),
            Self::PlainObject => write!(f, "Plain Object"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Orientation constraint of a cavity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// No constraint; objects may be placed in any orientation.
    #[default]
    Free,
    /// Object must be inserted upright.
    Vertical,
    /// Object must be inserted lying down.
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "V"),
            Self::Horizontal => write!(f, "H"),
            Self::Free => write!(f, "FREE"),
        }
    }
}

/// Structured form of a type code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Semantic category.
    pub category: Category,
    /// Shape identifier (e.g. `F20_20`), or `DEFAULT` for containers.
    pub form: String,
    /// Color suffix for colored objects and containers, else `DEFAULT`.
    pub color: String,
    /// Orientation constraint; only cavities carry a non-free value.
    pub orientation: Orientation,
}

impl Classification {
    /// Whether this type is something a robot transports (plain or
    /// colored object), as opposed to a receptacle.
    pub fn is_transportable(&self) -> bool {
        matches!(
            self.category,
            Category::PlainObject | Category::ColoredObject
        )
    }
}

/// Re-encodes the classification as a type code.
///
/// A cavity whose orientation was relaxed prints as `<form>_FREE`.
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Category::Cavity => write!(f, "{}_{}", self.form, self.orientation),
            Category::Container => write!(f, "{CONTAINER_PREFIX}{}", self.color),
            Category::ColoredObject => write!(f, "{}_{}", self.form, self.color),
            Category::PlainObject => write!(f, "{}", self.form),
            Category::Unknown => write!(f, "UNKNOWN OBJECT TYPE"),
        }
    }
}

/// Decode a type code.
///
/// Pure and total over codes of at least two characters.
///
/// # Errors
///
/// Returns [`TypeCodeError::TooShort`] for codes shorter than two
/// characters.
pub fn classify(code: &str) -> Result<Classification, TypeCodeError> {
    let mut tail = code.char_indices().rev();
    let (Some((last_idx, last)), Some((pre_idx, pre_last))) = (tail.next(), tail.next()) else {
        return Err(TypeCodeError::TooShort {
            code: code.to_string(),
        });
    };

    let category = match (pre_last, last) {
        ('_', 'H' | 'V') => Category::Cavity,
        ('_', 'G' | 'B') => Category::ColoredObject,
        _ if code.starts_with(CONTAINER_PREFIX) => Category::Container,
        _ => Category::PlainObject,
    };

    let form = match category {
        Category::Cavity | Category::ColoredObject => &code[..pre_idx],
        Category::Container => DEFAULT_ATTRIBUTE,
        Category::PlainObject | Category::Unknown => code,
    };

    let color = match category {
        Category::ColoredObject => &code[last_idx..],
        Category::Container => &code[CONTAINER_PREFIX.len()..],
        _ => DEFAULT_ATTRIBUTE,
    };

    let orientation = match (category, last) {
        (Category::Cavity, 'V') => Orientation::Vertical,
        (Category::Cavity, 'H') => Orientation::Horizontal,
        _ => Orientation::Free,
    };

    Ok(Classification {
        category,
        form: form.to_string(),
        color: color.to_string(),
        orientation,
    })
}
