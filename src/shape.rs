//! Shape catalogs for body modules, eye frames and eye balls.
//!
//! Each catalog is a closed enum. Names follow the kebab-case strings used in
//! saved configs (`"classy-rounded"`, `"leaf"`, ...). Parsing never fails: a
//! name outside the catalog resolves to `Square`, and the numbered `patternN`
//! entries are accepted but draw as `Square` too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! shape_catalog {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum $name {
            #[default]
            $($variant,)+
        }

        impl $name {
            /// Every catalog entry, in catalog order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The catalog name of this shape.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Parses a catalog name, returning `None` for unknown names.
            pub fn lookup(name: &str) -> Option<Self> {
                match name.trim() {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::lookup(name).unwrap_or_else(|| {
                    tracing::debug!(shape = name, catalog = stringify!($name), "Unknown shape, using square");
                    $name::Square
                })
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from(name.as_str())
            }
        }

        impl From<$name> for &'static str {
            fn from(shape: $name) -> Self {
                shape.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

shape_catalog! {
    /// Shape drawn for each dark data module.
    BodyShape {
        Square => "square",
        Rounded => "rounded",
        Dots => "dots",
        ExtraRounded => "extra-rounded",
        Classy => "classy",
        ClassyRounded => "classy-rounded",
        DotsRounded => "dots-rounded",
        RoundedDots => "rounded-dots",
        Flower => "flower",
        Star => "star",
        Pattern1 => "pattern1",
        Pattern2 => "pattern2",
        Pattern3 => "pattern3",
        Pattern4 => "pattern4",
        Pattern5 => "pattern5",
        Pattern6 => "pattern6",
        Pattern7 => "pattern7",
        Pattern8 => "pattern8",
    }
}

shape_catalog! {
    /// Shape of the outer 7×7 ring of a finder pattern.
    EyeFrameShape {
        Square => "square",
        Rounded => "rounded",
        Circle => "circle",
        RoundedSingle => "rounded-single",
        RoundedDouble => "rounded-double",
        SquareSingle => "square-single",
        SquareDouble => "square-double",
        Leaf => "leaf",
        LeafRounded => "leaf-rounded",
        Diamond => "diamond",
        DiamondRounded => "diamond-rounded",
    }
}

shape_catalog! {
    /// Shape of the inner 3×3 ball of a finder pattern.
    EyeBallShape {
        Square => "square",
        Circle => "circle",
        Rounded => "rounded",
        Diamond => "diamond",
        Leaf => "leaf",
        Star => "star",
        Flower => "flower",
        Dot => "dot",
        RoundedSquare => "rounded-square",
        RoundedDiamond => "rounded-diamond",
        Pattern1 => "pattern1",
        Pattern2 => "pattern2",
        Pattern3 => "pattern3",
        Pattern4 => "pattern4",
        Pattern5 => "pattern5",
        Pattern6 => "pattern6",
    }
}

impl BodyShape {
    /// Returns true for entries without geometry of their own.
    pub fn is_pattern(&self) -> bool {
        self.as_str().starts_with("pattern")
    }

    /// Returns true if a code drawn with this shape alone, with no plain
    /// module underneath, still reads at the default module size.
    ///
    /// Shapes that leave wide gaps between neighbouring modules break the
    /// timing and alignment patterns.
    pub fn keeps_structure(&self) -> bool {
        !matches!(
            self,
            BodyShape::Dots | BodyShape::DotsRounded | BodyShape::RoundedDots | BodyShape::Star
        )
    }
}

impl EyeFrameShape {
    /// Returns true if this frame keeps the 1:1:3:1:1 finder profile when
    /// drawn without plain squares underneath.
    pub fn keeps_structure(&self) -> bool {
        matches!(
            self,
            EyeFrameShape::Square
                | EyeFrameShape::SquareSingle
                | EyeFrameShape::SquareDouble
                | EyeFrameShape::RoundedSingle
                | EyeFrameShape::RoundedDouble
        )
    }
}

impl EyeBallShape {
    /// Returns true for entries without geometry of their own.
    pub fn is_pattern(&self) -> bool {
        self.as_str().starts_with("pattern")
    }

    /// Returns true if this ball still fills the 3×3 finder center when drawn
    /// without a plain square underneath. Only the entries that draw as
    /// `square` do.
    pub fn keeps_structure(&self) -> bool {
        self.is_pattern()
            || matches!(
                self,
                EyeBallShape::Square | EyeBallShape::RoundedSquare | EyeBallShape::RoundedDiamond
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(BodyShape::ALL.len(), 18);
        assert_eq!(EyeFrameShape::ALL.len(), 11);
        assert_eq!(EyeBallShape::ALL.len(), 16);
    }

    #[test]
    fn names_roundtrip() {
        for shape in BodyShape::ALL {
            assert_eq!(BodyShape::from(shape.as_str()), *shape);
        }
        for shape in EyeFrameShape::ALL {
            assert_eq!(EyeFrameShape::from(shape.as_str()), *shape);
        }
        for shape in EyeBallShape::ALL {
            assert_eq!(EyeBallShape::from(shape.as_str()), *shape);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_square() {
        assert_eq!(BodyShape::from("hexagon"), BodyShape::Square);
        assert_eq!(EyeFrameShape::from(""), EyeFrameShape::Square);
        assert_eq!("pattern99".parse::<EyeBallShape>().unwrap(), EyeBallShape::Square);
        assert_eq!(BodyShape::lookup("hexagon"), None);
    }

    #[test]
    fn serde_uses_catalog_names() {
        let json = serde_json::to_string(&EyeFrameShape::DiamondRounded).unwrap();
        assert_eq!(json, "\"diamond-rounded\"");
        let parsed: BodyShape = serde_json::from_str("\"classy-rounded\"").unwrap();
        assert_eq!(parsed, BodyShape::ClassyRounded);
        let unknown: EyeBallShape = serde_json::from_str("\"spiral\"").unwrap();
        assert_eq!(unknown, EyeBallShape::Square);
    }

    #[test]
    fn pattern_entries_are_flagged() {
        assert!(BodyShape::Pattern8.is_pattern());
        assert!(!BodyShape::Star.is_pattern());
        assert!(EyeBallShape::Pattern1.is_pattern());
    }

    #[test]
    fn structural_shapes() {
        let body: Vec<_> = BodyShape::ALL.iter().filter(|s| !s.keeps_structure()).collect();
        assert_eq!(
            body,
            [&BodyShape::Dots, &BodyShape::DotsRounded, &BodyShape::RoundedDots, &BodyShape::Star]
        );

        assert_eq!(EyeFrameShape::ALL.iter().filter(|s| s.keeps_structure()).count(), 5);
        assert!(!EyeFrameShape::Circle.keeps_structure());
        assert!(!EyeFrameShape::Rounded.keeps_structure());

        let balls: Vec<_> = EyeBallShape::ALL.iter().filter(|s| !s.keeps_structure()).collect();
        assert_eq!(balls.len(), 7);
        assert!(EyeBallShape::RoundedDiamond.keeps_structure());
        assert!(!EyeBallShape::Dot.keeps_structure());
    }
}
