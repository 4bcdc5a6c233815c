//! Tree geometry, reveal/removal ordering and frame rendering.

pub mod layout;
pub mod render;
pub mod sequence;

use std::str::FromStr;

use rand::{rngs::StdRng, SeedableRng};
use strum::{Display, EnumIter, IntoEnumIterator, VariantNames};

use crate::errors::ConfigurationError;

pub use layout::{Category, Cell, CellId, Row, TreeLayout, TreeShape};

/// Overall silhouette of the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum TreeMode {
    Single,
    #[default]
    Double,
}

/// Order in which cells appear during the build phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Sequential,
    Random,
}

/// Order in which cells disappear during the teardown phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum TeardownMode {
    #[default]
    Random,
    Reverse,
}

macro_rules! parse_choice {
    ( $( ($choice:ty, $kind:literal) ),* ) => {
        $(
            impl FromStr for $choice {
                type Err = ConfigurationError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let wanted = s.trim();
                    <$choice>::iter().find(|choice| choice.to_string().eq_ignore_ascii_case(wanted)).ok_or_else(|| {
                        ConfigurationError::UnknownChoice {
                            kind: $kind,
                            value: s.to_string(),
                            expected: <$choice>::VARIANTS.join(", "),
                        }
                    })
                }
            }

            serde_plain::derive_deserialize_from_fromstr!($choice, $kind);
        )*
    };
}

parse_choice![(TreeMode, "tree mode"), (BuildMode, "build mode"), (TeardownMode, "teardown mode")];

/// Random source for one stage of a run: reproducible when seeded, fresh entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
