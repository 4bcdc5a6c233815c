use serde::Deserialize;
use strum::{Display, EnumString};

/// What a bound key asks the animation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Deserialize)]
pub enum Action {
    Quit,
}
