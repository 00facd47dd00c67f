use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Display label of a tracked symbol. Declaration order is the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Corn,
    Gasoline,
    Nasdaq,
}

impl Label {
    pub const ALL: [Label; 3] = [Self::Corn, Self::Gasoline, Self::Nasdaq];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Corn => "corn",
            Self::Gasoline => "gasoline",
            Self::Nasdaq => "nasdaq",
        }
    }

    /// Chart color used by the rendering layer.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Corn => "green",
            Self::Gasoline => "red",
            Self::Nasdaq => "blue",
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
