use crate::parsing::normalize::is_numeric;
use serde::{Deserialize, Serialize};

/// Upper bound on product code length shared by every report family.
pub const MAX_CODE_LEN: usize = 12;

/// Line grammar used by the record parser.
///
/// The report families differ only in how long a product code may be and
/// whether the format marker is followed by a units-per-box multiplier
/// (`12 B 24`) or stands alone (`1 U`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub min_code_len: usize,
    #[serde(default = "default_max_code_len")]
    pub max_code_len: usize,
    /// Require a numeric token right after the `U`/`B` marker.
    #[serde(default)]
    pub require_units_multiplier: bool,
}

fn default_max_code_len() -> usize {
    MAX_CODE_LEN
}

impl Grammar {
    /// Packing lists: `CODE ... QTY FORMAT UNITS`.
    pub fn packing_list() -> Self {
        Grammar {
            min_code_len: 3,
            max_code_len: MAX_CODE_LEN,
            require_units_multiplier: true,
        }
    }

    /// Blue-box listings (RF625A): `CODE ... QTY FORMAT`.
    pub fn blue_boxes() -> Self {
        Grammar {
            min_code_len: 3,
            max_code_len: MAX_CODE_LEN,
            require_units_multiplier: false,
        }
    }

    pub fn is_code(&self, token: &str) -> bool {
        is_numeric(token) && (self.min_code_len..=self.max_code_len).contains(&token.len())
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::packing_list()
    }
}
