use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper ninja style ("流派"), stored on the sheet as a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpperStyle {
    Hasuba,
    Kurama,
    Haguremono,
    Hirasaka,
    Otogi,
    Oni,
    Unknown(String),
}

impl UpperStyle {
    pub const HASUBA_CODE: &'static str = "a";
    pub const KURAMA_CODE: &'static str = "ab";
    pub const HAGUREMONO_CODE: &'static str = "bc";
    pub const HIRASAKA_CODE: &'static str = "cd";
    pub const OTOGI_CODE: &'static str = "de";
    pub const ONI_CODE: &'static str = "e";

    pub fn from_code(code: &str) -> Self {
        match code {
            Self::HASUBA_CODE => Self::Hasuba,
            Self::KURAMA_CODE => Self::Kurama,
            Self::HAGUREMONO_CODE => Self::Haguremono,
            Self::HIRASAKA_CODE => Self::Hirasaka,
            Self::OTOGI_CODE => Self::Otogi,
            Self::ONI_CODE => Self::Oni,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Hasuba => Self::HASUBA_CODE,
            Self::Kurama => Self::KURAMA_CODE,
            Self::Haguremono => Self::HAGUREMONO_CODE,
            Self::Hirasaka => Self::HIRASAKA_CODE,
            Self::Otogi => Self::OTOGI_CODE,
            Self::Oni => Self::ONI_CODE,
            Self::Unknown(other) => other,
        }
    }

    /// Display label. Unmapped codes have no label and never echo the code.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hasuba => "斜歯忍軍",
            Self::Kurama => "鞍馬神流",
            Self::Haguremono => "ハグレモノ",
            Self::Hirasaka => "比良坂機関",
            Self::Otogi => "私立御斎学園",
            Self::Oni => "隠忍の血統",
            Self::Unknown(_) => "",
        }
    }
}

impl fmt::Display for UpperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
