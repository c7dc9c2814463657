use serde::{Deserialize, Serialize};

/// Only make accepted by the registration lookup flow.
pub const SUPPORTED_MAKE: &str = "VOLKSWAGEN";

/// Model names must contain this to be accepted by the lookup flow.
pub const SUPPORTED_MODEL_FAMILY: &str = "GOLF";

const CAR_BASE: &str = "models/vw_golf/golf.mk7.base.glb";
const CAR_GTI: &str = "models/vw_golf/golf.mk7.gti.glb";
const CAR_R: &str = "models/vw_golf/golf.mk7.r.glb";

const SPLITTER_BASE: &str = "models/vw_golf/front_splitters/F.mk7.standard.splitter.glb";
const SPLITTER_GTI: &str = "models/vw_golf/front_splitters/F.mk7.gti.splitter.glb";
const SPLITTER_R: &str = "models/vw_golf/front_splitters/F.mk7.r.splitter.glb";

/// GTI and R share one rear spoiler model.
const SPOILER_GTI_R: &str = "models/vw_golf/rear_spoilers/mk7.gti.r.spoiler.glb";

/// Vehicle variant selecting which asset set is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trim {
    #[default]
    Base,
    Gti,
    R,
}

impl Trim {
    /// Convert a selector value to a trim. Unknown values yield `None`.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "base" => Some(Self::Base),
            "gti" => Some(Self::Gti),
            "r" => Some(Self::R),
            _ => None,
        }
    }

    /// Identifier used by the page's variant selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Gti => "gti",
            Self::R => "r",
        }
    }

    /// Derive a trim from a registered model name.
    ///
    /// Case-insensitive substring match, GTI checked before R, anything else
    /// is the base car.
    pub fn from_model_name(model: &str) -> Self {
        let model = model.to_uppercase();
        if model.contains("GTI") {
            Self::Gti
        } else if model.contains('R') {
            Self::R
        } else {
            Self::Base
        }
    }

    pub fn supports_spoiler(&self) -> bool {
        matches!(self, Self::Gti | Self::R)
    }
}

/// Car body for a trim. Unrecognised trims fall back to the base car.
pub fn car_model_path(trim: Option<Trim>) -> &'static str {
    match trim.unwrap_or_default() {
        Trim::Base => CAR_BASE,
        Trim::Gti => CAR_GTI,
        Trim::R => CAR_R,
    }
}

/// Front splitter for a trim, `None` for an unrecognised trim.
pub fn splitter_path(trim: Option<Trim>) -> Option<&'static str> {
    match trim? {
        Trim::Base => Some(SPLITTER_BASE),
        Trim::Gti => Some(SPLITTER_GTI),
        Trim::R => Some(SPLITTER_R),
    }
}

/// Rear spoiler for a trim. Only GTI and R carry one.
pub fn spoiler_path(trim: Option<Trim>) -> Option<&'static str> {
    trim.filter(Trim::supports_spoiler).map(|_| SPOILER_GTI_R)
}

/// Whether a looked-up vehicle can be shown by the configurator.
pub fn is_supported_vehicle(make: &str, model: &str) -> bool {
    make.eq_ignore_ascii_case(SUPPORTED_MAKE)
        && model.to_uppercase().contains(SUPPORTED_MODEL_FAMILY)
}
