use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{error::LayoutError, marker::ColorToken};

/// Which molecular orbital of a molecule is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrbitalKind {
    /// Highest occupied molecular orbital
    Homo,
    /// Lowest unoccupied molecular orbital
    Lumo,
}

impl OrbitalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitalKind::Homo => "homo",
            OrbitalKind::Lumo => "lumo",
        }
    }
}

impl FromStr for OrbitalKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "homo" => Ok(OrbitalKind::Homo),
            "lumo" => Ok(OrbitalKind::Lumo),
            other => Err(LayoutError::InvalidConfig(format!(
                "unknown orbital {other:?}, expected homo or lumo"
            ))),
        }
    }
}

/// What a point cloud was sampled for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    /// atomic orbitals of a single element, identified by its symbol
    Element(String),
    Molecule { formula: String, orbital: OrbitalKind },
}

impl Selection {
    pub fn element(symbol: impl Into<String>) -> Self {
        Self::Element(symbol.into())
    }

    pub fn molecule(formula: impl Into<String>, orbital: OrbitalKind) -> Self {
        Self::Molecule {
            formula: formula.into(),
            orbital,
        }
    }

    /// The colour every marker of this selection is drawn with.
    pub fn color_token(&self) -> ColorToken {
        ColorToken::new(self.to_string())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Element(symbol) => write!(f, "element/{symbol}"),
            Selection::Molecule { formula, orbital } => {
                write!(f, "molecule/{formula}/{}", orbital.as_str())
            }
        }
    }
}

/// Identifies one fetch-and-layout request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Hands out increasing request tokens so results of superseded selections can be dropped.
///
/// Layout itself never looks at tokens. A caller starts a request with [`begin`], runs the
/// fetch and layout wherever it likes, and passes the result through [`accept`] before
/// touching the scene.
///
/// [`begin`]: RequestSequencer::begin
/// [`accept`]: RequestSequencer::accept
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier one.
    pub fn begin(&self, selection: &Selection) -> RequestToken {
        let token = RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1);
        log::debug!("request {} started for {selection}", token.0);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Passes `value` through if `token` belongs to the latest request.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            log::debug!("dropping result of superseded request {}", token.0);
            None
        }
    }
}
