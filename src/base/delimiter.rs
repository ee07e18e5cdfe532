use std::fmt;
use std::str::FromStr;

/// Separator placed between an import path and a local symbol name.
///
/// `Dot` produces `container/list.List.Back`; `Hash` produces
/// `container/list#List.Back`, the anchor form used by pkg.go.dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    #[default]
    Dot,
    Hash,
}

impl Delimiter {
    /// Delimiter selected by the `--web` switch.
    pub fn for_web(web: bool) -> Self {
        if web { Self::Hash } else { Self::Dot }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::Hash => "#",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(Self::Dot),
            "#" => Ok(Self::Hash),
            other => Err(format!("unknown delimiter {other:?} (expected \".\" or \"#\")")),
        }
    }
}
