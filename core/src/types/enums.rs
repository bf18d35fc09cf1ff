use std::fmt;

/// How sequence (SQ) values are rendered into a record value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceMode {
    /// `<Sequence, N items>`
    #[default]
    Summary,

    /// Items rendered recursively as `[{(GGGG,EEEE)=value; ...}, ...]`
    Expand,
}

impl SequenceMode {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SequenceMode::Summary => "summary",
            SequenceMode::Expand => "expand",
        }
    }
}

impl fmt::Display for SequenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Phase of a harvest run
///
/// Moves strictly forward: `Init -> Scanning -> Finalizing -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RunPhase {
    Init,
    Scanning,
    Finalizing,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Init => "INIT",
            RunPhase::Scanning => "SCANNING",
            RunPhase::Finalizing => "FINALIZING",
            RunPhase::Done => "DONE",
        };
        write!(f, "{}", name)
    }
}
