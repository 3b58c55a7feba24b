use std::fmt;

/// Machine-readable error codes shared by every refplan crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ConfigInvalid,
    InvalidDependencyWeight,
    MatrixNotSquare,
    MatrixNegativeWeight,
    MatrixNonFinite,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ConfigInvalid => "E1002",
            Self::InvalidDependencyWeight => "E2001",
            Self::MatrixNotSquare => "E3001",
            Self::MatrixNegativeWeight => "E3002",
            Self::MatrixNonFinite => "E3003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigInvalid => "Config value out of range",
            Self::InvalidDependencyWeight => "Dependency weight must be finite and positive",
            Self::MatrixNotSquare => "Adjacency matrix is not square",
            Self::MatrixNegativeWeight => "Adjacency matrix has a negative entry",
            Self::MatrixNonFinite => "Adjacency matrix has a NaN or infinite entry",
        }
    }

    /// Optional remediation hint that can be surfaced to callers.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix the TOML syntax in the analysis config and retry."),
            Self::ConfigInvalid => Some("See the [weights], [centrality] and [effort] defaults."),
            Self::InvalidDependencyWeight => Some("Use a weight greater than zero, e.g. 1.0."),
            Self::MatrixNotSquare | Self::MatrixNegativeWeight | Self::MatrixNonFinite => {
                Some("Build the matrix with DependencyGraph::to_adjacency_matrix.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Contract violations raised while constructing graph elements.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Dependency weights must be finite and strictly positive.
    #[error("invalid weight {weight} on dependency {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidWeight { .. } => ErrorCode::InvalidDependencyWeight,
        }
    }
}

/// Out-of-range values in an [`crate::config::AnalysisConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("weight `{name}` must be finite and non-negative, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("sub-score weights must not all be zero")]
    ZeroWeights,

    #[error("damping factor must be in [0, 1), got {0}")]
    Damping(f64),

    #[error("centrality iterations must be at least 1")]
    ZeroIterations,

    #[error("minutes_per_module must be at least 1")]
    ZeroMinutes,

    #[error("effort multiplier bounds must satisfy 0 < min <= max, got [{min}, {max}]")]
    MultiplierBounds { min: f64, max: f64 },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigInvalid
    }
}
