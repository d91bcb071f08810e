use std::fmt;

/// Build findings. Declaration order is reporting priority.
///
/// Entry-point and structure problems come before per-port findings,
/// so sorted output leads with what blocks code generation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // The graph cannot be traversed as written
    CycleDetected,

    // A stage has nothing to emit
    MissingVertexEntry,
    MissingFragmentEntry,

    // Output block has nothing to write
    FragmentOutputUnconnected,

    // Value cannot be written as a literal
    NonFiniteValue,

    // Per-port findings
    UnresolvedType,
    UnconnectedRequiredInput,
}

impl DiagnosticKind {
    /// Errors fail the build; warnings only with `fail_on_warnings`.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnresolvedType | Self::UnconnectedRequiredInput => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Hint attached to every report of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingVertexEntry => Some("add a VertexOutputBlock and register it as an output"),
            Self::MissingFragmentEntry => {
                Some("add a FragmentOutputBlock and register it as an output")
            }
            Self::FragmentOutputUnconnected => Some("connect `rgba`, or `rgb` with optional `a`"),
            _ => None,
        }
    }

    /// Message when the reporter gives no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::CycleDetected => "block participates in a cycle",
            Self::MissingVertexEntry => "no vertex output reached during build",
            Self::MissingFragmentEntry => "no fragment output reached during build",
            Self::FragmentOutputUnconnected => "fragment output has no color input",
            Self::NonFiniteValue => "value is not a finite number",
            Self::UnresolvedType => "port type could not be resolved",
            Self::UnconnectedRequiredInput => "required input is not connected",
        }
    }

    /// Message shape with a `{}` slot for the reporter's detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::CycleDetected => "`{}` depends on itself".to_string(),
            Self::UnresolvedType => "type of `{}` could not be resolved".to_string(),
            Self::UnconnectedRequiredInput => "required input `{}` is not connected".to_string(),
            Self::NonFiniteValue => "value `{}` is not a finite number".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Fill the detail into `custom_message()`, or fall back without one.
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where a diagnostic points: a block by display name, optionally one of its ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub block: String,
    pub port: Option<String>,
}

impl Location {
    pub fn block(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            port: None,
        }
    }

    pub fn port(block: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            port: Some(port.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.port {
            Some(port) => write!(f, "{}.{}", self.block, port),
            None => write!(f, "{}", self.block),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
    pub hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
            hints: kind.default_hint().into_iter().map(String::from).collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        Self::new(kind, location, kind.fallback_message())
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity(), self.location, self.message)?;
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
