use std::fmt;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Registration problems come first: they make the affected slot disappear,
/// and later diagnostics about the same owner are often consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Broken input from the discovery feed
    InvalidAttributes,
    NullabilityMismatch,
    DuplicateTypeName,
    UnderlyingNotIntegral,
    KindMismatch,

    // Union declarations
    EmptyUnion,
    UnionOnNonObject,

    // Shape reconciliation
    IncompatibleShapes,

    // Attribute data that has no effect
    TupleNamesIgnored,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::TupleNamesIgnored => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::NullabilityMismatch => {
                Some("getter and setter must agree on nullability")
            }
            Self::UnionOnNonObject => Some("union members must be declared on an `object` member"),
            Self::UnderlyingNotIntegral => Some("use an integral type such as `int` or `byte`"),
            Self::KindMismatch => Some("the name may already be registered with another kind"),
            _ => None,
        }
    }

    /// Base message, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::InvalidAttributes => "invalid attribute data",
            Self::NullabilityMismatch => "read and write nullability differ",
            Self::DuplicateTypeName => "duplicate type name",
            Self::UnderlyingNotIntegral => "enumeration underlying type must be integral",
            Self::KindMismatch => "type has the wrong kind for this declaration",
            Self::EmptyUnion => "union declares no member type",
            Self::UnionOnNonObject => "union declared on a non-object member",
            Self::IncompatibleShapes => "incompatible shapes",
            Self::TupleNamesIgnored => "tuple names on a non-tuple member",
        }
    }

    /// Template for detailed messages. `{}` is replaced by the caller's detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateTypeName => "`{}` is already registered".to_string(),
            Self::IncompatibleShapes => "incompatible shapes: {}".to_string(),
            Self::KindMismatch => "wrong kind: {}".to_string(),
            Self::UnderlyingNotIntegral => {
                "enumeration underlying type must be integral, found `{}`".to_string()
            }
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
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

/// Where a diagnostic applies: an owner type and optionally one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub owner: String,
    pub member: Option<String>,
}

impl Location {
    pub fn ty(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: None,
        }
    }

    pub fn member(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}.{}", self.owner, member),
            None => write!(f, "{}", self.owner),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub location: Option<Location>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
    pub related: Vec<RelatedInfo>,
    pub hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        let mut hints = Vec::new();
        if let Some(hint) = kind.default_hint() {
            hints.push(hint.to_string());
        }
        Self {
            kind,
            location,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints,
        }
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
        write!(f, "{}: {}\n  --> {}", self.severity(), self.message, self.location)?;
        for related in &self.related {
            match &related.location {
                Some(location) => write!(f, "\n  = note: {} ({})", related.message, location)?,
                None => write!(f, "\n  = note: {}", related.message)?,
            }
        }
        for hint in &self.hints {
            write!(f, "\n  = hint: {}", hint)?;
        }
        Ok(())
    }
}
