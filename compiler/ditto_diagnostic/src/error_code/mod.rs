//! Error codes for all generator diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the stage that reports it.

use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### / W#### where the first digit indicates the stage:
/// - E1xxx: Reference resolution errors
/// - E2xxx: Structural validation errors
/// - W3xxx/E3xxx: Duplicate, overlap and pattern-rule problems
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E1xxx)
    /// Copy-from reference cannot be resolved
    E1001,
    /// Copy-from reference is ambiguous or conflicting
    E1002,
    /// Copy-from target is not accessible from the member
    E1003,
    /// Copy-from target is the wrong kind of declaration
    E1004,
    /// Cannot copy from a method without an implementation
    E1005,
    /// Wrong number of type arguments for the target
    E1006,

    // Structural Errors (E2xxx)
    /// Member is not declared open for extension (`partial`)
    E2001,
    /// A containing type is not declared open for extension
    E2002,
    /// Split-declared method already has an implementation
    E2003,
    /// Member kind cannot be generated by copying
    E2004,
    /// Target is the member itself, one of its containers, or contained in it
    E2005,
    /// Type argument does not satisfy the parameter's constraint
    E2006,
    /// Copy-from dependencies never became available
    E2007,

    // Duplicate / Pattern Problems (W3xxx, E3xxx)
    /// Same target specified more than once
    W3001,
    /// Same pattern specified more than once
    W3002,
    /// Pattern on a member without targets
    W3003,
    /// Pattern is missing its text or replacement
    W3004,
    /// Pattern is not on the declaration fragment that holds the copy
    W3005,
    /// Pattern is not a valid regular expression
    E3006,
    /// Copied member name collides with an existing member
    W3007,

    // Internal Errors (E9xxx)
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// Every code, in catalog order.
    pub const ALL: &[ErrorCode] = &[
        // Resolution
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        // Structural
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        // Duplicate / pattern
        ErrorCode::W3001,
        ErrorCode::W3002,
        ErrorCode::W3003,
        ErrorCode::W3004,
        ErrorCode::W3005,
        ErrorCode::E3006,
        ErrorCode::W3007,
        // Internal
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            // Resolution
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Structural
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            // Duplicate / pattern
            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::W3003 => "W3003",
            ErrorCode::W3004 => "W3004",
            ErrorCode::W3005 => "W3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::W3007 => "W3007",
            // Internal
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Descriptive name used in documentation and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "MemberCannotBeResolved",
            ErrorCode::E1002 => "MemberConflict",
            ErrorCode::E1003 => "ImplementationNotAccessible",
            ErrorCode::E1004 => "WrongTargetKind",
            ErrorCode::E1005 => "CannotCopyFromMethodWithoutImplementation",
            ErrorCode::E1006 => "WrongTypeArgumentCount",
            ErrorCode::E2001 => "MemberNotOpenForExtension",
            ErrorCode::E2002 => "ContainerNotOpenForExtension",
            ErrorCode::E2003 => "MethodAlreadyImplemented",
            ErrorCode::E2004 => "UnsupportedMemberKind",
            ErrorCode::E2005 => "InvalidTarget",
            ErrorCode::E2006 => "TypeArgumentConstraintViolation",
            ErrorCode::E2007 => "CircularDependency",
            ErrorCode::W3001 => "DuplicateTarget",
            ErrorCode::W3002 => "DuplicatePattern",
            ErrorCode::W3003 => "RedundantPattern",
            ErrorCode::W3004 => "MalformedPattern",
            ErrorCode::W3005 => "PatternOnDifferentDeclaration",
            ErrorCode::E3006 => "InvalidPattern",
            ErrorCode::W3007 => "MemberNameCollision",
            ErrorCode::E9002 => "TooManyErrors",
        }
    }

    /// Check if this is a reference-resolution error (E1xxx range).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
                | ErrorCode::E1006
        )
    }

    /// Check if this is a structural error (E2xxx range).
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
        )
    }

    /// Check if this is a duplicate or pattern problem (3xxx range).
    pub fn is_pattern_or_duplicate(&self) -> bool {
        matches!(
            self,
            ErrorCode::W3001
                | ErrorCode::W3002
                | ErrorCode::W3003
                | ErrorCode::W3004
                | ErrorCode::W3005
                | ErrorCode::E3006
                | ErrorCode::W3007
        )
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9002)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"W3001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
