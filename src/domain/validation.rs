use std::fmt;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Missing { field: &'static str },
    Blank { field: &'static str },
    NotPositive { field: &'static str },
    OutOfRange { field: &'static str, min: u32, max: u32, actual: u32 },
    ForbiddenCharacter { field: &'static str, character: char },
    InvalidPhoneNumber { field: &'static str, input: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is required"),
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::NotPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
            Self::ForbiddenCharacter { field, character } => {
                write!(f, "{field} must not contain '{character}'")
            }
            Self::InvalidPhoneNumber { field, input } => {
                write!(f, "{field} is not a valid phone number: {input}")
            }
        }
    }
}

/// Local input validation failure (`InvalidInput`), listing every violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Error kind reported to callers.
    pub const KIND: &'static str = "InvalidInput";

    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Violations in the order the rules were evaluated.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Human-readable constraint messages.
    pub fn constraints(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", Self::KIND, self.constraints().join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Types checked before they are sent to the API.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Accumulates violations across fields; see [`Rules::finish`].
#[derive(Debug, Default)]
#[must_use]
pub struct Rules {
    violations: Vec<Violation>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<T>(mut self, field: &'static str, value: Option<&T>) -> Self {
        if value.is_none() {
            self.violations.push(Violation::Missing { field });
        }
        self
    }

    /// Present and not only whitespace.
    pub fn not_blank(mut self, field: &'static str, value: Option<&str>) -> Self {
        match value {
            None => self.violations.push(Violation::Missing { field }),
            Some(value) if value.trim().is_empty() => {
                self.violations.push(Violation::Blank { field });
            }
            Some(_) => {}
        }
        self
    }

    /// Absent, or present and not blank.
    pub fn optional_not_blank(self, field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(_) => self.not_blank(field, value),
            None => self,
        }
    }

    pub fn positive(mut self, field: &'static str, value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            self.violations.push(Violation::NotPositive { field });
        }
        self
    }

    pub fn in_range(mut self, field: &'static str, value: Option<u32>, min: u32, max: u32) -> Self {
        if let Some(actual) = value.filter(|actual| !(min..=max).contains(actual)) {
            self.violations.push(Violation::OutOfRange {
                field,
                min,
                max,
                actual,
            });
        }
        self
    }

    pub fn without_char(mut self, field: &'static str, value: &str, character: char) -> Self {
        if value.contains(character) {
            self.violations
                .push(Violation::ForbiddenCharacter { field, character });
        }
        self
    }

    /// Merge the violations of a nested check.
    pub fn nested(mut self, result: Result<(), ValidationError>) -> Self {
        if let Err(err) = result {
            self.violations.extend(err.violations);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}
