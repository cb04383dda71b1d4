//! Field rules for client-side form checks before a DTO is submitted.

/// Constraints on one form field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<FieldFormat>,
}

/// Shape checks that do not need a regex engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
    Phone,
    Url,
}

impl ValidationRules {
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            format: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn with_length(self, min: usize, max: usize) -> Self {
        Self {
            min_length: Some(min),
            max_length: Some(max),
            ..self
        }
    }

    pub const fn with_range(self, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..self
        }
    }

    pub const fn with_format(self, format: FieldFormat) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }

    /// Empty optional values always pass.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return if self.required {
                Err(format!("{field_label} is required"))
            } else {
                Ok(())
            };
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("{field_label} must be at least {min} characters"));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{field_label} must be at most {max} characters"));
            }
        }

        match self.format {
            Some(FieldFormat::Email) if !is_email(value) => {
                Err(format!("{field_label} is not a valid email address"))
            }
            Some(FieldFormat::Phone) if !is_phone(value) => {
                Err(format!("{field_label} is not a valid phone number"))
            }
            Some(FieldFormat::Url) if !is_url(value) => {
                Err(format!("{field_label} must start with http:// or https://"))
            }
            _ => Ok(()),
        }
    }

    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{field_label} must be a number"));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{field_label} must be at least {min}"));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{field_label} must be at most {max}"));
            }
        }
        Ok(())
    }
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn is_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    allowed && (7..=15).contains(&digits)
}

pub fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_length() {
        let rules = ValidationRules::required().with_length(3, 5);
        assert!(rules.validate_string("  ", "Name").is_err());
        assert!(rules.validate_string("ab", "Name").is_err());
        assert!(rules.validate_string("abcdef", "Name").is_err());
        assert!(rules.validate_string(" abcd ", "Name").is_ok());
        assert!(ValidationRules::none().validate_string("", "Name").is_ok());
    }

    #[test]
    fn test_formats() {
        let email = ValidationRules::required().with_format(FieldFormat::Email);
        assert!(email.validate_string("ops@example.com", "Email").is_ok());
        assert!(email.validate_string("ops@example", "Email").is_err());
        assert!(email.validate_string("a b@example.com", "Email").is_err());

        let phone = ValidationRules::none().with_format(FieldFormat::Phone);
        assert!(phone.validate_string("+1 (555) 010-2030", "Phone").is_ok());
        assert!(phone.validate_string("12ab", "Phone").is_err());

        assert!(is_url("https://example.com/x"));
        assert!(!is_url("ftp://example.com"));
    }

    #[test]
    fn test_number_range() {
        let rules = ValidationRules::none().with_range(0.0, 100.0);
        assert!(rules.validate_number(50.0, "Value").is_ok());
        assert_eq!(
            rules.validate_number(-1.0, "Value").unwrap_err(),
            "Value must be at least 0"
        );
        assert!(rules.validate_number(f64::NAN, "Value").is_err());
    }
}
