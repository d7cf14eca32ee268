use std::fmt;

pub const TAP_TARGETS_DEFAULT: bool = true;

/// Which element instance stands for each role.
///
/// With tap targets on, the envelope and the avoidant control are wrapped in
/// dedicated buttons that receive the touch and click events; otherwise the
/// images themselves do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleBindings {
    pub tap_targets: bool,
}

impl Default for RoleBindings {
    fn default() -> Self {
        Self {
            tap_targets: TAP_TARGETS_DEFAULT,
        }
    }
}

impl RoleBindings {
    /// Query value wins over the build-time value, which wins over the default.
    pub fn resolve(
        query: Option<&str>,
        build_time: Option<&str>,
    ) -> (Self, Option<BindingParseError>) {
        let mut error = None;
        for raw in [query, build_time].into_iter().flatten() {
            match parse_tap_flag(raw) {
                Ok(tap_targets) => return (Self { tap_targets }, error),
                Err(err) if error.is_none() => error = Some(err),
                Err(_) => {}
            }
        }
        (Self::default(), error)
    }
}

pub fn parse_tap_flag(value: &str) -> Result<bool, BindingParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BindingParseError::Empty);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(BindingParseError::InvalidFlag {
            value: trimmed.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingParseError {
    Empty,
    InvalidFlag { value: String },
}

impl fmt::Display for BindingParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingParseError::Empty => write!(f, "tap flag is empty"),
            BindingParseError::InvalidFlag { value } => {
                write!(f, "invalid tap flag '{value}', expected on/off")
            }
        }
    }
}

impl std::error::Error for BindingParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!(parse_tap_flag("1"), Ok(true));
        assert_eq!(parse_tap_flag(" ON "), Ok(true));
        assert_eq!(parse_tap_flag("No"), Ok(false));
        assert_eq!(parse_tap_flag("false"), Ok(false));
        assert_eq!(parse_tap_flag(""), Err(BindingParseError::Empty));
        assert_eq!(
            parse_tap_flag("maybe"),
            Err(BindingParseError::InvalidFlag {
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn query_overrides_build_time() {
        let (bindings, error) = RoleBindings::resolve(Some("off"), Some("on"));
        assert!(!bindings.tap_targets);
        assert!(error.is_none());
    }

    #[test]
    fn bad_query_falls_back_and_reports() {
        let (bindings, error) = RoleBindings::resolve(Some("sure"), Some("0"));
        assert!(!bindings.tap_targets);
        assert!(matches!(error, Some(BindingParseError::InvalidFlag { .. })));

        let (bindings, error) = RoleBindings::resolve(None, None);
        assert_eq!(bindings, RoleBindings::default());
        assert!(error.is_none());
    }
}
