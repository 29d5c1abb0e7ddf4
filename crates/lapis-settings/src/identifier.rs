use std::fmt;
use std::str::FromStr;

/// Identifies one boolean toggle, serialized as `prime.identifier`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingsIdentifierPair {
    pub prime_identifier: String,
    pub identifier: String,
}

impl SettingsIdentifierPair {
    pub fn new(prime_identifier: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            prime_identifier: prime_identifier.into(),
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for SettingsIdentifierPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.prime_identifier, self.identifier)
    }
}

impl FromStr for SettingsIdentifierPair {
    type Err = String;

    /// Parse `prime.identifier`. Both halves must be non-empty and free of
    /// whitespace; anything after a second `.` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prime, ident) = s
            .split_once('.')
            .ok_or_else(|| format!("missing '.' in identifier: {s}"))?;
        let valid = |part: &str| {
            !part.is_empty() && !part.contains('.') && !part.chars().any(char::is_whitespace)
        };
        if !valid(prime) || !valid(ident) {
            return Err(format!("malformed identifier: {s}"));
        }
        Ok(Self::new(prime, ident))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_with_dot() {
        let pair = SettingsIdentifierPair::new("litecommand", "1");
        assert_eq!(pair.to_string(), "litecommand.1");
    }

    #[test]
    fn test_parse_valid() {
        let pair: SettingsIdentifierPair = "bot.compress".parse().unwrap();
        assert_eq!(pair, SettingsIdentifierPair::new("bot", "compress"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("compress".parse::<SettingsIdentifierPair>().is_err());
        assert!(".x".parse::<SettingsIdentifierPair>().is_err());
        assert!("x.".parse::<SettingsIdentifierPair>().is_err());
        assert!("a.b.c".parse::<SettingsIdentifierPair>().is_err());
        assert!("a b.c".parse::<SettingsIdentifierPair>().is_err());
    }

    #[test]
    fn test_ordering_by_string_pair() {
        let a = SettingsIdentifierPair::new("a", "2");
        let b = SettingsIdentifierPair::new("b", "1");
        assert!(a < b);
    }
}
