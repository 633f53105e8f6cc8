//! Network location gate for check-in

use std::collections::HashSet;

const LOOPBACK: [&str; 2] = ["127.0.0.1", "::1"];

/// Allow-list of client addresses that may check in
///
/// Loopback addresses are always accepted. Matching is exact string
/// comparison against the address derived at the HTTP boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPolicy {
    allowed: HashSet<String>,
}

impl LocationPolicy {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Self { allowed }
    }

    /// Build from a comma-separated list
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_allowed(&self, client_address: &str) -> bool {
        LOOPBACK.contains(&client_address) || self.allowed.contains(client_address)
    }

    /// Configured addresses (loopback excluded)
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_always_allowed() {
        let policy = LocationPolicy::default();
        assert!(policy.is_allowed("127.0.0.1"));
        assert!(policy.is_allowed("::1"));
        assert!(!policy.is_allowed("10.0.0.1"));
    }

    #[test]
    fn test_csv_list() {
        let policy = LocationPolicy::from_csv(" 211.111.111.111 , ,203.0.113.7");
        assert!(policy.is_allowed("211.111.111.111"));
        assert!(policy.is_allowed("203.0.113.7"));
        assert!(!policy.is_allowed("203.0.113.8"));
        assert!(!policy.is_allowed(""));
        assert_eq!(policy.addresses().count(), 2);
    }
}
