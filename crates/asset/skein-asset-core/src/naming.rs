//! Load-scoped name disambiguation.
//!
//! One `NamingContext` lives for one load operation and is passed explicitly
//! into the construction call chain; there is no process-wide counter, so two
//! concurrent loads never observe each other's names.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct NamingContext {
    used: HashSet<String>,
    counters: HashMap<String, u32>,
}

impl NamingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base` if it is present and not yet taken; otherwise derive a
    /// distinct name. Unnamed entities get `"<kind><n>"` with a per-kind
    /// counter, collisions get a numeric suffix.
    pub fn unique_name(&mut self, base: Option<&str>, kind: &str) -> String {
        let candidate = match base {
            Some(b) if !b.is_empty() => b.to_string(),
            _ => {
                let n = self.counters.entry(kind.to_string()).or_insert(0);
                let name = format!("{kind}{n}");
                *n += 1;
                name
            }
        };
        let name = if self.used.contains(&candidate) {
            let mut i = 1u32;
            loop {
                let fallback = format!("{candidate}_{i}");
                if !self.used.contains(&fallback) {
                    break fallback;
                }
                i += 1;
            }
        } else {
            candidate
        };
        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_entities_get_distinct_names() {
        let mut ctx = NamingContext::new();
        assert_eq!(ctx.unique_name(None, "animation"), "animation0");
        assert_eq!(ctx.unique_name(None, "animation"), "animation1");
        assert_eq!(ctx.unique_name(None, "node"), "node0");
    }

    #[test]
    fn collisions_get_suffixes() {
        let mut ctx = NamingContext::new();
        assert_eq!(ctx.unique_name(Some("Walk"), "animation"), "Walk");
        assert_eq!(ctx.unique_name(Some("Walk"), "animation"), "Walk_1");
        assert_eq!(ctx.unique_name(Some("Walk"), "animation"), "Walk_2");
    }
}
