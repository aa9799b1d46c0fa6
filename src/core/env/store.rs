use std::ffi::OsString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

/// The shell's variables, in insertion order, with unique keys.
///
/// Children never see this directly; they get the snapshot from
/// [`Environment::to_pairs`] at fork time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    entries: Vec<EnvEntry>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from the environment this process inherited.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars_os().map(|(key, value)| (lossy(key), lossy(value))))
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut env = Self::new();
        for (key, value) in pairs {
            env.set(&key, &value);
        }
        env
    }

    /// Parses `key=value` strings, splitting at the first `=`. Strings
    /// without one are skipped.
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_pairs(assignments.into_iter().filter_map(|assignment| {
            assignment
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
        }))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key)
            .map(|idx| self.entries[idx].value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(idx) => self.entries[idx].value = value.to_string(),
            None => self.entries.push(EnvEntry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `key=value` strings in insertion order, for a child's environment.
    pub fn to_pairs(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}={}", entry.key, entry.value))
            .collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }
}

fn lossy(value: OsString) -> String {
    value.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Environment {
        Environment::from_assignments(["A=1", "B=2", "C=x=y", "broken"])
    }

    #[test]
    fn test_init_keeps_order_and_splits_first_equals() {
        let env = sample();
        assert_eq!(env.to_pairs(), vec!["A=1", "B=2", "C=x=y"]);
        assert_eq!(env.get("C"), Some("x=y"));
        assert_eq!(env.get("broken"), None);
    }

    #[test]
    fn test_set_updates_in_place() {
        let mut env = sample();
        env.set("A", "10");
        env.set("D", "4");
        assert_eq!(env.to_pairs(), vec!["A=10", "B=2", "C=x=y", "D=4"]);
    }

    #[test]
    fn test_keys_match_exactly() {
        let mut env = Environment::from_assignments(["PATHX=1", "PAT=2"]);
        assert_eq!(env.get("PATH"), None);
        assert_eq!(env.get("path"), None);
        env.set("PATH", "/bin");
        assert_eq!(env.len(), 3);
        assert_eq!(env.get("PATHX"), Some("1"));
    }

    #[test]
    fn test_remove_head_and_only_entry() {
        let mut env = sample();
        assert_eq!(env.remove("A"), Some("1".to_string()));
        assert_eq!(env.to_pairs(), vec!["B=2", "C=x=y"]);

        let mut single = Environment::from_assignments(["ONLY=1"]);
        assert_eq!(single.remove("ONLY"), Some("1".to_string()));
        assert!(single.is_empty());
        single.set("NEW", "v");
        assert_eq!(single.get("NEW"), Some("v"));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut env = sample();
        assert_eq!(env.remove("ZZZ"), None);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_duplicate_input_keys_collapse() {
        let env = Environment::from_assignments(["K=1", "K=2"]);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("K"), Some("2"));
    }
}
