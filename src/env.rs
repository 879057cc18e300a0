use std::collections::HashMap;

pub const ANS: &str = "ans";

/// Names replaced by their values before solving, in substitution order.
pub const SUBSTITUTED: [&str; 3] = ["e", "pi", ANS];

#[derive(Debug, Clone)]
pub struct SymbolTable {
    values: HashMap<String, f64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut values = HashMap::new();

        // Constants
        values.insert("pi".into(), std::f64::consts::PI);
        values.insert("e".into(), std::f64::consts::E);

        // Last answer
        values.insert(ANS.into(), 0.0);

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn ans(&self) -> f64 {
        self.get(ANS).unwrap_or_default()
    }

    pub(crate) fn set_ans(&mut self, value: f64) {
        self.values.insert(ANS.into(), value);
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_constants() {
        let table = SymbolTable::new();
        assert_eq!(table.get("pi"), Some(std::f64::consts::PI));
        assert_eq!(table.get("e"), Some(std::f64::consts::E));
        assert_eq!(table.ans(), 0.0);
        assert_eq!(table.get("tau"), None);
    }

    #[test]
    fn ans_is_per_table() {
        let mut first = SymbolTable::new();
        let second = SymbolTable::new();
        first.set_ans(42.0);
        assert_eq!(first.ans(), 42.0);
        assert_eq!(second.ans(), 0.0);
    }
}
