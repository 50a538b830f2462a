use arcana_common::TypeName;
use rustc_hash::FxHashMap;

/// Name -> declared type environment used to reject mismatched
/// assignments. Not a full type checker: types are recorded, never
/// unified or inferred beyond the literal/call rules in the analyzer.
#[derive(Debug, Default)]
pub struct TypeEnv {
    vars: FxHashMap<String, TypeName>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, typ: TypeName) {
        self.vars.insert(name.to_string(), typ);
    }

    pub fn get(&self, name: &str) -> Option<TypeName> {
        self.vars.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_get() {
        let mut env = TypeEnv::new();
        env.declare("i", TypeName::Inte);
        assert_eq!(env.get("i"), Some(TypeName::Inte));
    }

    #[test]
    fn unknown_name_is_none() {
        let env = TypeEnv::new();
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn redeclare_overwrites() {
        let mut env = TypeEnv::new();
        env.declare("a", TypeName::Inte);
        env.declare("a", TypeName::Filum);
        assert_eq!(env.get("a"), Some(TypeName::Filum));
    }
}
