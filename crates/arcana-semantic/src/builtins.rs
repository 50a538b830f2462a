use arcana_common::TypeName;

/// A built-in's arity bounds. `max: None` means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

/// Arity table for every built-in with a fixed or bounded arity.
/// User-defined functions are not in this table and are never
/// arity-checked (no resolution pass exists yet for them).
pub fn arity_of(name: &str) -> Option<Arity> {
    Some(match name {
        "accipere" => Arity { min: 0, max: Some(1) },
        "longitudo" => Arity { min: 1, max: Some(1) },
        "figura" => Arity { min: 1, max: Some(1) },
        "indicant" => Arity { min: 0, max: None },
        "inte" | "real" | "filum" | "verum" => Arity { min: 1, max: Some(1) },
        "ordinata" => Arity { min: 0, max: None },
        _ => return None,
    })
}

/// The inferred return type of a built-in call, used by the type
/// environment to check `VCON`/assignment compatibility. `None` covers
/// both "not a built-in" and "no fixed return type".
pub fn return_type_of(name: &str) -> Option<TypeName> {
    Some(match name {
        "accipere" => TypeName::Filum,
        "longitudo" => TypeName::Inte,
        "figura" => TypeName::Filum,
        "inte" => TypeName::Inte,
        "real" => TypeName::Real,
        "filum" => TypeName::Filum,
        "verum" => TypeName::Verum,
        "ordinata" => TypeName::Ordinata,
        // `indicant` returns `nihil`, which is not a member of `TypeName`
        // (nihil is legal only as the entry function's return type), so
        // it deliberately has no representable return type here and a
        // `VCON` initialized from it is never type-checked against it.
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accipere_is_optional_single_arg() {
        let a = arity_of("accipere").unwrap();
        assert_eq!(a.min, 0);
        assert_eq!(a.max, Some(1));
    }

    #[test]
    fn indicant_is_unbounded() {
        let a = arity_of("indicant").unwrap();
        assert_eq!(a.min, 0);
        assert_eq!(a.max, None);
    }

    #[test]
    fn casts_are_exactly_one_arg() {
        for name in ["inte", "real", "filum", "verum"] {
            let a = arity_of(name).unwrap();
            assert_eq!((a.min, a.max), (1, Some(1)), "{name}");
        }
    }

    #[test]
    fn unknown_name_has_no_arity() {
        assert!(arity_of("subjecto_helper").is_none());
    }

    #[test]
    fn return_types_match_table() {
        assert_eq!(return_type_of("longitudo"), Some(TypeName::Inte));
        assert_eq!(return_type_of("accipere"), Some(TypeName::Filum));
        assert_eq!(return_type_of("indicant"), None);
    }
}
