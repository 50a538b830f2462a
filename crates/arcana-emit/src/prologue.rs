//! The runtime prologue embedded verbatim at the top of every emission.
//!
//! Helpers are prefixed or named so as not to collide with anything an
//! Arcana program could itself declare (`subjecto`, user identifiers).

pub const PROLOGUE: &str = r#"class ArcanaRuntimeError(Exception):
    def __init__(self, code, message):
        super().__init__(f"[{code}] {message}")
        self.code = code
        self.message = message


def assert_positive(code, value):
    if value <= 0:
        raise ArcanaRuntimeError(code, "stationarius accelerationis")


def figura(x):
    if isinstance(x, bool):
        return "verum"
    if isinstance(x, int):
        return "inte"
    if isinstance(x, float):
        return "real"
    if isinstance(x, str):
        return "filum"
    if isinstance(x, dict):
        return "catalogus"
    if isinstance(x, tuple):
        return "ordinata"
    if x is None:
        return "nihil"
    return f"{type(x).__name__}_python_originis"


def __arcana_verum(x):
    if isinstance(x, bool):
        return x
    if isinstance(x, (int, float)):
        return x != 0
    if isinstance(x, str):
        low = x.strip().lower()
        if low in ("verum", "true", "1", "yes", "y"):
            return True
        if low in ("falsum", "false", "0", "no", "n", ""):
            return False
        return bool(x)
    return bool(x)"#;
