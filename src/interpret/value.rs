use std::{fmt, rc::Rc};

use super::callable::Callable;

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Callable(Rc<dyn Callable>),
}

impl Value {
    /// `ingenting` and `falsk` are falsy, everything else (0 and "" included) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(v) => *v,
            _ => true,
        }
    }

    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Str(l), Value::Str(r)) => l == r,
            // callables are equal only to themselves
            (Value::Callable(l), Value::Callable(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "ingenting"),
            Value::Bool(true) => write!(f, "sandt"),
            Value::Bool(false) => write!(f, "falsk"),
            // f64 Display already drops the ".0" of integral values
            Value::Number(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Callable(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::callable::NativeFunction;
    use pretty_assertions::assert_eq;

    fn native() -> Value {
        Value::Callable(Rc::new(NativeFunction {
            name: "test",
            arity: 0,
            func: |_, _| Ok(Value::Nil),
        }))
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::Str(String::new()).is_truthy());
        assert!(native().is_truthy());
    }

    #[test]
    fn display_form() {
        assert_eq!(Value::Nil.to_string(), "ingenting");
        assert_eq!(Value::Bool(true).to_string(), "sandt");
        assert_eq!(Value::Bool(false).to_string(), "falsk");
        assert_eq!(Value::Number(4.0).to_string(), "4");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Str("hej".to_string()).to_string(), "hej");
        assert_eq!(native().to_string(), "<native gøremål test>");
    }

    #[test]
    fn equality_across_kinds() {
        assert!(Value::Nil.is_equal(&Value::Nil));
        assert!(Value::Number(2.0).is_equal(&Value::Number(2.0)));
        assert!(Value::Str("a".into()).is_equal(&Value::Str("a".into())));
        assert!(!Value::Number(0.0).is_equal(&Value::Bool(false)));
        assert!(!Value::Nil.is_equal(&Value::Bool(false)));
        assert!(!Value::Str("1".into()).is_equal(&Value::Number(1.0)));

        let f = native();
        assert!(f.is_equal(&f.clone()));
        assert!(!f.is_equal(&native()));
    }
}
