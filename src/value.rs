use crate::error::ExprError;
use std::fmt;

/// Numeric comparisons treat values closer than this as equal.
pub const PRECISION: f64 = 1e-6;

/// Runtime value produced by evaluating an expression: a number or a string.
///
/// Values are independent copies; assigning or cloning one never aliases
/// string storage. Accessing the wrong variant is a `TypeMismatch`, never a
/// silent coercion, with two exceptions: truthiness (`as_bool`) is derived
/// from the numeric value, and numbers truncate to integers on request.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
}

impl Value {
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn as_number(&self) -> Result<f64, ExprError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Str(_) => Err(ExprError::TypeMismatch),
        }
    }

    pub fn as_int(&self) -> Result<i64, ExprError> {
        Ok(self.as_number()? as i64)
    }

    pub fn as_str(&self) -> Result<&str, ExprError> {
        match self {
            Value::Str(s) => Ok(s),
            Value::Number(_) => Err(ExprError::TypeMismatch),
        }
    }

    /// Truthiness: the numeric value is at least `PRECISION`. Negative
    /// numbers and values inside the epsilon band are false.
    pub fn as_bool(&self) -> Result<bool, ExprError> {
        Ok(self.as_number()? >= PRECISION)
    }

    pub fn add_assign(&mut self, right: &Value) -> Result<(), ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => {
                *a += b;
                Ok(())
            }
            (Value::Str(a), Value::Str(b)) => {
                a.push_str(b);
                Ok(())
            }
            _ => Err(ExprError::TypeMismatch),
        }
    }

    pub fn sub_assign(&mut self, right: &Value) -> Result<(), ExprError> {
        self.numeric_assign(right, |a, b| a - b)
    }

    pub fn mul_assign(&mut self, right: &Value) -> Result<(), ExprError> {
        self.numeric_assign(right, |a, b| a * b)
    }

    /// Division by zero follows IEEE semantics (infinity or NaN).
    pub fn div_assign(&mut self, right: &Value) -> Result<(), ExprError> {
        self.numeric_assign(right, |a, b| a / b)
    }

    fn numeric_assign(&mut self, right: &Value, f: fn(f64, f64) -> f64) -> Result<(), ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => {
                *a = f(*a, *b);
                Ok(())
            }
            _ => Err(ExprError::TypeMismatch),
        }
    }

    /// Equality never fails: mismatched variants compare unequal. Numbers
    /// within `PRECISION` of each other are equal; strings compare byte-wise.
    pub fn eq(&self, right: &Value) -> bool {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => (a - b).abs() < PRECISION,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }

    /// Strict less-than: no epsilon tolerance on numbers.
    pub fn lt(&self, right: &Value) -> Result<bool, ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => Ok(a < b),
            (Value::Str(a), Value::Str(b)) => Ok(a < b),
            _ => Err(ExprError::TypeMismatch),
        }
    }

    pub fn gt(&self, right: &Value) -> Result<bool, ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => Ok(a > b),
            (Value::Str(a), Value::Str(b)) => Ok(a > b),
            _ => Err(ExprError::TypeMismatch),
        }
    }

    /// Numbers inside the epsilon band satisfy `le` and `ge` simultaneously.
    pub fn le(&self, right: &Value) -> Result<bool, ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => Ok(a < b || (a - b).abs() < PRECISION),
            (Value::Str(a), Value::Str(b)) => Ok(a <= b),
            _ => Err(ExprError::TypeMismatch),
        }
    }

    pub fn ge(&self, right: &Value) -> Result<bool, ExprError> {
        match (self, right) {
            (Value::Number(a), Value::Number(b)) => Ok(a > b || (a - b).abs() < PRECISION),
            (Value::Str(a), Value::Str(b)) => Ok(a >= b),
            _ => Err(ExprError::TypeMismatch),
        }
    }

    pub fn neg(&self) -> Result<Value, ExprError> {
        Ok(Value::Number(-self.as_number()?))
    }

    pub fn not(&self) -> Result<Value, ExprError> {
        Ok(Value::from_bool(!self.as_bool()?))
    }

    pub fn from_bool(b: bool) -> Value {
        Value::Number(if b { 1.0 } else { 0.0 })
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}
