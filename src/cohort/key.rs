use std::cmp::Ordering;
use std::fmt;

// Integral values stay exact in `Integer`; `Number` only holds fractional or
// out-of-range values. Numbers sort ahead of free text.
#[derive(Debug, Clone)]
pub enum OrderKey {
    Integer(i128),
    Number(f64),
    Text(String),
}

const I128_BOUND: f64 = 170141183460469231731687303715884105728.0; // 2^127

impl OrderKey {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i128>() {
            return Self::Integer(v);
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                if v.fract() == 0.0 && v >= -I128_BOUND && v < I128_BOUND {
                    Self::Integer(v as i128)
                } else {
                    Self::Number(v)
                }
            }
            _ => Self::Text(trimmed.to_string()),
        }
    }
}

fn cmp_int_float(a: i128, b: f64) -> Ordering {
    if b >= I128_BOUND {
        return Ordering::Less;
    }
    if b < -I128_BOUND {
        return Ordering::Greater;
    }
    let floor = b.floor() as i128;
    match a.cmp(&floor) {
        Ordering::Equal if b.fract() != 0.0 => Ordering::Less,
        other => other,
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Number(b)) => cmp_int_float(*a, *b),
            (Self::Number(a), Self::Integer(b)) => cmp_int_float(*b, *a).reverse(),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), _) => Ordering::Greater,
            (_, Self::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Number(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}
