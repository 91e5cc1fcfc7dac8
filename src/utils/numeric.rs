/// Outcome of coercing a single cell to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    /// Empty cell, absent column or a `nan`-style token
    Missing,
    /// Present but not a number
    Invalid,
}

impl Coerced {
    pub fn value(self) -> Option<f64> {
        match self {
            Coerced::Value(v) => Some(v),
            Coerced::Missing | Coerced::Invalid => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, Coerced::Invalid)
    }
}

/// Coerce a raw cell to a finite number; failures degrade to missing.
pub fn coerce_numeric(raw: Option<&str>) -> Coerced {
    let Some(raw) = raw else {
        return Coerced::Missing;
    };
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") || trimmed == "NA" {
        return Coerced::Missing;
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Value(v),
        Ok(_) => Coerced::Missing,
        Err(_) => Coerced::Invalid,
    }
}

/// Largest store or headcount figure kept; five of them still sum within `u64`.
pub const COUNT_CEILING: u64 = u32::MAX as u64;

/// Store and headcount policy: missing or negative reads as zero, fraction
/// truncated, oversized values clamped to [`COUNT_CEILING`].
pub fn to_count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => (v.trunc() as u64).min(COUNT_CEILING),
        _ => 0,
    }
}

/// Sales and demographic policy: missing reads as zero.
pub fn to_amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Score policy: missing stays missing so it is distinguishable from a true zero.
pub fn to_score(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Normalize a district code to its string form.
///
/// Codes read from numeric columns may carry a trailing `.0`; those are
/// rendered as integers so both encodings of the same code join.
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some((int_part, frac_part)) = trimmed.split_once('.') {
        if !int_part.is_empty()
            && int_part.bytes().all(|b| b.is_ascii_digit())
            && !frac_part.is_empty()
            && frac_part.bytes().all(|b| b == b'0')
        {
            return int_part.to_string();
        }
    }

    trimmed.to_string()
}

/// MAX reduction that skips missing values.
pub fn max_skip_missing(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.max(v)),
        (None, v) => v,
        (a, None) => a,
    }
}
