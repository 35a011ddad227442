//! Salary bookkeeping record with title-cased names.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RAISE: i64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    first_name: String,
    last_name: String,
    pub salary: i64,
}

impl Employee {
    /// Names are stored title-cased; the salary is taken as given
    pub fn new(first_name: &str, last_name: &str, salary: i64) -> Self {
        Self {
            first_name: title_case(first_name),
            last_name: title_case(last_name),
            salary,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn give_raise(&mut self) {
        self.give_raise_by(DEFAULT_RAISE);
    }

    /// No lower bound: a negative amount reduces the salary. Saturates at the i64 range.
    pub fn give_raise_by(&mut self, amount: i64) {
        self.salary = self.salary.saturating_add(amount);
    }
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_alpha = false;

    for c in raw.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}
