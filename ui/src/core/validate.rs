//! Field-level validation rules for forms. Validation failures stay local;
//! nothing here ever triggers a network call.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    Email,
}

/// Applies `rules` to each named field value, first failure per field wins.
/// Returns an empty map when everything passes.
pub fn validate_fields<'a>(
    fields: &[(&'a str, &str, &[Rule])],
) -> BTreeMap<&'a str, String> {
    let mut errors = BTreeMap::new();

    for (name, value, rules) in fields {
        let trimmed = value.trim();
        for rule in rules.iter() {
            match rule {
                Rule::Required if trimmed.is_empty() => {
                    errors.insert(*name, format!("{name} is required"));
                    break;
                }
                Rule::MinLength(min) if !trimmed.is_empty() && trimmed.len() < *min => {
                    errors.insert(*name, format!("{name} must be at least {min} characters"));
                    break;
                }
                Rule::Email if !trimmed.is_empty() && !is_email(trimmed) => {
                    errors.insert(*name, format!("{name} must be a valid email address"));
                    break;
                }
                _ => {}
            }
        }
    }

    errors
}

fn is_email(value: &str) -> bool {
    let Some((local, rest)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = rest.rsplit_once('.') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace) && !part.contains('@');
    clean(local) && clean(host) && clean(tld)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rule_rejects_blank_values() {
        let errors = validate_fields(&[("category", "  ", &[Rule::Required])]);
        assert_eq!(errors.get("category").unwrap(), "category is required");
    }

    #[test]
    fn min_length_applies_after_required() {
        let errors = validate_fields(&[(
            "description",
            "ok",
            &[Rule::Required, Rule::MinLength(10)],
        )]);
        assert!(errors
            .get("description")
            .unwrap()
            .contains("at least 10 characters"));
    }

    #[test]
    fn email_rule_ignores_empty_but_rejects_malformed() {
        let empty = validate_fields(&[("email", "", &[Rule::Email])]);
        assert!(empty.is_empty());

        let bad = validate_fields(&[("email", "not-an-address", &[Rule::Email])]);
        assert!(bad.contains_key("email"));

        let good = validate_fields(&[("email", "dev@campus.edu", &[Rule::Email])]);
        assert!(good.is_empty());
    }

    #[test]
    fn passing_fields_produce_no_errors() {
        let errors = validate_fields(&[
            ("category", "Furniture", &[Rule::Required]),
            (
                "description",
                "The chair in room 4 is broken.",
                &[Rule::Required, Rule::MinLength(10)],
            ),
        ]);
        assert!(errors.is_empty());
    }
}
