//! Shape checks for records returned by the service or built by the generator

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::types::PersonRecord;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Check that every string field is populated and well-formed
pub fn validate_person(person: &PersonRecord) -> Result<()> {
    let address = &person.address;
    let company = &person.company;

    let required = [
        ("name", &person.name),
        ("username", &person.username),
        ("email", &person.email),
        ("phone", &person.phone),
        ("website", &person.website),
        ("address.street", &address.street),
        ("address.suite", &address.suite),
        ("address.city", &address.city),
        ("address.zipcode", &address.zipcode),
        ("address.geo.lat", &address.geo.lat),
        ("address.geo.lng", &address.geo.lng),
        ("company.name", &company.name),
        ("company.catchPhrase", &company.catch_phrase),
        ("company.bs", &company.bs),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(Error::shape(field, "is empty"));
        }
    }

    if !is_email(&person.email) {
        return Err(Error::shape(
            "email",
            format!("'{}' is not a valid email address", person.email),
        ));
    }

    for (field, value) in [("address.geo.lat", &address.geo.lat), ("address.geo.lng", &address.geo.lng)] {
        if value.parse::<f64>().is_err() {
            return Err(Error::shape(field, format!("'{}' is not a decimal number", value)));
        }
    }

    Ok(())
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RecordGenerator;

    #[test]
    fn test_email_syntax() {
        assert!(is_email("Sincere@april.biz"));
        assert!(is_email("Shanna@melissa.tv"));
        assert!(is_email("first.last+tag@mail.example.co"));
        assert!(!is_email("no-at-sign.com"));
        assert!(!is_email("two@@signs.com"));
        assert!(!is_email("trailing@dot."));
        assert!(!is_email(""));
    }

    #[test]
    fn test_empty_field_is_named() {
        let mut person = RecordGenerator::seeded(1).person();
        person.address.city.clear();
        match validate_person(&person) {
            Err(Error::Shape { field, .. }) => assert_eq!(field, "address.city"),
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_decimal_coordinate_rejected() {
        let mut person = RecordGenerator::seeded(1).person();
        person.address.geo.lng = "east".to_string();
        let err = validate_person(&person).unwrap_err();
        assert!(err.to_string().contains("address.geo.lng"));
    }
}
