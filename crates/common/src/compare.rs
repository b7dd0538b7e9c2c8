//! Field-by-field comparison of person records
//!
//! The identifier is never compared: it is assigned by the service on
//! create and checked separately by update scenarios.

use std::fmt;

use crate::types::PersonRecord;

/// First field on which two records disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' differs: expected {:?}, got {:?}",
            self.field, self.expected, self.actual
        )
    }
}

impl std::error::Error for Mismatch {}

/// Compare every non-identifier field, stopping at the first difference
pub fn compare_person(expected: &PersonRecord, actual: &PersonRecord) -> Result<(), Mismatch> {
    let (ea, aa) = (&expected.address, &actual.address);
    let (ec, ac) = (&expected.company, &actual.company);

    let fields: [(&'static str, &str, &str); 14] = [
        ("name", &expected.name, &actual.name),
        ("username", &expected.username, &actual.username),
        ("email", &expected.email, &actual.email),
        ("phone", &expected.phone, &actual.phone),
        ("website", &expected.website, &actual.website),
        ("address.street", &ea.street, &aa.street),
        ("address.suite", &ea.suite, &aa.suite),
        ("address.city", &ea.city, &aa.city),
        ("address.zipcode", &ea.zipcode, &aa.zipcode),
        ("address.geo.lat", &ea.geo.lat, &aa.geo.lat),
        ("address.geo.lng", &ea.geo.lng, &aa.geo.lng),
        ("company.name", &ec.name, &ac.name),
        ("company.catchPhrase", &ec.catch_phrase, &ac.catch_phrase),
        ("company.bs", &ec.bs, &ac.bs),
    ];

    match fields.iter().find(|(_, e, a)| e != a) {
        Some(&(field, e, a)) => Err(Mismatch {
            field,
            expected: e.to_string(),
            actual: a.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RecordGenerator;

    #[test]
    fn test_identical_records_match() {
        let person = RecordGenerator::seeded(9).person();
        assert_eq!(compare_person(&person, &person.clone()), Ok(()));
    }

    #[test]
    fn test_identifier_is_ignored() {
        let person = RecordGenerator::seeded(9).person();
        let echoed = person.clone().with_id(11);
        assert!(compare_person(&person, &echoed).is_ok());
    }

    #[test]
    fn test_nested_mismatch_names_field() {
        let person = RecordGenerator::seeded(9).person();
        let mut echoed = person.clone();
        echoed.address.geo.lat = format!("{}0", person.address.geo.lat);

        let mismatch = compare_person(&person, &echoed).unwrap_err();
        assert_eq!(mismatch.field, "address.geo.lat");
        assert_eq!(mismatch.expected, person.address.geo.lat);
        assert!(mismatch.to_string().contains("address.geo.lat"));
    }

    #[test]
    fn test_reports_first_mismatch_only() {
        let person = RecordGenerator::seeded(9).person();
        let mut echoed = person.clone();
        echoed.email = "other@example.com".to_string();
        echoed.company.bs = "something else".to_string();

        let mismatch = compare_person(&person, &echoed).unwrap_err();
        assert_eq!(mismatch.field, "email");
    }

    #[test]
    fn test_no_precision_tolerance() {
        let mut a = RecordGenerator::seeded(2).person();
        let mut b = a.clone();
        a.address.geo.lng = "81.1496".to_string();
        b.address.geo.lng = "81.14960".to_string();
        assert_eq!(compare_person(&a, &b).unwrap_err().field, "address.geo.lng");
    }
}
