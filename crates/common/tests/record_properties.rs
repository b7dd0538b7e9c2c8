//! Generator and comparator properties over arbitrary seeds

use proptest::prelude::*;
use sitecheck_common::{compare_person, validate_person, RecordGenerator};

proptest! {
    #[test]
    fn generated_records_are_well_formed(seed in any::<u64>()) {
        let person = RecordGenerator::seeded(seed).person();
        prop_assert!(person.id.is_none());
        prop_assert!(validate_person(&person).is_ok(), "{:?}", validate_person(&person));
    }

    #[test]
    fn json_echo_compares_clean(seed in any::<u64>()) {
        let person = RecordGenerator::seeded(seed).person();
        let body = serde_json::to_string(&person).unwrap();
        let echoed: sitecheck_common::PersonRecord = serde_json::from_str(&body).unwrap();
        prop_assert!(compare_person(&person, &echoed).is_ok());
    }

    #[test]
    fn any_changed_field_is_detected(seed in any::<u64>(), field in 0usize..14) {
        let person = RecordGenerator::seeded(seed).person();
        let mut echoed = person.clone();
        let target = match field {
            0 => &mut echoed.name,
            1 => &mut echoed.username,
            2 => &mut echoed.email,
            3 => &mut echoed.phone,
            4 => &mut echoed.website,
            5 => &mut echoed.address.street,
            6 => &mut echoed.address.suite,
            7 => &mut echoed.address.city,
            8 => &mut echoed.address.zipcode,
            9 => &mut echoed.address.geo.lat,
            10 => &mut echoed.address.geo.lng,
            11 => &mut echoed.company.name,
            12 => &mut echoed.company.catch_phrase,
            _ => &mut echoed.company.bs,
        };
        target.push('!');
        prop_assert!(compare_person(&person, &echoed).is_err());
    }
}
