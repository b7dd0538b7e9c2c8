//! Fake record generation
//!
//! Builds randomized but syntactically valid [`PersonRecord`] graphs for use
//! as request payloads. Every call draws fresh values from the generator's
//! random source; nothing is counted or deduplicated between calls, so two
//! records may collide.

use rand::rngs::{OsRng, StdRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::types::{Address, Company, GeoPoint, PersonRecord};

const FIRST_NAMES: &[&str] = &[
    "Leanne", "Ervin", "Clementine", "Patricia", "Chelsey", "Dennis", "Kurtis", "Nicholas",
    "Glenna", "Clementina", "Adah", "Brandon", "Carmela", "Delphine", "Elwyn", "Florence",
    "Gideon", "Hattie", "Ignatius", "Josefina", "Kamren", "Lorenzo", "Marisol", "Nathaniel",
    "Ophelia", "Percival", "Quinton", "Rosalind", "Sylvester", "Theodora",
];

const LAST_NAMES: &[&str] = &[
    "Graham", "Howell", "Bauch", "Lebsack", "Dietrich", "Schulist", "Weissnat", "Runolfsdottir",
    "Reichert", "DuBuque", "Kuhic", "Okuneva", "Hintz", "Lakin", "Marvin", "Nolan", "Ortiz",
    "Padberg", "Quigley", "Rempel", "Stroman", "Tromp", "Upton", "Volkman", "Wunsch",
];

const EMAIL_PROVIDERS: &[&str] = &[
    "gmail.com", "yahoo.com", "hotmail.com", "april.biz", "melissa.tv", "kory.org",
];

const DOMAIN_WORDS: &[&str] = &[
    "hildegard", "anastasia", "ramiro", "kale", "demarco", "ola", "elvis", "jacynthe",
    "conrad", "ambrose", "lorem", "vesta",
];

const DOMAIN_SUFFIXES: &[&str] = &["org", "net", "info", "biz", "com", "io", "name", "tv"];

const STREET_SUFFIXES: &[&str] = &[
    "Light", "Extension", "Plains", "Street", "Avenue", "Road", "Crossing", "Keys", "Walks",
    "Parkway", "Loop", "Trail",
];

const CITY_PREFIXES: &[&str] = &["North", "South", "East", "West", "New", "Lake", "Port"];

const CITY_SUFFIXES: &[&str] = &["borough", "ville", "furt", "mouth", "haven", "side", "land"];

const COMPANY_SUFFIXES: &[&str] = &["Group", "LLC", "Inc", "and Sons"];

const CATCH_ADJECTIVES: &[&str] = &[
    "Multi-layered", "Proactive", "Face to face", "Multi-tiered", "User-centric",
    "Synchronised", "Configurable", "Implemented", "Switchable", "Centralized",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "client-server", "didactic", "bottom-line", "tangible", "zero tolerance", "local",
    "optimizing", "fault-tolerant", "national", "explicit",
];

const CATCH_NOUNS: &[&str] = &[
    "neural-net", "contingency", "extranet", "moderator", "knowledge user", "leverage",
    "interface", "toolset", "methodology", "framework",
];

const BS_VERBS: &[&str] = &[
    "harness", "synergize", "e-enable", "transition", "revolutionize", "aggregate",
    "target", "generate", "orchestrate", "deploy",
];

const BS_ADJECTIVES: &[&str] = &[
    "real-time", "scalable", "end-to-end", "strategic", "cutting-edge", "B2C", "dynamic",
    "wireless", "integrated", "vertical",
];

const BS_NOUNS: &[&str] = &[
    "e-markets", "supply-chains", "models", "action-items", "channels", "web services",
    "paradigms", "networks", "metrics", "platforms",
];

const PHONE_FORMATS: &[&str] = &[
    "###-###-####",
    "(###) ###-####",
    "1-###-###-####",
    "###.###.####",
    "1-###-###-#### x#####",
];

/// Generates fake [`PersonRecord`] graphs from a random source
#[derive(Debug)]
pub struct RecordGenerator<R: Rng = StdRng> {
    rng: R,
}

impl RecordGenerator<StdRng> {
    /// Deterministic generator, for reproducible fixtures
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system's entropy source
    pub fn from_os_rng() -> Result<Self> {
        let rng = StdRng::from_rng(OsRng)?;
        Ok(Self::new(rng))
    }
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// A complete person with address and company. `id` is left unset.
    pub fn person(&mut self) -> PersonRecord {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let name = format!("{} {}", first, last);
        let username = self.username();
        let email = self.email();
        let address = self.address();
        let phone = self.phone();
        let website = self.domain();
        let company = self.company();

        debug!(username = %username, "generated person record");

        PersonRecord {
            id: None,
            name,
            username,
            email,
            address,
            phone,
            website,
            company,
        }
    }

    pub fn address(&mut self) -> Address {
        let street = format!("{} {}", self.pick(LAST_NAMES), self.pick(STREET_SUFFIXES));
        let suite = if self.rng.gen_bool(0.5) {
            format!("Apt. {}", self.digits(3))
        } else {
            format!("Suite {}", self.digits(3))
        };
        let city = self.city();
        let zipcode = if self.rng.gen_bool(0.5) {
            self.digits(5)
        } else {
            format!("{}-{}", self.digits(5), self.digits(4))
        };

        Address {
            street,
            suite,
            city,
            zipcode,
            geo: self.geo(),
        }
    }

    pub fn geo(&mut self) -> GeoPoint {
        let lat: f64 = self.rng.gen_range(-90.0..=90.0);
        let lng: f64 = self.rng.gen_range(-180.0..=180.0);
        GeoPoint {
            lat: format!("{:.4}", lat),
            lng: format!("{:.4}", lng),
        }
    }

    pub fn company(&mut self) -> Company {
        let name = match self.rng.gen_range(0..3) {
            0 => format!("{} {}", self.pick(LAST_NAMES), self.pick(COMPANY_SUFFIXES)),
            1 => format!("{}-{}", self.pick(LAST_NAMES), self.pick(LAST_NAMES)),
            _ => format!(
                "{}, {} and {}",
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES),
                self.pick(LAST_NAMES)
            ),
        };
        let catch_phrase = format!(
            "{} {} {}",
            self.pick(CATCH_ADJECTIVES),
            self.pick(CATCH_DESCRIPTORS),
            self.pick(CATCH_NOUNS)
        );
        let bs = format!(
            "{} {} {}",
            self.pick(BS_VERBS),
            self.pick(BS_ADJECTIVES),
            self.pick(BS_NOUNS)
        );

        Company {
            name,
            catch_phrase,
            bs,
        }
    }

    fn username(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        match self.rng.gen_range(0..4) {
            0 => format!("{}.{}", first, last),
            1 => format!("{}_{}", first, last),
            2 => format!("{}{}{}", first, last, self.rng.gen_range(10..100)),
            _ => format!("{}{}", first, self.rng.gen_range(10..100)),
        }
    }

    fn email(&mut self) -> String {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let provider = self.pick(EMAIL_PROVIDERS);
        let local = if self.rng.gen_bool(0.5) {
            format!("{}.{}", first, last)
        } else {
            format!("{}{}", first, self.rng.gen_range(10..100))
        };
        format!("{}@{}", local.to_ascii_lowercase(), provider)
    }

    fn phone(&mut self) -> String {
        let format = self.pick(PHONE_FORMATS);
        format
            .chars()
            .map(|c| {
                if c == '#' {
                    char::from(b'0' + self.rng.gen_range(0..10u8))
                } else {
                    c
                }
            })
            .collect()
    }

    fn domain(&mut self) -> String {
        let word = self.pick(DOMAIN_WORDS);
        let suffix = self.pick(DOMAIN_SUFFIXES);
        if self.rng.gen_bool(0.3) {
            format!("{}-{}.{}", word, self.pick(DOMAIN_WORDS), suffix)
        } else {
            format!("{}.{}", word, suffix)
        }
    }

    fn city(&mut self) -> String {
        let base = self.pick(LAST_NAMES);
        let suffix = self.pick(CITY_SUFFIXES);
        if self.rng.gen_bool(0.4) {
            format!("{} {}{}", self.pick(CITY_PREFIXES), base, suffix)
        } else {
            format!("{}{}", base, suffix)
        }
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        // Tables are non-empty constants.
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_person;

    #[test]
    fn test_generated_person_is_valid() {
        let mut generator = RecordGenerator::seeded(7);
        for _ in 0..50 {
            let person = generator.person();
            assert!(person.id.is_none());
            validate_person(&person).unwrap();
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = RecordGenerator::seeded(42).person();
        let b = RecordGenerator::seeded(42).person();
        assert_eq!(a, b);
    }

    #[test]
    fn test_later_calls_leave_earlier_records_alone() {
        let mut generator = RecordGenerator::seeded(3);
        let first = generator.person();
        let snapshot = first.clone();
        let _second = generator.person();
        assert_eq!(first, snapshot);
    }

    #[test]
    fn test_email_local_part_is_lowercase() {
        let mut generator = RecordGenerator::seeded(13);
        for _ in 0..20 {
            let email = generator.email();
            let local = email.split('@').next().unwrap();
            assert_eq!(local, local.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_phone_has_no_placeholders() {
        let mut generator = RecordGenerator::seeded(11);
        for _ in 0..20 {
            let phone = generator.phone();
            assert!(!phone.contains('#'), "{}", phone);
            assert!(phone.chars().any(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        let mut generator = RecordGenerator::seeded(5);
        for _ in 0..100 {
            let geo = generator.geo();
            let lat: f64 = geo.lat.parse().unwrap();
            let lng: f64 = geo.lng.parse().unwrap();
            assert!((-90.0..=90.0).contains(&lat));
            assert!((-180.0..=180.0).contains(&lng));
        }
    }

    #[test]
    fn test_os_rng_generator() {
        let mut generator = RecordGenerator::from_os_rng().unwrap();
        assert!(!generator.person().name.is_empty());
    }
}
