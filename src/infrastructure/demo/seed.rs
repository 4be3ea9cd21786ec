use chrono::{Duration as Days, NaiveDate};

use crate::core::{DomainId, Record, RecordList, SectionId};

const CITIES: [&str; 6] = ["Lisbon", "Porto", "Sintra", "Evora", "Lagos", "Coimbra"];
const TOURS: [&str; 6] = [
    "Old Town Walk",
    "Douro Valley Wine",
    "Sunset Sailing",
    "Palace Day Trip",
    "Street Food Crawl",
    "Coastal Cliffs Hike",
];
const PEOPLE: [&str; 6] = [
    "Ana Sousa",
    "Miguel Costa",
    "Joana Reis",
    "Pedro Lima",
    "Rita Alves",
    "Tiago Nunes",
];

/// Small deterministic generator keyed by section and domain
struct Seq(u64);

impl Seq {
    fn new(section: SectionId, domain: &DomainId) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in section.as_str().bytes().chain(domain.as_str().bytes()) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Self(hash)
    }

    fn next(&mut self, below: u64) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 % below.max(1)
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.next(pool.len() as u64) as usize]
    }
}

/// Same section and domain always yield the same records
pub fn seeded_records(section: SectionId, domain: &DomainId) -> RecordList {
    let mut seq = Seq::new(section, domain);
    let prefix = section.as_str();
    let row = |i: usize| Record::new(format!("{prefix}-{}", i + 1));

    match section {
        SectionId::Dashboard | SectionId::Analytics => {
            let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or(NaiveDate::MIN);
            (0..14)
                .map(|i| {
                    let bookings = 8 + seq.next(30);
                    row(i)
                        .with("date", (start + Days::days(i as i64)).to_string())
                        .with("bookings", bookings)
                        .with("revenue", bookings * (40 + seq.next(60)))
                })
                .collect()
        }
        SectionId::Tours => (0..TOURS.len())
            .map(|i| {
                row(i)
                    .with("title", TOURS[i])
                    .with("city", seq.pick(&CITIES))
                    .with("price", 25 + seq.next(120))
                    .with("duration_hours", 2 + seq.next(7))
                    .with("summary", format!("{} with a local guide", TOURS[i]))
                    .with("body", "Meet at the main square. Small groups only.")
                    .with("images", 3 + seq.next(9))
                    .with("cover", format!("/media/tours/{}.jpg", i + 1))
                    .with("slug", TOURS[i].to_lowercase().replace(' ', "-"))
            })
            .collect(),
        SectionId::Bookings => (0..10)
            .map(|i| {
                row(i)
                    .with("tour", seq.pick(&TOURS))
                    .with("customer", seq.pick(&PEOPLE))
                    .with("guests", 1 + seq.next(5))
                    .with("status", seq.pick(&["confirmed", "pending", "cancelled"]))
            })
            .collect(),
        SectionId::Cities => (0..CITIES.len())
            .map(|i| {
                row(i)
                    .with("name", CITIES[i])
                    .with("country", "Portugal")
                    .with("tours", 1 + seq.next(12))
                    .with("description", format!("Experiences in {}", CITIES[i]))
                    .with("slug", CITIES[i].to_lowercase())
            })
            .collect(),
        SectionId::Categories => ["Walking", "Food & Wine", "Boat", "Day Trips"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                row(i)
                    .with("name", *name)
                    .with("tours", 1 + seq.next(20))
                    .with("slug", name.to_lowercase().replace(' ', "-"))
            })
            .collect(),
        SectionId::Reviews => (0..8)
            .map(|i| {
                row(i)
                    .with("tour", seq.pick(&TOURS))
                    .with("customer", seq.pick(&PEOPLE))
                    .with("rating", 3 + seq.next(3))
            })
            .collect(),
        SectionId::Customers | SectionId::Users => PEOPLE
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
                row(i)
                    .with("name", *name)
                    .with("email", email)
                    .with("bookings", seq.next(9))
            })
            .collect(),
        SectionId::Coupons => ["SUMMER", "WELCOME10", "GROUP5"]
            .iter()
            .enumerate()
            .map(|(i, code)| {
                row(i)
                    .with("code", *code)
                    .with("discount", 5 + seq.next(20))
                    .with("active", seq.next(2) == 0)
            })
            .collect(),
        SectionId::Variants | SectionId::Pricing => (0..6)
            .map(|i| {
                row(i)
                    .with("tour", seq.pick(&TOURS))
                    .with("name", seq.pick(&["Standard", "Private", "Family", "Premium"]))
                    .with("price", 30 + seq.next(150))
            })
            .collect(),
        SectionId::Countries => [("Portugal", "PT"), ("Spain", "ES")]
            .iter()
            .enumerate()
            .map(|(i, (name, code))| row(i).with("name", *name).with("code", *code))
            .collect(),
        SectionId::Currencies => [("EUR", "€"), ("USD", "$"), ("GBP", "£")]
            .iter()
            .enumerate()
            .map(|(i, (code, symbol))| row(i).with("code", *code).with("symbol", *symbol))
            .collect(),
        SectionId::Mail
        | SectionId::Collections
        | SectionId::Banners
        | SectionId::Partners
        | SectionId::Faqs
        | SectionId::Settings => (0..4)
            .map(|i| {
                row(i)
                    .with("name", format!("{} {}", section.title(), i + 1))
                    .with("updated", format!("2024-06-{:02}", 1 + seq.next(28)))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_deterministic_per_domain() {
        let one = DomainId::from("domain1");
        let two = DomainId::from("domain2");
        assert_eq!(
            seeded_records(SectionId::Bookings, &one),
            seeded_records(SectionId::Bookings, &one)
        );
        assert_ne!(
            seeded_records(SectionId::Bookings, &one),
            seeded_records(SectionId::Bookings, &two)
        );
    }

    #[test]
    fn dashboard_rows_carry_a_bookings_series() {
        let rows = seeded_records(SectionId::Dashboard, &DomainId::from("domain1"));
        assert_eq!(rows.len(), 14);
        assert!(rows.iter().all(|row| row.number("bookings").is_some()));
    }
}
