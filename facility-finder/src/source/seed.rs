//! Bundled seed facilities.
//!
//! Shown before any search has run, served by the directory endpoint and
//! used whenever the directory cannot be reached.

use crate::domain::Facility;

use super::{FacilitySource, SourceError, SourceQuery};

/// (id, name, type, address, lat, lng, phone, services)
type SeedRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    &'static str,
    &'static [&'static str],
);

const SEED: &[SeedRow] = &[
    (
        "1",
        "Victoria Hospital",
        "Government Hospital",
        "Fort Road, Kalasipalya, Bengaluru 560002",
        12.9634,
        77.5738,
        "080-26701150",
        &["Emergency", "General Medicine", "Surgery", "Maternity"],
    ),
    (
        "2",
        "Manipal Hospital Old Airport Road",
        "Private Hospital",
        "98 HAL Old Airport Road, Kodihalli, Bengaluru 560017",
        12.9592,
        77.6484,
        "080-25024444",
        &["Emergency", "Cardiology", "Oncology", "Neurology", "Orthopedics"],
    ),
    (
        "3",
        "Jayanagar Urban PHC",
        "PHC",
        "9th Block, Jayanagar, Bengaluru 560069",
        12.9250,
        77.5938,
        "080-26630091",
        &["Immunization", "Maternal Care", "General OPD"],
    ),
    (
        "4",
        "St. Martha's Hospital",
        "Private Hospital",
        "Nrupathunga Road, Sampangi Rama Nagar, Bengaluru 560001",
        12.9699,
        77.5881,
        "080-40206000",
        &["Emergency", "General Medicine", "Pediatrics"],
    ),
    (
        "5",
        "Indiranagar Family Clinic",
        "Clinic",
        "100 Feet Road, HAL 2nd Stage, Indiranagar, Bengaluru 560038",
        12.9719,
        77.6412,
        "080-25201234",
        &["General Medicine", "Diabetes Care"],
    ),
    (
        "6",
        "Malleswaram Urban PHC",
        "PHC",
        "15th Cross, Malleswaram, Bengaluru 560003",
        13.0035,
        77.5709,
        "080-23346789",
        &["Immunization", "General OPD", "TB Screening"],
    ),
    (
        "7",
        "Koramangala Dental Care",
        "Clinic",
        "80 Feet Road, 4th Block, Koramangala, Bengaluru 560034",
        12.9352,
        77.6245,
        "080-41101234",
        &["Dentistry", "Orthodontics"],
    ),
    (
        "8",
        "Bowring and Lady Curzon Hospital",
        "Government Hospital",
        "Shivaji Nagar, Bengaluru 560001",
        12.9822,
        77.6047,
        "080-25591362",
        &["Emergency", "General Medicine", "Dermatology", "ENT"],
    ),
];

/// The bundled seed list, in its fixed order.
pub fn seed_facilities() -> Vec<Facility> {
    SEED.iter()
        .filter_map(|(id, name, kind, address, lat, lng, phone, services)| {
            Facility::new(*id, *name, *kind, *lat, *lng).ok().map(|f| {
                f.with_address(*address)
                    .with_phone(*phone)
                    .with_services(services.iter().copied())
            })
        })
        .collect()
}

/// Source that always returns [`seed_facilities`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

impl FacilitySource for SeedSource {
    async fn fetch(&self, _query: &SourceQuery) -> Result<Vec<Facility>, SourceError> {
        Ok(seed_facilities())
    }
}
