//! Fixed country list and the local filter behind the nationality
//! picker. Purely in-memory; the picker never makes network calls.

/// Countries offered by the nationality picker.
pub const COUNTRIES: [&str; 95] = [
    "Afghanistan",
    "Albania",
    "Algeria",
    "Argentina",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bangladesh",
    "Belarus",
    "Belgium",
    "Bolivia",
    "Bosnia and Herzegovina",
    "Brazil",
    "Bulgaria",
    "Cambodia",
    "Cameroon",
    "Canada",
    "Chile",
    "China",
    "Colombia",
    "Costa Rica",
    "Croatia",
    "Cuba",
    "Czech Republic",
    "Denmark",
    "Dominican Republic",
    "Ecuador",
    "Egypt",
    "Estonia",
    "Ethiopia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Ghana",
    "Greece",
    "Guatemala",
    "Honduras",
    "Hungary",
    "Iceland",
    "India",
    "Indonesia",
    "Iran",
    "Iraq",
    "Ireland",
    "Israel",
    "Italy",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kenya",
    "Kuwait",
    "Kyrgyzstan",
    "Latvia",
    "Lebanon",
    "Lithuania",
    "Malaysia",
    "Mexico",
    "Moldova",
    "Mongolia",
    "Morocco",
    "Myanmar",
    "Nepal",
    "Netherlands",
    "New Zealand",
    "Nicaragua",
    "Nigeria",
    "North Macedonia",
    "Norway",
    "Pakistan",
    "Panama",
    "Paraguay",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Qatar",
    "Romania",
    "Russia",
    "Saudi Arabia",
    "Serbia",
    "Singapore",
    "Slovakia",
    "Slovenia",
    "South Africa",
    "South Korea",
    "Spain",
    "Sri Lanka",
    "Sweden",
    "Switzerland",
    "Thailand",
    "Tunisia",
    "Turkey",
    "Ukraine",
];

const MAX_MATCHES: usize = 8;

/// Case-insensitive substring filter over [`COUNTRIES`], capped at 8
/// matches. An empty or whitespace-only query matches nothing, so the
/// picker stays closed until the user types.
pub fn match_countries(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    COUNTRIES
        .iter()
        .copied()
        .filter(|country| country.to_lowercase().contains(&needle))
        .take(MAX_MATCHES)
        .collect()
}

/// Whether a committed nationality value is one of the known
/// countries. The picker only commits exact entries, so this is the
/// validation gate for free-text input arriving over the wire.
pub fn is_known_country(value: &str) -> bool {
    COUNTRIES
        .iter()
        .any(|country| country.eq_ignore_ascii_case(value.trim()))
}
