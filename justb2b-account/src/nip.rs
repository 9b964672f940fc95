use serde::{Deserialize, Serialize};

/// Checksum weights for the first nine NIP digits.
const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Strip the separators people type into NIP inputs ("526-025-02-74").
pub fn normalize_nip(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Polish NIP validation: exactly ten digits with a valid weighted
/// checksum. A weighted sum of 10 mod 11 can never match a digit, so
/// those numbers are always invalid.
pub fn is_valid_nip(raw: &str) -> bool {
    let nip = normalize_nip(raw);
    let digits: Vec<u32> = nip.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 10 || nip.len() != 10 {
        return false;
    }
    let sum: u32 = NIP_WEIGHTS.iter().zip(&digits).map(|(w, d)| w * d).sum();
    let checksum = sum % 11;
    checksum != 10 && checksum == digits[9]
}

/// Address parsed out of the Ministry-of-Finance white-list register.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyAddress {
    pub street: String,
    pub postcode: Option<String>,
    pub city: String,
}

/// Split a register address like `"UL. RÓŻANA 12, 00-001 WARSZAWA"` into
/// street, postcode and city.
///
/// The register usually separates street and locality with a comma;
/// addresses without one are split around the postcode token instead.
/// Anything unparseable lands in `street` rather than being lost.
pub fn parse_whitelist_address(raw: &str) -> CompanyAddress {
    let raw = raw.trim();
    if raw.is_empty() {
        return CompanyAddress::default();
    }

    if let Some((street_part, locality)) = raw.split_once(',') {
        let street = street_part.trim().to_string();
        let locality = locality.trim();
        match find_postcode(locality) {
            Some((start, postcode)) => {
                let city = format!("{}{}", &locality[..start], &locality[start + 6..])
                    .trim()
                    .to_string();
                CompanyAddress {
                    street,
                    postcode: Some(postcode),
                    city,
                }
            }
            None => CompanyAddress {
                street,
                postcode: None,
                city: locality.to_string(),
            },
        }
    } else {
        match find_postcode(raw) {
            Some((start, postcode)) => CompanyAddress {
                street: raw[..start].trim().to_string(),
                postcode: Some(postcode),
                city: raw[start + 6..].trim().to_string(),
            },
            None => CompanyAddress {
                street: raw.to_string(),
                postcode: None,
                city: String::new(),
            },
        }
    }
}

/// Leftmost `dd-ddd` token. Digits and the dash are ASCII, so the byte
/// scan stays on character boundaries even in accented locality names.
fn find_postcode(s: &str) -> Option<(usize, String)> {
    let bytes = s.as_bytes();
    if bytes.len() < 6 {
        return None;
    }
    for i in 0..=bytes.len() - 6 {
        if bytes[i].is_ascii_digit()
            && bytes[i + 1].is_ascii_digit()
            && bytes[i + 2] == b'-'
            && bytes[i + 3].is_ascii_digit()
            && bytes[i + 4].is_ascii_digit()
            && bytes[i + 5].is_ascii_digit()
        {
            return Some((i, s[i..i + 6].to_string()));
        }
    }
    None
}
