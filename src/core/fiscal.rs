//! Italian fiscal identifier grammars.
//!
//! Shape checks for the Codice Fiscale (natural persons) and the Partita IVA
//! (companies), plus the auxiliary formats collected by onboarding forms:
//! email / PEC, CAP, provincia, SDI recipient code and the device PIN issued
//! by the Agenzia delle Entrate.
//!
//! Every predicate is anchored at both ends, case-sensitive and total: any
//! input that does not match, including the empty string, yields `false`.
//! Inputs are never normalized here; see
//! [`normalize_upper`](super::normalize_upper) for what the forms do first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FatturaError;

/// Omocodia substitution table: index `d` holds the letter that replaces
/// digit `d` when the Agenzia delle Entrate resolves a Codice Fiscale
/// collision.
pub const OMOCODIA: [u8; 10] = *b"LMNPQRSTUV";

/// Positions (0-indexed) of a Codice Fiscale that may carry an omocodia
/// letter instead of a digit: year, day and sequence digits.
pub const OMOCODIA_POSITIONS: [usize; 7] = [6, 7, 9, 10, 12, 13, 14];

/// Length of a Codice Fiscale for natural persons.
pub const CODICE_FISCALE_LEN: usize = 16;

/// Length of a Partita IVA.
pub const PARTITA_IVA_LEN: usize = 11;

/// Omocodia letter standing in for `digit`, if `digit` is 0-9.
pub fn omocodia_letter(digit: u8) -> Option<char> {
    OMOCODIA.get(usize::from(digit)).map(|&b| char::from(b))
}

/// Digit replaced by the omocodia letter `letter`, if it is one.
pub fn omocodia_digit(letter: char) -> Option<u8> {
    if !letter.is_ascii() {
        return None;
    }
    OMOCODIA
        .iter()
        .position(|&b| b == letter as u8)
        .map(|d| d as u8)
}

/// Shape of a single Codice Fiscale position.
#[derive(Clone, Copy)]
enum Slot {
    /// `A-Z`
    Letter,
    /// `0-9` or an omocodia letter
    Digit,
    /// `A-Z` or `0-9` (cadastral code, digits show up in sandbox codes)
    Alnum,
}

/// 6 name letters, year, month, day/sex, cadastral, sequence, check letter.
const CF_LAYOUT: [Slot; CODICE_FISCALE_LEN] = [
    Slot::Letter,
    Slot::Letter,
    Slot::Letter,
    Slot::Letter,
    Slot::Letter,
    Slot::Letter,
    Slot::Digit,
    Slot::Digit,
    Slot::Letter,
    Slot::Digit,
    Slot::Digit,
    Slot::Alnum,
    Slot::Digit,
    Slot::Digit,
    Slot::Digit,
    Slot::Letter,
];

impl Slot {
    fn accepts(self, b: u8) -> bool {
        match self {
            Self::Letter => b.is_ascii_uppercase(),
            Self::Digit => b.is_ascii_digit() || OMOCODIA.contains(&b),
            Self::Alnum => b.is_ascii_uppercase() || b.is_ascii_digit(),
        }
    }
}

/// Check whether `s` has the shape of a Codice Fiscale.
///
/// Any subset of the seven digit positions may carry its omocodia letter.
/// The month letter is not checked against the real month table and the
/// check character is not verified.
pub fn is_codice_fiscale(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == CODICE_FISCALE_LEN
        && bytes
            .iter()
            .zip(CF_LAYOUT.iter())
            .all(|(&b, slot)| slot.accepts(b))
}

/// Check whether `s` is exactly 11 ASCII digits. Leading zeros are fine,
/// the check digit is not verified.
pub fn is_partita_iva(s: &str) -> bool {
    all_digits(s, PARTITA_IVA_LEN)
}

/// Login-time identifier: either a Codice Fiscale or a Partita IVA.
pub fn is_fiscal_id(s: &str) -> bool {
    is_codice_fiscale(s) || is_partita_iva(s)
}

/// Lightweight client-side email check, also used for PEC addresses.
///
/// `local@domain.tld` where the local part is `[A-Za-z0-9._%+-]+`, the
/// domain `[A-Za-z0-9.-]+` and the top-level segment at least two ASCII
/// letters. Not RFC 5322.
pub fn is_email(s: &str) -> bool {
    let Some((local, host)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._%+-".contains(&b))
    {
        return false;
    }
    if !host
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
    {
        return false;
    }
    // the last dot is the only candidate: anything after a later dot would
    // not be letters-only
    match host.rsplit_once('.') {
        Some((domain, tld)) => {
            !domain.is_empty() && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// CAP (codice di avviamento postale): exactly 5 digits.
pub fn is_postal_code(s: &str) -> bool {
    all_digits(s, 5)
}

/// Provincia: exactly 2 uppercase letters. Not checked against the list of
/// existing provinces.
pub fn is_province_code(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// SDI recipient code: exactly 7 uppercase letters or digits.
pub fn is_sdi_code(s: &str) -> bool {
    s.len() == 7
        && s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// PIN of the Agenzia delle Entrate device: exactly 8 digits.
pub fn is_device_pin(s: &str) -> bool {
    all_digits(s, 8)
}

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Which of the two identifier forms a [`FiscalIdentifier`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiscalIdKind {
    /// 16-character Codice Fiscale of a natural person.
    CodiceFiscale,
    /// 11-digit Partita IVA.
    PartitaIva,
}

/// A validated fiscal identifier.
///
/// Only [`parse`](Self::parse), `FromStr`, `TryFrom` and deserialization
/// construct one, so the value always matches its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalIdentifier {
    kind: FiscalIdKind,
    value: String,
}

impl FiscalIdentifier {
    /// Classify `s` without any normalization.
    pub fn parse(s: &str) -> Result<Self, FatturaError> {
        let kind = if is_codice_fiscale(s) {
            FiscalIdKind::CodiceFiscale
        } else if is_partita_iva(s) {
            FiscalIdKind::PartitaIva
        } else {
            return Err(FatturaError::Validation(format!(
                "'{s}' is neither a Codice Fiscale nor a Partita IVA"
            )));
        };
        Ok(Self {
            kind,
            value: s.to_string(),
        })
    }

    pub fn kind(&self) -> FiscalIdKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_codice_fiscale(&self) -> bool {
        self.kind == FiscalIdKind::CodiceFiscale
    }

    pub fn is_partita_iva(&self) -> bool {
        self.kind == FiscalIdKind::PartitaIva
    }

    /// Codice Fiscale with every omocodia letter in a digit position turned
    /// back into its digit. A Partita IVA is returned as is.
    pub fn without_omocodia(&self) -> String {
        match self.kind {
            FiscalIdKind::PartitaIva => self.value.clone(),
            FiscalIdKind::CodiceFiscale => self
                .value
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if OMOCODIA_POSITIONS.contains(&i) {
                        omocodia_digit(c).map_or(c, |d| char::from(b'0' + d))
                    } else {
                        c
                    }
                })
                .collect(),
        }
    }

    /// Number of digit positions carrying an omocodia letter (0 for a
    /// Partita IVA).
    pub fn omocodia_level(&self) -> usize {
        match self.kind {
            FiscalIdKind::PartitaIva => 0,
            FiscalIdKind::CodiceFiscale => {
                let bytes = self.value.as_bytes();
                OMOCODIA_POSITIONS
                    .iter()
                    .filter(|&&i| bytes.get(i).is_some_and(u8::is_ascii_uppercase))
                    .count()
            }
        }
    }
}

impl fmt::Display for FiscalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FiscalIdentifier {
    type Err = FatturaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FiscalIdentifier {
    type Error = FatturaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FiscalIdentifier {
    type Error = FatturaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FiscalIdentifier> for String {
    fn from(id: FiscalIdentifier) -> Self {
        id.value
    }
}
