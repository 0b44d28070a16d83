//! URN:NBN identifiers for published documents.

use crate::error::HookResult;
use crate::plugin::{Plugin, StateChangeListener};
use opus_model::document::{ServerDates, STATE_PUBLISHED};
use opus_model::Entity;
use opus_types::{ConfigAccessor, ModelId};
use thiserror::Error;
use tracing::{debug, info};

/// Field receiving the URN.
pub const URN_FIELD: &str = "IdentifierUrn";

/// Config key of the namespace identifier, e.g. `"de"`.
pub const URN_NID_KEY: &str = "urn.nid";

/// Config key of the namespace-specific prefix, e.g. `"kobv:83-opus"`.
pub const URN_NSS_KEY: &str = "urn.nss";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrnError {
    #[error("URN namespace not configured: {0} is missing")]
    MissingNamespace(&'static str),

    #[error("character '{0}' cannot appear in a URN")]
    InvalidCharacter(char),
}

/// Assigns `urn:nbn:<nid>:<nss>-<id><check digit>` to documents entering the
/// `published` state.
///
/// Runs only on state transitions, before the record is written and again
/// once it has an id. Documents that already carry a URN are left alone.
/// A missing namespace makes the hook fail.
#[derive(Debug, Clone, Default)]
pub struct IdentifierUrn {
    nid: Option<String>,
    nss: Option<String>,
}

impl IdentifierUrn {
    pub const NAME: &'static str = "IdentifierUrn";

    pub fn new(nid: impl Into<String>, nss: impl Into<String>) -> Self {
        Self {
            nid: Some(nid.into()),
            nss: Some(nss.into()),
        }
    }

    pub fn from_config(config: &dyn ConfigAccessor) -> Self {
        Self {
            nid: config.get(URN_NID_KEY).filter(|s| !s.is_empty()),
            nss: config.get(URN_NSS_KEY).filter(|s| !s.is_empty()),
        }
    }

    /// Builds the URN for `id`, including its check digit.
    pub fn urn(&self, id: ModelId) -> Result<String, UrnError> {
        let nid = self
            .nid
            .as_deref()
            .ok_or(UrnError::MissingNamespace(URN_NID_KEY))?;
        let nss = self
            .nss
            .as_deref()
            .ok_or(UrnError::MissingNamespace(URN_NSS_KEY))?;

        let base = format!("urn:nbn:{nid}:{nss}-{id}");
        let check = urn_check_digit(&base)?;
        Ok(format!("{base}{check}"))
    }
}

fn char_code(c: char) -> Option<u32> {
    let code = match c {
        '0' => 1,
        '1' => 2,
        '2' => 3,
        '3' => 4,
        '4' => 5,
        '5' => 6,
        '6' => 7,
        '7' => 8,
        '8' => 9,
        '9' => 41,
        'a' => 18,
        'b' => 14,
        'c' => 19,
        'd' => 15,
        'e' => 16,
        'f' => 21,
        'g' => 22,
        'h' => 23,
        'i' => 24,
        'j' => 25,
        'k' => 42,
        'l' => 26,
        'm' => 27,
        'n' => 13,
        'o' => 28,
        'p' => 29,
        'q' => 31,
        'r' => 12,
        's' => 32,
        't' => 33,
        'u' => 11,
        'v' => 34,
        'w' => 35,
        'x' => 36,
        'y' => 37,
        'z' => 38,
        '+' => 49,
        ':' => 17,
        '-' => 39,
        '/' => 45,
        '_' => 43,
        '.' => 47,
        _ => return None,
    };
    Some(code)
}

/// Check digit of a URN:NBN as defined by the German National Library.
///
/// Each character maps to a one- or two-digit code. The digits of the
/// concatenated codes are weighted by their 1-based position and summed; the
/// check digit is the last digit of that sum divided by the final code digit.
pub fn urn_check_digit(urn: &str) -> Result<u32, UrnError> {
    let mut digits = Vec::with_capacity(urn.len() * 2);
    for c in urn.chars().map(|c| c.to_ascii_lowercase()) {
        let code = char_code(c).ok_or(UrnError::InvalidCharacter(c))?;
        if code >= 10 {
            digits.push(code / 10);
        }
        digits.push(code % 10);
    }

    let sum: u32 = digits
        .iter()
        .zip(1u32..)
        .map(|(&digit, position)| digit * position)
        .sum();
    // Codes never end in 0.
    let last = match digits.last() {
        Some(&last) if last != 0 => last,
        _ => return Ok(0),
    };
    Ok((sum / last) % 10)
}

impl IdentifierUrn {
    fn assign(&self, entity: &mut Entity) -> HookResult {
        if entity.server_state()?.as_deref() != Some(STATE_PUBLISHED) {
            return Ok(());
        }
        if entity.get(URN_FIELD)?.is_some() {
            return Ok(());
        }
        let Some(id) = entity.id() else {
            debug!(model_type = %entity.model_type(), "Published record has no id yet, no URN assigned");
            return Ok(());
        };

        let urn = self.urn(id)?;
        info!(id = %id, urn = %urn, "Assigned URN");
        entity.set(URN_FIELD, urn)?;
        Ok(())
    }
}

impl Plugin for IdentifierUrn {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn pre_store(&mut self, entity: &mut Entity) -> HookResult {
        self.assign(entity)
    }

    /// Covers records published by the store that creates them.
    fn post_store_internal(&mut self, entity: &mut Entity) -> HookResult {
        self.assign(entity)
    }

    fn as_state_change_listener(&self) -> Option<&dyn StateChangeListener> {
        Some(self)
    }
}

impl StateChangeListener for IdentifierUrn {}
