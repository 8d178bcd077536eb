//! This file defines types that handle PIN validation and hashing.
//! `ValidatedPin` wraps a string and ensures it has the right shape.
//! `PinHash` converts a `ValidatedPin` into a salted and hashed PIN.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The bcrypt cost used when hashing PINs for storage.
///
/// PINs only have five digits of entropy, so the work factor is what slows
/// an offline guessing attack down.
pub const HASH_COST: u32 = 10;

/// The number of characters a PIN must have.
pub const PIN_LENGTH: usize = 5;

/// A PIN that has been validated, but not yet hashed.
///
/// This struct can be used to construct a [PinHash].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPin(String);

impl ValidatedPin {
    /// Create and validate a new PIN from a string.
    ///
    /// Only the length is checked: the stored credential is whatever
    /// five-character string the user submitted, which is what the hash
    /// comparison during verification operates on.
    ///
    /// # Errors
    /// Returns [Error::InvalidPinLength] if `raw_pin` is not exactly
    /// [PIN_LENGTH] characters long.
    pub fn new(raw_pin: &str) -> Result<Self, Error> {
        if raw_pin.chars().count() != PIN_LENGTH {
            return Err(Error::InvalidPinLength);
        }

        Ok(Self(raw_pin.to_string()))
    }

    /// Create a new `ValidatedPin` without any validation.
    ///
    /// The caller should ensure that `raw_pin` is a five-digit PIN.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because an invalid PIN may cause incorrect behaviour but will not
    /// affect memory safety.
    pub fn new_unchecked(raw_pin: &str) -> Self {
        Self(raw_pin.to_string())
    }
}

impl Display for ValidatedPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", PIN_LENGTH))
    }
}

/// A salted and hashed PIN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinHash(String);

impl PinHash {
    /// Create a hashed PIN from a validated PIN with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a PIN. Pass in [HASH_COST] outside of tests.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the PIN could not be hashed.
    pub fn new(pin: &ValidatedPin, cost: u32) -> Result<Self, Error> {
        match hash(&pin.0, cost) {
            Ok(pin_hash) => Ok(Self(pin_hash)),
            Err(error) => Err(Error::HashingError(error.to_string())),
        }
    }

    /// Create a new `PinHash` without any validation.
    ///
    /// The caller should ensure that `raw_pin_hash` is a valid bcrypt hash.
    pub fn new_unchecked(raw_pin_hash: &str) -> Self {
        Self(raw_pin_hash.to_string())
    }

    /// Try to create a PIN hash from a raw PIN string.
    ///
    /// This is a convenience function that removes the need to manually
    /// create the intermediate [ValidatedPin] type.
    ///
    /// # Errors
    /// Returns [Error::InvalidPinLength] for a PIN of the wrong length, or
    /// [Error::HashingError] if hashing fails.
    pub fn from_raw_pin(raw_pin: &str, cost: u32) -> Result<Self, Error> {
        let validated_pin = ValidatedPin::new(raw_pin)?;
        PinHash::new(&validated_pin, cost)
    }

    /// Check that `raw_pin` matches the stored PIN.
    pub fn verify(&self, raw_pin: &str) -> Result<bool, BcryptError> {
        verify(raw_pin, &self.0)
    }
}

impl Display for PinHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod validated_pin_tests {
    use crate::{Error, pin::ValidatedPin};

    #[test]
    fn new_fails_on_empty() {
        let result = ValidatedPin::new("");

        assert_eq!(result, Err(Error::InvalidPinLength));
    }

    #[test]
    fn new_fails_on_short_pin() {
        let result = ValidatedPin::new("1234");

        assert_eq!(result, Err(Error::InvalidPinLength));
    }

    #[test]
    fn new_fails_on_long_pin() {
        let result = ValidatedPin::new("123456");

        assert_eq!(result, Err(Error::InvalidPinLength));
    }

    #[test]
    fn new_accepts_any_five_characters() {
        // Only the length is validated, the content is the user's choice.
        for pin in ["12345", "00000", "abcde"] {
            assert!(
                ValidatedPin::new(pin).is_ok(),
                "want {pin:?} to be accepted"
            );
        }
    }

    #[test]
    fn display_masks_the_pin() {
        let pin = ValidatedPin::new("12345").unwrap();

        assert_eq!(pin.to_string(), "*****");
    }
}
