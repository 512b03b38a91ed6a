use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MacFormatError;

/// MAC-адрес в каноническом виде `aa:bb:cc:dd:ee:ff`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Принимает любые разделители и регистр; после удаления всего, что не hex,
    /// должно остаться ровно 12 цифр.
    pub fn normalize(input: &str) -> Result<Self, MacFormatError> {
        let digits: String = input
            .chars()
            .filter(char::is_ascii_hexdigit)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if digits.len() != 12 {
            return Err(MacFormatError {
                input: input.to_string(),
                digits: digits.len(),
            });
        }

        let canonical = digits
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair))
            .collect::<Vec<_>>()
            .join(":");

        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Имя пользователя RADIUS для MAB: те же цифры без двоеточий
    pub fn radius_username(&self) -> String {
        self.0.replace(':', "")
    }
}

impl FromStr for MacAddress {
    type Err = MacFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = MacFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
