use crate::provider::DnsRecord;
use serde::Serialize;

/// A query parameter as it appeared in the request: absent, given once, or repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) enum Param {
    #[default]
    Missing,
    Single(String),
    Repeated(Vec<String>),
}

impl Param {
    fn push(&mut self, value: String) {
        *self = match std::mem::take(self) {
            Param::Missing => Param::Single(value),
            Param::Single(first) => Param::Repeated(vec![first, value]),
            Param::Repeated(mut all) => {
                all.push(value);
                Param::Repeated(all)
            }
        };
    }

    /// The value, if the parameter was given exactly once.
    pub fn single(&self) -> Option<&str> {
        match self {
            Param::Single(value) => Some(value),
            Param::Missing | Param::Repeated(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct UpdateRecordRequest {
    pub secret: Param,
    pub name: Param,
    pub data: Param,
}

impl UpdateRecordRequest {
    /// Build a request from decoded query pairs, keeping every value of a repeated key.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut req = Self::default();
        for (key, value) in pairs {
            let param = match key.as_str() {
                "secret" => &mut req.secret,
                "name" => &mut req.name,
                "data" => &mut req.data,
                _ => continue,
            };
            param.push(value);
        }
        req
    }

    /// Whether the request carries exactly one `secret`, equal to `expected`.
    ///
    /// NB: plain comparison, not constant time.
    pub fn secret_matches(&self, expected: &str) -> bool {
        self.secret.single() == Some(expected)
    }

    /// Whether no usable `name` was given. A repeated `name` is present, but can never match
    /// a record.
    pub fn name_missing(&self) -> bool {
        match &self.name {
            Param::Missing => true,
            Param::Single(name) => name.is_empty(),
            Param::Repeated(_) => false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(super) struct UpdateRecordResult {
    pub ok: bool,
    pub record: DnsRecord,
}
