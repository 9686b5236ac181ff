//! The fixed-shape `.aupreset` document

/// A typed property list value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Base64 text, written as `<data>`
    Data(&'a str),
    Integer(u32),
    String(&'a str),
}

impl Value<'_> {
    /// Element name used in the property list
    pub fn element(&self) -> &'static str {
        match self {
            Value::Data(_) => "data",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
        }
    }
}

/// One converted preset; built once and never modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) state_key: String,
    pub(crate) state: String,
    pub(crate) manufacturer: u32,
    pub(crate) name: String,
    pub(crate) subtype: u32,
    pub(crate) au_type: u32,
}

impl Document {
    /// Key holding the base64 plugin state
    pub fn state_key(&self) -> &str {
        &self.state_key
    }

    /// Base64 text of the plugin chunk
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer(&self) -> u32 {
        self.manufacturer
    }

    pub fn subtype(&self) -> u32 {
        self.subtype
    }

    pub fn au_type(&self) -> u32 {
        self.au_type
    }

    /// Entries in serialization order
    pub fn entries(&self) -> [(&str, Value<'_>); 6] {
        [
            (self.state_key.as_str(), Value::Data(&self.state)),
            ("manufacturer", Value::Integer(self.manufacturer)),
            ("name", Value::String(&self.name)),
            ("subtype", Value::Integer(self.subtype)),
            ("type", Value::Integer(self.au_type)),
            ("version", Value::Integer(0)),
        ]
    }
}
