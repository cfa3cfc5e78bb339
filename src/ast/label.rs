//! Label AST type

use std::{fmt, str};

/// A user-visible name for an address.
///
/// Labels are either global or local to some parent label, which several
/// assemblers spell as `parent.child`.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Label {
    name: String,
    parent_name: Option<String>,
}

impl Label {
    pub fn global(name: &str) -> Label {
        Label {
            name: name.to_string(),
            parent_name: None,
        }
    }

    pub fn local(name: &str, parent_name: &str) -> Label {
        Label {
            name: name.to_string(),
            parent_name: Some(parent_name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }
}

impl str::FromStr for Label {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split('.');
        let maybe_parent = split.next();
        let maybe_child = split.next();

        match (maybe_parent, maybe_child) {
            (Some(parent), Some(child)) => Ok(Label::local(child, parent)),
            (Some(name), None) => Ok(Label::global(name)),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref parent_name) = self.parent_name {
            write!(f, "{}.", parent_name)?;
        }

        write!(f, "{}", self.name)
    }
}

derive_deserialize_from_str!(Label, "valid label");
derive_serialize_from_display!(Label);
