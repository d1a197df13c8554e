use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{CanonicalSearch, Partition};

impl Serialize for Partition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Partition", 2)?;
        state.serialize_field("system_size", &self.system_size())?;
        state.serialize_field("classes", self.classes())?;
        state.end()
    }
}

impl Serialize for CanonicalSearch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CanonicalSearch", 2)?;
        state.serialize_field("representative", &self.representative)?;
        state.serialize_field("rounds", &self.rounds)?;
        state.end()
    }
}
