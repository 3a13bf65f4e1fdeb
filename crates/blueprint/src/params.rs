use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Free-form parameters forwarded to a function node. Defaults to `{}`.
pub type ParamMap = Map<String, Value>;

/// `[x, y]` graph coordinates. Defaults to `[0, 0]`.
///
/// Numbers are kept as given so `[100, 200]` is sent as integers and
/// `[10.5, 0]` keeps its fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition(pub [Number; 2]);

impl NodePosition {
    pub fn new(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self([x.into(), y.into()])
    }

    pub fn x(&self) -> &Number {
        &self.0[0]
    }

    pub fn y(&self) -> &Number {
        &self.0[1]
    }
}

impl Default for NodePosition {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Deserialize an optional argument, treating an explicit `null` like an
/// omitted one.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
