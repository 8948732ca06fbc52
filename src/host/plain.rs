use super::{HostError, HostObject, HostValue, PropertyDescriptor, PropertyKey};

/// Ordinary iterable object, like an array.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    items: Vec<HostValue>,
}

impl Sequence {
    #[inline]
    pub fn new(items: Vec<HostValue>) -> Self {
        Self { items }
    }

    /// Create a sequence of string pairs.
    pub fn pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<HostValue>,
        V: Into<HostValue>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(name, value)| {
                    HostValue::object(Sequence::new(vec![name.into(), value.into()]))
                })
                .collect(),
        }
    }
}

impl HostObject for Sequence {
    fn is_iterable(&self) -> Result<bool, HostError> {
        Ok(true)
    }

    fn iterate(&self) -> Result<Vec<HostValue>, HostError> {
        Ok(self.items.clone())
    }

    fn own_keys(&self) -> Result<Vec<PropertyKey>, HostError> {
        let mut buf = itoa::Buffer::new();
        let mut keys: Vec<PropertyKey> = (0..self.items.len())
            .map(|i| PropertyKey::from(buf.format(i)))
            .collect();
        keys.push(PropertyKey::from("length"));
        Ok(keys)
    }

    fn get_own_property(&self, key: &PropertyKey) -> Result<Option<PropertyDescriptor>, HostError> {
        Ok(match key {
            PropertyKey::String(key) if key == "length" => Some(PropertyDescriptor::hidden()),
            PropertyKey::String(key) => match key.parse::<usize>() {
                Ok(i) if i < self.items.len() => Some(PropertyDescriptor::enumerable()),
                _ => None,
            },
            PropertyKey::Symbol(_) => None,
        })
    }

    fn get(&self, key: &PropertyKey) -> Result<HostValue, HostError> {
        Ok(match key {
            PropertyKey::String(key) if key == "length" => {
                HostValue::Number(self.items.len() as f64)
            }
            PropertyKey::String(key) => match key.parse::<usize>() {
                Ok(i) => self.items.get(i).cloned().unwrap_or(HostValue::Undefined),
                Err(_) => HostValue::Undefined,
            },
            PropertyKey::Symbol(_) => HostValue::Undefined,
        })
    }

    /// Items joined with `,`, `undefined` and `null` items are empty.
    fn to_host_string(&self) -> Result<String, HostError> {
        let mut out = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i != 0 {
                out.push(',');
            }
            if !matches!(item, HostValue::Undefined | HostValue::Null) {
                out.push_str(&item.to_host_string()?);
            }
        }
        Ok(out)
    }
}

/// Ordinary non-iterable object with properties in definition order.
#[derive(Clone, Debug, Default)]
pub struct Record {
    properties: Vec<Property>,
}

#[derive(Clone, Debug)]
struct Property {
    key: PropertyKey,
    enumerable: bool,
    value: HostValue,
}

impl Record {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an enumerable property, replacing existing value with the same key.
    pub fn with<K: Into<PropertyKey>, V: Into<HostValue>>(self, key: K, value: V) -> Self {
        self.define(key.into(), value.into(), true)
    }

    /// Define a non-enumerable property, replacing existing value with the same key.
    pub fn with_hidden<K: Into<PropertyKey>, V: Into<HostValue>>(self, key: K, value: V) -> Self {
        self.define(key.into(), value.into(), false)
    }

    fn define(mut self, key: PropertyKey, value: HostValue, enumerable: bool) -> Self {
        match self.properties.iter_mut().find(|p| p.key == key) {
            Some(property) => {
                property.value = value;
                property.enumerable = enumerable;
            }
            None => self.properties.push(Property {
                key,
                enumerable,
                value,
            }),
        }
        self
    }

    fn property(&self, key: &PropertyKey) -> Option<&Property> {
        self.properties.iter().find(|p| &p.key == key)
    }
}

impl<K: Into<PropertyKey>, V: Into<HostValue>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Record::new(), |record, (key, value)| record.with(key, value))
    }
}

impl HostObject for Record {
    fn is_iterable(&self) -> Result<bool, HostError> {
        Ok(false)
    }

    fn iterate(&self) -> Result<Vec<HostValue>, HostError> {
        Err(HostError::new("object is not iterable"))
    }

    fn own_keys(&self) -> Result<Vec<PropertyKey>, HostError> {
        Ok(self.properties.iter().map(|p| p.key.clone()).collect())
    }

    fn get_own_property(&self, key: &PropertyKey) -> Result<Option<PropertyDescriptor>, HostError> {
        Ok(self
            .property(key)
            .map(|p| PropertyDescriptor { enumerable: p.enumerable }))
    }

    fn get(&self, key: &PropertyKey) -> Result<HostValue, HostError> {
        Ok(self
            .property(key)
            .map(|p| p.value.clone())
            .unwrap_or(HostValue::Undefined))
    }
}
