//! Serde adapters serializing arkworks objects as their canonical
//! compressed bytes.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{fmt, marker::PhantomData, vec, vec::Vec};
use serde::{
    de::{SeqAccess, Visitor},
    Deserializer, Serializer,
};
use serde_with::{DeserializeAs, SerializeAs};

/// Serializes any `CanonicalSerialize` object as compressed canonical bytes.
/// Deserialization performs the full validity (including subgroup) checks.
pub struct ArkObjectBytes;

impl<T: CanonicalSerialize> SerializeAs<T> for ArkObjectBytes {
    fn serialize_as<S>(elem: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut bytes = vec![];
        elem.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_bytes(&bytes)
    }
}

impl<'de, T: CanonicalDeserialize> DeserializeAs<'de, T> for ArkObjectBytes {
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjVisitor<T>(PhantomData<T>);

        impl<'a, T: CanonicalDeserialize> Visitor<'a> for ObjVisitor<T> {
            type Value = T;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("expected canonical object bytes")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'a>,
            {
                let mut bytes: Vec<u8> = Vec::with_capacity(seq.size_hint().unwrap_or(48));
                while let Some(b) = seq.next_element()? {
                    bytes.push(b);
                }
                T::deserialize_compressed(bytes.as_slice()).map_err(serde::de::Error::custom)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                T::deserialize_compressed(v).map_err(serde::de::Error::custom)
            }
        }
        deserializer.deserialize_bytes(ObjVisitor::<T>(PhantomData))
    }
}
