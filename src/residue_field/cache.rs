use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Deserializer};
use tracing::{event, instrument, Level};

use crate::error::ConfigurationError;
use crate::ideal::ResidueIdeal;
use crate::ring::*;
use crate::rings::finite_field::FiniteFieldImplementation;

use super::{ResidueField, ResidueFieldBase, ResidueFieldData, ResidueFieldOptions};
use super::reduction::ReductionMap;

type CacheKey<P> = (P, String, FiniteFieldImplementation);

///
/// Creates residue fields, and returns the same (i.e. pointer-equal) field whenever it
/// is asked for a residue field with the same ideal, name of the generator and finite
/// field implementation. Defaults are resolved before the lookup, so leaving out the
/// name gives the same field as explicitly passing the default name.
///
/// Fields are never evicted from the cache. It is safe to use the cache from multiple
/// threads, and concurrent requests for the same field result in a single construction.
///
/// # Example
/// ```rust
/// # use std::sync::Arc;
/// # use residue_fields::ideal::integer::*;
/// # use residue_fields::residue_field::*;
/// # use residue_fields::residue_field::cache::*;
/// let cache = ResidueFieldCache::new();
/// let F = cache.get_or_create(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default()).unwrap();
/// let G = cache.get_or_create(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default().with_name("xbar")).unwrap();
/// assert!(Arc::ptr_eq(&F, &G));
/// ```
///
pub struct ResidueFieldCache<P: ResidueIdeal> {
    fields: Mutex<HashMap<CacheKey<P>, Arc<ResidueField<P>>>>
}

impl<P: ResidueIdeal> ResidueFieldCache<P> {

    pub fn new() -> Self {
        ResidueFieldCache { fields: Mutex::new(HashMap::new()) }
    }

    ///
    /// Returns the residue field of `ideal`, creating it if it is not yet in the cache.
    ///
    /// If `options.check` is set, the ideal is checked on every call, even if the field
    /// was found in the cache.
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn get_or_create(&self, ideal: P, options: &ResidueFieldOptions) -> Result<Arc<ResidueField<P>>, ConfigurationError> {
        options.validate(&ideal)?;
        let (name, implementation) = options.resolve(&ideal)?;
        let key = (ideal, name, implementation);
        let mut fields = self.fields.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(field) = fields.get(&key) {
            event!(Level::DEBUG, implementation = implementation.tag(), "residue field found in cache");
            return Ok(field.clone());
        }
        let field = Arc::new(RingValue::from(ResidueFieldBase::create(key.0.clone(), key.1.clone(), implementation)));
        fields.insert(key, field.clone());
        return Ok(field);
    }

    pub fn len(&self) -> usize {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Deserializes the construction arguments of a residue field, as written by the
    /// [`serde::Serialize`] implementation of [`ResidueFieldBase`], and returns the
    /// corresponding field from this cache.
    ///
    pub fn deserialize_field<'de, D>(&self, deserializer: D) -> Result<Arc<ResidueField<P>>, D::Error>
        where D: Deserializer<'de>
    {
        let data = ResidueFieldData::<P>::deserialize(deserializer)?;
        let options = ResidueFieldOptions {
            names: Some(data.name),
            check: true,
            implementation: Some(data.implementation.tag().to_owned())
        };
        self.get_or_create(data.ideal, &options).map_err(serde::de::Error::custom)
    }

    ///
    /// Deserializes a [`ReductionMap`], whose codomain is taken from this cache.
    ///
    pub fn deserialize_reduction_map<'de, D>(&self, deserializer: D) -> Result<ReductionMap<P, Arc<ResidueField<P>>>, D::Error>
        where D: Deserializer<'de>
    {
        self.deserialize_field(deserializer).map(ReductionMap::new)
    }
}

impl<P: ResidueIdeal> Default for ResidueFieldCache<P> {

    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
use crate::ideal::integer::IntegerPrimeIdeal;
#[cfg(test)]
use crate::ideal::number_field::NumberFieldPrimeIdeal;
#[cfg(test)]
use crate::rings::extension::number_field::NumberField;
#[cfg(test)]
use crate::rings::rational::RationalField;
#[cfg(test)]
use crate::residue_field::ResidueFieldStore;

#[test]
fn test_identity() {
    let cache = ResidueFieldCache::new();
    let options = ResidueFieldOptions::default();
    let F = cache.get_or_create(IntegerPrimeIdeal::new(17), &options).unwrap();
    let G = cache.get_or_create(IntegerPrimeIdeal::new(17), &options).unwrap();
    assert!(Arc::ptr_eq(&F, &G));
    let H = cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_name("xbar").with_implementation("modn")).unwrap();
    assert!(Arc::ptr_eq(&F, &H));
    assert_eq!(1, cache.len());

    let F_named = cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_name("y")).unwrap();
    assert!(!Arc::ptr_eq(&F, &F_named));
    let F_zech = cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_implementation("givaro")).unwrap();
    assert!(!Arc::ptr_eq(&F, &F_zech));
    let F_other = cache.get_or_create(IntegerPrimeIdeal::new(19), &options).unwrap();
    assert!(!Arc::ptr_eq(&F, &F_other));
    assert_eq!(4, cache.len());
}

#[test]
fn test_errors_are_not_cached() {
    let cache = ResidueFieldCache::new();
    let options = ResidueFieldOptions::default();
    assert!(matches!(cache.get_or_create(IntegerPrimeIdeal::new(91), &options), Err(ConfigurationError::NotPrime { .. })));
    assert!(cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_implementation("ntl")).is_err());
    assert!(cache.is_empty());

    // the ideal is checked before the implementation tag is parsed
    assert!(matches!(
        cache.get_or_create(IntegerPrimeIdeal::new(91), &options.clone().with_implementation("flint")),
        Err(ConfigurationError::NotPrime { .. })
    ));
    assert!(matches!(
        ResidueField::new(IntegerPrimeIdeal::new(91), &options.clone().with_implementation("flint")),
        Err(ConfigurationError::NotPrime { .. })
    ));
    assert!(matches!(
        cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_implementation("flint")),
        Err(ConfigurationError::UnknownImplementation(_))
    ));
    assert!(cache.is_empty());

    // checking is not part of the identity of the field
    let F = cache.get_or_create(IntegerPrimeIdeal::new(17), &options.clone().with_check(false)).unwrap();
    let G = cache.get_or_create(IntegerPrimeIdeal::new(17), &options).unwrap();
    assert!(Arc::ptr_eq(&F, &G));
}

#[test]
fn test_concurrent_access() {
    let cache = ResidueFieldCache::new();
    let K = NumberField::new(&[-7, 0, 0, 1], "a");
    let P = NumberFieldPrimeIdeal::new(K, 29, &[24, 16, 1]).unwrap();
    let fields = std::thread::scope(|scope| {
        let handles = (0..8).map(|_| scope.spawn(|| cache.get_or_create(P.clone(), &ResidueFieldOptions::default()).unwrap())).collect::<Vec<_>>();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
    });
    assert!(fields.iter().all(|F| Arc::ptr_eq(F, &fields[0])));
    assert_eq!(1, cache.len());
}

#[test]
fn test_deserialize() {
    let cache = ResidueFieldCache::new();
    let F = cache.get_or_create(IntegerPrimeIdeal::new(17), &ResidueFieldOptions::default()).unwrap();
    let json = serde_json::to_string(F.get_ring()).unwrap();
    assert_eq!(r#"{"ideal":17,"name":"xbar","implementation":"modn"}"#, json);

    let G = cache.deserialize_field(&mut serde_json::Deserializer::from_str(&json)).unwrap();
    assert!(Arc::ptr_eq(&F, &G));

    let reduction = cache.deserialize_reduction_map(&mut serde_json::Deserializer::from_str(&json)).unwrap();
    assert!(Arc::ptr_eq(&F, reduction.codomain()));
    assert_el_eq!(&*F, F.from_int(10), reduction.map(&RationalField::RING.from_fraction(3, 2)).unwrap());
    assert_el_eq!(&*F, F.one(), (&*F).gen());

    assert!(cache.deserialize_field(&mut serde_json::Deserializer::from_str(r#"{"ideal":17,"name":"xbar","implementation":"ntl"}"#)).is_err());
    assert!(cache.deserialize_field(&mut serde_json::Deserializer::from_str(r#"{"ideal":91,"name":"xbar","implementation":"modn"}"#)).is_err());
}
