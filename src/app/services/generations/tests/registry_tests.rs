//! Tests for the generation registry

use crate::Error;
use crate::app::services::generations::registry;

#[test]
fn test_supported_span() {
    let registry = registry();

    assert_eq!(registry.first_year(), 2005);
    assert_eq!(registry.last_year(), 2021);
    assert_eq!(registry.years().count(), 17);
    assert!(registry.years().zip(registry.years().skip(1)).all(|(a, b)| a < b));
}

#[test]
fn test_generation_boundaries() {
    let registry = registry();

    assert_eq!(registry.reader_for(2005).unwrap().name(), "baac_2005");
    assert_eq!(registry.reader_for(2018).unwrap().name(), "baac_2005");
    assert_eq!(registry.reader_for(2019).unwrap().name(), "baac_2019");
    assert_eq!(registry.reader_for(2021).unwrap().name(), "baac_2019");
}

#[test]
fn test_unsupported_year() {
    let registry = registry();

    assert!(!registry.supports(2004));
    assert!(matches!(
        registry.reader_for(2022),
        Err(Error::UnsupportedYear { year: 2022 })
    ));
}
