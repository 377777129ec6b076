//! Unit tests for the message table

use core_types::messages::{format, template};

#[test]
fn test_every_linker_key_has_template() {
    for key in [
        "not.defined",
        "property.not.writable",
        "object.non.extensible",
        "property.has.no.setter",
        "not.a.function",
        "cant.delete.property",
    ] {
        assert!(template(key).is_some(), "missing template for {}", key);
    }
}

#[test]
fn test_missing_arguments_leave_placeholders() {
    assert_eq!(
        format("property.not.writable", &["k"]),
        "\"k\" is not a writable property of {1}"
    );
}

#[test]
fn test_extra_arguments_ignored() {
    assert_eq!(format("not.defined", &["x", "unused"]), "\"x\" is not defined");
}

#[test]
fn test_delete_message() {
    assert_eq!(
        format("cant.delete.property", &["length", "Array"]),
        "Cannot delete property \"length\" of Array"
    );
}
