use core_proc_macros::ApiResource;

#[derive(ApiResource)]
#[allow(dead_code)]
pub struct Offer {
    id: String,
}

#[derive(ApiResource)]
#[api_resource(collection = "people", url = "/users", label = "User", tag = "Accounts")]
#[allow(dead_code)]
pub struct Person {
    id: String,
}

#[test]
fn test_derived_defaults() {
    assert_eq!(Offer::COLLECTION, "offers");
    assert_eq!(Offer::URL, "/offers");
    assert_eq!(Offer::LABEL, "Offer");
    assert_eq!(Offer::TAG, "Offers");
}

#[test]
fn test_custom_attributes() {
    assert_eq!(Person::COLLECTION, "people");
    assert_eq!(Person::URL, "/users");
    assert_eq!(Person::LABEL, "User");
    assert_eq!(Person::TAG, "Accounts");
}
