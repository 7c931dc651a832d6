use farmease_api::{
    entity::{cart_items::line_total, farmer_products::derive_out_of_stock, schemes},
    media::{PRODUCT_IMAGES, sanitize_filename, upload_path},
    password::{hash_if_needed, is_hashed, make_password, verify_password},
    routes::params::Pagination,
    validation::{ValidationError, validate_non_negative, validate_phone},
};
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn phone_numbers_need_ten_digits_starting_with_six_to_nine() {
    assert!(validate_phone("9876543210").is_ok());
    assert!(validate_phone("6000000000").is_ok());
    assert_eq!(validate_phone("5876543210"), Err(ValidationError::InvalidPhone));
    assert_eq!(validate_phone("987654321"), Err(ValidationError::InvalidPhone));
    assert_eq!(validate_phone("98765432101"), Err(ValidationError::InvalidPhone));
    assert_eq!(validate_phone("98765x3210"), Err(ValidationError::InvalidPhone));
    assert_eq!(
        ValidationError::InvalidPhone.to_string(),
        "Please enter a valid contact number"
    );
}

#[test]
fn negative_amounts_are_rejected() {
    assert!(validate_non_negative("price", 0.0).is_ok());
    assert_eq!(
        validate_non_negative("price", -1.5),
        Err(ValidationError::Negative { field: "price" })
    );
}

#[test]
fn passwords_are_hashed_once_and_verify() {
    let hashed = make_password("s3cret").expect("hash");
    assert!(hashed.starts_with("argon2$argon2id$"));
    assert!(is_hashed(&hashed));
    assert!(verify_password("s3cret", &hashed));
    assert!(!verify_password("wrong", &hashed));

    // Already hashed values are kept as they are.
    assert_eq!(hash_if_needed(&hashed).expect("hash"), None);
    assert!(hash_if_needed("pbkdf2_sha256$260000$salt$hash").expect("hash").is_none());
    assert!(hash_if_needed("bcrypt$$2b$12$abc").expect("hash").is_none());

    let fresh = hash_if_needed("plain").expect("hash").expect("hashed");
    assert!(verify_password("plain", &fresh));
}

#[test]
fn legacy_hashes_do_not_verify() {
    assert!(!verify_password("s3cret", "pbkdf2_sha256$260000$salt$hash"));
    assert!(!verify_password("s3cret", "argon2garbage"));
}

#[test]
fn stock_flag_follows_quantity() {
    assert!(derive_out_of_stock(Some(0), false));
    assert!(!derive_out_of_stock(Some(5), true));
    assert!(derive_out_of_stock(Some(-1), true));
    assert!(!derive_out_of_stock(Some(-1), false));
    assert!(derive_out_of_stock(None, true));
}

fn scheme(start: Option<i32>, end: Option<i32>) -> schemes::Model {
    schemes::Model {
        id: Uuid::new_v4(),
        created_by: None,
        scheme_name: Some("Test".into()),
        start_age: start,
        end_age: end,
        description: None,
        link: None,
        timestamp: None,
    }
}

#[test]
fn scheme_age_range_is_inclusive() {
    let s = scheme(Some(5), Some(12));
    assert!(s.contains_age(5));
    assert!(s.contains_age(10));
    assert!(s.contains_age(12));
    assert!(!s.contains_age(13));
    assert!(!s.contains_age(4));

    assert!(!scheme(None, Some(12)).contains_age(10));
    assert!(!scheme(Some(12), Some(5)).contains_age(8));
}

#[test]
fn line_total_is_price_times_quantity() {
    assert_eq!(line_total(50.0, 3).expect("total"), dec!(150.00));
    assert_eq!(line_total(19.99, 2).expect("total"), dec!(39.98));
    assert_eq!(line_total(12.5, 0).expect("total"), dec!(0));
}

#[test]
fn uploads_get_a_safe_unique_path() {
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("my photo (1).jpg"), "myphoto1.jpg");
    assert_eq!(sanitize_filename("..."), "upload");

    let a = upload_path(PRODUCT_IMAGES, "tomato.png");
    let b = upload_path(PRODUCT_IMAGES, "tomato.png");
    assert!(a.starts_with("product_images/"));
    assert!(a.ends_with("-tomato.png"));
    assert_ne!(a, b);

    let long = format!("{}.jpeg", "x".repeat(200));
    let path = upload_path(PRODUCT_IMAGES, &long);
    assert_eq!(path.len(), 100);
    assert!(path.ends_with(".jpeg"));
}

#[test]
fn pagination_is_clamped() {
    let p = Pagination {
        page: Some(0),
        per_page: Some(500),
    };
    assert_eq!(p.normalize(), (1, 100, 0));

    let p = Pagination {
        page: Some(3),
        per_page: None,
    };
    assert_eq!(p.normalize(), (3, 20, 40));
}
