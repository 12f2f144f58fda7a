//! The café add/edit form.

use serde::Deserialize;
use url::Url;
use validator::Validate;

use cuppa_core::{CoffeePrice, SeatsBucket};

use super::FieldErrors;
use crate::models::{Cafe, CafeDraft};

/// Raw café form input.
///
/// Checkboxes arrive as `Some("on")` when ticked and are absent otherwise;
/// everything else arrives as text.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CafeForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub map_url: String,
    #[serde(default)]
    pub img_url: String,
    #[validate(length(min = 1, message = "Location is required"))]
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub has_sockets: Option<String>,
    #[serde(default)]
    pub has_wifi: Option<String>,
    #[serde(default)]
    pub can_take_calls: Option<String>,
    #[serde(default)]
    pub has_toilet: Option<String>,
    #[serde(default)]
    pub seats: String,
    #[serde(default)]
    pub coffee_price: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// The two-button delete confirmation form.
///
/// `action` carries which button was pressed: "delete" or "cancel".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteCafeForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Validate raw input and produce the entity patch.
///
/// The coffee price is formatted to its stored "£x.xx" representation here;
/// URL fields are checked for syntactic well-formedness only.
///
/// # Errors
///
/// Returns the per-field messages if any rule fails.
pub fn decode(form: &CafeForm) -> Result<CafeDraft, FieldErrors> {
    let mut errors = FieldErrors::from_validation(form.validate());

    check_url(&mut errors, "map_url", "Map URL", &form.map_url);
    check_url(&mut errors, "img_url", "Image URL", &form.img_url);

    let seats = match form.seats.parse::<SeatsBucket>() {
        Ok(bucket) => Some(bucket),
        Err(_) => {
            errors.insert("seats", "Choose one of the seat ranges");
            None
        }
    };

    let coffee_price = if form.coffee_price.trim().is_empty() {
        errors.insert("coffee_price", "Coffee price is required");
        None
    } else {
        match CoffeePrice::parse(&form.coffee_price) {
            Ok(price) => Some(price),
            Err(e) => {
                errors.insert("coffee_price", e.to_string());
                None
            }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CafeDraft {
        name: form.name.clone(),
        map_url: form.map_url.clone(),
        img_url: form.img_url.clone(),
        location: form.location.clone(),
        has_sockets: form.has_sockets.is_some(),
        has_toilet: form.has_toilet.is_some(),
        has_wifi: form.has_wifi.is_some(),
        can_take_calls: form.can_take_calls.is_some(),
        seats,
        coffee_price,
    })
}

/// Load a café's attributes into form field values for the edit flow.
///
/// The inverse of [`decode`]: the price field gets the plain numeric value
/// with the currency symbol stripped, so decode-after-encode reproduces the
/// entity exactly.
#[must_use]
pub fn encode(cafe: &Cafe) -> CafeForm {
    CafeForm {
        name: cafe.name.clone(),
        map_url: cafe.map_url.clone(),
        img_url: cafe.img_url.clone(),
        location: cafe.location.clone(),
        has_sockets: checkbox(cafe.has_sockets),
        has_wifi: checkbox(cafe.has_wifi),
        can_take_calls: checkbox(cafe.can_take_calls),
        has_toilet: checkbox(cafe.has_toilet),
        seats: cafe
            .seats
            .map(|bucket| bucket.as_str().to_owned())
            .unwrap_or_default(),
        coffee_price: cafe
            .coffee_price
            .map(|price| price.amount())
            .unwrap_or_default(),
        csrf_token: String::new(),
    }
}

fn checkbox(value: bool) -> Option<String> {
    value.then(|| "on".to_owned())
}

fn check_url(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) {
    if value.is_empty() {
        errors.insert(field, format!("{label} is required"));
    } else if Url::parse(value).is_err() {
        errors.insert(field, format!("{label} must be a valid URL"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cuppa_core::CafeId;

    use super::*;

    fn valid_form() -> CafeForm {
        CafeForm {
            name: "Monmouth".to_owned(),
            map_url: "https://maps.example.com/q?borough".to_owned(),
            img_url: "https://img.example.com/cafe.jpg".to_owned(),
            location: "Borough Market, London".to_owned(),
            has_sockets: Some("on".to_owned()),
            has_wifi: None,
            can_take_calls: Some("on".to_owned()),
            has_toilet: Some("on".to_owned()),
            seats: "10-20".to_owned(),
            coffee_price: "2.75".to_owned(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn test_decode_valid_form() {
        let draft = decode(&valid_form()).unwrap();
        assert_eq!(draft.name, "Monmouth");
        assert!(draft.has_sockets);
        assert!(!draft.has_wifi);
        assert_eq!(draft.seats, Some(SeatsBucket::TenToTwenty));
        assert_eq!(draft.coffee_price.unwrap().to_string(), "£2.75");
    }

    #[test]
    fn test_decode_empty_submission_fails_every_required_field() {
        let errors = decode(&CafeForm::default()).unwrap_err();
        for field in ["name", "map_url", "img_url", "location", "seats", "coffee_price"] {
            assert!(errors.field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_decode_rejects_malformed_url() {
        let mut form = valid_form();
        form.map_url = "not a url".to_owned();
        let errors = decode(&form).unwrap_err();
        assert_eq!(errors.field("map_url"), Some("Map URL must be a valid URL"));
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let mut form = valid_form();
        form.coffee_price = "-2.00".to_owned();
        let errors = decode(&form).unwrap_err();
        assert_eq!(errors.field("coffee_price"), Some("price must be at least 0"));
    }

    #[test]
    fn test_decode_rejects_unknown_seat_range() {
        let mut form = valid_form();
        form.seats = "lots".to_owned();
        let errors = decode(&form).unwrap_err();
        assert!(errors.field("seats").is_some());
    }

    #[test]
    fn test_encode_then_decode_reproduces_entity() {
        let cafe = Cafe {
            id: CafeId::new(1),
            name: "Monmouth".to_owned(),
            map_url: "https://maps.example.com/q?borough".to_owned(),
            img_url: "https://img.example.com/cafe.jpg".to_owned(),
            location: "Borough Market, London".to_owned(),
            has_sockets: true,
            has_toilet: false,
            has_wifi: true,
            can_take_calls: false,
            seats: Some(SeatsBucket::FiftyPlus),
            coffee_price: Some(CoffeePrice::parse("3.05").unwrap()),
        };

        let form = encode(&cafe);
        assert_eq!(form.coffee_price, "3.05");
        assert_eq!(form.seats, "50+");

        let draft = decode(&form).unwrap();
        assert_eq!(draft.name, cafe.name);
        assert_eq!(draft.map_url, cafe.map_url);
        assert_eq!(draft.img_url, cafe.img_url);
        assert_eq!(draft.location, cafe.location);
        assert_eq!(draft.has_sockets, cafe.has_sockets);
        assert_eq!(draft.has_toilet, cafe.has_toilet);
        assert_eq!(draft.has_wifi, cafe.has_wifi);
        assert_eq!(draft.can_take_calls, cafe.can_take_calls);
        assert_eq!(draft.seats, cafe.seats);
        assert_eq!(draft.coffee_price, cafe.coffee_price);
    }
}
