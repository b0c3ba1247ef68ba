use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use event_catalog::{Event, EventBase, EventDetails, ValidationError};

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z0-9 .,:/'-]{0,40}")
}

fn timestamp() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    // 1970..2100, с точностью до секунды
    proptest::option::of((0i64..4_102_444_800).prop_filter_map("in range", |secs| {
        DateTime::from_timestamp(secs, 0)
    }))
}

prop_compose! {
    fn any_event()(
        id in any::<i64>(),
        name in "[A-Za-z0-9 ]{1,30}",
        texts in prop::array::uniform6(text()),
        start_date in timestamp(),
        end_date in timestamp(),
        lat in -90.0f64..=90.0,
        long in -180.0f64..=180.0,
    ) -> Event {
        let [description, url, image, venue, address, organizer] = texts;
        Event {
            id,
            name,
            description,
            url,
            image,
            start_date,
            end_date,
            venue,
            address,
            lat,
            long,
            organizer,
        }
    }
}

fn details_eq_event(details: &EventDetails, event: &Event) -> bool {
    details.base.id == event.id
        && details.base.lat == event.lat
        && details.base.long == event.long
        && details.name == event.name
        && details.description == event.description
        && details.start_date == event.start_date
        && details.end_date == event.end_date
        && details.url == event.url
        && details.image == event.image
        && details.venue == event.venue
        && details.address == event.address
        && details.organizer == event.organizer
}

proptest! {
    #[test]
    fn details_from_entity_preserve_every_field(event in any_event()) {
        let details = EventDetails::try_from(&event).unwrap();
        prop_assert!(details_eq_event(&details, &event));
    }

    #[test]
    fn details_from_entity_attributes_preserve_every_field(event in any_event()) {
        let attributes = serde_json::to_value(&event).unwrap();
        let details = EventDetails::try_from(&attributes).unwrap();
        prop_assert!(details_eq_event(&details, &event));
    }

    #[test]
    fn serialized_details_validate_back_to_themselves(event in any_event()) {
        let details = EventDetails::try_from(event).unwrap();
        let wire = serde_json::to_value(&details).unwrap();
        prop_assert_eq!(EventDetails::try_from(wire).unwrap(), details);
    }

    #[test]
    fn each_required_field_is_enforced(
        event in any_event(),
        dropped in prop::sample::select(vec!["id", "name", "lat", "long"]),
    ) {
        let mut attributes = serde_json::to_value(&event).unwrap();
        attributes.as_object_mut().unwrap().remove(dropped);

        let err = EventDetails::try_from(&attributes).unwrap_err();
        prop_assert_eq!(err.fields(), vec![dropped]);

        let base = EventBase::try_from(&attributes);
        if dropped == "name" {
            prop_assert_eq!(base.unwrap(), EventBase::try_from(&event).unwrap());
        } else {
            prop_assert!(base.unwrap_err().mentions(dropped));
        }
    }

    #[test]
    fn each_optional_field_may_be_omitted(
        event in any_event(),
        dropped in prop::sample::select(vec![
            "description", "url", "image", "startDate", "endDate", "venue", "address", "organizer",
        ]),
    ) {
        let mut attributes = serde_json::to_value(&event).unwrap();
        attributes.as_object_mut().unwrap().remove(dropped);

        let details = EventDetails::try_from(&attributes).unwrap();
        let wire = serde_json::to_value(&details).unwrap();
        prop_assert_eq!(&wire[dropped], &Value::Null);
    }
}

#[test]
fn fair_example_fills_nulls() {
    let details =
        EventDetails::from_json(r#"{"id": 1, "name": "Fair", "lat": 40.7, "long": -74.0}"#).unwrap();

    assert_eq!(
        serde_json::to_value(&details).unwrap(),
        json!({
            "id": 1,
            "name": "Fair",
            "description": null,
            "startDate": null,
            "endDate": null,
            "url": null,
            "image": null,
            "venue": null,
            "address": null,
            "organizer": null,
            "lat": 40.7,
            "long": -74.0
        })
    );
}

#[test]
fn missing_lat_names_lat() {
    let err = EventDetails::from_json(r#"{"id": 1, "name": "Fair", "long": -74.0}"#).unwrap_err();
    assert!(matches!(err, ValidationError::Fields(_)));
    assert_eq!(err.fields(), vec!["lat"]);

    let err = EventBase::from_json(r#"{"id": 1, "long": -74.0}"#).unwrap_err();
    assert_eq!(err.fields(), vec!["lat"]);
}

#[test]
fn wire_keys_match_storage_columns() {
    let details = EventDetails::try_from(Event {
        id: 1,
        name: "Fair".to_string(),
        description: None,
        url: None,
        image: None,
        start_date: Some(Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap()),
        end_date: None,
        venue: None,
        address: None,
        lat: 0.0,
        long: 0.0,
        organizer: None,
    })
    .unwrap();

    let wire = serde_json::to_value(&details).unwrap();
    let mut keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
    let mut columns = Event::COLUMNS.to_vec();
    keys.sort_unstable();
    columns.sort_unstable();

    assert_eq!(keys, columns);
    assert_eq!(wire["startDate"], "2025-09-01T10:00:00Z");
}

#[test]
fn entity_column_list_is_stable() {
    assert_eq!(Event::TABLE, "events");
    assert_eq!(Event::COLUMNS.len(), 12);
}

#[test]
fn entity_json_feeds_the_transfer_schema() {
    let row = r#"{
        "id": 12,
        "name": "Jazz in the Park",
        "description": null,
        "url": "https://example.org/jazz",
        "image": null,
        "startDate": "2025-08-09T18:30:00+02:00",
        "endDate": null,
        "venue": "Bandshell",
        "address": null,
        "lat": 52.52,
        "long": 13.405,
        "organizer": "City Arts"
    }"#;

    let event: Event = serde_json::from_str(row).unwrap();
    assert_eq!(
        event.start_date,
        Some(Utc.with_ymd_and_hms(2025, 8, 9, 16, 30, 0).unwrap())
    );

    let details = EventDetails::try_from(&event).unwrap();
    assert!(details_eq_event(&details, &event));
    assert_eq!(EventDetails::from_json(row).unwrap(), details);
}

#[test]
fn non_finite_entity_coordinates_are_rejected() {
    let event: Event = serde_json::from_value(json!({
        "id": 3, "name": "Broken row", "lat": 0.0, "long": 0.0
    }))
    .unwrap();
    let broken = Event { lat: f64::NAN, ..event };

    let err = EventDetails::try_from(&broken).unwrap_err();
    assert_eq!(err.fields(), vec!["lat"]);
    assert!(EventBase::try_from(broken).unwrap_err().mentions("lat"));
}
